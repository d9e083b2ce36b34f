//! Extraction of named-entity records from decoded chunk trees.
//!
//! This layer is the only one that knows anything about the shape of
//! chunk data. The decoder below it is schema-free; here we look up the
//! `Level.Entities` path and project each element down to the handful of
//! fields we report on.

use std::io::{Read, Seek};

use log::warn;
use nametag_nbt::Value;

use crate::region::{decoder, Region, GRID};
use crate::{Error, Result};

/// The identity, display name and position of one named entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub id: String,
    pub custom_name: String,
    pub pos: [f64; 3],
}

/// Collect the named entities of one decoded chunk.
///
/// Chunks without a `Level.Entities` list yield nothing; most chunks
/// legitimately have no entities at all. Entities whose `CustomName` is
/// absent or empty are not named and yield nothing. An element that has a
/// name but is missing `id` or a well-formed `Pos` is skipped with a
/// warning, without affecting its siblings.
pub fn named_entities(chunk: &Value) -> Vec<EntityRecord> {
    let entities = match chunk.get("Level").and_then(|level| level.get("Entities")) {
        Some(Value::List(entities)) => entities,
        _ => return Vec::new(),
    };

    let mut records = Vec::new();
    for entity in entities {
        let custom_name = match entity.get("CustomName").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };

        match entity_record(entity, custom_name) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping named entity {:?}: {}", custom_name, e),
        }
    }
    records
}

fn entity_record(entity: &Value, custom_name: &str) -> Result<EntityRecord> {
    let id = entity
        .get("id")
        .and_then(Value::as_str)
        .ok_or(Error::MissingEntityField("id"))?;

    let pos = match entity.get("Pos") {
        Some(Value::List(pos)) if pos.len() == 3 => pos,
        _ => return Err(Error::MissingEntityField("Pos")),
    };

    // Positions are doubles in practice, but narrower numeric kinds are
    // widened rather than rejected.
    let mut coords = [0f64; 3];
    for (coord, value) in coords.iter_mut().zip(pos) {
        *coord = value.as_f64().ok_or(Error::MissingEntityField("Pos"))?;
    }

    Ok(EntityRecord {
        id: id.to_owned(),
        custom_name: custom_name.to_owned(),
        pos: coords,
    })
}

/// Lazily iterate every named entity in a region.
///
/// Sectors are visited in grid order, decoded one at a time, and their
/// records handed out before the next sector is touched. A sector that
/// fails to read, decompress or decode is reported as a warning and
/// skipped; the scan always covers the rest of the grid. Call again for a
/// fresh pass over the same region.
pub fn scan_region<S: Read + Seek>(region: &mut Region<S>) -> NamedEntityScan<'_, S> {
    NamedEntityScan {
        region,
        next_index: 0,
        pending: Vec::new().into_iter(),
    }
}

/// Iterator over the named entities of one region, see [`scan_region`].
pub struct NamedEntityScan<'a, S> {
    region: &'a mut Region<S>,
    next_index: usize,
    pending: std::vec::IntoIter<EntityRecord>,
}

impl<S: Read + Seek> Iterator for NamedEntityScan<'_, S> {
    type Item = EntityRecord;

    fn next(&mut self) -> Option<EntityRecord> {
        loop {
            if let Some(record) = self.pending.next() {
                return Some(record);
            }

            if self.next_index >= GRID * GRID {
                return None;
            }
            let (x, z) = (self.next_index / GRID, self.next_index % GRID);
            self.next_index += 1;

            if !self.region.exists_sector(x, z) {
                continue;
            }

            match chunk_entities(self.region, x, z) {
                Ok(records) => self.pending = records.into_iter(),
                Err(e) => warn!("skipping sector ({}, {}): {}", x, z, e),
            }
        }
    }
}

fn chunk_entities<S: Read + Seek>(
    region: &mut Region<S>,
    x: usize,
    z: usize,
) -> Result<Vec<EntityRecord>> {
    let payload = region.read_sector(x, z)?;
    // Decode straight out of the decompressor; the plaintext is never
    // materialized as a whole buffer.
    let chunk = Value::from_reader(decoder(&payload)?)?;
    Ok(named_entities(&chunk))
}
