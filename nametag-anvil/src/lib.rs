//! For handling Minecraft's region container format, Anvil.
//!
//! A region file holds up to 32x32 chunks, each stored as an independently
//! compressed NBT tree in 4096-byte sectors. [`Region`] can be given any
//! `Read + Seek` type, eg a file, in order to extract sector payloads, and
//! [`named_entities`]/[`scan_region`] pull named-entity records out of
//! decoded chunks.
//!
//! Region files in the wild are frequently corrupt in places. Everything
//! here fails per sector: one bad sector yields an error for that sector
//! only and scanning carries on with the rest of the grid.

mod dimension;
mod entity;
mod files;
mod region;

pub use dimension::*;
pub use entity::*;
pub use files::*;
pub use region::*;

#[cfg(test)]
mod test;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Coordinates outside the 32x32 sector grid.
    InvalidOffset(isize, isize),
    /// A compression scheme byte other than gzip (1) or zlib (2).
    UnknownCompression(u8),
    /// The compressed stream itself was malformed or truncated.
    Decompression(std::io::Error),
    /// The sector table or a sector payload contradicts the file contents.
    CorruptSector(String),
    /// The sector decompressed fine but its NBT tree did not decode.
    Nbt(nametag_nbt::error::Error),
    /// A named entity element is missing a required field, or the field
    /// has the wrong shape.
    MissingEntityField(&'static str),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<nametag_nbt::error::Error> for Error {
    fn from(err: nametag_nbt::error::Error) -> Error {
        Error::Nbt(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => f.write_fmt(format_args!("io error: {:?}", e)),
            Error::InvalidOffset(x, z) => {
                f.write_fmt(format_args!("invalid offset: x = {}, z = {}", x, z))
            }
            Error::UnknownCompression(scheme) => {
                f.write_fmt(format_args!("unknown compression scheme: {}", scheme))
            }
            Error::Decompression(e) => {
                f.write_fmt(format_args!("could not decompress sector: {}", e))
            }
            Error::CorruptSector(msg) => f.write_fmt(format_args!("corrupt sector: {}", msg)),
            Error::Nbt(e) => f.write_fmt(format_args!("could not decode sector nbt: {}", e)),
            Error::MissingEntityField(field) => {
                f.write_fmt(format_args!("entity missing required field: {}", field))
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
use std::io::Cursor;

/// Builds synthetic region images for tests. Does not guarantee the
/// result is a valid region file; broken images are useful for testing.
#[cfg(test)]
pub(crate) struct Builder {
    locations: Vec<u8>,
    timestamps: Vec<u8>,
    payload: Vec<u8>,
}

#[cfg(test)]
impl Builder {
    pub fn new() -> Self {
        Self {
            locations: Vec::new(),
            timestamps: Vec::new(),
            payload: Vec::new(),
        }
    }

    /// Append one location table entry: 3-byte sector offset, 1-byte
    /// sector count. Entries fill the grid in table order.
    pub fn location(mut self, offset: u32, sectors: u8) -> Self {
        self.locations.extend_from_slice(&offset.to_be_bytes()[1..4]);
        self.locations.push(sectors);
        self
    }

    pub fn timestamp(mut self, epoch: u32) -> Self {
        self.timestamps.extend_from_slice(&epoch.to_be_bytes());
        self
    }

    /// Append one sector-aligned payload: 4-byte length, scheme byte,
    /// compressed bytes, zero padding to the sector boundary.
    pub fn sector(mut self, scheme: u8, compressed: &[u8]) -> Self {
        self = self.raw_sector_data(scheme, compressed);
        let sectors = self.payload.len().div_ceil(SECTOR_SIZE);
        self.payload.resize(sectors * SECTOR_SIZE, 0);
        self
    }

    /// As `sector` but without padding, so the image ends mid-sector.
    pub fn raw_sector_data(mut self, scheme: u8, compressed: &[u8]) -> Self {
        let len = (compressed.len() + 1) as u32;
        self.payload.extend_from_slice(&len.to_be_bytes());
        self.payload.push(scheme);
        self.payload.extend_from_slice(compressed);
        self
    }

    /// Append a length prefix with no data behind it.
    pub fn truncated_sector(mut self, claimed_len: u32) -> Self {
        self.payload.extend_from_slice(&claimed_len.to_be_bytes());
        self
    }

    pub fn build(self) -> Cursor<Vec<u8>> {
        let mut image = self.locations;
        image.resize(SECTOR_SIZE, 0);
        let mut timestamps = self.timestamps;
        timestamps.resize(SECTOR_SIZE, 0);
        image.extend_from_slice(&timestamps);
        image.extend_from_slice(&self.payload);
        Cursor::new(image)
    }

    /// Build only the header, without the payload area.
    pub fn build_header_only(self) -> Cursor<Vec<u8>> {
        let mut image = self.locations;
        image.resize(SECTOR_SIZE, 0);
        let mut timestamps = self.timestamps;
        timestamps.resize(SECTOR_SIZE, 0);
        image.extend_from_slice(&timestamps);
        Cursor::new(image)
    }
}
