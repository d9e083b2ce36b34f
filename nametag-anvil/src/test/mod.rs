mod entity;

use std::io::Read;

/// Minimal NBT writer for fixtures: a chunk compound holding
/// `Level.Entities` with the given entity elements. Kept deliberately
/// dumb; the decoder's own crate owns the thorough NBT test tooling.
pub(crate) struct EntityFixture {
    pub id: Option<&'static str>,
    pub custom_name: Option<&'static str>,
    pub pos: Option<Vec<f64>>,
}

pub(crate) fn chunk_nbt(entities: &[EntityFixture]) -> Vec<u8> {
    fn str_payload(out: &mut Vec<u8>, s: &str) {
        out.extend_from_slice(&(s.len() as u16).to_be_bytes());
        out.extend_from_slice(s.as_bytes());
    }
    fn named(out: &mut Vec<u8>, tag: u8, name: &str) {
        out.push(tag);
        str_payload(out, name);
    }

    let mut out = Vec::new();
    named(&mut out, 10, ""); // root compound
    named(&mut out, 10, "Level");
    named(&mut out, 9, "Entities");
    out.push(10); // element tag: compound
    out.extend_from_slice(&(entities.len() as i32).to_be_bytes());

    for entity in entities {
        if let Some(id) = entity.id {
            named(&mut out, 8, "id");
            str_payload(&mut out, id);
        }
        if let Some(name) = entity.custom_name {
            named(&mut out, 8, "CustomName");
            str_payload(&mut out, name);
        }
        if let Some(pos) = &entity.pos {
            named(&mut out, 9, "Pos");
            out.push(6); // element tag: double
            out.extend_from_slice(&(pos.len() as i32).to_be_bytes());
            for p in pos {
                out.extend_from_slice(&p.to_be_bytes());
            }
        }
        out.push(0); // end of entity compound
    }

    out.push(0); // end of Level
    out.push(0); // end of root
    out
}

pub(crate) fn gzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::GzEncoder::new(data, flate2::Compression::fast())
        .read_to_end(&mut out)
        .unwrap();
    out
}

pub(crate) fn zlib(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    flate2::read::ZlibEncoder::new(data, flate2::Compression::fast())
        .read_to_end(&mut out)
        .unwrap();
    out
}
