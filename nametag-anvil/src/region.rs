use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use flate2::read::{GzDecoder, ZlibDecoder};
use num_enum::TryFromPrimitive;

use crate::{Error, Result};

/// The size in bytes of a 'sector' in a region file. Sectors are
/// Minecraft's allocation unit for chunks; a chunk occupies a whole number
/// of sectors, with the exact payload length tracked in the sector header.
pub(crate) const SECTOR_SIZE: usize = 4096;

/// The size of the region file header: the location table followed by the
/// timestamp table, one sector each.
pub(crate) const REGION_HEADER_SIZE: usize = 2 * SECTOR_SIZE;

/// Grid edge of the sector table; a region holds GRID * GRID chunks.
pub(crate) const GRID: usize = 32;

// A location entry's sector count is a single byte, so no valid payload
// can claim more than 255 sectors of data.
const MAX_SECTOR_PAYLOAD: usize = 255 * SECTOR_SIZE;

/// Where a chunk lives inside the region file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLocation {
    /// The offset, in units of 4 KiB sectors, into the region file this
    /// chunk is located at. Offset 0 means the chunk is absent.
    pub offset: u64,

    /// The number of 4 KiB sectors that this chunk occupies.
    pub sectors: u64,
}

/// Compression schemes that sector payloads are compressed with.
///
/// Only the two schemes the vanilla game writes are supported; anything
/// else fails with [`Error::UnknownCompression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum CompressionScheme {
    Gzip = 1,
    Zlib = 2,
}

/// A Minecraft region, read-only.
///
/// The two header tables are read eagerly on open; sector payloads are
/// read from the underlying stream on demand.
pub struct Region<S> {
    stream: S,
    locations: Vec<ChunkLocation>,
    timestamps: Vec<u32>,
}

impl Region<File> {
    /// Open a region file read-only. The file handle is released when the
    /// region is dropped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_stream(File::open(path)?)
    }
}

impl<S> Region<S>
where
    S: Read + Seek,
{
    /// Load a region from an existing stream, assuming a seek to 0 is the
    /// start of the region. Reads the location and timestamp tables; the
    /// payload area stays on the stream until sectors are requested.
    pub fn from_stream(mut stream: S) -> Result<Self> {
        let mut header = [0u8; REGION_HEADER_SIZE];
        stream.seek(SeekFrom::Start(0))?;
        stream.read_exact(&mut header)?;

        let mut locations = Vec::with_capacity(GRID * GRID);
        for entry in header[..SECTOR_SIZE].chunks_exact(4).take(GRID * GRID) {
            let mut offset = 0u64;
            offset |= (entry[0] as u64) << 16;
            offset |= (entry[1] as u64) << 8;
            offset |= entry[2] as u64;
            locations.push(ChunkLocation {
                offset,
                sectors: entry[3] as u64,
            });
        }

        let timestamps = header[SECTOR_SIZE..]
            .chunks_exact(4)
            .take(GRID * GRID)
            .map(BigEndian::read_u32)
            .collect();

        Ok(Self {
            stream,
            locations,
            timestamps,
        })
    }

    /// Whether the sector table has a chunk recorded at x, z. Coordinates
    /// outside the grid have no chunk.
    pub fn exists_sector(&self, x: usize, z: usize) -> bool {
        x < GRID && z < GRID && self.locations[index(x, z)].offset != 0
    }

    /// The location table entry for x, z. Both should be 0..32.
    pub fn location(&self, x: usize, z: usize) -> Result<ChunkLocation> {
        check_coords(x, z)?;
        Ok(self.locations[index(x, z)])
    }

    /// The last-modified timestamp recorded for x, z, seconds since epoch.
    pub fn timestamp(&self, x: usize, z: usize) -> Result<u32> {
        check_coords(x, z)?;
        Ok(self.timestamps[index(x, z)])
    }

    /// Read the raw payload of the sector at chunk coordinates x, z: one
    /// compression scheme byte followed by the compressed chunk data.
    ///
    /// Fails with [`Error::CorruptSector`] if the table has no chunk
    /// there, the entry points inside the header, or the recorded payload
    /// length reaches past the end of the file.
    pub fn read_sector(&mut self, x: usize, z: usize) -> Result<Vec<u8>> {
        check_coords(x, z)?;
        let loc = self.locations[index(x, z)];

        if loc.offset == 0 {
            return Err(Error::CorruptSector(format!(
                "no chunk at ({}, {})",
                x, z
            )));
        }
        if loc.offset * (SECTOR_SIZE as u64) < REGION_HEADER_SIZE as u64 {
            return Err(Error::CorruptSector(format!(
                "chunk ({}, {}) offset {} points into the header",
                x, z, loc.offset
            )));
        }

        self.stream
            .seek(SeekFrom::Start(loc.offset * SECTOR_SIZE as u64))?;

        let mut len = [0u8; 4];
        read_fully(&mut self.stream, &mut len, x, z)?;
        let len = BigEndian::read_u32(&len) as usize;

        if len == 0 || len > MAX_SECTOR_PAYLOAD {
            return Err(Error::CorruptSector(format!(
                "chunk ({}, {}) claims payload length {}",
                x, z, len
            )));
        }

        let mut payload = vec![0; len];
        read_fully(&mut self.stream, &mut payload, x, z)?;
        Ok(payload)
    }

    /// Read the chunk at x, z and decompress it. The returned bytes are
    /// an uncompressed NBT tree.
    pub fn read_chunk(&mut self, x: usize, z: usize) -> Result<Vec<u8>> {
        let payload = self.read_sector(x, z)?;
        decompress(&payload)
    }

    /// Return the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

/// Wrap a `[scheme][compressed]` sector payload in the matching
/// decompressor. The returned reader inflates lazily as it is pulled
/// from, so a consumer can decode without a full plaintext buffer.
pub fn decoder(payload: &[u8]) -> Result<Box<dyn Read + '_>> {
    let (&scheme, compressed) = payload
        .split_first()
        .ok_or_else(|| Error::CorruptSector("payload has no scheme byte".to_owned()))?;
    let scheme =
        CompressionScheme::try_from(scheme).map_err(|_| Error::UnknownCompression(scheme))?;

    Ok(match scheme {
        CompressionScheme::Gzip => Box::new(GzDecoder::new(compressed)),
        CompressionScheme::Zlib => Box::new(ZlibDecoder::new(compressed)),
    })
}

/// Decompress a whole `[scheme][compressed]` sector payload.
pub fn decompress(payload: &[u8]) -> Result<Vec<u8>> {
    let mut plain = Vec::new();
    decoder(payload)?
        .read_to_end(&mut plain)
        .map_err(Error::Decompression)?;
    Ok(plain)
}

fn check_coords(x: usize, z: usize) -> Result<()> {
    if x >= GRID || z >= GRID {
        return Err(Error::InvalidOffset(x as isize, z as isize));
    }
    Ok(())
}

fn index(x: usize, z: usize) -> usize {
    (x % GRID) + (z % GRID) * GRID
}

fn read_fully<S: Read>(stream: &mut S, buf: &mut [u8], x: usize, z: usize) -> Result<()> {
    stream.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::CorruptSector(format!(
                "chunk ({}, {}) data reaches past the end of the file",
                x, z
            ))
        } else {
            Error::Io(e)
        }
    })
}
