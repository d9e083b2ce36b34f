//! Bounds-checked input sources for the decoder.
//!
//! Two sources are provided: [`Slice`] for decoding out of a byte buffer,
//! and [`Reader`] for decoding out of any [`std::io::Read`], for example a
//! flate2 decoder that is decompressing lazily as the decoder pulls.

use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

mod private {
    // Only this crate can implement this trait. Other traits can inherit
    // from Sealed in order to prevent other crates from creating
    // implementations.
    pub trait Sealed {}
}

/// A forward-only big-endian reader over some source of bytes.
///
/// Every successful read advances the position by exactly the width
/// consumed. A read that would pass the end of the source fails with
/// [`ErrorKind::UnexpectedEof`][crate::error::ErrorKind::UnexpectedEof]
/// carrying the attempted offset; it never truncates.
pub trait Input: private::Sealed {
    fn read_u8(&mut self) -> Result<u8>;

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Bytes consumed so far.
    fn position(&self) -> u64;

    fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0; 2];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_u16(&buf))
    }

    fn read_i16(&mut self) -> Result<i16> {
        let mut buf = [0; 2];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_i16(&buf))
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_u32(&buf))
    }

    fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_i32(&buf))
    }

    fn read_i64(&mut self) -> Result<i64> {
        let mut buf = [0; 8];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_i64(&buf))
    }

    fn read_f32(&mut self) -> Result<f32> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_f32(&buf))
    }

    fn read_f64(&mut self) -> Result<f64> {
        let mut buf = [0; 8];
        self.read_exact(&mut buf)?;
        Ok(BigEndian::read_f64(&buf))
    }
}

/// Input over an in-memory byte buffer.
pub struct Slice<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Slice<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or_else(|| Error::unexpected_eof(u64::MAX))?;
        if end <= self.data.len() {
            let ret = &self.data[self.pos..end];
            self.pos = end;
            Ok(ret)
        } else {
            Err(Error::unexpected_eof(end as u64))
        }
    }
}

impl private::Sealed for Slice<'_> {}

impl Input for Slice<'_> {
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(self.take(buf.len())?);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }
}

/// Input over any [`std::io::Read`].
pub struct Reader<R: Read> {
    reader: R,
    pos: u64,
}

impl<R: Read> Reader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, pos: 0 }
    }
}

impl<R: Read> private::Sealed for Reader<R> {}

impl<R: Read> Input for Reader<R> {
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0; 1];
        self.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let attempted = self.pos + buf.len() as u64;
        self.reader.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                Error::unexpected_eof(attempted)
            } else {
                Error::bespoke(format!("io error: {}", e))
            }
        })?;
        self.pos = attempted;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos
    }
}
