//! nametag-nbt decodes NBT data from *Minecraft: Java Edition* without any
//! external schema. The format is self-describing: every value carries a
//! type tag, compounds are named-field trees terminated by an explicit end
//! tag, and lists are homogeneous sequences with a declared element tag.
//!
//! * For a full owned tree, see [`Value`] and [`Value::from_bytes`].
//! * For pull-parsing shallow events from a `Read`, see [`stream`].
//!
//! The decoder is written for untrusted input: every read is bounds
//! checked, unknown tags and negative array lengths are errors rather than
//! panics, and nesting depth is tracked on an explicit heap stack so that
//! adversarial input cannot overflow the call stack.
//!
//! # Quick example
//!
//! Decode a gzip-compressed player dat file into a [`Value`]:
//!
//! ```no_run
//! use flate2::read::GzDecoder;
//! use nametag_nbt::Value;
//!
//! let file = std::fs::File::open("player.dat").unwrap();
//! let value = Value::from_reader(GzDecoder::new(file)).unwrap();
//! println!("{:#?}", value);
//! ```

pub mod error;
pub mod input;
pub mod stream;

mod value;

pub use value::*;

#[cfg(test)]
mod test;

/// An NBT tag. This does not carry the value or the name of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents an array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of other values, all sharing one declared tag.
    List = 9,
    /// Represents a struct-like structure of named values.
    Compound = 10,
    /// Represents an array of Int (i32).
    IntArray = 11,
    /// Represents an array of Long (i64).
    LongArray = 12,
}

// Written out manually rather than derived: the tags will very rarely
// change and this keeps the crate free of proc-macro dependencies.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
