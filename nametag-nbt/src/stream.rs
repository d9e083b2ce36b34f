//! Pull-parsing of NBT data without prior knowledge of the structure.
//!
//! [`Parser`] turns a byte stream into a sequence of shallow [`Event`]s.
//! It tracks open compounds and lists on an explicit heap-allocated stack,
//! so arbitrarily deep nesting in the input cannot exhaust the call stack.

use crate::error::{Error, ErrorKind, Result};
use crate::input::Input;
use crate::Tag;

/// An optional name. Values inside lists carry no name in the binary
/// format, nor does the end of a compound.
pub type Name = Option<String>;

/// A shallow NBT event.
///
/// For every value except compounds and lists this carries the complete
/// payload. A `Compound` or `List` event marks entry into the container;
/// the matching `CompoundEnd`/`ListEnd` marks its end.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Byte(Name, i8),
    Short(Name, i16),
    Int(Name, i32),
    Long(Name, i64),
    Float(Name, f32),
    Double(Name, f64),
    ByteArray(Name, Vec<i8>),
    String(Name, String),
    /// Start of a list: declared element tag and declared count. A count
    /// of zero or less produces an immediate `ListEnd` with no elements.
    List(Name, Tag, i32),
    ListEnd,
    Compound(Name),
    CompoundEnd,
    IntArray(Name, Vec<i32>),
    LongArray(Name, Vec<i64>),
}

enum Layer {
    // remaining element count, already clamped to >= 0.
    List(Tag, i32),
    Compound,
}

/// Parser producing NBT events from any [`Input`]. Does not decompress.
pub struct Parser<In> {
    input: In,
    layers: Vec<Layer>,
}

impl<In: Input> Parser<In> {
    pub fn new(input: In) -> Self {
        Self {
            input,
            layers: Vec::new(),
        }
    }

    /// Parse the next event from the input.
    ///
    /// Returns an error of kind [`ErrorKind::Eof`] if the input ends
    /// cleanly at a tag boundary.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Event> {
        enum Top {
            Element(Tag),
            Exhausted,
            NotList,
        }

        let top = match self.layers.last_mut() {
            Some(Layer::List(_, 0)) => Top::Exhausted,
            Some(Layer::List(tag, remaining)) => {
                *remaining -= 1;
                Top::Element(*tag)
            }
            _ => Top::NotList,
        };
        match top {
            Top::Exhausted => {
                self.layers.pop();
                return Ok(Event::ListEnd);
            }
            // list elements are payload-only, no tag byte and no name.
            Top::Element(tag) => return self.read_payload(tag, None),
            Top::NotList => {}
        }

        // If we get EOF reading a tag byte, we completed a value to get
        // here, so this is a natural end of stream.
        let tag = match self.input.read_u8() {
            Ok(t) => t,
            Err(e) if matches!(e.kind(), ErrorKind::UnexpectedEof(_)) => return Err(Error::eof()),
            Err(e) => return Err(e),
        };
        let tag = Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))?;

        if tag == Tag::End {
            // End tags have no name or payload.
            return match self.layers.pop() {
                Some(Layer::Compound) => Ok(Event::CompoundEnd),
                _ => Err(Error::bespoke("end tag outside of a compound")),
            };
        }

        let name = Some(self.read_string()?);
        self.read_payload(tag, name)
    }

    /// Consumes this parser, returning the underlying input.
    pub fn into_inner(self) -> In {
        self.input
    }

    /// Bytes consumed from the input so far.
    pub fn position(&self) -> u64 {
        self.input.position()
    }

    fn read_payload(&mut self, tag: Tag, name: Name) -> Result<Event> {
        match tag {
            Tag::Byte => Ok(Event::Byte(name, self.input.read_i8()?)),
            Tag::Short => Ok(Event::Short(name, self.input.read_i16()?)),
            Tag::Int => Ok(Event::Int(name, self.input.read_i32()?)),
            Tag::Long => Ok(Event::Long(name, self.input.read_i64()?)),
            Tag::Float => Ok(Event::Float(name, self.input.read_f32()?)),
            Tag::Double => Ok(Event::Double(name, self.input.read_f64()?)),
            Tag::String => Ok(Event::String(name, self.read_string()?)),
            Tag::Compound => {
                self.layers.push(Layer::Compound);
                Ok(Event::Compound(name))
            }
            Tag::List => {
                let element_tag = self.input.read_u8()?;
                let element_tag =
                    Tag::try_from(element_tag).map_err(|_| Error::invalid_tag(element_tag))?;
                let count = self.input.read_i32()?;
                // A count of zero or less means an empty list, whatever
                // the element tag claims. Seen in the wild with tag End.
                self.layers.push(Layer::List(element_tag, count.max(0)));
                Ok(Event::List(name, element_tag, count))
            }
            Tag::ByteArray => {
                let len = self.array_len()?;
                let mut buf = vec![0u8; len];
                self.input.read_exact(&mut buf)?;
                Ok(Event::ByteArray(name, bytes_to_i8(buf)))
            }
            Tag::IntArray => {
                let len = self.array_len()?;
                let mut buf = Vec::with_capacity(len.min(1 << 16));
                for _ in 0..len {
                    buf.push(self.input.read_i32()?);
                }
                Ok(Event::IntArray(name, buf))
            }
            Tag::LongArray => {
                let len = self.array_len()?;
                let mut buf = Vec::with_capacity(len.min(1 << 16));
                for _ in 0..len {
                    buf.push(self.input.read_i64()?);
                }
                Ok(Event::LongArray(name, buf))
            }
            Tag::End => Err(Error::bespoke("end tag cannot be a payload")),
        }
    }

    fn array_len(&mut self) -> Result<usize> {
        let len = self.input.read_i32()?;
        if len < 0 {
            return Err(Error::malformed_length(len));
        }
        Ok(len as usize)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.input.read_u16()? as usize;
        let mut buf = vec![0; len];
        self.input.read_exact(&mut buf)?;

        // Strings are Java's modified UTF-8. Invalid sequences are kept as
        // opaque text with replacement characters rather than failing the
        // whole tree.
        Ok(match cesu8::from_java_cesu8(&buf) {
            Ok(s) => s.into_owned(),
            Err(_) => String::from_utf8_lossy(&buf).into_owned(),
        })
    }
}

fn bytes_to_i8(v: Vec<u8>) -> Vec<i8> {
    // Vec::into_raw_parts is unstable, so do it manually. u8 and i8 have
    // identical layout.
    let mut v = std::mem::ManuallyDrop::new(v);
    let p = v.as_mut_ptr();
    let len = v.len();
    let cap = v.capacity();
    unsafe { Vec::from_raw_parts(p as *mut i8, len, cap) }
}
