use std::collections::HashMap;
use std::io::Read;

use crate::error::{Error, Result};
use crate::input::{Input, Reader, Slice};
use crate::stream::{Event, Name, Parser};

/// Value is a complete NBT value. It owns its data. Compounds and lists
/// nest arbitrarily. This type preserves all the information from the
/// original NBT, with the exception of the name of the root value (which
/// is usually the empty string).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    ByteArray(Vec<i8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    List(Vec<Value>),
    Compound(HashMap<String, Value>),
}

impl Value {
    /// Decode a complete value from a byte buffer.
    ///
    /// The buffer must begin with a root tag byte and a length-prefixed
    /// name; the name is discarded. Within one compound a later entry with
    /// a duplicate name overwrites the earlier one.
    pub fn from_bytes(data: &[u8]) -> Result<Value> {
        Self::from_input(Slice::new(data))
    }

    /// Decode a complete value, pulling bytes from a reader as needed.
    /// Useful for decoding straight out of a decompressor.
    pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
        Self::from_input(Reader::new(reader))
    }

    fn from_input<In: Input>(input: In) -> Result<Value> {
        let mut parser = Parser::new(input);

        // Trees are assembled from parser events on an explicit frame
        // stack rather than by recursion, so nesting depth is bounded by
        // the heap, not the call stack.
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let event = match parser.next() {
                Ok(event) => event,
                // A clean end of stream is still premature here: the root
                // value has not completed, or we would have returned.
                Err(e) if e.is_eof() => return Err(Error::unexpected_eof(parser.position())),
                Err(e) => return Err(e),
            };
            let (name, value) = match event {
                Event::Compound(name) => {
                    stack.push(Frame {
                        name,
                        data: FrameData::Compound(HashMap::new()),
                    });
                    continue;
                }
                Event::List(name, _, _) => {
                    stack.push(Frame {
                        name,
                        data: FrameData::List(Vec::new()),
                    });
                    continue;
                }
                Event::CompoundEnd => {
                    let frame = stack.pop().ok_or_else(unbalanced)?;
                    match frame.data {
                        FrameData::Compound(fields) => (frame.name, Value::Compound(fields)),
                        FrameData::List(_) => return Err(unbalanced()),
                    }
                }
                Event::ListEnd => {
                    let frame = stack.pop().ok_or_else(unbalanced)?;
                    match frame.data {
                        FrameData::List(items) => (frame.name, Value::List(items)),
                        FrameData::Compound(_) => return Err(unbalanced()),
                    }
                }
                Event::Byte(name, v) => (name, Value::Byte(v)),
                Event::Short(name, v) => (name, Value::Short(v)),
                Event::Int(name, v) => (name, Value::Int(v)),
                Event::Long(name, v) => (name, Value::Long(v)),
                Event::Float(name, v) => (name, Value::Float(v)),
                Event::Double(name, v) => (name, Value::Double(v)),
                Event::String(name, v) => (name, Value::String(v)),
                Event::ByteArray(name, v) => (name, Value::ByteArray(v)),
                Event::IntArray(name, v) => (name, Value::IntArray(v)),
                Event::LongArray(name, v) => (name, Value::LongArray(v)),
            };

            match stack.last_mut() {
                // the completed value was the root; its name is discarded.
                None => return Ok(value),
                Some(Frame {
                    data: FrameData::Compound(fields),
                    ..
                }) => {
                    fields.insert(name.unwrap_or_default(), value);
                }
                Some(Frame {
                    data: FrameData::List(items),
                    ..
                }) => {
                    items.push(value);
                }
            }
        }
    }

    /// Get a field of a compound by name. Returns `None` for any other
    /// value kind.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Compound(fields) => fields.get(name),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Byte(v) => Some(v as i64),
            Value::Short(v) => Some(v as i64),
            Value::Int(v) => Some(v as i64),
            Value::Long(v) => Some(v),
            Value::Float(v) => Some(v as i64),
            Value::Double(v) => Some(v as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Byte(v) => Some(v as f64),
            Value::Short(v) => Some(v as f64),
            Value::Int(v) => Some(v as f64),
            Value::Long(v) => Some(v as f64),
            Value::Float(v) => Some(v as f64),
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

struct Frame {
    name: Name,
    data: FrameData,
}

enum FrameData {
    Compound(HashMap<String, Value>),
    List(Vec<Value>),
}

fn unbalanced() -> Error {
    Error::bespoke("unbalanced container end")
}
