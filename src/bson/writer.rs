use ::bson::spec::BinarySubtype;
use ::bson::{Binary, Bson};
use chrono::{DateTime, Utc};
use std::io::Write;

use super::builder::Builder;
use crate::error::{Error, Result};
use crate::ser::OutputArchive;

/// Writes one BSON document to the sink for every top level node.
///
/// Objects and arrays are opened lazily, the first time something is written
/// inside them, so a node that gets no children still shows up as an empty
/// document or array. Unnamed fields of an object get the keys `value0`,
/// `value1`, ... in the order they are written.
///
/// ```rust
/// use bsonarch::bson::BsonWriter;
/// use bsonarch::ser::OutputArchive;
///
/// fn main() -> bsonarch::Result<()> {
///     let mut w = BsonWriter::new(vec![]);
///     w.start_node()?;
///     w.set_next_name("x");
///     w.int(1)?;
///     w.finish_node()?;
///
///     assert_eq!(w.records(), 1);
///     assert_eq!(w.into_inner().len(), 12);
///     Ok(())
/// }
/// ```
pub struct BsonWriter<W: Write> {
    sink: W,
    builder: Builder,
    /// Encoded record, reused between records
    scratch: Vec<u8>,
    frames: Vec<Frame>,
    next_name: Option<String>,
    records: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Node {
    /// Bottom of the stack, never popped
    Root,
    /// Started but nothing written inside yet
    Pending(Container),
    Open(Container),
}

#[derive(Debug)]
struct Frame {
    node: Node,
    /// Used to name unnamed fields
    counter: u32,
}

impl Frame {
    fn new(node: Node) -> Self {
        Frame { node, counter: 0 }
    }
}

// Root frame plus the record itself. The record is the builder's root
// document, only deeper objects open documents of their own.
const RECORD_DEPTH: usize = 2;

impl<W: Write> BsonWriter<W> {
    pub fn new(sink: W) -> Self {
        BsonWriter {
            sink,
            builder: Builder::new(),
            scratch: Vec::with_capacity(128),
            frames: vec![Frame::new(Node::Root)],
            next_name: None,
            records: 0,
        }
    }

    /// Number of records flushed to the sink so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Current nesting depth, `0` between records
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Moves the current frame out of its pending state and sets the key of
    /// the field about to be written.
    fn write_name(&mut self) -> Result<()> {
        let depth = self.frames.len();
        let frame = self
            .frames
            .last_mut()
            .ok_or(Error::Protocol("node stack underflow"))?;

        match frame.node {
            Node::Root => {
                self.next_name = None;
                return Err(Error::Protocol("value written outside of any node"));
            }
            Node::Pending(Container::Array) => {
                self.builder.open_array()?;
                frame.node = Node::Open(Container::Array);
            }
            Node::Pending(Container::Object) => {
                frame.node = Node::Open(Container::Object);
                if depth > RECORD_DEPTH {
                    self.builder.open_document()?;
                }
            }
            Node::Open(_) => {}
        }

        // Array elements don't have names, the builder numbers them
        let name = self.next_name.take();
        if frame.node == Node::Open(Container::Array) {
            return Ok(());
        }

        match name {
            Some(name) => self.builder.key(&name),
            None => {
                let mut key = String::with_capacity(8);
                key.push_str("value");
                key.push_str(itoa::Buffer::new().format(frame.counter));
                frame.counter += 1;
                self.builder.key(&key)
            }
        }
    }

    fn value(&mut self, value: Bson) -> Result<()> {
        self.write_name()?;
        self.builder.append(value)
    }

    fn flush_record(&mut self) -> Result<()> {
        let doc = self.builder.finish()?;
        self.scratch.clear();
        doc.to_writer(&mut self.scratch)?;
        self.sink.write_all(&self.scratch)?;
        tracing::trace!(
            record = self.records,
            len = self.scratch.len(),
            hex = %bintext::hex::encode(&self.scratch),
            "flushed record"
        );
        self.records += 1;
        Ok(())
    }
}

impl<W: Write> OutputArchive for BsonWriter<W> {
    fn set_next_name(&mut self, name: &str) {
        self.next_name = Some(name.to_owned());
    }

    fn start_node(&mut self) -> Result<()> {
        if self.frames.len() == 1 {
            // A record is the root document itself and has no key
            self.next_name = None;
        } else {
            self.write_name()?;
        }
        self.frames.push(Frame::new(Node::Pending(Container::Object)));
        Ok(())
    }

    fn finish_node(&mut self) -> Result<()> {
        let depth = self.frames.len();
        if depth <= 1 {
            return Err(Error::Protocol("finish_node without a matching start_node"));
        }

        let frame = self
            .frames
            .pop()
            .ok_or(Error::Protocol("node stack underflow"))?;

        match frame.node {
            // Nothing was ever written inside
            Node::Pending(Container::Array) => {
                self.builder.open_array()?;
                self.builder.close_array()?;
            }
            Node::Open(Container::Array) => self.builder.close_array()?,
            Node::Pending(Container::Object) => {
                if depth > RECORD_DEPTH {
                    self.builder.open_document()?;
                    self.builder.close_document()?;
                }
            }
            Node::Open(Container::Object) => {
                if depth > RECORD_DEPTH {
                    self.builder.close_document()?;
                }
            }
            Node::Root => return Err(Error::Protocol("root node popped")),
        }

        if self.frames.len() == 1 {
            self.flush_record()?;
        }
        Ok(())
    }

    fn make_array(&mut self) -> Result<()> {
        let depth = self.frames.len();
        let frame = self
            .frames
            .last_mut()
            .ok_or(Error::Protocol("node stack underflow"))?;

        match frame.node {
            Node::Pending(Container::Object) if depth == RECORD_DEPTH => Err(Error::TopLevelArray),
            Node::Pending(Container::Object) => {
                frame.node = Node::Pending(Container::Array);
                Ok(())
            }
            _ => Err(Error::Protocol("make_array on a node that was already written to")),
        }
    }

    fn boolean(&mut self, b: bool) -> Result<()> {
        self.value(Bson::Boolean(b))
    }

    fn int(&mut self, n: i32) -> Result<()> {
        self.value(Bson::Int32(n))
    }

    fn long(&mut self, n: i64) -> Result<()> {
        self.value(Bson::Int64(n))
    }

    fn double(&mut self, n: f64) -> Result<()> {
        self.value(Bson::Double(n))
    }

    fn string(&mut self, s: &str) -> Result<()> {
        self.value(Bson::String(s.to_owned()))
    }

    fn datetime(&mut self, t: DateTime<Utc>) -> Result<()> {
        self.value(Bson::DateTime(::bson::DateTime::from_millis(
            t.timestamp_millis(),
        )))
    }

    fn binary(&mut self, b: &[u8]) -> Result<()> {
        self.value(Bson::Binary(Binary {
            subtype: BinarySubtype::Generic,
            bytes: b.to_vec(),
        }))
    }
}
