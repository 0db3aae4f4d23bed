use ::bson::RawBsonRef;
use chrono::{DateTime, TimeZone, Utc};
use std::io::Read;

use super::framing;
use super::json;
use super::view::{self, Arena, DocumentView};
use crate::de::InputArchive;
use crate::error::{Error, Result};

/// Reads records back from a stream of BSON documents.
///
/// The whole input is split and validated up front, afterwards the reader
/// only moves a stack of cursors around the parsed documents. Each top level
/// `start_node`/`finish_node` pair walks one document of the stream.
///
/// Named fields are looked up by key, so they can be read in any order.
/// Unnamed fields are read in wire order, continuing after the last field
/// that was read.
pub struct BsonReader {
    arena: Arena,
    records: Vec<DocumentView>,
    /// Record walked by the next top level node
    current: usize,
    stack: ContextStack,
}

#[derive(Debug)]
struct ContextStack {
    contexts: Vec<Context>,
    next_name: Option<String>,
}

#[derive(Copy, Clone, Debug)]
enum Context {
    Root,
    /// Fields of the current record
    InObject(Cursor),
    InEmbeddedObject(Cursor),
    InEmbeddedArray(ArrayCursor),
}

#[derive(Copy, Clone, Debug)]
struct Cursor {
    doc: DocumentView,
    /// Position of the next unnamed field
    next: usize,
}

impl Cursor {
    fn new(doc: DocumentView) -> Self {
        Cursor { doc, next: 0 }
    }
}

#[derive(Copy, Clone, Debug)]
struct ArrayCursor {
    array: DocumentView,
    index: usize,
    len: usize,
}

impl ContextStack {
    /// Resolves the next field: by key when a name is set, by position
    /// otherwise. The name is consumed either way. Returns the field along
    /// with the view it was found in.
    fn search<'a>(&mut self, arena: &'a Arena) -> Result<(DocumentView, RawBsonRef<'a>)> {
        let name = self.next_name.take();

        match self.contexts.last_mut() {
            Some(Context::InObject(cursor)) | Some(Context::InEmbeddedObject(cursor)) => {
                let doc = arena.document(cursor.doc)?;
                let (index, value) = match name {
                    Some(name) => view::position(doc, &name)?.ok_or(Error::KeyNotFound(name))?,
                    None => {
                        let value = view::nth(doc, cursor.next)?.ok_or(Error::EndOfDocument)?;
                        (cursor.next, value)
                    }
                };
                cursor.next = index + 1;
                Ok((cursor.doc, value))
            }
            // Array elements have no names worth looking up
            Some(Context::InEmbeddedArray(cursor)) => {
                let out_of_bounds = Error::ArrayBounds {
                    index: cursor.index,
                    len: cursor.len,
                };
                if cursor.index >= cursor.len {
                    return Err(out_of_bounds);
                }
                let value = view::nth(arena.document(cursor.array)?, cursor.index)?
                    .ok_or(out_of_bounds)?;
                cursor.index += 1;
                Ok((cursor.array, value))
            }
            Some(Context::Root) | None => Err(Error::Protocol("value read outside of any node")),
        }
    }

    fn object_context(&self) -> Option<&Cursor> {
        match self.contexts.last() {
            Some(Context::InObject(cursor)) | Some(Context::InEmbeddedObject(cursor)) => Some(cursor),
            _ => None,
        }
    }
}

fn mismatch(expected: &'static str, found: RawBsonRef) -> Error {
    Error::TypeMismatch {
        expected,
        found: found.element_type(),
    }
}

impl BsonReader {
    pub fn new<R: Read>(reader: R) -> Result<Self> {
        let docs = framing::split_documents(reader)?;

        let mut arena = Arena::new();
        let mut records = Vec::with_capacity(docs.len());
        for doc in docs {
            records.push(arena.insert(doc)?);
        }

        tracing::debug!(records = arena.len(), bytes = arena.size(), "parsed BSON stream");

        Ok(BsonReader {
            arena,
            records,
            current: 0,
            stack: ContextStack {
                contexts: vec![Context::Root],
                next_name: None,
            },
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        BsonReader::new(bytes)
    }

    /// Number of records in the stream
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records not walked yet
    pub fn remaining(&self) -> usize {
        self.records.len().saturating_sub(self.current)
    }

    /// Current nesting depth, `0` between records
    pub fn depth(&self) -> usize {
        self.stack.contexts.len() - 1
    }

    /// Renders a record as relaxed extended JSON.
    pub fn to_json(&self, record: usize) -> Result<String> {
        let doc = self.records.get(record).ok_or(Error::EndOfStream)?;
        json::to_json(self.arena.document(*doc)?)
    }

    fn value(&mut self) -> Result<RawBsonRef<'_>> {
        self.stack.search(&self.arena).map(|(_, value)| value)
    }
}

impl InputArchive for BsonReader {
    fn set_next_name(&mut self, name: &str) {
        self.stack.next_name = Some(name.to_owned());
    }

    fn start_node(&mut self) -> Result<()> {
        let at_root = matches!(self.stack.contexts.last(), Some(Context::Root));
        let context = if at_root {
            // Records have no key
            self.stack.next_name = None;
            let doc = *self.records.get(self.current).ok_or(Error::EndOfStream)?;
            Context::InObject(Cursor::new(doc))
        } else {
            let (parent, value) = self.stack.search(&self.arena)?;
            match value {
                RawBsonRef::Document(doc) => {
                    let doc = self.arena.nested(parent, doc.as_bytes())?;
                    Context::InEmbeddedObject(Cursor::new(doc))
                }
                RawBsonRef::Array(array) => {
                    let array = self.arena.nested(parent, array.as_bytes())?;
                    Context::InEmbeddedArray(ArrayCursor {
                        array,
                        index: 0,
                        len: view::count(self.arena.document(array)?)?,
                    })
                }
                found => return Err(mismatch("document or array", found)),
            }
        };

        tracing::trace!(depth = self.stack.contexts.len(), ?context, "start node");
        self.stack.contexts.push(context);
        Ok(())
    }

    fn finish_node(&mut self) -> Result<()> {
        if self.stack.contexts.len() <= 1 {
            return Err(Error::Protocol("finish_node without a matching start_node"));
        }
        self.stack.contexts.pop();

        if self.stack.contexts.len() == 1 {
            self.current += 1;
        }
        Ok(())
    }

    fn load_size(&mut self) -> Result<usize> {
        match self.stack.contexts.last() {
            Some(Context::InEmbeddedArray(cursor)) => Ok(cursor.len),
            _ => Err(Error::NotInArray),
        }
    }

    fn contains(&mut self, name: &str) -> Result<bool> {
        match self.stack.object_context() {
            Some(cursor) => Ok(self.arena.document(cursor.doc)?.get(name)?.is_some()),
            None => Ok(false),
        }
    }

    fn boolean(&mut self) -> Result<bool> {
        match self.value()? {
            RawBsonRef::Boolean(b) => Ok(b),
            found => Err(mismatch("bool", found)),
        }
    }

    fn int(&mut self) -> Result<i32> {
        match self.value()? {
            RawBsonRef::Int32(n) => Ok(n),
            found => Err(mismatch("int", found)),
        }
    }

    fn long(&mut self) -> Result<i64> {
        match self.value()? {
            RawBsonRef::Int32(n) => Ok(i64::from(n)),
            RawBsonRef::Int64(n) => Ok(n),
            found => Err(mismatch("long", found)),
        }
    }

    fn double(&mut self) -> Result<f64> {
        match self.value()? {
            RawBsonRef::Double(n) => Ok(n),
            found => Err(mismatch("double", found)),
        }
    }

    fn string(&mut self) -> Result<String> {
        match self.value()? {
            RawBsonRef::String(s) => Ok(s.to_owned()),
            found => Err(mismatch("string", found)),
        }
    }

    fn datetime(&mut self) -> Result<DateTime<Utc>> {
        let ms = match self.value()? {
            RawBsonRef::DateTime(t) => t.timestamp_millis(),
            found => return Err(mismatch("date", found)),
        };
        Utc.timestamp_millis_opt(ms)
            .single()
            .ok_or(Error::OutOfRange("date"))
    }

    /// Binary payload without its subtype. Old style binaries (subtype 2)
    /// come back without their inner length.
    fn binary(&mut self) -> Result<Vec<u8>> {
        match self.value()? {
            RawBsonRef::Binary(b) => Ok(b.bytes.to_vec()),
            found => Err(mismatch("binary", found)),
        }
    }
}
