//! Parsed records and the views the reader keeps into them.
//!
//! Every record is owned by the [`Arena`] as a `RawDocumentBuf`. Nested
//! documents and arrays are addressed by a [`DocumentView`]: the index of the
//! record plus the byte range of the nested document inside it. A view is
//! turned back into a `RawDocument` whenever it's looked at, so nothing holds
//! a borrow of the arena between calls.

use ::bson::{RawBsonRef, RawDocument, RawDocumentBuf};

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub(crate) struct Arena {
    buffers: Vec<RawDocumentBuf>,
}

/// A document or an array (arrays are documents keyed by their indices).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct DocumentView {
    buf: usize,
    /// Index of the length prefix
    start: usize,
    /// One past the terminating `\0`
    end: usize,
}

impl Arena {
    pub fn new() -> Self {
        Arena::default()
    }

    /// Takes ownership of one complete document, validates it and returns a
    /// view of it.
    pub fn insert(&mut self, bytes: Vec<u8>) -> Result<DocumentView> {
        let doc = RawDocumentBuf::from_bytes(bytes)?;
        validate(&doc)?;

        let view = DocumentView {
            buf: self.buffers.len(),
            start: 0,
            end: doc.as_bytes().len(),
        };
        self.buffers.push(doc);
        Ok(view)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Total bytes held
    pub fn size(&self) -> usize {
        self.buffers.iter().map(|b| b.as_bytes().len()).sum()
    }

    pub fn document(&self, view: DocumentView) -> Result<&RawDocument> {
        let bytes = self
            .buffers
            .get(view.buf)
            .and_then(|b| b.as_bytes().get(view.start..view.end))
            .ok_or(Error::Malformed("view outside of the parsed records"))?;
        Ok(RawDocument::from_bytes(bytes)?)
    }

    /// View of `nested`, a document or array found while walking `parent`.
    pub fn nested(&self, parent: DocumentView, nested: &[u8]) -> Result<DocumentView> {
        let base = self
            .buffers
            .get(parent.buf)
            .ok_or(Error::Malformed("view outside of the parsed records"))?
            .as_bytes()
            .as_ptr() as usize;

        let start = (nested.as_ptr() as usize).checked_sub(base);
        let end = start.and_then(|start| start.checked_add(nested.len()));
        match (start, end) {
            (Some(start), Some(end)) if start >= parent.start && end <= parent.end => {
                Ok(DocumentView {
                    buf: parent.buf,
                    start,
                    end,
                })
            }
            _ => Err(Error::Malformed("nested document outside of its parent")),
        }
    }
}

/// Element at position `index` of `doc`.
pub(crate) fn nth(doc: &RawDocument, index: usize) -> Result<Option<RawBsonRef<'_>>> {
    match doc.iter().nth(index) {
        Some(element) => Ok(Some(element?.1)),
        None => Ok(None),
    }
}

/// Element keyed `key` along with its position.
pub(crate) fn position<'a>(
    doc: &'a RawDocument,
    key: &str,
) -> Result<Option<(usize, RawBsonRef<'a>)>> {
    for (index, element) in doc.iter().enumerate() {
        let (k, value) = element?;
        if k == key {
            return Ok(Some((index, value)));
        }
    }
    Ok(None)
}

pub(crate) fn count(doc: &RawDocument) -> Result<usize> {
    doc.iter().try_fold(0, |n, element| element.map(|_| n + 1).map_err(Error::from))
}

/// Walks a whole document tree once, nested documents included, so lookups
/// on it later can only fail for semantic reasons.
fn validate(root: &RawDocument) -> Result<()> {
    let mut pending = vec![root];

    while let Some(doc) = pending.pop() {
        for element in doc {
            match element?.1 {
                RawBsonRef::Document(nested) => pending.push(nested),
                RawBsonRef::Array(nested) => pending.push(RawDocument::from_bytes(nested.as_bytes())?),
                _ => {}
            }
        }
    }

    Ok(())
}
