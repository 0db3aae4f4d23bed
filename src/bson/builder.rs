use ::bson::{Array, Bson, Document};
use std::mem;

use crate::error::{Error, Result};

/// Assembles one record with explicit open/close calls on top of
/// [`bson::Document`](::bson::Document).
///
/// The builder always starts inside an implicit root document. Inside a
/// document every element needs a [`key`](Builder::key) first, inside an
/// array the key is ignored and the element is pushed at the end.
#[derive(Debug, Default)]
pub(crate) struct Builder {
    root: Document,
    open: Vec<Open>,
    key: Option<String>,
}

#[derive(Debug)]
struct Open {
    /// Key the container gets in its parent once closed
    key: Option<String>,
    container: Container,
}

#[derive(Debug)]
enum Container {
    Document(Document),
    Array(Array),
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Sets the key of the next element.
    pub fn key(&mut self, key: &str) -> Result<()> {
        if key.contains('\0') {
            return Err(Error::InvalidKey(key.to_owned()));
        }
        self.key = Some(key.to_owned());
        Ok(())
    }

    pub fn append(&mut self, value: Bson) -> Result<()> {
        let key = self.key.take();
        let doc = match self.open.last_mut() {
            Some(Open {
                container: Container::Array(array),
                ..
            }) => {
                array.push(value);
                return Ok(());
            }
            Some(Open {
                container: Container::Document(doc),
                ..
            }) => doc,
            None => &mut self.root,
        };

        let key = key.ok_or(Error::Protocol("document element without a key"))?;
        doc.insert(key, value);
        Ok(())
    }

    pub fn open_document(&mut self) -> Result<()> {
        self.open(Container::Document(Document::new()));
        Ok(())
    }

    pub fn close_document(&mut self) -> Result<()> {
        match self.close()? {
            Container::Document(doc) => self.append(Bson::Document(doc)),
            Container::Array(_) => Err(Error::Protocol("close_document on an open array")),
        }
    }

    pub fn open_array(&mut self) -> Result<()> {
        self.open(Container::Array(Array::new()));
        Ok(())
    }

    pub fn close_array(&mut self) -> Result<()> {
        match self.close()? {
            Container::Array(array) => self.append(Bson::Array(array)),
            Container::Document(_) => Err(Error::Protocol("close_array on an open document")),
        }
    }

    /// Hands out the finished root document and starts over with an empty
    /// one. Everything opened must be closed by then.
    pub fn finish(&mut self) -> Result<Document> {
        if !self.open.is_empty() {
            return Err(Error::Protocol("record finished with open containers"));
        }
        self.key = None;
        Ok(mem::take(&mut self.root))
    }

    fn open(&mut self, container: Container) {
        let key = self.key.take();
        self.open.push(Open { key, container });
    }

    fn close(&mut self) -> Result<Container> {
        let open = self
            .open
            .pop()
            .ok_or(Error::Protocol("close without a matching open"))?;
        self.key = open.key;
        Ok(open.container)
    }
}
