//! Splits a stream of back to back BSON documents.
//!
//! Each document starts with its own total length as a little endian `i32`,
//! the prefix itself included. Nothing past those four bytes is interpreted
//! here.

use std::io::{self, Read};

use crate::error::{Error, Result};

/// Smallest possible document: the length prefix plus the terminator
pub const MIN_DOCUMENT_LEN: usize = 5;

// Don't trust the declared length for the initial allocation
const MAX_PREALLOC: usize = 64 * 1024;

/// Reads the next document, length prefix included.
///
/// Returns `Ok(None)` when the stream ends exactly at a document boundary.
pub fn read_document<R: Read + ?Sized>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut prefix = [0u8; 4];
    let read = read_full(reader, &mut prefix)?;
    if read == 0 {
        return Ok(None);
    }
    if read < prefix.len() {
        return Err(Error::TruncatedStream {
            declared: prefix.len(),
            remaining: read,
        });
    }

    let declared = i32::from_le_bytes(prefix);
    if declared < MIN_DOCUMENT_LEN as i32 {
        return Err(Error::Malformed("document length below minimum"));
    }
    let declared = declared as usize;

    let mut doc = Vec::with_capacity(declared.min(MAX_PREALLOC));
    doc.extend_from_slice(&prefix);
    reader
        .take((declared - prefix.len()) as u64)
        .read_to_end(&mut doc)?;

    if doc.len() < declared {
        return Err(Error::TruncatedStream {
            declared,
            remaining: doc.len(),
        });
    }

    Ok(Some(doc))
}

/// Reads the whole stream, one buffer per document.
pub fn split_documents<R: Read>(mut reader: R) -> Result<Vec<Vec<u8>>> {
    let mut docs = vec![];
    while let Some(doc) = read_document(&mut reader)? {
        docs.push(doc);
    }
    Ok(docs)
}

/// Like `read_exact` but reports how much was read when the stream ends early
fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut read = 0;
    while read < buf.len() {
        match reader.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: [u8; 5] = [5, 0, 0, 0, 0];

    #[test]
    fn empty_stream() {
        let docs = split_documents(&[][..]).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn back_to_back() {
        let mut stream = EMPTY.to_vec();
        stream.extend_from_slice(&[6, 0, 0, 0, 0xAA, 0]);
        stream.extend_from_slice(&EMPTY);

        let docs = split_documents(&stream[..]).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0], EMPTY);
        assert_eq!(docs[1], [6, 0, 0, 0, 0xAA, 0]);
        assert_eq!(docs[2], EMPTY);
    }

    #[test]
    fn truncated_body() {
        let stream = [16u8, 0, 0, 0, 0, 0];
        match split_documents(&stream[..]) {
            Err(Error::TruncatedStream { declared, remaining }) => {
                assert_eq!(declared, 16);
                assert_eq!(remaining, 6);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn truncated_prefix() {
        let mut stream = EMPTY.to_vec();
        stream.extend_from_slice(&[5, 0]);
        assert!(matches!(
            split_documents(&stream[..]),
            Err(Error::TruncatedStream { declared: 4, remaining: 2 })
        ));
    }

    #[test]
    fn length_too_small() {
        let stream = [4u8, 0, 0, 0];
        assert!(matches!(
            split_documents(&stream[..]),
            Err(Error::Malformed(_))
        ));
    }
}
