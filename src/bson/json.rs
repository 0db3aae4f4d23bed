//! Renders parsed documents as JSON text, mostly for logs and tests.
//!
//! The output is MongoDB's relaxed extended JSON as produced by the `bson`
//! crate: numbers and strings stay plain, dates become `{"$date": ...}` and
//! binary data `{"$binary": {"base64": ..., "subType": ...}}`.

use ::bson::{Bson, Document, RawDocument};
use std::convert::TryFrom;

use crate::error::Result;

pub fn to_json(doc: &RawDocument) -> Result<String> {
    let doc = Document::try_from(doc)?;
    Ok(Bson::Document(doc).into_relaxed_extjson().to_string())
}
