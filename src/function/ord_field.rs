use std::hash::{Hash, Hasher};
use std::sync::Arc;
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::function::doc_values::DocValues;
use crate::function::value_source::SourceKind;
use crate::index::field_cache::FieldCache;
use crate::index::ordinals::OrdinalArray;
use crate::storage::segment::SegmentContext;

/// `ord(field)`: rank of the document's value in the segment's sorted term
/// dictionary.
///
/// With only the values "apple", "banana" and "pear" present,
/// `ord = 1, 2, 3` respectively; documents without a value get `0`.
///
/// Ordinals belong to one segment generation. They shift whenever documents
/// are added, deleted or merged, and ordinals from different segments are not
/// comparable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdFieldSource {
    field: String,
}

impl OrdFieldSource {
    pub fn new(field: impl Into<String>) -> Self {
        OrdFieldSource { field: field.into() }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn description(&self) -> String {
        format!("{}({})", SourceKind::Ord.name(), self.field)
    }

    pub fn values(&self, segment: &SegmentContext, cache: &FieldCache) -> Result<OrdDocValues> {
        let ords = cache.ordinals(segment, &self.field)?;
        Ok(OrdDocValues {
            description: self.description(),
            ords,
        })
    }
}

impl Hash for OrdFieldSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(SourceKind::Ord.salt());
        self.field.hash(state);
    }
}

pub struct OrdDocValues {
    description: String,
    ords: Arc<OrdinalArray>,
}

impl OrdDocValues {
    pub fn ordinals(&self) -> &OrdinalArray {
        &self.ords
    }
}

impl DocValues for OrdDocValues {
    fn as_float(&self, doc: DocId) -> f32 {
        self.ords.get(doc) as f32
    }

    fn as_int(&self, doc: DocId) -> i32 {
        self.ords.get(doc) as i32
    }

    fn as_long(&self, doc: DocId) -> i64 {
        self.ords.get(doc) as i64
    }

    fn as_double(&self, doc: DocId) -> f64 {
        self.ords.get(doc) as f64
    }

    // the ordinal in decimal, not the term text
    fn as_string(&self, doc: DocId) -> String {
        self.ords.get(doc).to_string()
    }

    fn describe(&self, doc: DocId) -> String {
        format!("{}={}", self.description, self.as_int(doc))
    }
}
