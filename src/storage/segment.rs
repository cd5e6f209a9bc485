use std::fmt;
use std::sync::Arc;
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::error::Result;
use crate::core::types::Document;

/// Unique segment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub Uuid);

impl SegmentId {
    pub fn new() -> Self {
        SegmentId(Uuid::new_v4())
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Segment file header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentHeader {
    pub version: u32,     // Format version
    pub doc_count: u32,   // Number of documents
    pub checksum: u32,    // CRC32 of the document records
    pub generation: u64,
}

impl SegmentHeader {
    pub const VERSION: u32 = 1;
    pub const SIZE: usize = 20; // bincode fixint: 3 x u32 + u64

    pub fn new(doc_count: u32, generation: u64) -> Self {
        SegmentHeader {
            version: Self::VERSION,
            doc_count,
            checksum: 0,
            generation,
        }
    }
}

/// Read access to the stored field values of one segment.
pub trait SegmentFields: Send + Sync {
    /// Number of documents; doc ids are `0..max_doc`.
    fn max_doc(&self) -> u32;

    /// Term text of `field` for every document, `None` where the document
    /// has no value.
    fn field_terms(&self, field: &str) -> Result<Vec<Option<String>>>;
}

/// Segment held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySegment {
    pub documents: Vec<Document>,
}

impl InMemorySegment {
    pub fn new(documents: Vec<Document>) -> Self {
        InMemorySegment { documents }
    }
}

pub(crate) fn collect_terms<'a>(
    documents: impl Iterator<Item = &'a Document>,
    field: &str,
) -> Vec<Option<String>> {
    documents
        .map(|doc| doc.get_field(field).map(|value| value.as_term().into_owned()))
        .collect()
}

impl SegmentFields for InMemorySegment {
    fn max_doc(&self) -> u32 {
        self.documents.len() as u32
    }

    fn field_terms(&self, field: &str) -> Result<Vec<Option<String>>> {
        Ok(collect_terms(self.documents.iter(), field))
    }
}

/// A segment as seen by one reader: identity, content generation and the
/// stored fields of that generation.
#[derive(Clone)]
pub struct SegmentContext {
    id: SegmentId,
    generation: u64,
    fields: Arc<dyn SegmentFields>,
}

impl SegmentContext {
    pub fn new(id: SegmentId, generation: u64, fields: Arc<dyn SegmentFields>) -> Self {
        SegmentContext { id, generation, fields }
    }

    pub fn in_memory(id: SegmentId, generation: u64, documents: Vec<Document>) -> Self {
        Self::new(id, generation, Arc::new(InMemorySegment::new(documents)))
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fields(&self) -> &dyn SegmentFields {
        self.fields.as_ref()
    }

    pub fn max_doc(&self) -> u32 {
        self.fields.max_doc()
    }
}

impl fmt::Debug for SegmentContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SegmentContext")
            .field("id", &self.id)
            .field("generation", &self.generation)
            .field("max_doc", &self.max_doc())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::FieldValue;

    #[test]
    fn in_memory_terms_follow_doc_order() {
        let docs = vec![
            Document::new().with_field("name", "pear"),
            Document::new(),
            Document::new().with_field("name", FieldValue::Number(3.5)),
            Document::new().with_field("name", FieldValue::Boolean(true)),
        ];
        let segment = InMemorySegment::new(docs);

        assert_eq!(segment.max_doc(), 4);
        assert_eq!(
            segment.field_terms("name").unwrap(),
            vec![Some("pear".to_string()), None, Some("3.5".to_string()), Some("true".to_string())]
        );
        assert_eq!(segment.field_terms("other").unwrap(), vec![None; 4]);
    }
}
