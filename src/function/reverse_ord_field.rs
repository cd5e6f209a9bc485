use std::hash::{Hash, Hasher};
use std::sync::Arc;
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::function::doc_values::DocValues;
use crate::function::value_source::SourceKind;
use crate::index::field_cache::FieldCache;
use crate::index::ordinals::OrdinalArray;
use crate::storage::segment::SegmentContext;

/// `rord(field)`: ordinal counted from the end of the term dictionary.
///
/// For `n` terms, `rord = n + 1 - ord`, so the greatest term has rank 1 and a
/// document without a value gets `n + 1`. Shares the cached ordinal array with
/// `ord(field)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseOrdFieldSource {
    field: String,
}

impl ReverseOrdFieldSource {
    pub fn new(field: impl Into<String>) -> Self {
        ReverseOrdFieldSource { field: field.into() }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn description(&self) -> String {
        format!("{}({})", SourceKind::ReverseOrd.name(), self.field)
    }

    pub fn values(&self, segment: &SegmentContext, cache: &FieldCache) -> Result<ReverseOrdDocValues> {
        let ords = cache.ordinals(segment, &self.field)?;
        Ok(ReverseOrdDocValues {
            description: self.description(),
            end: ords.num_terms() + 1,
            ords,
        })
    }
}

impl Hash for ReverseOrdFieldSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(SourceKind::ReverseOrd.salt());
        self.field.hash(state);
    }
}

pub struct ReverseOrdDocValues {
    description: String,
    end: u32,
    ords: Arc<OrdinalArray>,
}

impl ReverseOrdDocValues {
    #[inline]
    fn rank(&self, doc: DocId) -> u32 {
        self.end - self.ords.get(doc)
    }
}

impl DocValues for ReverseOrdDocValues {
    fn as_float(&self, doc: DocId) -> f32 {
        self.rank(doc) as f32
    }

    fn as_int(&self, doc: DocId) -> i32 {
        self.rank(doc) as i32
    }

    fn as_long(&self, doc: DocId) -> i64 {
        self.rank(doc) as i64
    }

    fn as_double(&self, doc: DocId) -> f64 {
        self.rank(doc) as f64
    }

    fn as_string(&self, doc: DocId) -> String {
        self.rank(doc).to_string()
    }

    fn describe(&self, doc: DocId) -> String {
        format!("{}={}", self.description, self.as_int(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Document;
    use crate::storage::segment::SegmentId;

    #[test]
    fn counts_from_the_end() {
        let docs = vec![
            Document::new().with_field("fruit", "pear"),
            Document::new().with_field("fruit", "apple"),
            Document::new(),
            Document::new().with_field("fruit", "banana"),
        ];
        let segment = SegmentContext::in_memory(SegmentId::new(), 1, docs);
        let cache = FieldCache::new(4);

        let values = ReverseOrdFieldSource::new("fruit").values(&segment, &cache).unwrap();
        assert_eq!(values.as_int(DocId(0)), 1);
        assert_eq!(values.as_int(DocId(3)), 2);
        assert_eq!(values.as_int(DocId(1)), 3);
        assert_eq!(values.as_int(DocId(2)), 4);
        assert_eq!(values.describe(DocId(1)), "rord(fruit)=3");
    }
}
