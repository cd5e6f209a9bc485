use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::term_dictionary::TermDictionary;
use crate::storage::segment::SegmentFields;

/// Ordinal of a document that has no value for the field. Real ranks start
/// at 1, so it never collides with a term.
pub const MISSING_ORDINAL: u32 = 0;

/// Per-document term ranks of one field in one segment generation.
/// Immutable once built.
#[derive(Debug)]
pub struct OrdinalArray {
    ords: Vec<u32>,
    dictionary: TermDictionary,
}

impl OrdinalArray {
    /// Build from the per-document term list, indexed by doc id.
    pub fn from_terms(terms: &[Option<String>]) -> Result<Self> {
        let dictionary = TermDictionary::build(terms.iter().flatten().map(String::as_str))?;

        let ords = terms
            .iter()
            .map(|term| match term {
                Some(term) => dictionary.ordinal(term).unwrap_or(MISSING_ORDINAL),
                None => MISSING_ORDINAL,
            })
            .collect();

        Ok(OrdinalArray { ords, dictionary })
    }

    pub fn build(segment: &dyn SegmentFields, field: &str) -> Result<Self> {
        let terms = segment.field_terms(field)?;
        Self::from_terms(&terms)
    }

    /// Ordinal of `doc`. Panics if `doc` is outside the segment.
    #[inline]
    pub fn get(&self, doc: DocId) -> u32 {
        self.ords[doc.index()]
    }

    pub fn max_doc(&self) -> u32 {
        self.ords.len() as u32
    }

    /// Number of distinct terms; also the largest ordinal.
    pub fn num_terms(&self) -> u32 {
        self.dictionary.len() as u32
    }

    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.ords
    }
}
