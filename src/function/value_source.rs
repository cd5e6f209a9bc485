use std::fmt;
use std::hash::{Hash, Hasher};
use crate::core::error::Result;
use crate::core::types::DocId;
use crate::function::const_source::{ConstDocValues, ConstValueSource};
use crate::function::doc_values::DocValues;
use crate::function::ord_field::{OrdDocValues, OrdFieldSource};
use crate::function::reverse_ord_field::{ReverseOrdDocValues, ReverseOrdFieldSource};
use crate::index::field_cache::FieldCache;
use crate::storage::segment::SegmentContext;

/// Discriminant of a value source; its salt seeds the source's hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Ord,
    ReverseOrd,
    Const,
}

impl SourceKind {
    pub const fn salt(self) -> u32 {
        match self {
            SourceKind::Ord => 0x6f72_6400,        // "ord\0"
            SourceKind::ReverseOrd => 0x726f_7264, // "rord"
            SourceKind::Const => 0x636f_6e73,      // "cons"
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SourceKind::Ord => "ord",
            SourceKind::ReverseOrd => "rord",
            SourceKind::Const => "const",
        }
    }
}

/// A per-document value function that can be bound to any segment.
///
/// Sources are immutable and compare structurally: same kind, then same
/// payload. Plan nodes holding equal sources can share cached results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    Ord(OrdFieldSource),
    ReverseOrd(ReverseOrdFieldSource),
    Const(ConstValueSource),
}

impl ValueSource {
    pub fn ord(field: impl Into<String>) -> Self {
        ValueSource::Ord(OrdFieldSource::new(field))
    }

    pub fn reverse_ord(field: impl Into<String>) -> Self {
        ValueSource::ReverseOrd(ReverseOrdFieldSource::new(field))
    }

    pub fn constant(value: f32) -> Self {
        ValueSource::Const(ConstValueSource::new(value))
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            ValueSource::Ord(_) => SourceKind::Ord,
            ValueSource::ReverseOrd(_) => SourceKind::ReverseOrd,
            ValueSource::Const(_) => SourceKind::Const,
        }
    }

    pub fn description(&self) -> String {
        match self {
            ValueSource::Ord(source) => source.description(),
            ValueSource::ReverseOrd(source) => source.description(),
            ValueSource::Const(source) => source.description(),
        }
    }

    /// Bind to a segment. Field-backed sources fail if the segment's values
    /// cannot be read; nothing partial is returned.
    pub fn values(&self, segment: &SegmentContext, cache: &FieldCache) -> Result<SegmentValues> {
        Ok(match self {
            ValueSource::Ord(source) => SegmentValues::Ord(source.values(segment, cache)?),
            ValueSource::ReverseOrd(source) => SegmentValues::ReverseOrd(source.values(segment, cache)?),
            ValueSource::Const(source) => SegmentValues::Const(source.values()),
        })
    }
}

impl Hash for ValueSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ValueSource::Ord(source) => source.hash(state),
            ValueSource::ReverseOrd(source) => source.hash(state),
            ValueSource::Const(source) => source.hash(state),
        }
    }
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// A value source bound to one segment.
pub enum SegmentValues {
    Ord(OrdDocValues),
    ReverseOrd(ReverseOrdDocValues),
    Const(ConstDocValues),
}

impl SegmentValues {
    fn inner(&self) -> &dyn DocValues {
        match self {
            SegmentValues::Ord(values) => values,
            SegmentValues::ReverseOrd(values) => values,
            SegmentValues::Const(values) => values,
        }
    }
}

impl DocValues for SegmentValues {
    fn as_float(&self, doc: DocId) -> f32 {
        self.inner().as_float(doc)
    }

    fn as_int(&self, doc: DocId) -> i32 {
        self.inner().as_int(doc)
    }

    fn as_long(&self, doc: DocId) -> i64 {
        self.inner().as_long(doc)
    }

    fn as_double(&self, doc: DocId) -> f64 {
        self.inner().as_double(doc)
    }

    fn as_string(&self, doc: DocId) -> String {
        self.inner().as_string(doc)
    }

    fn describe(&self, doc: DocId) -> String {
        self.inner().describe(doc)
    }
}
