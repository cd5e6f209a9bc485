use crate::core::types::DocId;

/// Per-document view of a value source bound to one segment.
///
/// `doc` must be a valid id in the bound segment.
pub trait DocValues: Send + Sync {
    fn as_float(&self, doc: DocId) -> f32;

    fn as_int(&self, doc: DocId) -> i32;

    fn as_long(&self, doc: DocId) -> i64;

    fn as_double(&self, doc: DocId) -> f64;

    fn as_string(&self, doc: DocId) -> String;

    /// Debug rendering, `<description>=<value>`.
    fn describe(&self, doc: DocId) -> String;
}
