use std::hash::{Hash, Hasher};
use crate::core::types::DocId;
use crate::function::doc_values::DocValues;
use crate::function::value_source::SourceKind;

/// Same value for every document.
#[derive(Debug, Clone, Copy)]
pub struct ConstValueSource {
    value: f32,
}

impl ConstValueSource {
    pub fn new(value: f32) -> Self {
        ConstValueSource { value }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn description(&self) -> String {
        format!("{}({:?})", SourceKind::Const.name(), self.value)
    }

    pub fn values(&self) -> ConstDocValues {
        ConstDocValues {
            description: self.description(),
            value: self.value,
        }
    }
}

// Bitwise, so NaN constants are equal to themselves.
impl PartialEq for ConstValueSource {
    fn eq(&self, other: &Self) -> bool {
        self.value.to_bits() == other.value.to_bits()
    }
}

impl Eq for ConstValueSource {}

impl Hash for ConstValueSource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(SourceKind::Const.salt());
        state.write_u32(self.value.to_bits());
    }
}

pub struct ConstDocValues {
    description: String,
    value: f32,
}

impl DocValues for ConstDocValues {
    fn as_float(&self, _doc: DocId) -> f32 {
        self.value
    }

    fn as_int(&self, _doc: DocId) -> i32 {
        self.value as i32
    }

    fn as_long(&self, _doc: DocId) -> i64 {
        self.value as i64
    }

    fn as_double(&self, _doc: DocId) -> f64 {
        self.value as f64
    }

    fn as_string(&self, _doc: DocId) -> String {
        format!("{:?}", self.value)
    }

    fn describe(&self, doc: DocId) -> String {
        format!("{}={}", self.description, self.as_string(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_everywhere() {
        let values = ConstValueSource::new(2.5).values();
        assert_eq!(values.as_float(DocId(0)), 2.5);
        assert_eq!(values.as_double(DocId(99)), 2.5);
        assert_eq!(values.as_int(DocId(7)), 2);
        assert_eq!(values.as_string(DocId(1)), "2.5");
        assert_eq!(values.describe(DocId(1)), "const(2.5)=2.5");
    }

    #[test]
    fn nan_constants_compare_bitwise() {
        assert_eq!(ConstValueSource::new(f32::NAN), ConstValueSource::new(f32::NAN));
        assert_ne!(ConstValueSource::new(0.0), ConstValueSource::new(-0.0));
    }
}
