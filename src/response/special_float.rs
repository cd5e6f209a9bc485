use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::core::error::{Error, ErrorKind, Result};

/// IEEE-754 values that have no numeric literal in the output dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialFloat {
    NaN,
    PositiveInfinity,
    NegativeInfinity,
}

impl SpecialFloat {
    /// `None` for finite values. The sign of a NaN is ignored.
    pub fn classify_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(SpecialFloat::NaN)
        } else if value == f64::INFINITY {
            Some(SpecialFloat::PositiveInfinity)
        } else if value == f64::NEG_INFINITY {
            Some(SpecialFloat::NegativeInfinity)
        } else {
            None
        }
    }

    pub fn classify_f32(value: f32) -> Option<Self> {
        Self::classify_f64(value as f64)
    }
}

/// Structured-text output convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Python,
    Ruby,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Python => "python",
            Dialect::Ruby => "ruby",
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "python" => Ok(Dialect::Python),
            "ruby" => Ok(Dialect::Ruby),
            other => Err(Error::new(
                ErrorKind::Configuration,
                format!("Unknown response dialect '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Literal text for a special float in the given dialect.
pub fn format(kind: SpecialFloat, dialect: Dialect) -> &'static str {
    match (dialect, kind) {
        (Dialect::Python, SpecialFloat::NaN) => "float('NaN')",
        (Dialect::Python, SpecialFloat::PositiveInfinity) => "float('Inf')",
        (Dialect::Python, SpecialFloat::NegativeInfinity) => "-float('Inf')",
        (Dialect::Ruby, SpecialFloat::NaN) => "(0.0/0.0)",
        (Dialect::Ruby, SpecialFloat::PositiveInfinity) => "(1.0/0.0)",
        (Dialect::Ruby, SpecialFloat::NegativeInfinity) => "-(1.0/0.0)",
    }
}

/// Like [`format`], with the dialect selected by name. Unknown names fail.
pub fn format_named(kind: SpecialFloat, dialect: &str) -> Result<&'static str> {
    Ok(format(kind, dialect.parse()?))
}
