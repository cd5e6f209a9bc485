use std::fmt::{self, Write};
use crate::core::config::Config;
use crate::response::special_float::{self, Dialect, SpecialFloat};
use crate::response::value::{NamedList, Value};

/// Renders a response as a literal of the target dialect, for example
/// `{'numFound':3,'score':float('NaN')}` for Python.
#[derive(Debug, Clone, Copy)]
pub struct TextResponseWriter {
    dialect: Dialect,
}

impl TextResponseWriter {
    pub fn new(dialect: Dialect) -> Self {
        TextResponseWriter { dialect }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.response_dialect)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn write<W: Write>(&self, out: &mut W, response: &NamedList) -> fmt::Result {
        self.write_map(out, response)
    }

    pub fn render(&self, response: &NamedList) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write(&mut out, response);
        out
    }

    fn write_value<W: Write>(&self, out: &mut W, value: &Value) -> fmt::Result {
        match value {
            Value::Null => out.write_str(match self.dialect {
                Dialect::Python => "None",
                Dialect::Ruby => "nil",
            }),
            Value::Bool(b) => out.write_str(match (self.dialect, b) {
                (Dialect::Python, true) => "True",
                (Dialect::Python, false) => "False",
                (Dialect::Ruby, true) => "true",
                (Dialect::Ruby, false) => "false",
            }),
            Value::Int(i) => write!(out, "{}", i),
            Value::Long(l) => write!(out, "{}", l),
            Value::Float(f) => match SpecialFloat::classify_f32(*f) {
                Some(kind) => out.write_str(special_float::format(kind, self.dialect)),
                None => write!(out, "{:?}", f),
            },
            Value::Double(d) => match SpecialFloat::classify_f64(*d) {
                Some(kind) => out.write_str(special_float::format(kind, self.dialect)),
                None => write!(out, "{:?}", d),
            },
            Value::Str(s) => self.write_str(out, s),
            Value::List(items) => {
                out.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_char(',')?;
                    }
                    self.write_value(out, item)?;
                }
                out.write_char(']')
            }
            Value::Map(list) => self.write_map(out, list),
        }
    }

    fn write_map<W: Write>(&self, out: &mut W, list: &NamedList) -> fmt::Result {
        out.write_char('{')?;
        for (i, (name, value)) in list.iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            self.write_str(out, name)?;
            out.write_char(':')?;
            self.write_value(out, value)?;
        }
        out.write_char('}')
    }

    /// Single-quoted string literal.
    fn write_str<W: Write>(&self, out: &mut W, s: &str) -> fmt::Result {
        out.write_char('\'')?;
        for c in s.chars() {
            match (self.dialect, c) {
                (_, '\'') => out.write_str("\\'")?,
                (_, '\\') => out.write_str("\\\\")?,
                (Dialect::Python, '\n') => out.write_str("\\n")?,
                (Dialect::Python, '\r') => out.write_str("\\r")?,
                (Dialect::Python, '\t') => out.write_str("\\t")?,
                (Dialect::Python, c) if (c as u32) < 0x20 => write!(out, "\\x{:02x}", c as u32)?,
                (_, c) => out.write_char(c)?,
            }
        }
        out.write_char('\'')
    }
}
