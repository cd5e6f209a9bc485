use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map},
    number::complete::float,
    sequence::delimited,
};
use crate::core::error::{Error, ErrorKind, Result};
use crate::function::value_source::{SourceKind, ValueSource};

/// Parse a function query into a value source.
///
/// Examples:
/// - "ord(title)" -> ordinal of title
/// - "rord( title )" -> reverse ordinal of title
/// - "1.5" -> constant
pub fn parse_value_source(input: &str) -> Result<ValueSource> {
    match all_consuming(delimited(multispace0, value_source, multispace0)).parse(input) {
        Ok((_, source)) => Ok(source),
        Err(e) => Err(Error::new(
            ErrorKind::Parse,
            format!("Invalid function query '{}': {}", input, e),
        )),
    }
}

fn value_source(input: &str) -> IResult<&str, ValueSource> {
    alt((
        map(field_function(SourceKind::ReverseOrd.name()), |field: &str| ValueSource::reverse_ord(field)),
        map(field_function(SourceKind::Ord.name()), |field: &str| ValueSource::ord(field)),
        map(float, |value: f32| ValueSource::constant(value)),
    ))
    .parse(input)
}

fn field_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')).parse(input)
}

/// `name ( field )`
fn field_function<'a>(
    name: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    delimited(
        (tag(name), multispace0, char('('), multispace0),
        field_name,
        (multispace0, char(')')),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_functions() {
        assert_eq!(parse_value_source("ord(title)").unwrap(), ValueSource::ord("title"));
        assert_eq!(parse_value_source("  rord( title ) ").unwrap(), ValueSource::reverse_ord("title"));
        assert_eq!(parse_value_source("ord(meta.lang_code)").unwrap(), ValueSource::ord("meta.lang_code"));
    }

    #[test]
    fn numeric_constant() {
        assert_eq!(parse_value_source("2.5").unwrap(), ValueSource::constant(2.5));
        assert_eq!(parse_value_source("-3").unwrap(), ValueSource::constant(-3.0));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "ord()", "ord(title", "ordinal(title)", "ord(title) extra", "max(a,b)"] {
            let err = parse_value_source(input).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Parse, "input {:?}", input);
        }
    }
}
