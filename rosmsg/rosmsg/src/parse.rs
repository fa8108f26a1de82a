//! Dialect dispatch.

use rosmsg_core::{Definition, Dialect, ParseError, fixup_types};

use crate::options::ParseOptions;

/// Parse a message definition text into its definitions, root first.
///
/// For the `.msg` dialects complex field types are rewritten to the full names
/// of their sibling definitions unless [`ParseOptions::skip_type_fixup`] is
/// set. IDL output is always fully qualified.
pub fn parse(text: &str, options: ParseOptions) -> Result<Vec<Definition>, ParseError> {
    let dialect = options.dialect();
    tracing::debug!(
        %dialect,
        skip_type_fixup = options.skip_type_fixup,
        bytes = text.len(),
        "parse message definition"
    );

    if !dialect.is_line_oriented() {
        return parse_idl(text);
    }
    let mut definitions = parse_msg(text, dialect)?;
    if !options.skip_type_fixup {
        fixup_types(&mut definitions)?;
    }
    Ok(definitions)
}

#[cfg(feature = "msg")]
fn parse_msg(text: &str, dialect: Dialect) -> Result<Vec<Definition>, ParseError> {
    rosmsg_msg::parse_msg(text, dialect)
}

#[cfg(not(feature = "msg"))]
fn parse_msg(_text: &str, dialect: Dialect) -> Result<Vec<Definition>, ParseError> {
    Err(ParseError::UnsupportedDialect {
        dialect: dialect.to_string(),
    })
}

#[cfg(feature = "idl")]
fn parse_idl(text: &str) -> Result<Vec<Definition>, ParseError> {
    rosmsg_idl::parse_idl(text)
}

#[cfg(not(feature = "idl"))]
fn parse_idl(_text: &str) -> Result<Vec<Definition>, ParseError> {
    Err(ParseError::UnsupportedDialect {
        dialect: Dialect::Ros2Idl.to_string(),
    })
}
