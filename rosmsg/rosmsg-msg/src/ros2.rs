//! ROS 2 `.msg` line grammar.
//!
//! Each line is matched by a single regular expression capturing the type, an
//! optional `<=N` string bound, an optional array spec (`[]`, `[N]`, `[<=N]`),
//! the name, and either a `= constant` or a bare default value.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use rosmsg_core::{
    Definition, Field, NameKind, ParseError, PrimitiveType, decode_array, decode_scalar,
    normalize_type,
};

const QUOTED_STRING: &str = r#"'(?:\\.|[^'\\])*'|"(?:\\.|[^"\\])*""#;

static DEFINITION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let comment_terminated = format!(r##"(?:{QUOTED_STRING}|(?:\\.|[^\s'"#\\])(?:\\.|[^#\\])*)"##);
    let array_terminated =
        format!(r##"(?:{QUOTED_STRING}|(?:\\.|[^\s'"\],#\\])(?:\\.|[^\],#\\])*)"##);
    let pattern = format!(
        concat!(
            r"^(?P<type>[a-zA-Z0-9_/]+)",
            r"(?:<=(?P<string_bound>[0-9]+))?",
            r"(?:\[(?P<unbounded>)\]|\[(?P<array_length>[0-9]+)\]|\[<=(?P<array_bound>[0-9]+)\])?",
            r"\s+(?P<name>[a-zA-Z0-9_]+)",
            r"(?:\s*=\s*(?P<constant_value>{ctl}?)|\s+(?P<default_value>\[(?:{atl},)*{atl}?\]|{ctl}))?",
            r"\s*(?:#.*)?$",
        ),
        ctl = comment_terminated,
        atl = array_terminated,
    );
    Regex::new(&pattern).expect("definition line pattern is valid")
});

static MSG_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^MSG: ([^ ]+)\s*(?:#.+)?$").expect("header pattern is valid"));

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z](?:_?[a-z0-9]+)*$").expect("field name pattern is valid"));

static CONSTANT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z](?:_?[A-Z0-9]+)*$").expect("constant name pattern is valid")
});

/// Build one definition from the lines of a ROS 2 block.
pub fn build_definition(lines: &[&str]) -> Result<Definition, ParseError> {
    let mut name = None;
    let mut fields = Vec::with_capacity(lines.len());

    for &line in lines {
        if let Some(caps) = MSG_HEADER.captures(line) {
            name = Some(caps[1].to_string());
            continue;
        }
        let Some(caps) = DEFINITION_LINE.captures(line) else {
            return Err(ParseError::Syntax {
                context: "line".to_string(),
                text: line.to_string(),
            });
        };
        fields.push(build_field(line, &caps).map_err(|e| e.at_line(line))?);
    }
    Ok(Definition::new(name, fields))
}

fn build_field(line: &str, caps: &Captures<'_>) -> Result<Field, ParseError> {
    let ty = normalize_type(&caps["type"]).to_string();
    let name = &caps["name"];
    let upper_bound = count(line, caps.name("string_bound").map(|m| m.as_str()))?;
    let array_length = count(line, caps.name("array_length").map(|m| m.as_str()))?;
    let array_bound = count(line, caps.name("array_bound").map(|m| m.as_str()))?;
    let is_array =
        caps.name("unbounded").is_some() || array_length.is_some() || array_bound.is_some();

    if upper_bound.is_some() && ty != "string" && ty != "wstring" {
        return Err(ParseError::Syntax {
            context: format!("string bound for type {ty}"),
            text: line.to_string(),
        });
    }

    if let Some(raw) = caps.name("constant_value") {
        if !CONSTANT_NAME.is_match(name) {
            return Err(ParseError::Naming {
                kind: NameKind::Constant,
                name: name.to_string(),
            });
        }
        if is_array || !takes_literal(&ty) {
            return Err(ParseError::Syntax {
                context: "constant (constants must be non-array primitives)".to_string(),
                text: line.to_string(),
            });
        }
        let value_text = raw.as_str().trim();
        let value = decode_scalar(&ty, value_text)?;
        let mut field = Field::constant(ty, name, value, Some(value_text.to_string()));
        field.upper_bound = upper_bound;
        return Ok(field);
    }

    if !FIELD_NAME.is_match(name) {
        return Err(ParseError::Naming {
            kind: NameKind::Field,
            name: name.to_string(),
        });
    }
    let mut field = Field::variable(ty, name);
    if is_array {
        field = field.with_array(array_length, array_bound);
    }
    field.upper_bound = upper_bound;
    if let Some(raw) = caps.name("default_value") {
        if !takes_literal(&field.ty) {
            return Err(ParseError::Syntax {
                context: "line".to_string(),
                text: line.to_string(),
            });
        }
        let text = raw.as_str().trim();
        field.default_value = Some(if is_array {
            decode_array(&field.ty, text)?
        } else {
            decode_scalar(&field.ty, text)?
        });
    }
    Ok(field)
}

/// Only bool, numeric and string types have a literal syntax.
fn takes_literal(ty: &str) -> bool {
    !matches!(
        PrimitiveType::from_tag(ty),
        None | Some(PrimitiveType::Time | PrimitiveType::Duration)
    )
}

fn count(line: &str, digits: Option<&str>) -> Result<Option<usize>, ParseError> {
    digits
        .map(|d| {
            d.parse::<usize>().map_err(|_| ParseError::Syntax {
                context: format!("count {d}"),
                text: line.to_string(),
            })
        })
        .transpose()
}
