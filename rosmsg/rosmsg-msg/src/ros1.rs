//! ROS 1 `.msg` line grammar.
//!
//! The grammar is a set of independent productions (one per type class for
//! fields, one per type class for constants). Every production is tried
//! against the whole line; exactly one must derive it. No derivation is a
//! syntax error, several are an ambiguity error.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, recognize, rest, value, verify},
    multi::many0,
    sequence::{pair, preceded, tuple},
};
use rosmsg_core::{
    Definition, Field, NameKind, ParseError, Value, decode_scalar, normalize_type,
};

use crate::lex::{header_name, is_lenient_identifier};

/// Grammar class of a type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeClass {
    Bool,
    Numeric,
    String,
    Time,
    Custom,
}

const PRODUCTIONS: [(TypeClass, bool); 8] = [
    (TypeClass::Bool, false),
    (TypeClass::Numeric, false),
    (TypeClass::String, false),
    (TypeClass::Time, false),
    (TypeClass::Custom, false),
    (TypeClass::Bool, true),
    (TypeClass::Numeric, true),
    (TypeClass::String, true),
];

fn classify(token: &str) -> TypeClass {
    match token {
        "bool" => TypeClass::Bool,
        "byte" | "char" | "float32" | "float64" | "int8" | "uint8" | "int16" | "uint16"
        | "int32" | "uint32" | "int64" | "uint64" => TypeClass::Numeric,
        "string" => TypeClass::String,
        "time" | "duration" => TypeClass::Time,
        _ => TypeClass::Custom,
    }
}

/// Array suffix: `None` for scalars, `Some(None)` for `[]`, `Some(Some(n))` for `[n]`.
type ArraySpec = Option<Option<usize>>;

/// One successful derivation of a line.
#[derive(Debug, Clone, PartialEq)]
struct RawLine<'a> {
    ty: &'a str,
    class: TypeClass,
    array: ArraySpec,
    name: &'a str,
    /// Text after `=` for constants.
    assignment: Option<&'a str>,
}

/// Identifier-like token, optionally package-qualified (`pkg/Type`).
fn word(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
        opt(pair(char('/'), pair(alpha1, many0(alt((alphanumeric1, tag("_"))))))),
    )))(input)
}

fn array_spec(input: &str) -> IResult<&str, ArraySpec> {
    opt(alt((
        value(None, tuple((char('['), space0, char(']')))),
        map(
            tuple((
                char('['),
                space0,
                map_res(digit1, str::parse::<usize>),
                space0,
                char(']'),
            )),
            |(_, _, n, _, _)| Some(n),
        ),
    )))(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('#'), rest))(input)
}

fn field_line(class: TypeClass, input: &str) -> IResult<&str, RawLine<'_>> {
    map(
        tuple((
            space0,
            verify(word, |token: &str| classify(token) == class),
            array_spec,
            space1,
            word,
            space0,
            opt(comment),
            space0,
        )),
        |(_, ty, array, _, name, _, _, _)| RawLine {
            ty,
            class,
            array,
            name,
            assignment: None,
        },
    )(input)
}

fn constant_line(class: TypeClass, input: &str) -> IResult<&str, RawLine<'_>> {
    map(
        tuple((
            space0,
            verify(word, |token: &str| classify(token) == class),
            space1,
            word,
            space0,
            preceded(char('='), verify(rest, |s: &str| !s.is_empty())),
        )),
        |(_, ty, _, name, _, assignment)| RawLine {
            ty,
            class,
            array: None,
            name,
            assignment: Some(assignment),
        },
    )(input)
}

/// All derivations of `line` across the grammar's productions.
fn derivations(line: &str) -> Vec<RawLine<'_>> {
    PRODUCTIONS
        .iter()
        .filter_map(|&(class, is_constant)| {
            let result = if is_constant {
                all_consuming(|i| constant_line(class, i))(line)
            } else {
                all_consuming(|i| field_line(class, i))(line)
            };
            result.ok().map(|(_, raw)| raw)
        })
        .collect()
}

/// Parse one ROS 1 line into a field.
fn parse_line(line: &str) -> Result<Field, ParseError> {
    let mut found = derivations(line);
    if found.len() > 1 {
        return Err(ParseError::Ambiguous {
            line: line.to_string(),
        });
    }
    let raw = found.pop().ok_or_else(|| ParseError::Syntax {
        context: "line".to_string(),
        text: line.to_string(),
    })?;
    build_field(raw).map_err(|e| e.at_line(line))
}

fn build_field(raw: RawLine<'_>) -> Result<Field, ParseError> {
    let ty = normalize_type(raw.ty);

    let Some(assignment) = raw.assignment else {
        if !is_lenient_identifier(raw.name) {
            return Err(ParseError::Naming {
                kind: NameKind::Field,
                name: raw.name.to_string(),
            });
        }
        let field = Field::variable(ty, raw.name);
        return Ok(match raw.array {
            Some(length) => field.with_array(length, None),
            None => field,
        });
    };

    if !is_lenient_identifier(raw.name) {
        return Err(ParseError::Naming {
            kind: NameKind::Constant,
            name: raw.name.to_string(),
        });
    }
    // String constants keep everything after `=`, comments included.
    let (value, value_text) = if raw.class == TypeClass::String {
        let text = assignment.trim();
        (Value::String(text.to_string()), text)
    } else {
        let text = assignment.split('#').next().unwrap_or("").trim();
        (decode_scalar(ty, text)?, text)
    };
    Ok(Field::constant(
        ty,
        raw.name,
        value,
        Some(value_text.to_string()),
    ))
}

/// Build one definition from the lines of a ROS 1 block.
pub fn build_definition(lines: &[&str]) -> Result<Definition, ParseError> {
    let mut name = None;
    let mut fields = Vec::with_capacity(lines.len());

    for &line in lines {
        if let Some(header) = header_name(line) {
            name = header.map(str::to_string);
            continue;
        }
        fields.push(parse_line(line)?);
    }
    Ok(Definition::new(name, fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_line_has_a_single_derivation() {
        for line in [
            "int32 x",
            "Header header",
            "geometry_msgs/Point[4] corners",
            "time stamp",
            "string[] names",
            "uint8[16] uuid # comment",
            "int32 FOO = 1",
            "string S = a # b",
            "bool B=True",
        ] {
            assert_eq!(derivations(line).len(), 1, "{line}");
        }
    }

    #[test]
    fn keyword_prefixes_are_custom_types() {
        let found = derivations("boolean flag");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].class, TypeClass::Custom);
    }

    #[test]
    fn package_qualified_words() {
        assert_eq!(word("geometry_msgs/Point rest"), Ok((" rest", "geometry_msgs/Point")));
        assert_eq!(word("_private"), Ok(("", "_private")));
        assert_eq!(word("pkg/ x"), Ok(("/ x", "pkg")));
    }

    #[test]
    fn unsupported_shapes_have_no_derivation() {
        for line in [
            "int32[<=3] bounded",
            "time T = 1",
            "Header H = 1",
            "int32 X =",
            "int32",
            "int32 x y",
        ] {
            assert!(derivations(line).is_empty(), "{line}");
        }
    }
}
