//! ROS 2 IDL document grammar built from nom parser combinators.
//!
//! The whole document is parsed at once into a tree of [`IdlNode`]s.
//!
//! # Supported Features
//!
//! - Nested `module` and `struct` declarations
//! - Fields, `const` declarations and `typedef`s, at module or struct level
//! - IDL keyword types (`boolean`, `octet`, `short`, `unsigned long long`, ...)
//! - `sequence<T>`, `sequence<T, N>`, `string<N>`, `wstring<N>` and `name[N]`
//! - Bounds and values that name a constant
//! - Annotations; `@default(value=...)` becomes the field default
//! - `#include` directives (ignored)
//!
//! # Unsupported Features
//!
//! `union`, `enum`, `bitmask`, multi-dimensional arrays and sequences of
//! arrays do not match the grammar and fail the whole document.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{is_not, tag, tag_no_case},
    character::complete::{
        alpha1, alphanumeric1, anychar, char, digit1, hex_digit1, multispace0, multispace1,
        none_of, space0,
    },
    combinator::{all_consuming, map, map_opt, map_res, opt, recognize, value, verify},
    error::{Error, ErrorKind},
    multi::{many0, separated_list0},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated, tuple},
};
use rosmsg_core::{ParseError, Value, decode_string};

use crate::{
    ast::{IdlMember, IdlNode, Literal},
    lex::strip_comments,
};

/// Parse one IDL document into its top-level nodes.
pub fn parse_document(text: &str) -> Result<Vec<IdlNode>, ParseError> {
    let stripped = strip_comments(text);
    let parsed = all_consuming(preceded(
        multispace0,
        many0(terminated(item, multispace0)),
    ))(stripped.as_str());

    match parsed {
        Ok((_, items)) => Ok(items.into_iter().flatten().collect()),
        Err(_) => Err(ParseError::Syntax {
            context: "message definition".to_string(),
            text: text.to_string(),
        }),
    }
}

/// Element type and bounds of a type specifier, before the declarator.
#[derive(Debug, Clone)]
struct TypeSpec {
    ty: String,
    upper_bound: Option<Literal>,
    /// `Some(bound)` for `sequence<T[, bound]>`.
    sequence: Option<Option<Literal>>,
}

impl TypeSpec {
    fn named(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            upper_bound: None,
            sequence: None,
        }
    }
}

struct Annotation<'a> {
    name: &'a str,
    params: Vec<(Option<&'a str>, Literal)>,
}

/// Module-level item; `None` for directives that produce no node.
fn item(input: &str) -> IResult<&str, Option<IdlNode>> {
    alt((
        value(None, include),
        map(
            terminated(declaration, pair(multispace0, char(';'))),
            Some,
        ),
    ))(input)
}

fn include(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        tag("#include"),
        space0,
        alt((
            string_piece,
            recognize(delimited(char('<'), is_not(">\n"), char('>'))),
        )),
    )))(input)
}

fn declaration(input: &str) -> IResult<&str, IdlNode> {
    let (input, annotations) = many0(terminated(annotation, multispace0))(input)?;
    let (input, node) = alt((module, structure, typedef, constant, field))(input)?;
    Ok((input, annotate(node, &annotations)))
}

fn member(input: &str) -> IResult<&str, IdlNode> {
    let (input, annotations) = many0(terminated(annotation, multispace0))(input)?;
    let (input, node) = terminated(alt((constant, field)), pair(multispace0, char(';')))(input)?;
    Ok((input, annotate(node, &annotations)))
}

fn annotate(mut node: IdlNode, annotations: &[Annotation<'_>]) -> IdlNode {
    if let IdlNode::Field(m) = &mut node {
        let default = annotations
            .iter()
            .filter(|a| a.name == "default")
            .flat_map(|a| a.params.iter())
            .find(|(key, _)| matches!(key, None | Some("value")));
        if let Some((_, literal)) = default {
            m.default_value = Some(literal.clone());
        }
    }
    node
}

/// `@name` or `@name(key=value, ...)`.
fn annotation(input: &str) -> IResult<&str, Annotation<'_>> {
    map(
        tuple((
            char('@'),
            scoped_name,
            opt(preceded(
                multispace0,
                delimited(
                    pair(char('('), multispace0),
                    separated_list0(tuple((multispace0, char(','), multispace0)), annotation_param),
                    pair(multispace0, char(')')),
                ),
            )),
        )),
        |(_, name, params)| Annotation {
            name,
            params: params.unwrap_or_default(),
        },
    )(input)
}

fn annotation_param(input: &str) -> IResult<&str, (Option<&str>, Literal)> {
    alt((
        map(
            tuple((identifier, multispace0, char('='), multispace0, literal)),
            |(key, _, _, _, (lit, _))| (Some(key), lit),
        ),
        map(literal, |(lit, _)| (None, lit)),
    ))(input)
}

fn module(input: &str) -> IResult<&str, IdlNode> {
    map(
        tuple((
            tag("module"),
            multispace1,
            identifier,
            multispace0,
            char('{'),
            multispace0,
            many0(terminated(item, multispace0)),
            char('}'),
        )),
        |(_, _, name, _, _, _, items, _)| IdlNode::Module {
            name: name.to_string(),
            children: items.into_iter().flatten().collect(),
        },
    )(input)
}

fn structure(input: &str) -> IResult<&str, IdlNode> {
    map(
        tuple((
            tag("struct"),
            multispace1,
            identifier,
            multispace0,
            char('{'),
            multispace0,
            many0(terminated(member, multispace0)),
            char('}'),
        )),
        |(_, _, name, _, _, _, children, _)| IdlNode::Struct {
            name: name.to_string(),
            children,
        },
    )(input)
}

fn typedef(input: &str) -> IResult<&str, IdlNode> {
    map_res(
        tuple((tag("typedef"), multispace1, type_spec, multispace1, declarator)),
        |(_, _, spec, _, (name, array))| build_member(spec, name, array).map(IdlNode::Typedef),
    )(input)
}

fn field(input: &str) -> IResult<&str, IdlNode> {
    map_res(
        tuple((type_spec, multispace1, declarator)),
        |(spec, _, (name, array))| build_member(spec, name, array).map(IdlNode::Field),
    )(input)
}

fn constant(input: &str) -> IResult<&str, IdlNode> {
    map(
        tuple((
            tag("const"),
            multispace1,
            verify(type_spec, |spec: &TypeSpec| spec.sequence.is_none()),
            multispace1,
            identifier,
            multispace0,
            char('='),
            multispace0,
            literal,
        )),
        |(_, _, spec, _, name, _, _, _, (value, text))| {
            IdlNode::Constant(IdlMember {
                ty: spec.ty,
                name: name.to_string(),
                upper_bound: spec.upper_bound,
                value: Some(value),
                value_text: text.map(str::to_string),
                ..IdlMember::default()
            })
        },
    )(input)
}

fn build_member(
    spec: TypeSpec,
    name: &str,
    array: Option<Literal>,
) -> Result<IdlMember, &'static str> {
    let (is_array, array_length, array_upper_bound) = match (spec.sequence, array) {
        (Some(_), Some(_)) => return Err("arrays of sequences are not supported"),
        (Some(bound), None) => (true, None, bound),
        (None, Some(length)) => (true, Some(length), None),
        (None, None) => (false, None, None),
    };
    Ok(IdlMember {
        ty: spec.ty,
        name: name.to_string(),
        is_array,
        array_length,
        array_upper_bound,
        upper_bound: spec.upper_bound,
        ..IdlMember::default()
    })
}

/// `name` or `name[N]`.
fn declarator(input: &str) -> IResult<&str, (&str, Option<Literal>)> {
    pair(
        identifier,
        opt(delimited(
            tuple((multispace0, char('['), multispace0)),
            bound,
            pair(multispace0, char(']')),
        )),
    )(input)
}

fn type_spec(input: &str) -> IResult<&str, TypeSpec> {
    alt((sequence_type, base_type))(input)
}

/// `sequence<T>` or `sequence<T, N>`. Sequences of sequences are not accepted.
fn sequence_type(input: &str) -> IResult<&str, TypeSpec> {
    map(
        tuple((
            tag("sequence"),
            multispace0,
            char('<'),
            multispace0,
            base_type,
            opt(preceded(tuple((multispace0, char(','), multispace0)), bound)),
            multispace0,
            char('>'),
        )),
        |(_, _, _, _, base, bound, _, _)| TypeSpec {
            sequence: Some(bound),
            ..base
        },
    )(input)
}

fn base_type(input: &str) -> IResult<&str, TypeSpec> {
    alt((
        bounded_string,
        map(multiword_type, TypeSpec::named),
        map(scoped_name, |name| TypeSpec::named(keyword_tag(name))),
    ))(input)
}

/// `string<N>` / `wstring<N>`
fn bounded_string(input: &str) -> IResult<&str, TypeSpec> {
    map(
        tuple((
            alt((tag("wstring"), tag("string"))),
            multispace0,
            char('<'),
            multispace0,
            bound,
            multispace0,
            char('>'),
        )),
        |(ty, _, _, _, n, _, _)| TypeSpec {
            ty: ty.to_string(),
            upper_bound: Some(n),
            sequence: None,
        },
    )(input)
}

/// Integer types spelled with several keywords (longer matches first).
fn multiword_type(input: &str) -> IResult<&str, &'static str> {
    terminated(
        alt((
            value(
                "uint64",
                tuple((tag("unsigned"), multispace1, tag("long"), multispace1, tag("long"))),
            ),
            value("int64", tuple((tag("long"), multispace1, tag("long")))),
            value("uint16", tuple((tag("unsigned"), multispace1, tag("short")))),
            value("uint32", tuple((tag("unsigned"), multispace1, tag("long")))),
        )),
        keyword_boundary,
    )(input)
}

/// Map single-word IDL type keywords to primitive tags.
fn keyword_tag(name: &str) -> &str {
    match name {
        "boolean" => "bool",
        "octet" => "uint8",
        "short" => "int16",
        "long" => "int32",
        "float" => "float32",
        "double" => "float64",
        other => other,
    }
}

/// A positive count or the name of a constant.
fn bound(input: &str) -> IResult<&str, Literal> {
    alt((
        map_res(digit1, |d: &str| {
            d.parse::<u64>().map(|n| Literal::Direct(Value::UInt(n)))
        }),
        map(scoped_name, |name| Literal::ConstantRef(name.to_string())),
    ))(input)
}

/// A literal plus its text when it is a single token.
fn literal(input: &str) -> IResult<&str, (Literal, Option<&str>)> {
    alt((
        string_literal,
        map(recognize(boolean), |text| {
            let b = text.eq_ignore_ascii_case("true");
            (Literal::Direct(Value::Bool(b)), Some(text))
        }),
        map_opt(recognize(preceded(tag_no_case("0x"), hex_digit1)), |text: &str| {
            u64::from_str_radix(&text[2..], 16)
                .ok()
                .map(|v| (Literal::Direct(Value::UInt(v)), Some(text)))
        }),
        map_opt(recognize_float, |text: &str| {
            decimal_value(text).map(|v| (Literal::Direct(v), Some(text)))
        }),
        map(scoped_name, |name| {
            (Literal::ConstantRef(name.to_string()), Some(name))
        }),
    ))(input)
}

fn boolean(input: &str) -> IResult<&str, &str> {
    terminated(
        alt((tag("TRUE"), tag("FALSE"), tag("true"), tag("false"))),
        keyword_boundary,
    )(input)
}

/// Integers become `Int` (or `UInt` above `i64::MAX`); anything with a
/// fraction or exponent becomes `Float`.
fn decimal_value(text: &str) -> Option<Value> {
    if text.contains(['.', 'e', 'E']) {
        return text.parse::<f64>().ok().map(Value::Float);
    }
    let v: i128 = text.parse().ok()?;
    i64::try_from(v)
        .map(Value::Int)
        .ok()
        .or_else(|| u64::try_from(v).ok().map(Value::UInt))
}

/// One or more adjacent `"..."` pieces, concatenated.
fn string_literal(input: &str) -> IResult<&str, (Literal, Option<&str>)> {
    map_res(
        pair(string_piece, many0(preceded(multispace0, string_piece))),
        |(first, rest)| {
            let mut text = decode_string(first)?;
            for piece in &rest {
                text.push_str(&decode_string(piece)?);
            }
            let raw = rest.is_empty().then_some(first);
            Ok::<_, ParseError>((Literal::Direct(Value::String(text)), raw))
        },
    )(input)
}

fn string_piece(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('"'),
        many0(alt((preceded(char('\\'), anychar), none_of("\"\\")))),
        char('"'),
    ))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

/// `a::b::C`
fn scoped_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(identifier, many0(pair(tag("::"), identifier))))(input)
}

fn keyword_boundary(input: &str) -> IResult<&str, ()> {
    if input.chars().next().is_some_and(is_ident_continue) {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((input, ()))
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiword_types_respect_identifier_boundaries() {
        assert_eq!(multiword_type("unsigned long long x"), Ok((" x", "uint64")));
        assert_eq!(multiword_type("unsigned long x"), Ok((" x", "uint32")));
        assert!(multiword_type("long long_value").is_err());
    }

    #[test]
    fn literals_are_decoded_by_syntax() {
        let lit = |s| literal(s).map(|(_, (l, _))| l);
        assert_eq!(lit("40"), Ok(Literal::Direct(Value::Int(40))));
        assert_eq!(lit("-1.5e3"), Ok(Literal::Direct(Value::Float(-1500.0))));
        assert_eq!(lit("0x1F"), Ok(Literal::Direct(Value::UInt(31))));
        assert_eq!(lit("TRUE"), Ok(Literal::Direct(Value::Bool(true))));
        assert_eq!(
            lit("\"a\" \"b\""),
            Ok(Literal::Direct(Value::String("ab".into())))
        );
        assert_eq!(
            lit("pkg::MAX"),
            Ok(Literal::ConstantRef("pkg::MAX".into()))
        );
        assert_eq!(
            lit("TRUE_VALUE"),
            Ok(Literal::ConstantRef("TRUE_VALUE".into()))
        );
    }

    #[test]
    fn sequence_of_arrays_is_rejected() {
        assert!(field("sequence<int32> values[3]").is_err());
        assert!(field("sequence<sequence<int32>> values").is_err());
    }
}
