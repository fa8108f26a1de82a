//! Literal decoding for constants and field defaults.
//!
//! Decoding is dispatched on the *declared* field type, never on the literal's
//! own syntax: `"1"` is `true` for a `bool`, `1` for an `int8` and `"1"` for a
//! `string`.

use std::num::IntErrorKind;

use nom::{combinator::all_consuming, number::complete::recognize_float};

use crate::{definition::Value, error::ParseError, primitive::PrimitiveType};

fn primitive_for_literal(ty: &str) -> Result<PrimitiveType, ParseError> {
    match PrimitiveType::from_tag(ty) {
        Some(PrimitiveType::Time | PrimitiveType::Duration) | None => Err(ParseError::literal(
            ty,
            "literals are only allowed for bool, numeric and string types",
        )),
        Some(prim) => Ok(prim),
    }
}

/// Decode one scalar literal of type `ty`. Surrounding whitespace is ignored.
pub fn decode_scalar(ty: &str, raw: &str) -> Result<Value, ParseError> {
    let text = raw.trim();
    let prim = primitive_for_literal(ty)?;
    match prim {
        PrimitiveType::Bool => match text {
            "true" | "True" | "1" => Ok(Value::Bool(true)),
            "false" | "False" | "0" => Ok(Value::Bool(false)),
            _ => Err(ParseError::literal(ty, format!("'{text}' is not a boolean"))),
        },
        PrimitiveType::F32 | PrimitiveType::F64 => decode_float(ty, text).map(Value::Float),
        PrimitiveType::String | PrimitiveType::WString => decode_string(text).map(Value::String),
        _ => decode_integer(prim, text),
    }
}

fn decode_float(ty: &str, text: &str) -> Result<f64, ParseError> {
    let recognized: Result<_, nom::Err<nom::error::Error<&str>>> =
        all_consuming(recognize_float)(text);
    let value = match recognized {
        Ok(_) => text.parse::<f64>().ok(),
        Err(_) => None,
    };
    match value {
        Some(v) if !v.is_nan() => Ok(v),
        _ => Err(ParseError::literal(ty, format!("'{text}' is not a number"))),
    }
}

/// Decode an exact decimal integer and range-check it against `prim`'s width.
fn decode_integer(prim: PrimitiveType, text: &str) -> Result<Value, ParseError> {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::literal(
            prim.as_str(),
            format!("'{text}' is not an integer"),
        ));
    }
    match text.parse::<i128>() {
        Ok(v) => integer_value(prim, v, text),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(range_error(prim, text))
        }
        Err(e) => Err(ParseError::literal(prim.as_str(), e.to_string())),
    }
}

fn range_error(prim: PrimitiveType, text: &str) -> ParseError {
    let (min, max) = prim.integer_range().unwrap_or((0, 0));
    ParseError::Range {
        value: text.to_string(),
        min,
        max,
    }
}

/// Range-check `v` against an integer type and wrap it in the matching [`Value`].
fn integer_value(prim: PrimitiveType, v: i128, text: &str) -> Result<Value, ParseError> {
    let Some((min, max)) = prim.integer_range() else {
        return Err(ParseError::literal(prim.as_str(), "not an integer type"));
    };
    if v < min || v > max {
        return Err(range_error(prim, text));
    }
    // The range check above guarantees both conversions succeed.
    if prim.is_signed_integer() {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| range_error(prim, text))
    } else {
        u64::try_from(v)
            .map(Value::UInt)
            .map_err(|_| range_error(prim, text))
    }
}

/// Decode a possibly quoted string literal, resolving escape sequences.
///
/// Unquoted text is taken verbatim. A literal quoted with `'` or `"` must end
/// with the same character, and that character may only appear escaped inside.
pub fn decode_string(text: &str) -> Result<String, ParseError> {
    let (body, quote) = match text.chars().next() {
        Some(q @ ('\'' | '"')) => {
            if text.len() < 2 || !text.ends_with(q) {
                return Err(ParseError::literal(
                    "string",
                    format!("expected terminating {q} in string literal: {text}"),
                ));
            }
            (&text[1..text.len() - 1], Some(q))
        }
        _ => (text, None),
    };
    unescape(body, quote)
}

fn unescape(body: &str, quote: Option<char>) -> Result<String, ParseError> {
    let invalid = |detail: String| ParseError::literal("string", detail);
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if Some(c) == quote {
            return Err(invalid(format!("unescaped {c} in string literal: {body}")));
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            return Err(invalid(format!("dangling escape in string literal: {body}")));
        };
        let decoded = match esc {
            '\'' | '"' | '\\' => esc,
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '0'..='7' => {
                let mut code = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            code = code * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                code_point(code, body)?
            }
            'x' | 'u' | 'U' => {
                let width = match esc {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let mut code = 0u32;
                for _ in 0..width {
                    let digit = chars.next().and_then(|d| d.to_digit(16)).ok_or_else(|| {
                        invalid(format!(
                            "\\{esc} expects {width} hex digits in string literal: {body}"
                        ))
                    })?;
                    code = code * 16 + digit;
                }
                code_point(code, body)?
            }
            other => {
                return Err(invalid(format!(
                    "invalid escape \\{other} in string literal: {body}"
                )));
            }
        };
        out.push(decoded);
    }
    Ok(out)
}

fn code_point(code: u32, body: &str) -> Result<char, ParseError> {
    char::from_u32(code).ok_or_else(|| {
        ParseError::literal(
            "string",
            format!("escape U+{code:X} is not a valid code point in: {body}"),
        )
    })
}

/// Decode a bracketed array literal whose elements have type `ty`.
pub fn decode_array(ty: &str, raw: &str) -> Result<Value, ParseError> {
    let text = raw.trim();
    let inner = text
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ParseError::literal(ty, "array must start with [ and end with ]"))?;
    let prim = primitive_for_literal(ty)?;

    if prim.is_string() {
        return decode_string_elements(ty, inner).map(Value::Array);
    }
    if inner.trim().is_empty() {
        return Ok(Value::Array(Vec::new()));
    }
    inner
        .split(',')
        .map(|part| decode_scalar(ty, part.trim()))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// Scan `"..."`, `'...'` or bare elements separated by commas.
fn decode_string_elements(ty: &str, inner: &str) -> Result<Vec<Value>, ParseError> {
    let mut values = Vec::new();
    let mut rest = inner.trim_start();
    while !rest.is_empty() {
        if rest.starts_with(',') {
            return Err(ParseError::literal(
                ty,
                "expected array element before comma",
            ));
        }
        let (element, after) = split_array_element(ty, rest)?;
        values.push(Value::String(decode_string(element.trim_end())?));

        rest = after.trim_start();
        if rest.is_empty() {
            break;
        }
        rest = rest
            .strip_prefix(',')
            .ok_or_else(|| ParseError::literal(ty, "expected comma or end of array"))?
            .trim_start();
    }
    Ok(values)
}

/// Split off the leading element of `s`, honoring quotes and backslash escapes.
fn split_array_element<'a>(ty: &str, s: &'a str) -> Result<(&'a str, &'a str), ParseError> {
    let quote = s.chars().next().filter(|c| matches!(c, '"' | '\''));
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(usize::from(quote.is_some())) {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', _) => escaped = true,
            (c, Some(q)) if c == q => return Ok(s.split_at(i + c.len_utf8())),
            (',' | ']' | '#', None) => return Ok(s.split_at(i)),
            _ => {}
        }
    }
    match quote {
        Some(q) => Err(ParseError::literal(
            ty,
            format!("expected terminating {q} in array element: {s}"),
        )),
        None => Ok((s, "")),
    }
}

/// Convert a literal decoded by its own syntax (as IDL literals are) into a
/// value of the declared type `ty`, applying the same range rules as
/// [`decode_scalar`]. String values for array types are decoded as array literals.
pub fn coerce_value(ty: &str, is_array: bool, value: Value) -> Result<Value, ParseError> {
    if is_array {
        return match value {
            Value::String(text) => decode_array(ty, &text),
            Value::Array(items) => items
                .into_iter()
                .map(|item| coerce_value(ty, false, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            other => Err(ParseError::literal(
                ty,
                format!("expected an array literal, found {other:?}"),
            )),
        };
    }

    let prim = primitive_for_literal(ty)?;
    match value {
        Value::Bool(b) if prim == PrimitiveType::Bool => Ok(Value::Bool(b)),
        Value::Int(v) if prim.is_float() => Ok(Value::Float(v as f64)),
        Value::UInt(v) if prim.is_float() => Ok(Value::Float(v as f64)),
        Value::Int(v) if prim.integer_range().is_some() => {
            integer_value(prim, i128::from(v), &v.to_string())
        }
        Value::UInt(v) if prim.integer_range().is_some() => {
            integer_value(prim, i128::from(v), &v.to_string())
        }
        Value::Float(v) if prim.is_float() => Ok(Value::Float(v)),
        Value::String(s) if prim.is_string() => Ok(Value::String(s)),
        other => Err(ParseError::literal(
            ty,
            format!("{other:?} is not a valid {ty} literal"),
        )),
    }
}
