//! Canonical text rendering of resolved definitions.
//!
//! The output is the preimage for type checksums, so it must be byte-stable:
//! parsing it again and rendering yields the same text.

use std::fmt;

use crate::definition::{Definition, Field, Value};

/// Divider line placed before every definition except the root.
pub const DEFINITION_DIVIDER: &str =
    "================================================================================";

/// Render `definitions` in canonical form.
pub fn stringify(definitions: &[Definition]) -> String {
    let mut out = String::new();
    for (i, def) in definitions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(DEFINITION_DIVIDER);
            out.push('\n');
            out.push_str(&format!("MSG: {}\n", def.name.as_deref().unwrap_or("")));
        }

        for field in def.constants() {
            out.push_str(&format!(
                "{} {} = {}\n",
                field.ty,
                field.name,
                constant_text(field)
            ));
        }

        let mut variables = def.variables().peekable();
        if variables.peek().is_none() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        for field in variables {
            out.push_str(&variable_line(field));
        }
    }
    out
}

/// Write the canonical form of `definitions` into any text sink.
pub fn write_canonical<W: fmt::Write>(definitions: &[Definition], out: &mut W) -> fmt::Result {
    out.write_str(&stringify(definitions))
}

fn variable_line(field: &Field) -> String {
    let mut line = field.ty.clone();
    if let Some(bound) = field.upper_bound {
        line.push_str(&format!("<={bound}"));
    }
    if field.is_array {
        match (field.array_length, field.array_upper_bound) {
            (Some(n), _) => line.push_str(&format!("[{n}]")),
            (None, Some(n)) => line.push_str(&format!("[<={n}]")),
            (None, None) => line.push_str("[]"),
        }
    }
    line.push(' ');
    line.push_str(&field.name);
    if let Some(default) = &field.default_value {
        line.push(' ');
        line.push_str(&encode_value(default));
    }
    line.push('\n');
    line
}

/// String constants keep the literal text they were written with.
fn constant_text(field: &Field) -> String {
    match (&field.value, &field.value_text) {
        (Some(Value::String(_)), Some(text)) => text.clone(),
        (Some(value), _) => encode_value(value),
        (None, _) => String::new(),
    }
}

/// Deterministic encoding of a decoded literal.
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Float(v) => format_number(*v),
        Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(encode_value).collect();
            format!("[{}]", parts.join(", "))
        }
    }
}

/// Shortest round-trip decimal; exponent form outside `[1e-6, 1e21)`.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if (1e-6..1e21).contains(&v.abs()) {
        return v.to_string();
    }
    let exp = format!("{v:e}");
    match exp.split_once('e') {
        Some((mantissa, e)) if !e.starts_with('-') => format!("{mantissa}e+{e}"),
        _ => exp,
    }
}
