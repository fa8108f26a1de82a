//! Type-name fixup for the line-oriented dialects.
//!
//! Every complex field's locally written type (`Point`, `geometry_msgs/Point`)
//! is rewritten to the full name of the sibling definition it refers to.
//!
//! # Lookup strategy
//!
//! 1. **Exact match**: a definition named exactly as written.
//! 2. **Suffix match**: a definition whose name ends with `/` + the written
//!    name (`Point` and `geometry_msgs/Point` both find `geometry_msgs/Point`).
//! 3. **Ambiguity**: more than one match is an error rather than a guess.
//! 4. **Error**: no match at all.

use crate::{
    definition::{Definition, Field},
    error::ParseError,
};

/// Rewrite complex field types in place to the names of their sibling definitions.
pub fn fixup_types(definitions: &mut [Definition]) -> Result<(), ParseError> {
    // Resolve against a snapshot of the names so fields can be updated in place.
    let names: Vec<Option<String>> = definitions.iter().map(|d| d.name.clone()).collect();

    for def in definitions.iter_mut() {
        for field in def.fields.iter_mut().filter(|f| f.is_complex) {
            let resolved = find_type_by_name(&names, &field.ty)?;
            if resolved != field.ty {
                tracing::debug!(from = %field.ty, to = %resolved, field = %field.name, "fixup type");
            }
            field.ty = resolved;
        }
    }
    Ok(())
}

/// Find the unique definition name matching `wanted`.
fn find_type_by_name(names: &[Option<String>], wanted: &str) -> Result<String, ParseError> {
    let suffix = format!("/{wanted}");

    let mut candidates = names.iter().filter_map(|name| {
        let name = name.as_deref().unwrap_or("");
        (name == wanted || name.ends_with(&suffix)).then(|| name.to_string())
    });
    let Some(found) = candidates.next() else {
        return Err(ParseError::UnresolvedType {
            type_name: wanted.to_string(),
        });
    };
    let others: Vec<String> = candidates.collect();
    if !others.is_empty() {
        let mut all = vec![found];
        all.extend(others);
        return Err(ParseError::AmbiguousType {
            type_name: wanted.to_string(),
            candidates: all,
        });
    }
    Ok(found)
}

/// Complex types referenced by `definitions`, unique and in first-seen order.
pub fn complex_type_names(definitions: &[Definition]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for field in definitions.iter().flat_map(|d| d.fields.iter()) {
        if is_reference(field) && !seen.contains(&field.ty) {
            seen.push(field.ty.clone());
        }
    }
    seen
}

fn is_reference(field: &Field) -> bool {
    field.is_complex && !field.is_constant
}
