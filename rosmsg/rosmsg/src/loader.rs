//! Dependency bundling for `.msg` definitions.
//!
//! A single `.msg` file only names the types it uses. [`bundle_definitions`]
//! follows those references through a [`DefinitionProvider`] and concatenates
//! every definition into one self-contained text that [`parse`] can resolve:
//!
//! ```text
//! <root text>
//! ================================================================================
//! MSG: geometry_msgs/Point
//! <text of geometry_msgs/Point>
//! ```

use std::{
    collections::{HashMap, HashSet, VecDeque},
    convert::Infallible,
};

use rosmsg_core::{DEFINITION_DIVIDER, Dialect, ParseError, complex_type_names};

use crate::{error::LoaderError, options::ParseOptions, parse::parse};

/// Source of raw definition text, keyed by full type name (`pkg/Type` or
/// `pkg/msg/Type`).
pub trait DefinitionProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The text of `full_type_name`, or `None` if it is unknown.
    fn definition_text(&mut self, full_type_name: &str) -> Result<Option<String>, Self::Error>;
}

impl DefinitionProvider for HashMap<String, String> {
    type Error = Infallible;

    fn definition_text(&mut self, full_type_name: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.get(full_type_name).cloned())
    }
}

/// Bundle `root_text` (a definition of package `package`) with every type it
/// transitively references.
///
/// Types are loaded breadth-first in first-seen order, each exactly once.
/// Unqualified names are resolved in the package of the definition that
/// references them, except a ROS 1 `Header`, which is `std_msgs/Header`.
pub fn bundle_definitions<P: DefinitionProvider>(
    root_text: &str,
    package: &str,
    dialect: Dialect,
    provider: &mut P,
) -> Result<String, LoaderError> {
    if !dialect.is_line_oriented() {
        return Err(LoaderError::Parse {
            context: "root definition".to_string(),
            source: ParseError::UnsupportedDialect {
                dialect: dialect.to_string(),
            },
        });
    }
    let options = ParseOptions::from(dialect).with_skip_type_fixup(true);

    let mut queue = VecDeque::new();
    let mut seen = HashSet::new();
    let root_refs = referenced_types(root_text, package, options).map_err(|source| {
        LoaderError::Parse {
            context: "root definition".to_string(),
            source,
        }
    })?;
    enqueue(root_refs, &mut queue, &mut seen);

    let mut out = format!("{root_text}\n");
    while let Some(type_name) = queue.pop_front() {
        let text = provider
            .definition_text(&type_name)
            .map_err(|e| LoaderError::Provider(Box::new(e)))?
            .ok_or_else(|| LoaderError::NotFound {
                type_name: type_name.clone(),
            })?;
        tracing::debug!(type_name = %type_name, queued = queue.len(), "loaded dependency");

        out.push_str(&format!("{DEFINITION_DIVIDER}\nMSG: {type_name}\n{text}\n"));

        let refs = referenced_types(&text, package_of(&type_name), options).map_err(|source| {
            LoaderError::Parse {
                context: format!("definition of {type_name}"),
                source,
            }
        })?;
        enqueue(refs, &mut queue, &mut seen);
    }
    Ok(out)
}

/// Complex types used by `text`, qualified with `package` when written bare.
fn referenced_types(
    text: &str,
    package: &str,
    options: ParseOptions,
) -> Result<Vec<String>, ParseError> {
    let definitions = parse(text, options)?;
    Ok(complex_type_names(&definitions)
        .into_iter()
        .map(|ty| qualify(&ty, package, options.dialect()))
        .collect())
}

fn enqueue(types: Vec<String>, queue: &mut VecDeque<String>, seen: &mut HashSet<String>) {
    for ty in types {
        if seen.insert(ty.clone()) {
            queue.push_back(ty);
        }
    }
}

/// ROS 1 reads a bare `Header` as `std_msgs/Header` in every package.
fn qualify(ty: &str, package: &str, dialect: Dialect) -> String {
    if ty.contains('/') {
        ty.to_string()
    } else if ty == "Header" && dialect == Dialect::Ros1Msg {
        "std_msgs/Header".to_string()
    } else {
        format!("{package}/{ty}")
    }
}

fn package_of(type_name: &str) -> &str {
    type_name.split('/').next().unwrap_or(type_name)
}
