//! ROS 2 IDL grammar and namespace flattening.
//!
//! # Pipeline
//!
//! ```text
//! IDL text (one document or a bundle)
//!   └─ SchemaBundle::parse       – split sections at `====` separators
//!       └─ parse_document        – nom-based IDL grammar → IdlNode tree
//!           └─ resolve_document  – typedefs, constants, flattening → Definition list
//! ```
//!
//! The output has the same flat shape as the `.msg` dialects, with fully
//! qualified `/`-joined names, so no type-name fixup is needed afterwards.

mod ast;
mod lex;
mod parser;
mod resolver;
mod schema_bundle;

use rosmsg_core::{Definition, ParseError};

pub use ast::{IdlMember, IdlNode, Literal};
pub use parser::parse_document;
pub use resolver::resolve_document;
pub use schema_bundle::{IdlSection, SchemaBundle};

/// Parse IDL text into resolved definitions, section by section.
///
/// Errors from a section with an `IDL:` header are wrapped in
/// [`ParseError::InSection`].
pub fn parse_idl(text: &str) -> Result<Vec<Definition>, ParseError> {
    let bundle = SchemaBundle::parse(text);
    tracing::debug!(sections = bundle.sections.len(), "parse IDL bundle");

    let mut definitions = Vec::new();
    for section in &bundle.sections {
        let resolved = parse_document(&section.body).and_then(|nodes| resolve_document(&nodes));
        match (resolved, &section.idl_path) {
            (Ok(defs), _) => definitions.extend(defs),
            (Err(e), Some(path)) => return Err(e.in_section(path)),
            (Err(e), None) => return Err(e),
        }
    }
    Ok(definitions)
}
