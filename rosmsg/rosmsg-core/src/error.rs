//! Error type shared by every stage of definition parsing.

use std::fmt;

/// Which identifier rule a [`ParseError::Naming`] failure violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Field,
    Constant,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Constant => f.write_str("constant"),
        }
    }
}

/// Errors produced while tokenizing, decoding, resolving or rendering definitions.
///
/// Every variant is fatal: a parse call returns the first error it hits and no
/// partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A line or document does not match its dialect's grammar.
    #[error("could not parse {context}: '{text}'")]
    Syntax { context: String, text: String },

    /// A classic-dialect line matched more than one grammar production.
    #[error("ambiguous line: '{line}'")]
    Ambiguous { line: String },

    /// A field or constant identifier violates the naming rule of its dialect.
    #[error("invalid {kind} name: {name}")]
    Naming { kind: NameKind, name: String },

    /// An integer literal falls outside the bit width of its declared type.
    #[error("number {value} out of range [{min}, {max}]")]
    Range { value: String, min: i128, max: i128 },

    /// Malformed quoting, escaping, number or array syntax in a literal.
    #[error("invalid literal of type {ty}: {detail}")]
    LiteralFormat { ty: String, detail: String },

    /// A complex field names a type with no matching sibling definition.
    #[error("missing type definition for {type_name}")]
    UnresolvedType { type_name: String },

    /// A complex field's short name matches several sibling definitions.
    #[error("ambiguous type reference {type_name}, candidates: {}", candidates.join(", "))]
    AmbiguousType {
        type_name: String,
        candidates: Vec<String>,
    },

    /// An IDL literal references a constant that is not declared in its document.
    #[error("could not find constant {constant} for field {field} in {parent}")]
    UnresolvedConstant {
        constant: String,
        field: String,
        parent: String,
    },

    /// The requested dialect is not compiled into this build.
    #[error("dialect '{dialect}' is not supported by this build")]
    UnsupportedDialect { dialect: String },

    /// Attaches the offending source line to an error raised while handling it.
    #[error("{source} (line: '{line}')")]
    AtLine {
        line: String,
        #[source]
        source: Box<ParseError>,
    },

    /// Names the bundle section (`IDL: <path>`) an error was raised in.
    #[error("{source} (in {section})")]
    InSection {
        section: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    pub(crate) fn literal(ty: &str, detail: impl Into<String>) -> Self {
        Self::LiteralFormat {
            ty: ty.to_string(),
            detail: detail.into(),
        }
    }

    /// Wrap `self` with the source line it was raised for.
    pub fn at_line(self, line: &str) -> Self {
        match self {
            // Grammar errors already quote their input.
            Self::Syntax { .. } | Self::Ambiguous { .. } | Self::AtLine { .. } => self,
            other => Self::AtLine {
                line: line.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Wrap `self` with the path of the bundle section it was raised in.
    pub fn in_section(self, section: &str) -> Self {
        Self::InSection {
            section: section.to_string(),
            source: Box::new(self),
        }
    }

    /// The root cause with any line or section context stripped.
    pub fn innermost(&self) -> &ParseError {
        match self {
            Self::AtLine { source, .. } | Self::InSection { source, .. } => source.innermost(),
            other => other,
        }
    }
}
