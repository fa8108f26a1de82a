//! Syntax tree produced by the IDL document grammar.
//!
//! Literal slots may still name a constant ([`Literal::ConstantRef`]); the
//! resolver substitutes them before anything leaves this crate.

use rosmsg_core::Value;

/// A literal as written: either a value or the name of a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Value decoded by its own syntax (`40`, `1.5`, `TRUE`, `"text"`).
    Direct(Value),
    /// Name of a constant, possibly scoped (`MAX_SIZE`, `pkg::msg::MAX_SIZE`).
    ConstantRef(String),
}

/// Typedef, field or constant declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdlMember {
    /// Type as written, with IDL keywords already mapped to primitive tags.
    pub ty: String,
    pub name: String,
    pub is_array: bool,
    pub array_length: Option<Literal>,
    pub array_upper_bound: Option<Literal>,
    pub upper_bound: Option<Literal>,
    /// Constant value.
    pub value: Option<Literal>,
    /// Constant literal text as written, when it is a single token.
    pub value_text: Option<String>,
    /// Field default from `@default(value=...)`.
    pub default_value: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IdlNode {
    Module { name: String, children: Vec<IdlNode> },
    Struct { name: String, children: Vec<IdlNode> },
    Typedef(IdlMember),
    Field(IdlMember),
    Constant(IdlMember),
}

impl IdlNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Module { name, .. } | Self::Struct { name, .. } => name,
            Self::Typedef(m) | Self::Field(m) | Self::Constant(m) => &m.name,
        }
    }
}
