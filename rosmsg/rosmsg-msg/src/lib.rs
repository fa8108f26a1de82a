//! Line grammars for ROS `.msg` definitions.
//!
//! Both line-oriented dialects share a pre-pass: the text is split into
//! trimmed lines, blanks and `#` comment lines are dropped, and `==...`
//! separator lines cut it into one block per definition. A `MSG: <name>` line
//! names its block.
//!
//! # Pipeline
//!
//! ```text
//! definition text
//!   └─ split_blocks        – lines grouped per definition
//!       ├─ ros1::build_definition  – nom productions, one derivation per line
//!       └─ ros2::build_definition  – one regular expression per line
//! ```
//!
//! Type names are returned as written; resolving them against sibling
//! definitions is left to [`rosmsg_core::fixup_types`].

mod lex;
mod ros1;
mod ros2;

use rosmsg_core::{Definition, Dialect, ParseError};

pub use lex::{is_separator_line, split_blocks};

/// Parse a line-oriented definition text into raw definitions, root first.
pub fn parse_msg(text: &str, dialect: Dialect) -> Result<Vec<Definition>, ParseError> {
    let build = match dialect {
        Dialect::Ros1Msg => ros1::build_definition,
        Dialect::Ros2Msg => ros2::build_definition,
        Dialect::Ros2Idl => {
            return Err(ParseError::UnsupportedDialect {
                dialect: dialect.to_string(),
            });
        }
    };

    let blocks = split_blocks(text);
    tracing::debug!(%dialect, blocks = blocks.len(), "parse msg definitions");
    blocks.iter().map(|lines| build(lines)).collect()
}
