//! Shared model and the dialect-independent stages of message definition parsing.
//!
//! Key components:
//! - [`definition`]: the flat [`Definition`]/[`Field`] model every dialect produces
//! - [`literal`]: typed decoding of constant and default literals
//! - [`fixup`]: rewriting complex field types to sibling definition names
//! - [`stringify`]: canonical text used as the checksum preimage

pub mod definition;
mod dialect;
mod error;
pub mod fixup;
pub mod literal;
mod primitive;
pub mod stringify;

pub use definition::{Definition, Field, Value};
pub use dialect::Dialect;
pub use error::{NameKind, ParseError};
pub use fixup::{complex_type_names, fixup_types};
pub use literal::{coerce_value, decode_array, decode_scalar, decode_string};
pub use primitive::{PrimitiveType, is_complex_type, normalize_idl_type, normalize_type};
pub use stringify::{DEFINITION_DIVIDER, encode_value, format_number, stringify, write_canonical};
