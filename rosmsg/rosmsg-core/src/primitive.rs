//! Primitive type tags and type-name normalization.
//!
//! A field type is either one of the fixed primitive tags below or a reference
//! to another definition ("complex"). Deprecated aliases (`char`, `byte`) are
//! folded into their primitive tag by [`normalize_type`] before classification.

/// Scalar primitive types of the message definition language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    String,
    WString,
    Time,
    Duration,
}

impl PrimitiveType {
    /// Look up a normalized type tag. Aliases are accepted as well.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let prim = match normalize_type(tag) {
            "bool" => Self::Bool,
            "int8" => Self::I8,
            "int16" => Self::I16,
            "int32" => Self::I32,
            "int64" => Self::I64,
            "uint8" => Self::U8,
            "uint16" => Self::U16,
            "uint32" => Self::U32,
            "uint64" => Self::U64,
            "float32" => Self::F32,
            "float64" => Self::F64,
            "string" => Self::String,
            "wstring" => Self::WString,
            "time" => Self::Time,
            "duration" => Self::Duration,
            _ => return None,
        };
        Some(prim)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::String => "string",
            Self::WString => "wstring",
            Self::Time => "time",
            Self::Duration => "duration",
        }
    }

    /// Inclusive `[min, max]` for integer types, `None` otherwise.
    pub fn integer_range(&self) -> Option<(i128, i128)> {
        let range = match self {
            Self::I8 => (i8::MIN as i128, i8::MAX as i128),
            Self::I16 => (i16::MIN as i128, i16::MAX as i128),
            Self::I32 => (i32::MIN as i128, i32::MAX as i128),
            Self::I64 => (i64::MIN as i128, i64::MAX as i128),
            Self::U8 => (0, u8::MAX as i128),
            Self::U16 => (0, u16::MAX as i128),
            Self::U32 => (0, u32::MAX as i128),
            Self::U64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    pub fn is_signed_integer(&self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String | Self::WString)
    }
}

/// Fold deprecated aliases into their primitive tag.
pub fn normalize_type(ty: &str) -> &str {
    match ty {
        "char" => "uint8",
        "byte" => "int8",
        other => other,
    }
}

/// IDL-only normalization: `builtin_interfaces` time types become the `time` and
/// `duration` primitives. Expects `::` already replaced with `/`.
pub fn normalize_idl_type(ty: &str) -> &str {
    match ty {
        "builtin_interfaces/Time" | "builtin_interfaces/msg/Time" => "time",
        "builtin_interfaces/Duration" | "builtin_interfaces/msg/Duration" => "duration",
        other => normalize_type(other),
    }
}

/// A type tag is complex iff it is not a primitive (or a primitive alias).
pub fn is_complex_type(ty: &str) -> bool {
    PrimitiveType::from_tag(ty).is_none()
}
