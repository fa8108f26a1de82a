//! Parsed message definition model.
//!
//! Every dialect produces the same flat shape: an ordered list of
//! [`Definition`]s (root first, unnamed) whose members are [`Field`]s.

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::primitive::is_complex_type;

/// A decoded literal: a constant value or a field default.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    /// Value of a signed integer type.
    Int(i64),
    /// Value of an unsigned integer type.
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    /// Interpret the value as a non-negative count (array length or bound).
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Self::Int(v) => usize::try_from(*v).ok(),
            Self::UInt(v) => usize::try_from(*v).ok(),
            _ => None,
        }
    }
}

/// One member of a [`Definition`]: either a variable field or a constant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    /// Normalized type tag: a primitive name or a reference to another definition.
    pub ty: String,
    pub name: String,
    pub is_complex: bool,
    pub is_array: bool,
    /// Fixed element count (`T[N]`).
    pub array_length: Option<usize>,
    /// Maximum element count of a bounded sequence (`T[<=N]`).
    pub array_upper_bound: Option<usize>,
    /// Maximum character count of a bounded `string`/`wstring`.
    pub upper_bound: Option<usize>,
    pub is_constant: bool,
    /// Decoded constant value; `Some` iff `is_constant`.
    pub value: Option<Value>,
    /// Trimmed literal text the constant was decoded from.
    pub value_text: Option<String>,
    /// Decoded default of a variable field.
    pub default_value: Option<Value>,
}

impl Field {
    /// A variable (non-constant) field; `is_complex` is derived from `ty`.
    pub fn variable(ty: impl Into<String>, name: impl Into<String>) -> Self {
        let ty = ty.into();
        Self {
            is_complex: is_complex_type(&ty),
            ty,
            name: name.into(),
            ..Self::default()
        }
    }

    /// A constant carrying its decoded value and the literal text it came from.
    pub fn constant(
        ty: impl Into<String>,
        name: impl Into<String>,
        value: Value,
        value_text: Option<String>,
    ) -> Self {
        let ty = ty.into();
        Self {
            is_complex: is_complex_type(&ty),
            ty,
            name: name.into(),
            is_constant: true,
            value: Some(value),
            value_text,
            ..Self::default()
        }
    }

    /// Mark the field as an array of the given shape.
    pub fn with_array(mut self, length: Option<usize>, upper_bound: Option<usize>) -> Self {
        self.is_array = true;
        self.array_length = length;
        self.array_upper_bound = upper_bound;
        self
    }
}

// Constants only report `isComplex`/`isArray` when true; variables always do.
impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", &self.ty)?;
        map.serialize_entry("name", &self.name)?;
        if !self.is_constant || self.is_complex {
            map.serialize_entry("isComplex", &self.is_complex)?;
        }
        if !self.is_constant || self.is_array {
            map.serialize_entry("isArray", &self.is_array)?;
        }
        if let Some(n) = self.array_length {
            map.serialize_entry("arrayLength", &n)?;
        }
        if let Some(n) = self.array_upper_bound {
            map.serialize_entry("arrayUpperBound", &n)?;
        }
        if let Some(n) = self.upper_bound {
            map.serialize_entry("upperBound", &n)?;
        }
        if self.is_constant {
            map.serialize_entry("isConstant", &true)?;
            map.serialize_entry("value", &self.value)?;
            if let Some(text) = &self.value_text {
                map.serialize_entry("valueText", text)?;
            }
        }
        if let Some(default) = &self.default_value {
            map.serialize_entry("defaultValue", default)?;
        }
        map.end()
    }
}

/// One message type: an optional `/`-joined name plus its ordered members.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Definition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "definitions")]
    pub fields: Vec<Field>,
}

impl Definition {
    pub fn new(name: Option<String>, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    pub fn constants(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_constant)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_constant)
    }
}
