//! Attribute value representations for field codecs.
//!
//! A [`FieldValue`] is whatever currently sits in a record attribute: the
//! raw column text before decoding, the decoded in-memory value after, or
//! the encoded text again right before a write.

use crate::dynamic::DynamicStructure;
use serde::Serialize;

/// Value held by a record attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// SQL NULL / unset attribute
    Null,

    /// Raw or encoded column text
    Text(String),

    /// Decoded array column
    Array(Vec<serde_json::Value>),

    /// Decoded JSONB column
    Structure(DynamicStructure),

    /// Arbitrary JSON assigned by the application
    Json(serde_json::Value),
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as column text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a decoded array.
    pub fn as_array(&self) -> Option<&Vec<serde_json::Value>> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get this value as a mutable decoded array.
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<serde_json::Value>> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get this value as a decoded structure.
    pub fn as_structure(&self) -> Option<&DynamicStructure> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a mutable decoded structure.
    pub fn as_structure_mut(&mut self) -> Option<&mut DynamicStructure> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// Whether encoding this value yields nothing worth storing.
    ///
    /// Null, empty text, empty arrays and empty objects/structures all count
    /// as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Array(arr) => arr.is_empty(),
            Self::Structure(s) => s.is_empty(),
            Self::Json(serde_json::Value::Null) => true,
            Self::Json(serde_json::Value::Array(arr)) => arr.is_empty(),
            Self::Json(serde_json::Value::Object(obj)) => obj.is_empty(),
            Self::Json(_) => false,
        }
    }

    /// Serialize this value into column text.
    ///
    /// Returns `Ok(None)` for empty values. Text is taken to be already
    /// encoded and is returned unchanged, so encoding twice is harmless.
    pub fn to_json_text(&self) -> serde_json::Result<Option<String>> {
        if self.is_empty() {
            return Ok(None);
        }
        match self {
            Self::Text(s) => Ok(Some(s.clone())),
            other => serde_json::to_string(other).map(Some),
        }
    }

    /// Convert to a plain JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Array(arr) => serde_json::Value::Array(arr.clone()),
            Self::Structure(s) => s.to_json(),
            Self::Json(v) => v.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<serde_json::Value>> for FieldValue {
    fn from(arr: Vec<serde_json::Value>) -> Self {
        Self::Array(arr)
    }
}

impl From<DynamicStructure> for FieldValue {
    fn from(s: DynamicStructure) -> Self {
        Self::Structure(s)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}
