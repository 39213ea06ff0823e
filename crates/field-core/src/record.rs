//! Host record capabilities consumed by field codecs.

use crate::error::{CodecError, Result};
use crate::value::FieldValue;
use std::collections::BTreeMap;

/// Get/set-by-name access to a record's attributes.
pub trait Attributes {
    fn get_attribute(&self, name: &str) -> Option<&FieldValue>;

    fn set_attribute(&mut self, name: &str, value: FieldValue);
}

/// A host object that codecs can be attached to.
///
/// Codecs only need named attribute access. Records that cannot offer it
/// return `None` from [`Record::attributes_mut`] and are rejected the first
/// time a codec runs against them.
pub trait Record {
    fn attributes_mut(&mut self) -> Option<&mut dyn Attributes>;

    /// Name reported when the record is rejected.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Resolve the attribute capability of `record`.
pub fn attributes_of(record: &mut dyn Record) -> Result<&mut dyn Attributes> {
    let type_name = record.type_name();
    record
        .attributes_mut()
        .ok_or_else(|| CodecError::UnsupportedHost {
            type_name: type_name.to_string(),
        })
}

/// In-memory record backed by a map of named attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRecord {
    attributes: BTreeMap<String, FieldValue>,
}

impl MemoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute assignment.
    pub fn with_attribute(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.attributes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.attributes.get_mut(name)
    }
}

impl Attributes for MemoryRecord {
    fn get_attribute(&self, name: &str) -> Option<&FieldValue> {
        self.attributes.get(name)
    }

    fn set_attribute(&mut self, name: &str, value: FieldValue) {
        self.attributes.insert(name.to_string(), value);
    }
}

impl Record for MemoryRecord {
    fn attributes_mut(&mut self) -> Option<&mut dyn Attributes> {
        Some(self)
    }
}
