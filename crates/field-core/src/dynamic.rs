//! Auto-vivifying attribute bag for JSON documents of unknown shape.
//!
//! Reading a key that was never assigned does not fail: the key is declared
//! as a safe attribute and a new empty [`DynamicStructure`] is stored under
//! it and returned. Deep paths can therefore be walked (and built) without
//! a schema:
//!
//! ```
//! use field_core::DynamicStructure;
//! use serde_json::json;
//!
//! let mut root = DynamicStructure::new();
//! if let Some(c) = root.path_mut(&["a", "b", "c"]) {
//!     *c = json!(42).into();
//! }
//! assert_eq!(root.to_json(), json!({"a": {"b": {"c": 42}}}));
//! ```

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Value stored under a [`DynamicStructure`] key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Attribute {
    /// Nested structure, auto-vivified or decoded from a JSON object
    Structure(DynamicStructure),

    /// Any other JSON value
    Value(serde_json::Value),
}

impl Attribute {
    /// Try to get this attribute as a nested structure.
    pub fn as_structure(&self) -> Option<&DynamicStructure> {
        match self {
            Self::Structure(s) => Some(s),
            Self::Value(_) => None,
        }
    }

    /// Try to get this attribute as a mutable nested structure.
    pub fn as_structure_mut(&mut self) -> Option<&mut DynamicStructure> {
        match self {
            Self::Structure(s) => Some(s),
            Self::Value(_) => None,
        }
    }

    /// Try to get this attribute as a plain JSON value.
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Structure(_) => None,
        }
    }

    /// Convert to a plain JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Structure(s) => s.to_json(),
            Self::Value(v) => v.clone(),
        }
    }
}

impl From<DynamicStructure> for Attribute {
    fn from(s: DynamicStructure) -> Self {
        Self::Structure(s)
    }
}

impl From<serde_json::Value> for Attribute {
    fn from(v: serde_json::Value) -> Self {
        Self::Value(v)
    }
}

/// Keyed attribute bag that materializes missing keys on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DynamicStructure {
    attributes: BTreeMap<String, Attribute>,

    /// Keys declared through auto-vivification
    #[serde(skip)]
    safe: BTreeSet<String>,
}

impl DynamicStructure {
    /// Create an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a structure seeded from a JSON object.
    ///
    /// Nested objects become nested structures; every other value is kept
    /// as-is. Seeded keys are attributes but are not marked safe.
    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        let attributes = object
            .into_iter()
            .map(|(key, value)| {
                let attribute = match value {
                    serde_json::Value::Object(nested) => {
                        Attribute::Structure(Self::from_json_object(nested))
                    }
                    other => Attribute::Value(other),
                };
                (key, attribute)
            })
            .collect();
        Self {
            attributes,
            safe: BTreeSet::new(),
        }
    }

    /// Read `key`, declaring and materializing it if it was never assigned.
    ///
    /// On first access to an unknown key the key is marked safe and an empty
    /// child structure is stored under it. Later reads return that same
    /// stored child.
    pub fn get_or_create_child(&mut self, key: &str) -> &mut Attribute {
        let safe = &mut self.safe;
        self.attributes.entry(key.to_string()).or_insert_with(|| {
            safe.insert(key.to_string());
            Attribute::Structure(DynamicStructure::new())
        })
    }

    /// Auto-vivifying read that expects a nested structure.
    ///
    /// Returns `None` when `key` already holds a non-structure value.
    pub fn child(&mut self, key: &str) -> Option<&mut DynamicStructure> {
        self.get_or_create_child(key).as_structure_mut()
    }

    /// Walk `path` with auto-vivifying reads and return the last attribute.
    ///
    /// Returns `None` for an empty path or when an intermediate key holds a
    /// non-structure value.
    pub fn path_mut(&mut self, path: &[&str]) -> Option<&mut Attribute> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.child(key)?;
        }
        Some(current.get_or_create_child(last))
    }

    /// Non-mutating read; never declares anything.
    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.attributes.get(key)
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Attribute>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Mass-assign values, only for keys that were declared safe.
    ///
    /// Returns how many keys were assigned.
    pub fn set_safe_attributes(
        &mut self,
        values: serde_json::Map<String, serde_json::Value>,
    ) -> usize {
        let mut assigned = 0;
        for (key, value) in values {
            if self.safe.contains(&key) {
                self.attributes.insert(key, Attribute::Value(value));
                assigned += 1;
            }
        }
        assigned
    }

    /// Whether `key` currently holds an attribute.
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Whether `key` was declared safe through auto-vivification.
    pub fn is_safe(&self, key: &str) -> bool {
        self.safe.contains(key)
    }

    /// Keys declared safe, in sorted order.
    pub fn safe_attributes(&self) -> impl Iterator<Item = &str> {
        self.safe.iter().map(String::as_str)
    }

    /// Attribute keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Convert to a plain JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.attributes
                .iter()
                .map(|(key, attribute)| (key.clone(), attribute.to_json()))
                .collect(),
        )
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for DynamicStructure {
    fn from(object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::from_json_object(object)
    }
}
