//! Per-codec configuration.

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_on_empty_save_null() -> bool {
    true
}

/// Settings shared by every field codec instance.
///
/// Loadable from YAML:
///
/// ```yaml
/// attribute_field_name: tags
/// on_empty_save_null: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Record attribute managed by the codec
    #[serde(default, alias = "attributeFieldName")]
    pub attribute_field_name: Option<String>,

    /// Store NULL (instead of `{}`) when the encoded value is empty
    #[serde(default = "default_on_empty_save_null", alias = "onEmptySaveNull")]
    pub on_empty_save_null: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            attribute_field_name: None,
            on_empty_save_null: default_on_empty_save_null(),
        }
    }
}

impl FieldConfig {
    /// Config managing `attribute` with default options.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute_field_name: Some(attribute.into()),
            ..Self::default()
        }
    }

    pub fn with_on_empty_save_null(mut self, on_empty_save_null: bool) -> Self {
        self.on_empty_save_null = on_empty_save_null;
        self
    }

    pub fn set_attribute_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.attribute_field_name = Some(name.into());
        self
    }

    /// The managed attribute name; unset or empty names are a configuration error.
    pub fn attribute_name(&self) -> Result<&str> {
        match self.attribute_field_name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(CodecError::Configuration(
                "attribute_field_name is not set".to_string(),
            )),
        }
    }

    /// Load config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
