//! Array column codec.
//!
//! The column is stored as JSON text (not PostgreSQL array literal syntax)
//! and exposed on the record as [`FieldValue::Array`].

use field_core::{
    attributes_of, encode_for_storage, CodecAction, FieldCodec, FieldConfig, FieldValue,
    LifecycleEvent, Record, Result,
};
use tracing::debug;

/// Events handled by [`ArrayFieldCodec`].
pub const ARRAY_EVENTS: &[(LifecycleEvent, CodecAction)] = &[
    (LifecycleEvent::Init, CodecAction::Decode),
    (LifecycleEvent::AfterFind, CodecAction::Decode),
    (LifecycleEvent::AfterInsert, CodecAction::Decode),
    (LifecycleEvent::AfterUpdate, CodecAction::Decode),
    (LifecycleEvent::BeforeInsert, CodecAction::Encode),
    (LifecycleEvent::BeforeUpdate, CodecAction::Encode),
];

/// Decode a raw column value into a sequence.
///
/// Anything that is not JSON text holding a non-empty array decodes to the
/// empty sequence, including values that were already decoded.
pub fn decode_array(raw: Option<&FieldValue>) -> Vec<serde_json::Value> {
    let text = match raw {
        None | Some(FieldValue::Null) => return Vec::new(),
        Some(FieldValue::Text(text)) => text,
        Some(other) => {
            debug!("Array attribute is not raw text ({other:?}), using empty array");
            return Vec::new();
        }
    };

    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(other) => {
            debug!("Array attribute holds non-array JSON {other}, using empty array");
            Vec::new()
        }
        Err(e) => {
            debug!("Failed to parse array attribute as JSON: {e}");
            Vec::new()
        }
    }
}

/// Encode a value into its storable array column form.
pub fn encode_array(
    attribute: &str,
    value: &FieldValue,
    on_empty_save_null: bool,
) -> Result<FieldValue> {
    encode_for_storage(attribute, value, on_empty_save_null)
}

/// Codec keeping one record attribute decoded as a sequence in memory and
/// encoded as JSON text in storage.
#[derive(Debug, Clone, Default)]
pub struct ArrayFieldCodec {
    config: FieldConfig,
}

impl ArrayFieldCodec {
    pub fn new(config: FieldConfig) -> Self {
        Self { config }
    }

    /// Codec for `attribute` with default options.
    pub fn for_attribute(attribute: impl Into<String>) -> Self {
        Self::new(FieldConfig::new(attribute))
    }

    pub fn set_attribute_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.config.set_attribute_name(name);
        self
    }

    pub fn with_on_empty_save_null(mut self, on_empty_save_null: bool) -> Self {
        self.config.on_empty_save_null = on_empty_save_null;
        self
    }
}

impl FieldCodec for ArrayFieldCodec {
    fn name(&self) -> &'static str {
        "array"
    }

    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn events(&self) -> &'static [(LifecycleEvent, CodecAction)] {
        ARRAY_EVENTS
    }

    fn decode(&self, record: &mut dyn Record) -> Result<()> {
        let attrs = attributes_of(record)?;
        let name = self.attribute_name()?;
        let items = decode_array(attrs.get_attribute(name));
        attrs.set_attribute(name, FieldValue::Array(items));
        Ok(())
    }

    fn encode(&self, record: &mut dyn Record) -> Result<()> {
        let attrs = attributes_of(record)?;
        let name = self.attribute_name()?;
        let stored = encode_array(
            name,
            attrs.get_attribute(name).unwrap_or(&FieldValue::Null),
            self.config.on_empty_save_null,
        )?;
        attrs.set_attribute(name, stored);
        Ok(())
    }
}
