//! JSONB column codec.

use crate::literal::unwrap_jsonb_literal;
use field_core::{
    attributes_of, encode_for_storage, CodecAction, DynamicStructure, FieldCodec, FieldConfig,
    FieldValue, LifecycleEvent, Record, Result,
};
use tracing::debug;

/// Events handled by [`JsonbFieldCodec`].
///
/// Encoding also runs before validation so validators see the stored form.
pub const JSONB_EVENTS: &[(LifecycleEvent, CodecAction)] = &[
    (LifecycleEvent::Init, CodecAction::Decode),
    (LifecycleEvent::AfterFind, CodecAction::Decode),
    (LifecycleEvent::AfterInsert, CodecAction::Decode),
    (LifecycleEvent::AfterUpdate, CodecAction::Decode),
    (LifecycleEvent::BeforeInsert, CodecAction::Encode),
    (LifecycleEvent::BeforeUpdate, CodecAction::Encode),
    (LifecycleEvent::BeforeValidate, CodecAction::Encode),
];

/// Decode PostgreSQL-quoted JSONB text into a [`DynamicStructure`].
///
/// The outer quoting is removed and escapes are undone before parsing. A
/// JSON object seeds the structure's attributes; any other JSON, or input
/// that cannot be unwrapped or parsed, yields an empty structure.
pub fn json_decode(raw: &str) -> DynamicStructure {
    let Some(json) = unwrap_jsonb_literal(raw) else {
        debug!("JSONB value {raw:?} cannot be unwrapped, using empty structure");
        return DynamicStructure::new();
    };

    match serde_json::from_str::<serde_json::Value>(&json) {
        Ok(serde_json::Value::Object(object)) => DynamicStructure::from_json_object(object),
        Ok(other) => {
            debug!("JSONB value is not an object ({other}), using empty structure");
            DynamicStructure::new()
        }
        Err(e) => {
            debug!("Failed to parse JSONB value as JSON: {e}");
            DynamicStructure::new()
        }
    }
}

/// Serialize a value into plain JSON text.
///
/// Returns `Ok(None)` when the value is empty. Text is assumed to be encoded
/// already and is returned unchanged. The output is not wrapped in the
/// quoting that [`json_decode`] removes.
pub fn json_encode(value: &FieldValue) -> serde_json::Result<Option<String>> {
    value.to_json_text()
}

/// Decode whatever currently sits in a JSONB attribute.
///
/// Values that are not raw text, including already decoded structures,
/// degrade to an empty structure.
pub fn decode_jsonb(raw: Option<&FieldValue>) -> DynamicStructure {
    match raw {
        Some(FieldValue::Text(text)) if !text.is_empty() => json_decode(text),
        None | Some(FieldValue::Null) | Some(FieldValue::Text(_)) => DynamicStructure::new(),
        Some(other) => {
            debug!("JSONB attribute is not raw text ({other:?}), using empty structure");
            DynamicStructure::new()
        }
    }
}

/// Codec keeping one record attribute decoded as a [`DynamicStructure`] in
/// memory and encoded as JSON text in storage.
#[derive(Debug, Clone, Default)]
pub struct JsonbFieldCodec {
    config: FieldConfig,
}

impl JsonbFieldCodec {
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

impl FieldCodec for JsonbFieldCodec {
    fn name(&self) -> &'static str {
        "jsonb"
    }

    fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn events(&self) -> &'static [(LifecycleEvent, CodecAction)] {
        JSONB_EVENTS
    }

    fn decode(&self, record: &mut dyn Record) -> Result<()> {
        let attrs = attributes_of(record)?;
        let name = self.attribute_name()?;
        let structure = decode_jsonb(attrs.get_attribute(name));
        attrs.set_attribute(name, FieldValue::Structure(structure));
        Ok(())
    }

    fn encode(&self, record: &mut dyn Record) -> Result<()> {
        let attrs = attributes_of(record)?;
        let name = self.attribute_name()?;
        let stored = encode_for_storage(
            name,
            attrs.get_attribute(name).unwrap_or(&FieldValue::Null),
            self.config.on_empty_save_null,
        )?;
        attrs.set_attribute(name, stored);
        Ok(())
    }
}
