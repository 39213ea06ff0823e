//! PostgreSQL field codecs
//!
//! Attribute codecs that keep database columns decoded while a record is in
//! memory and encoded when it is written.
//!
//! # Codec Crates
//!
//! - `array_field` - Array columns stored as JSON text
//! - `jsonb_field` - JSONB columns read from PostgreSQL-quoted JSON into a
//!   `DynamicStructure`
//! - `field_core` - Records, lifecycle events, configuration, errors
//!
//! # CLI Usage
//!
//! ```bash
//! # Decode a stored array column
//! pg-field-codec decode array '["a","b"]'
//!
//! # Decode a JSONB column as handed over by the driver
//! pg-field-codec decode jsonb '"{\"a\":1}"'
//!
//! # Encode an empty array, storing {} instead of NULL
//! pg-field-codec --on-empty-save-null false encode array '[]'
//! ```

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use field_core::{DynamicStructure, FieldConfig, FieldValue, Lifecycle, LifecycleEvent, MemoryRecord};
use std::path::PathBuf;

// Re-export codec crates for convenience
pub use array_field;
pub use field_core;
pub use jsonb_field;

/// Attribute name used when neither the config nor the CLI names one.
pub const DEFAULT_ATTRIBUTE: &str = "value";

/// Column flavor handled by a codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColumnKind {
    /// Array column stored as JSON text
    #[value(name = "array")]
    Array,
    /// JSONB column
    #[value(name = "jsonb")]
    Jsonb,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CodecOpts {
    /// YAML file with codec settings
    #[arg(long, value_name = "PATH", env = "PG_FIELD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Record attribute the codec manages
    #[arg(long)]
    pub attribute: Option<String>,

    /// Store NULL instead of `{}` when the encoded value is empty
    #[arg(long, value_name = "BOOL", env = "PG_FIELD_ON_EMPTY_SAVE_NULL")]
    pub on_empty_save_null: Option<bool>,
}

impl CodecOpts {
    /// Resolve the codec config: file first, then command-line overrides.
    pub fn field_config(&self) -> Result<FieldConfig> {
        let mut config = match &self.config {
            Some(path) => FieldConfig::from_file(path)
                .with_context(|| format!("Failed to load codec config from {}", path.display()))?,
            None => FieldConfig::default(),
        };

        if let Some(attribute) = &self.attribute {
            config.set_attribute_name(attribute.clone());
        }
        if config.attribute_field_name.is_none() {
            config.set_attribute_name(DEFAULT_ATTRIBUTE);
        }
        if let Some(on_empty_save_null) = self.on_empty_save_null {
            config.on_empty_save_null = on_empty_save_null;
        }

        Ok(config)
    }
}

fn attach(kind: ColumnKind, config: FieldConfig, record: MemoryRecord) -> Lifecycle<MemoryRecord> {
    let lifecycle = Lifecycle::new(record);
    match kind {
        ColumnKind::Array => lifecycle.with(array_field::ArrayFieldCodec::new(config)),
        ColumnKind::Jsonb => lifecycle.with(jsonb_field::JsonbFieldCodec::new(config)),
    }
}

/// Run the read path on a raw column value and return the decoded value as JSON.
///
/// `None` stands for SQL NULL.
pub fn decode_column(
    kind: ColumnKind,
    config: FieldConfig,
    raw: Option<&str>,
) -> Result<serde_json::Value> {
    let name = config.attribute_name()?.to_string();
    let record = MemoryRecord::new().with_attribute(&name, raw);
    let mut lifecycle = attach(kind, config, record);

    lifecycle.trigger(LifecycleEvent::AfterFind)?;

    Ok(lifecycle
        .record()
        .get(&name)
        .map(FieldValue::to_json)
        .unwrap_or_default())
}

/// Run the write path on a JSON document and return the stored text.
///
/// `None` stands for SQL NULL.
pub fn encode_column(kind: ColumnKind, config: FieldConfig, input: &str) -> Result<Option<String>> {
    let json: serde_json::Value =
        serde_json::from_str(input).context("Failed to parse input as JSON")?;
    let value = match (kind, json) {
        (ColumnKind::Array, serde_json::Value::Array(items)) => FieldValue::Array(items),
        (ColumnKind::Jsonb, serde_json::Value::Object(object)) => {
            FieldValue::Structure(DynamicStructure::from_json_object(object))
        }
        (_, other) => FieldValue::Json(other),
    };

    let name = config.attribute_name()?.to_string();
    let record = MemoryRecord::new().with_attribute(&name, value);
    let mut lifecycle = attach(kind, config, record);

    lifecycle.trigger(LifecycleEvent::BeforeInsert)?;

    Ok(lifecycle
        .record()
        .get(&name)
        .and_then(FieldValue::as_str)
        .map(str::to_string))
}
