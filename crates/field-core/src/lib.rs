//! Core types for PostgreSQL field codecs.
//!
//! This crate provides the foundation shared by the codec crates:
//!
//! - [`FieldValue`] - What a record attribute holds before and after decoding
//! - [`Record`] / [`Attributes`] - Host record capabilities a codec needs
//! - [`FieldConfig`] - Per-codec settings, loadable from YAML
//! - [`FieldCodec`] / [`Lifecycle`] - Event registration and dispatch
//! - [`DynamicStructure`] - Auto-vivifying bag for decoded JSONB documents
//!
//! # Architecture
//!
//! ```text
//! field-core (this crate)
//!    │
//!    ├─── array-field   (JSON text  <-> FieldValue::Array)
//!    └─── jsonb-field   (quoted JSONB text <-> FieldValue::Structure)
//! ```
//!
//! # Example
//!
//! ```rust
//! use field_core::{Attributes, FieldValue, MemoryRecord, Record};
//!
//! let mut record = MemoryRecord::new().with_attribute("tags", "[1,2]");
//! let attrs = record.attributes_mut().expect("memory records have attributes");
//! assert_eq!(attrs.get_attribute("tags"), Some(&FieldValue::from("[1,2]")));
//! ```

pub mod config;
pub mod dynamic;
pub mod encode;
pub mod error;
pub mod lifecycle;
pub mod record;
pub mod value;

// Re-exports for convenience
pub use config::FieldConfig;
pub use dynamic::{Attribute, DynamicStructure};
pub use encode::{encode_for_storage, EMPTY_LITERAL};
pub use error::{CodecError, Result};
pub use lifecycle::{CodecAction, FieldCodec, Lifecycle, LifecycleEvent};
pub use record::{attributes_of, Attributes, MemoryRecord, Record};
pub use value::FieldValue;
