//! JSONB column codec for field-core records.
//!
//! Reads PostgreSQL-quoted JSONB text into a [`DynamicStructure`] whose keys
//! can be walked without a schema, and writes it back as plain JSON text.
//!
//! Note the wire asymmetry: [`json_decode`] strips one layer of quoting that
//! [`json_encode`] never adds.
//!
//! # Modules
//!
//! - [`literal`] - Outer quote stripping and C-style unescaping
//! - [`codec`] - The codec and its pure decode/encode functions
//!
//! # Example
//!
//! ```rust
//! use field_core::Attribute;
//! use jsonb_field::json_decode;
//! use serde_json::json;
//!
//! let mut doc = json_decode(r#""{\"a\":1}""#);
//! assert_eq!(doc.get("a"), Some(&Attribute::Value(json!(1))));
//!
//! // Unknown keys materialize on read.
//! assert!(doc.child("settings").is_some());
//! ```
//!
//! [`DynamicStructure`]: field_core::DynamicStructure

pub mod codec;
pub mod literal;

pub use codec::{decode_jsonb, json_decode, json_encode, JsonbFieldCodec, JSONB_EVENTS};
pub use literal::{strip_c_slashes, strip_outer_quotes, unwrap_jsonb_literal};
