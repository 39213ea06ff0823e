//! Array column codec for field-core records.
//!
//! Keeps an array-typed column decoded as a `Vec<serde_json::Value>` while
//! the record is in memory, and encoded as JSON text right before it is
//! written.
//!
//! # Example
//!
//! ```rust
//! use array_field::ArrayFieldCodec;
//! use field_core::{FieldValue, Lifecycle, LifecycleEvent, MemoryRecord};
//! use serde_json::json;
//!
//! let record = MemoryRecord::new().with_attribute("tags", r#"["a","b"]"#);
//! let mut lifecycle = Lifecycle::new(record).with(ArrayFieldCodec::for_attribute("tags"));
//!
//! lifecycle.trigger(LifecycleEvent::AfterFind).unwrap();
//! assert_eq!(
//!     lifecycle.record().get("tags"),
//!     Some(&FieldValue::Array(vec![json!("a"), json!("b")]))
//! );
//! ```

pub mod codec;

pub use codec::{decode_array, encode_array, ArrayFieldCodec, ARRAY_EVENTS};
