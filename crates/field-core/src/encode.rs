//! Write-side helper shared by every codec.

use crate::error::{CodecError, Result};
use crate::value::FieldValue;
use tracing::debug;

/// Literal stored for empty values when `on_empty_save_null` is off.
///
/// This is an object literal even for array columns.
pub const EMPTY_LITERAL: &str = "{}";

/// Encode `value` into its storable form.
///
/// Empty values become NULL, or [`EMPTY_LITERAL`] when `on_empty_save_null`
/// is false. Serialization failures are reported, never swallowed.
pub fn encode_for_storage(
    attribute: &str,
    value: &FieldValue,
    on_empty_save_null: bool,
) -> Result<FieldValue> {
    let encoded = value
        .to_json_text()
        .map_err(|source| CodecError::Serialization {
            attribute: attribute.to_string(),
            source,
        })?;

    Ok(match encoded {
        Some(text) => FieldValue::Text(text),
        None if on_empty_save_null => FieldValue::Null,
        None => {
            debug!("Empty value for '{attribute}', storing {EMPTY_LITERAL}");
            FieldValue::Text(EMPTY_LITERAL.to_string())
        }
    })
}
