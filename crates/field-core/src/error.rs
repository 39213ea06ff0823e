//! Error types for field codecs.

use thiserror::Error;

/// Errors that can occur while running a field codec.
///
/// Malformed stored data is never reported here: decoding absorbs it into
/// the codec's empty default.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The managed attribute name was requested before being configured.
    #[error("Attribute field name doesn't exist: {0}")]
    Configuration(String),

    /// The record does not expose get/set-by-name attribute access.
    #[error("Codec must be applied to a record with named attributes, the unsupported type provided: `{type_name}`")]
    UnsupportedHost { type_name: String },

    #[error("Failed to serialize attribute '{attribute}': {source}")]
    Serialization {
        attribute: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read codec config: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("Failed to parse codec config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
