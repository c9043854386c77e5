//! Error types for the pose-dynamics crate
//!
//! The pipeline itself never fails: missing keypoints become empty sets or
//! sentinel scores. Errors only exist at the edges, where configuration and
//! detector output enter the crate.

use wasm_bindgen::JsValue;

/// Errors raised at the crate boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DynamicsError {
    /// A configuration value is out of range.
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A host value could not be decoded as a pose frame.
    #[error("malformed pose frame: {0}")]
    MalformedFrame(String),

    /// The detector rejected an inference; nothing is emitted for that tick.
    #[error("inference rejected: {0}")]
    InferenceRejected(String),
}

impl DynamicsError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        DynamicsError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, DynamicsError>;

impl From<DynamicsError> for JsValue {
    fn from(err: DynamicsError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message_names_field() {
        let err = DynamicsError::invalid_config("windowMs", "must be positive, got -3");
        assert_eq!(
            err.to_string(),
            "invalid configuration: `windowMs` must be positive, got -3"
        );
    }

    #[test]
    fn test_rejected_inference_message() {
        let err = DynamicsError::InferenceRejected("model not ready".into());
        assert_eq!(err.to_string(), "inference rejected: model not ready");
    }
}
