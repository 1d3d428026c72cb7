//! Error types for view-parameter persistence.

use thiserror::Error;

/// Structured error types for the view-parameter persistence boundary.
///
/// Malformed values inside a well-formed compact tuple never error; each
/// parameter falls back to its default instead. Only a blob that cannot
/// be decoded into the tuple shape at all is reported here.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ParamsError {
    /// A persisted blob could not be decoded into the compact tuple form.
    #[error("view parameter deserialization failed: {reason}")]
    DeserializationFailed { reason: String },
}

impl ParamsError {
    /// Check if this error is related to deserialization.
    pub fn is_deserialization_failed(&self) -> bool {
        matches!(self, ParamsError::DeserializationFailed { .. })
    }
}

// Conversion from ParamsError to the main Error type
impl From<ParamsError> for crate::Error {
    fn from(err: ParamsError) -> Self {
        crate::Error::Params(err)
    }
}
