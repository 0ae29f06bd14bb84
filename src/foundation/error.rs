/// Convenience result type used across aquarelle.
pub type AquarelleResult<T> = Result<T, AquarelleError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum AquarelleError {
    /// Invalid user-provided data: mismatched raster sizes, bad config values.
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation was invoked before the state it depends on was initialized.
    #[error("precondition error: {0}")]
    Precondition(String),

    /// A scheduled drawing routine failed while resuming.
    #[error("routine error: {0}")]
    Routine(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AquarelleError {
    /// Build a [`AquarelleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AquarelleError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`AquarelleError::Routine`] value.
    pub fn routine(msg: impl Into<String>) -> Self {
        Self::Routine(msg.into())
    }

    /// Build a [`AquarelleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
