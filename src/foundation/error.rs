/// Convenience result type used across the choreography engine.
pub type ChoreoResult<T> = Result<T, ChoreoError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degradations the engine recovers from on its own (missing targets, degenerate regions,
/// unmeasurable anchors) are logged and never reach this type.
#[derive(thiserror::Error, Debug)]
pub enum ChoreoError {
    /// Invalid declared data: timelines, phases, configuration, duplicate ids.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry reported by the host could not produce a usable scroll range.
    #[error("measurement error: {0}")]
    Measurement(String),

    /// The scroll host refused an operation.
    #[error("host error: {0:#}")]
    Host(anyhow::Error),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChoreoError {
    /// Build a [`ChoreoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChoreoError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    /// Build a [`ChoreoError::Host`] value.
    pub fn host(err: anyhow::Error) -> Self {
        Self::Host(err)
    }

    /// Build a [`ChoreoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
