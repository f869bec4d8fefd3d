//! Model parser errors — every one of them means "fall back to rules".

use lumo_domain::error::{LumoError, ValidationError};

/// Errors originating from the model-based parser.
#[derive(Debug, thiserror::Error)]
pub enum ModelParserError {
    /// No API credential in the environment.
    #[error("no API credential configured")]
    MissingCredential,

    /// Request construction, network, or timeout failure.
    #[error("model request failed")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("model service returned status {status}")]
    Api { status: u16 },

    /// The completion held no usable content.
    #[error("model returned an empty completion")]
    EmptyCompletion,

    /// The completion content was not a valid action list.
    #[error("model output does not match the action schema")]
    Malformed(#[from] serde_json::Error),

    /// The action list deserialized but violates a domain invariant.
    #[error("model output failed validation")]
    Validation(#[from] ValidationError),
}

impl From<ModelParserError> for LumoError {
    fn from(err: ModelParserError) -> Self {
        Self::Parser(Box::new(err))
    }
}
