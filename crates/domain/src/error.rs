//! Common error types used across the workspace.
//!
//! Each layer defines its own typed error and converts into [`LumoError`]
//! at the port boundary. Adapter errors cross the boundary boxed so the
//! domain stays free of adapter dependencies.

/// Top-level error for the lumo workspace.
#[derive(Debug, thiserror::Error)]
pub enum LumoError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A command parser failed (network, credential, malformed output).
    ///
    /// The interactive loop treats this as "fall back to the rules parser
    /// for this input", never as fatal.
    #[error("parser error")]
    Parser(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The state store failed to read or write the persisted record.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The lamp gateway failed to reach the hardware.
    ///
    /// The new state is persisted before the gateway runs, so this never
    /// loses the user's intent.
    #[error("device error")]
    Device(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant failures.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Brightness must stay within 0–100 percent.
    #[error("brightness {percent} is out of range (0-100)")]
    BrightnessOutOfRange { percent: u8 },
}
