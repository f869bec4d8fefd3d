//! Parser port — free text in, validated actions out.

use std::future::Future;

use lumo_domain::action::Action;
use lumo_domain::error::LumoError;

/// A command parser that may need IO (network, credentials).
///
/// Implementations validate their output against the [`Action`] schema
/// before returning it: brightness in range, known variants only. Any
/// failure — missing credential, network error, timeout, malformed or
/// invalid output — is an error; the caller falls back to the rules parser
/// for that single input.
pub trait CommandParser: Send + Sync {
    /// Turn one line of input into an ordered action sequence.
    fn parse(&self, text: &str) -> impl Future<Output = Result<Vec<Action>, LumoError>> + Send;
}
