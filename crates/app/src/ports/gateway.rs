//! Gateway port — pushing a lamp state to the hardware.

use std::future::Future;

use lumo_domain::error::LumoError;
use lumo_domain::lamp::LampState;

/// The lamp itself, or a stand-in for it.
///
/// `apply` sends the final power/brightness/warmth values to the device.
/// A failure must never lose the user's intent: callers persist the new
/// state *before* calling this.
pub trait LampGateway: Send + Sync {
    /// Drive the lamp to the given state.
    fn apply(&self, state: &LampState) -> impl Future<Output = Result<(), LumoError>> + Send;
}
