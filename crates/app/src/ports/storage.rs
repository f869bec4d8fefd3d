//! Storage port — the persisted lamp record.

use std::future::Future;

use lumo_domain::error::LumoError;
use lumo_domain::lamp::LampState;

/// Owner of the on-disk lamp record.
pub trait StateStore: Send + Sync {
    /// Return the last persisted state, or the documented default when no
    /// record exists or it is unreadable (a recoverable condition —
    /// implementations log a warning rather than failing).
    fn load(&self) -> impl Future<Output = Result<LampState, LumoError>> + Send;

    /// Persist the full state atomically (write-to-temp-then-replace) so a
    /// crash mid-write never leaves a half-written record.
    fn save(&self, state: &LampState) -> impl Future<Output = Result<(), LumoError>> + Send;
}
