//! Virtual lamp — the dry-run implementation of [`LampGateway`].
//!
//! Logs the writes the hardware adapter would have performed and always
//! reports success, while keeping every other behavior of the pipeline
//! (parsing, merging, persistence) intact. The last applied state is kept
//! in memory so tests can observe what reached the "device".

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use lumo_app::ports::LampGateway;
use lumo_domain::error::LumoError;
use lumo_domain::lamp::LampState;
use tracing::info;

/// A simulated lamp that records what it is told to do.
///
/// Clones share the applied-state record, so a test can keep one handle
/// while handing another to the service under test.
#[derive(Debug, Clone, Default)]
pub struct VirtualLamp {
    last_applied: Arc<Mutex<Option<LampState>>>,
}

impl VirtualLamp {
    /// Create a virtual lamp with no applied state yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently applied state, if any.
    #[must_use]
    pub fn last_applied(&self) -> Option<LampState> {
        *self
            .last_applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// How the hardware adapter would have driven the lamp.
    fn describe(state: &LampState) -> String {
        if state.power {
            let (dtr, dtr1) = state.warmth.dt8_raw();
            format!(
                "set_temp_raw({dtr:#04x}, {dtr1:#04x}); set_brightness({}%)",
                state.brightness
            )
        } else {
            "off()".to_string()
        }
    }
}

impl LampGateway for VirtualLamp {
    fn apply(&self, state: &LampState) -> impl Future<Output = Result<(), LumoError>> + Send {
        info!(writes = %Self::describe(state), "[dry-run] lamp not touched");
        *self
            .last_applied
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(*state);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_domain::warmth::Warmth;

    #[tokio::test]
    async fn should_record_last_applied_state() {
        let lamp = VirtualLamp::new();
        let state = LampState {
            power: true,
            brightness: 60,
            warmth: Warmth::Warm,
        };

        lamp.apply(&state).await.unwrap();

        assert_eq!(lamp.last_applied(), Some(state));
    }

    #[tokio::test]
    async fn should_start_with_no_applied_state() {
        let lamp = VirtualLamp::new();
        assert_eq!(lamp.last_applied(), None);
    }

    #[tokio::test]
    async fn should_always_report_success() {
        let lamp = VirtualLamp::new();
        for state in [
            LampState::default(),
            LampState {
                power: false,
                brightness: 0,
                warmth: Warmth::Neutral,
            },
        ] {
            assert!(lamp.apply(&state).await.is_ok());
        }
    }

    #[test]
    fn should_describe_off_state_as_off_command() {
        let state = LampState {
            power: false,
            brightness: 50,
            warmth: Warmth::Cool,
        };
        assert_eq!(VirtualLamp::describe(&state), "off()");
    }

    #[test]
    fn should_describe_on_state_with_temp_and_brightness() {
        let state = LampState {
            power: true,
            brightness: 30,
            warmth: Warmth::Warm,
        };
        let description = VirtualLamp::describe(&state);
        assert!(description.contains("set_brightness(30%)"));
        assert!(description.contains("set_temp_raw(0x10, 0x27)"));
    }
}
