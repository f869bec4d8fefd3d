//! Lamp state — the full persisted record of the lamp, and the merge logic
//! that folds a parsed action sequence into it.
//!
//! The state is always fully defined: there is no partial or unknown
//! variant. Brightness stays within `0..=100`. The executor
//! ([`LampState::apply`]) is pure — persistence and hardware writes are the
//! caller's concern.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::warmth::Warmth;

/// Brightness restored by a bare "turn on" when the stored level is zero,
/// so the lamp never comes back dark.
pub const RESTORE_BRIGHTNESS: u8 = 50;

/// The complete lamp record: power, brightness percentage, warmth.
///
/// Mutated only through [`apply`](Self::apply); persisted after every
/// successful mutation so a later "turn on" restores the last setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LampState {
    pub power: bool,
    pub brightness: u8,
    pub warmth: Warmth,
}

impl Default for LampState {
    /// First-run default: on, full brightness, cool white.
    fn default() -> Self {
        Self {
            power: true,
            brightness: 100,
            warmth: Warmth::Cool,
        }
    }
}

impl LampState {
    /// Merge an ordered action sequence into this state, producing the new
    /// state.
    ///
    /// Application order is fixed regardless of input order: power is
    /// resolved first, then brightness, then warmth. When one input
    /// addresses the same field more than once, the last action wins.
    ///
    /// - A bare power-on restores the persisted brightness and warmth; if
    ///   the stored brightness is zero it comes back at
    ///   [`RESTORE_BRIGHTNESS`] instead.
    /// - Power-off leaves brightness and warmth untouched so the next
    ///   power-on restores them.
    /// - Setting a brightness level drives the lamp's power: any non-zero
    ///   level switches it on, zero switches it off (direct arc power
    ///   behaves this way on the wire).
    /// - An empty sequence returns the state unchanged.
    #[must_use]
    pub fn apply(&self, actions: &[Action]) -> Self {
        let mut power = None;
        let mut brightness = None;
        let mut warmth = None;
        for action in actions {
            match action {
                Action::SetPower { on } => power = Some(*on),
                Action::SetBrightness { percent } => brightness = Some((*percent).min(100)),
                Action::SetWarmth { warmth: value } => warmth = Some(*value),
            }
        }

        let mut next = *self;
        match power {
            Some(false) => next.power = false,
            Some(true) => {
                next.power = true;
                if brightness.is_none() && next.brightness == 0 {
                    next.brightness = RESTORE_BRIGHTNESS;
                }
            }
            None => {}
        }
        if let Some(percent) = brightness {
            next.brightness = percent;
            next.power = percent > 0;
        }
        if let Some(value) = warmth {
            next.warmth = value;
        }
        next
    }
}

impl std::fmt::Display for LampState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "power={} brightness={}% warmth={}",
            if self.power { "on" } else { "off" },
            self.brightness,
            self.warmth
        )
    }
}
