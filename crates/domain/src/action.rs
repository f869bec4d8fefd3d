//! Action — one discrete, validated lamp instruction.
//!
//! Actions are produced only by the command parsers and consumed only by
//! [`LampState::apply`](crate::lamp::LampState::apply). The serde tagging
//! matches the JSON the model-based parser is instructed to emit, so its
//! output deserializes into [`Action`] directly.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::warmth::Warmth;

/// A single lamp instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Turn the lamp on or off. Turning on restores the last persisted
    /// brightness and warmth.
    SetPower { on: bool },
    /// Set brightness as a percentage in `0..=100`.
    SetBrightness { percent: u8 },
    /// Set the colour-temperature position.
    SetWarmth { warmth: Warmth },
}

impl Action {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BrightnessOutOfRange`] when a brightness
    /// percentage exceeds 100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::SetBrightness { percent } if *percent > 100 => {
                Err(ValidationError::BrightnessOutOfRange { percent: *percent })
            }
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SetPower { on: true } => f.write_str("power on"),
            Self::SetPower { on: false } => f.write_str("power off"),
            Self::SetBrightness { percent } => write!(f, "brightness {percent}%"),
            Self::SetWarmth { warmth } => write!(f, "warmth {warmth}"),
        }
    }
}

/// Where an action sequence came from. Used only for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Deterministic keyword matcher, no network.
    Rules,
    /// External language-model service, validated against the action schema.
    Model,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rules => f.write_str("rules"),
            Self::Model => f.write_str("model"),
        }
    }
}

/// The outcome of parsing one input line: an ordered action sequence
/// (possibly empty) plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub actions: Vec<Action>,
    pub provenance: Provenance,
}

impl ParsedCommand {
    /// Tag an action sequence with its provenance.
    #[must_use]
    pub fn new(actions: Vec<Action>, provenance: Provenance) -> Self {
        Self {
            actions,
            provenance,
        }
    }

    /// Whether parsing recognized anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
