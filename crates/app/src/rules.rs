//! Rules-based parser — a deterministic keyword matcher.
//!
//! This is the always-available fallback behind the model-based parser: no
//! network, no credentials, same text → same actions. Keywords are matched
//! case-insensitively on word boundaries and emitted in the order they
//! appear in the input; when one input addresses the same field twice, the
//! merge step lets the last action win.

use lumo_domain::action::Action;
use lumo_domain::warmth::Warmth;
use regex::Regex;

/// One token per match: a keyword (group 1) or a percentage (group 2).
const TOKEN_PATTERN: &str =
    r"(?i)\b(?:(on|off|warm|yellow|cool|white|neutral|max|min|restore|resume)\b|(\d{1,3})\s*%)";

/// Deterministic keyword/pattern matcher.
pub struct RulesParser {
    tokens: Regex,
}

impl Default for RulesParser {
    fn default() -> Self {
        Self {
            tokens: Regex::new(TOKEN_PATTERN).expect("token pattern is valid"),
        }
    }
}

impl RulesParser {
    /// Create a new rules parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `text` for recognized tokens, in order of appearance.
    ///
    /// Unrecognized text yields an empty sequence — a no-op for the caller,
    /// never an error.
    #[must_use]
    pub fn parse_text(&self, text: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        for caps in self.tokens.captures_iter(text) {
            if let Some(word) = caps.get(1) {
                match word.as_str().to_ascii_lowercase().as_str() {
                    "off" => actions.push(Action::SetPower { on: false }),
                    "on" | "restore" | "resume" => actions.push(Action::SetPower { on: true }),
                    "warm" | "yellow" => actions.push(Action::SetWarmth {
                        warmth: Warmth::Warm,
                    }),
                    "cool" | "white" => actions.push(Action::SetWarmth {
                        warmth: Warmth::Cool,
                    }),
                    "neutral" => actions.push(Action::SetWarmth {
                        warmth: Warmth::Neutral,
                    }),
                    "max" => actions.push(Action::SetBrightness { percent: 100 }),
                    "min" => actions.push(Action::SetBrightness { percent: 0 }),
                    _ => {}
                }
            } else if let Some(digits) = caps.get(2) {
                if let Ok(value) = digits.as_str().parse::<u16>() {
                    let percent = u8::try_from(value.min(100)).unwrap_or(100);
                    actions.push(Action::SetBrightness { percent });
                }
            }
        }
        actions
    }
}
