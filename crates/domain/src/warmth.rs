//! Warmth — position on the cool↔warm colour-temperature axis.

use serde::{Deserialize, Serialize};

/// Discrete colour-temperature setting of the lamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Warmth {
    #[default]
    Cool,
    Neutral,
    Warm,
}

impl Warmth {
    /// DALI DT8 raw `(DTR, DTR1)` pair for this setting.
    ///
    /// Warm and Cool are the captured endpoints of the target luminaire;
    /// Neutral is the midpoint between them.
    #[must_use]
    pub fn dt8_raw(self) -> (u8, u8) {
        match self {
            Self::Cool => (0x32, 0x00),
            Self::Neutral => (0x21, 0x14),
            Self::Warm => (0x10, 0x27),
        }
    }
}

impl std::fmt::Display for Warmth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cool => f.write_str("cool"),
            Self::Neutral => f.write_str("neutral"),
            Self::Warm => f.write_str("warm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_cool() {
        assert_eq!(Warmth::default(), Warmth::Cool);
    }

    #[test]
    fn should_display_lowercase_variant_name() {
        assert_eq!(Warmth::Cool.to_string(), "cool");
        assert_eq!(Warmth::Neutral.to_string(), "neutral");
        assert_eq!(Warmth::Warm.to_string(), "warm");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let warmth = Warmth::Warm;
        let json = serde_json::to_string(&warmth).unwrap();
        assert_eq!(json, "\"warm\"");
        let parsed: Warmth = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, warmth);
    }

    #[test]
    fn should_map_endpoints_to_captured_dt8_pairs() {
        assert_eq!(Warmth::Warm.dt8_raw(), (0x10, 0x27));
        assert_eq!(Warmth::Cool.dt8_raw(), (0x32, 0x00));
    }
}
