//! DALI-2 command encoding for the broadcast address.
//!
//! Each command is a 16-bit forward frame `(address byte, opcode/level)`.
//! The DT8 colour-temperature change is a captured six-frame sequence:
//! load DTR/DTR1, enable device type 8, stage the temperature, enable
//! again, activate.

/// Broadcast off.
pub const OFF: (u8, u8) = (0xFF, 0x00);

/// Direct arc power at the broadcast address. Levels above 254 are
/// clamped; 254 is full output, 0 switches the lamp off.
#[must_use]
pub fn direct_arc_power(level: u8) -> (u8, u8) {
    (0xFE, level.min(254))
}

/// Map a 0–100 percentage to the 0–254 arc level, rounding half up.
#[must_use]
pub fn percent_to_level(percent: u8) -> u8 {
    let percent = u32::from(percent.min(100));
    u8::try_from((percent * 254 + 50) / 100).unwrap_or(254)
}

/// The DT8 sequence that stages and activates a raw `(DTR, DTR1)` colour
/// temperature.
#[must_use]
pub fn dt8_set_temp_raw(dtr: u8, dtr1: u8) -> [(u8, u8); 6] {
    [
        (0xA3, dtr),  // DTR
        (0xC3, dtr1), // DTR1
        (0xC1, 0x08), // enable DT8
        (0xFF, 0xE7), // set temporary colour temperature
        (0xC1, 0x08), // enable DT8
        (0xFF, 0xE2), // activate
    ]
}
