//! DALI gateway configuration.

use serde::Deserialize;

/// Configuration for the USB DALI gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// USB vendor id of the HID gateway.
    pub vendor_id: u16,
    /// USB product id of the HID gateway.
    pub product_id: u16,
    /// Pause between consecutive frames, in milliseconds. The gateway
    /// drops frames sent back-to-back.
    pub pause_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            vendor_id: 0x17B5,
            product_id: 0x0020,
            pause_ms: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_known_gateway_ids() {
        let config = DeviceConfig::default();
        assert_eq!(config.vendor_id, 0x17B5);
        assert_eq!(config.product_id, 0x0020);
        assert_eq!(config.pause_ms, 30);
    }

    #[test]
    fn should_deserialize_from_toml_with_hex_ids() {
        let toml = r"
            vendor_id = 0x1234
            product_id = 0x5678
            pause_ms = 50
        ";
        let config: DeviceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.vendor_id, 0x1234);
        assert_eq!(config.product_id, 0x5678);
        assert_eq!(config.pause_ms, 50);
    }

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let config: DeviceConfig = toml::from_str("pause_ms = 10").unwrap();
        assert_eq!(config.vendor_id, 0x17B5);
        assert_eq!(config.pause_ms, 10);
    }
}
