//! DALI adapter errors.

use lumo_domain::error::LumoError;

/// Errors originating from the USB DALI gateway.
#[derive(Debug, thiserror::Error)]
pub enum DaliError {
    /// No gateway with the configured ids is attached.
    #[error("DALI gateway {vendor_id:04x}:{product_id:04x} not found")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// A USB operation failed.
    #[error("USB error")]
    Usb(#[from] rusb::Error),
}

impl From<DaliError> for LumoError {
    fn from(err: DaliError) -> Self {
        Self::Device(Box::new(err))
    }
}
