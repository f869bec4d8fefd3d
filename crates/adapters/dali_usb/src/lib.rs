//! USB DALI implementation of [`LampGateway`].
//!
//! Drives the whole lamp state in one `apply`: power off is a broadcast
//! off frame; power on stages the warmth's DT8 colour temperature, then
//! sets the brightness via direct arc power. Frames are paced — the
//! gateway drops back-to-back writes.

mod commands;
mod config;
mod error;
mod transport;

use std::future::Future;
use std::time::Duration;

use lumo_app::ports::LampGateway;
use lumo_domain::error::LumoError;
use lumo_domain::lamp::LampState;
use tracing::debug;

pub use config::DeviceConfig;
pub use error::DaliError;
pub use transport::DaliTransport;

/// [`LampGateway`] implementation talking to the USB HID DALI gateway.
pub struct DaliLampGateway {
    transport: DaliTransport,
    pause: Duration,
}

impl DaliLampGateway {
    /// Open the configured gateway.
    ///
    /// # Errors
    ///
    /// Returns [`DaliError::DeviceNotFound`] when the gateway is not
    /// attached — callers treat this as a fatal startup diagnostic outside
    /// dry-run mode.
    pub fn open(config: &DeviceConfig) -> Result<Self, DaliError> {
        let transport = DaliTransport::open(config.vendor_id, config.product_id)?;
        Ok(Self {
            transport,
            pause: Duration::from_millis(config.pause_ms),
        })
    }

    async fn send_paced(&self, frame: (u8, u8)) -> Result<(), DaliError> {
        self.transport.send_frame(frame.0, frame.1)?;
        tokio::time::sleep(self.pause).await;
        Ok(())
    }

    async fn drive(&self, state: &LampState) -> Result<(), DaliError> {
        if !state.power {
            debug!("sending broadcast off");
            return self.send_paced(commands::OFF).await;
        }

        let (dtr, dtr1) = state.warmth.dt8_raw();
        debug!(dtr, dtr1, "staging colour temperature");
        for frame in commands::dt8_set_temp_raw(dtr, dtr1) {
            self.send_paced(frame).await?;
        }

        let level = commands::percent_to_level(state.brightness);
        debug!(level, "setting arc power");
        self.send_paced(commands::direct_arc_power(level)).await
    }
}

impl LampGateway for DaliLampGateway {
    fn apply(&self, state: &LampState) -> impl Future<Output = Result<(), LumoError>> + Send {
        let state = *state;
        async move {
            self.drive(&state).await?;
            Ok(())
        }
    }
}
