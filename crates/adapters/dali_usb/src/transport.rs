//! USB HID transport for the DALI gateway.
//!
//! The gateway accepts 64-byte HID output reports on interrupt endpoint
//! 0x01: a fixed magic byte, a rolling non-zero sequence counter, a
//! two-byte length field, and the 16-bit DALI forward frame.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rusb::{DeviceHandle, GlobalContext};

use crate::error::DaliError;

const REPORT_LEN: usize = 64;
const OUT_ENDPOINT: u8 = 0x01;
const WRITE_TIMEOUT: Duration = Duration::from_millis(500);

/// Handle to the opened HID gateway.
pub struct DaliTransport {
    handle: DeviceHandle<GlobalContext>,
    counter: Mutex<u8>,
}

impl DaliTransport {
    /// Open the gateway by vendor/product id and claim its interface.
    ///
    /// # Errors
    ///
    /// Returns [`DaliError::DeviceNotFound`] when no matching device is
    /// attached, or [`DaliError::Usb`] when claiming the interface fails.
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self, DaliError> {
        let mut handle = rusb::open_device_with_vid_pid(vendor_id, product_id).ok_or(
            DaliError::DeviceNotFound {
                vendor_id,
                product_id,
            },
        )?;
        // Linux binds hid-generic to the gateway; detach it for the
        // duration of the claim.
        let _ = handle.set_auto_detach_kernel_driver(true);
        handle.claim_interface(0)?;
        Ok(Self {
            handle,
            counter: Mutex::new(0),
        })
    }

    /// Send one 16-bit DALI forward frame.
    ///
    /// # Errors
    ///
    /// Returns [`DaliError::Usb`] when the interrupt write fails.
    pub fn send_frame(&self, b0: u8, b1: u8) -> Result<(), DaliError> {
        let counter = self.next_counter();
        let report = encode_report(counter, b0, b1);
        self.handle
            .write_interrupt(OUT_ENDPOINT, &report, WRITE_TIMEOUT)?;
        Ok(())
    }

    /// Rolling sequence counter: 1..=255, never 0.
    fn next_counter(&self) -> u8 {
        let mut counter = self.counter.lock().unwrap_or_else(PoisonError::into_inner);
        *counter = next_counter_value(*counter);
        *counter
    }
}

fn next_counter_value(current: u8) -> u8 {
    match current.wrapping_add(1) {
        0 => 1,
        value => value,
    }
}

fn encode_report(counter: u8, b0: u8, b1: u8) -> [u8; REPORT_LEN] {
    let mut report = [0u8; REPORT_LEN];
    report[0] = 0x12; // send-frame command
    report[1] = counter;
    report[2] = 0x00;
    report[3] = 0x03; // payload length
    report[6] = b0;
    report[7] = b1;
    report
}
