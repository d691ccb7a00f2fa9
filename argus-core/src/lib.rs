//! Board-agnostic core logic for the Argus gauge cluster firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Channel identities and the per-channel reading cache
//! - Fault classification against the configured warning thresholds
//! - Alert state machine (warning LED plus timed buzzer pulse)
//! - Calibration and threshold configuration
//! - Unit selection and conversion
//! - Hardware abstraction traits (gauge panel, indicator outputs)

#![no_std]
#![deny(unsafe_code)]

pub mod alert;
pub mod channel;
pub mod classify;
pub mod config;
pub mod traits;
pub mod units;
