//! Supply rail voltage monitoring.
//!
//! The rail (nominally 11.5-14.5 V with the engine running) is scaled down
//! by an onboard divider; the conversion inverts that divider and applies a
//! plausibility floor.

use argus_core::channel::{ConversionResult, SensorError};
use argus_core::config::{VoltageDivider, SUPPLY_VOLTS_MIN_VALID};

use crate::sampler::counts_to_volts;

/// Supply rail sense input
#[derive(Debug, Clone, Copy)]
pub struct SupplyMonitor {
    divider: VoltageDivider,
}

impl SupplyMonitor {
    pub const fn new(divider: VoltageDivider) -> Self {
        Self { divider }
    }

    /// Convert an averaged raw sample to the rail voltage
    pub fn convert(&self, raw: f32) -> ConversionResult {
        self.convert_volts(counts_to_volts(raw))
    }

    /// Convert the ADC pin voltage to the rail voltage.
    ///
    /// Anything under 7 V is a measurement fault: the controller could not
    /// be running from such a rail.
    pub fn convert_volts(&self, pin_volts: f32) -> ConversionResult {
        let supply = pin_volts / self.divider.ratio();

        if supply < SUPPLY_VOLTS_MIN_VALID {
            return Err(SensorError::OutOfRange);
        }

        Ok(supply)
    }
}
