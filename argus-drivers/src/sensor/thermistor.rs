//! Dual-reference thermistor temperature conversion.
//!
//! The sender forms a voltage divider with a pull-down reference resistor,
//! inverted to a resistance and linearized with the Steinhart-Hart
//! polynomial. A single reference would waste most of the ADC range at one
//! end of the curve, so each channel carries two references and switches
//! between them around the mid-50s C, with hysteresis so the reference
//! does not flap near the switch point. A switch takes effect on the next
//! conversion: the new divider needs a fresh sample to mean anything.

use libm::logf;

use argus_core::channel::{ConversionResult, SensorError};
use argus_core::config::{
    ThermistorCalibration, ADC_MAX_COUNT, SENSOR_KELVIN_MAX, SENSOR_KELVIN_MIN,
};
use argus_core::units::KELVIN_OFFSET;

/// Drives the reference-resistor select line for one thermistor channel
pub trait ReferenceSelect {
    /// Select the high reference resistor (true) or the low one (false)
    fn select_high(&mut self, high: bool);
}

/// One thermistor input with its calibration and reference state
pub struct ThermistorChannel<SEL> {
    cal: ThermistorCalibration,
    select: SEL,
    reference_high: bool,
}

impl<SEL: ReferenceSelect> ThermistorChannel<SEL> {
    /// Create the channel; starts in high-reference mode and drives the
    /// select line accordingly
    pub fn new(cal: ThermistorCalibration, mut select: SEL) -> Self {
        select.select_high(true);
        Self {
            cal,
            select,
            reference_high: true,
        }
    }

    /// Which reference the next conversion will use
    pub fn reference_is_high(&self) -> bool {
        self.reference_high
    }

    /// Convert an averaged raw sample to degrees Celsius.
    ///
    /// On success the reference-select policy runs once; a switch only
    /// affects the next conversion.
    pub fn convert(&mut self, raw: f32) -> ConversionResult {
        if raw == 0.0 {
            return Err(SensorError::DivisionByZero);
        }
        if raw < 0.0 {
            return Err(SensorError::OutOfRange);
        }

        let r_ref = if self.reference_high {
            self.cal.r_ref_high_ohms
        } else {
            self.cal.r_ref_low_ohms
        };

        // Invert the divider: R2 = R1 * (Vin / Vout - 1)
        let resistance = r_ref * (ADC_MAX_COUNT / raw - 1.0);

        let ln_r = logf(resistance);
        let kelvin = 1.0 / (self.cal.c1 + self.cal.c2 * ln_r + self.cal.c3 * ln_r * ln_r * ln_r);

        // A resistance outside the sender's curve lands outside this band,
        // as do the NaN/inf cases from a railed sample
        if !(kelvin >= SENSOR_KELVIN_MIN && kelvin <= SENSOR_KELVIN_MAX) {
            return Err(SensorError::OutOfRange);
        }

        let celsius = kelvin - KELVIN_OFFSET;

        if self.reference_high && celsius > self.cal.switch_to_low_c {
            self.reference_high = false;
            self.select.select_high(false);
        } else if !self.reference_high && celsius < self.cal.switch_to_high_c {
            self.reference_high = true;
            self.select.select_high(true);
        }

        Ok(celsius)
    }
}
