//! Pressure sender conversion.
//!
//! The senders swing 0-5 V; an onboard divider scales that to the ADC's
//! 3.3 V range, so the pin voltage is rescaled back before applying the
//! model's linear transform.

use argus_core::channel::{ConversionResult, SensorError};
use argus_core::config::{PressureSensorModel, ADC_FULL_SCALE_VOLTS, SENSOR_FULL_SCALE_VOLTS};

use crate::sampler::counts_to_volts;

/// One pressure input with its sender model
#[derive(Debug, Clone, Copy)]
pub struct PressureChannel {
    model: PressureSensorModel,
}

impl PressureChannel {
    pub const fn new(model: PressureSensorModel) -> Self {
        Self { model }
    }

    /// Convert an averaged raw sample to PSI (gauge pressure)
    pub fn convert(&self, raw: f32) -> ConversionResult {
        let pin_volts = counts_to_volts(raw);
        let sender_volts = pin_volts / ADC_FULL_SCALE_VOLTS * SENSOR_FULL_SCALE_VOLTS;
        self.convert_volts(sender_volts)
    }

    /// Convert a sender output voltage (0-5 V scale) to PSI.
    ///
    /// Voltages outside the model's documented window fail; window
    /// boundaries are valid. Readings that compute slightly negative near
    /// the sender's floor are clamped to zero.
    pub fn convert_volts(&self, volts: f32) -> ConversionResult {
        let (min_volts, max_volts) = self.model.volts_range();
        if volts < min_volts || volts > max_volts {
            return Err(SensorError::OutOfRange);
        }

        let (gain, offset) = self.model.coefficients();
        let psi = gain * volts + offset;

        Ok(psi.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libm::fabsf;

    #[test]
    fn test_linear_transform_mid_range() {
        let channel = PressureChannel::new(PressureSensorModel::Aem2131_100);
        // 2.5 V on the sender scale is half range: 25 * 2.5 - 12.5 = 50 PSI
        assert!(fabsf(channel.convert_volts(2.5).unwrap() - 50.0) < 1e-4);

        let channel = PressureChannel::new(PressureSensorModel::Aem2131_15G);
        assert!(fabsf(channel.convert_volts(2.0).unwrap() - 5.6293) < 1e-3);
    }

    #[test]
    fn test_window_boundaries_are_valid() {
        let channel = PressureChannel::new(PressureSensorModel::Aem2131_100);
        // The sender's floor voltage is exactly zero pressure
        assert_eq!(channel.convert_volts(0.5), Ok(0.0));
        assert!(channel.convert_volts(4.5).is_ok());
    }

    #[test]
    fn test_outside_window_is_out_of_range() {
        let channel = PressureChannel::new(PressureSensorModel::Aem2131_100);
        assert_eq!(channel.convert_volts(0.4), Err(SensorError::OutOfRange));
        assert_eq!(channel.convert_volts(4.6), Err(SensorError::OutOfRange));

        let channel = PressureChannel::new(PressureSensorModel::Aem2131_15G);
        assert_eq!(channel.convert_volts(0.1), Err(SensorError::OutOfRange));
        assert_eq!(channel.convert_volts(4.9), Err(SensorError::OutOfRange));
    }

    #[test]
    fn test_negative_results_clamp_to_zero() {
        let channel = PressureChannel::new(PressureSensorModel::Aem2131_15G);
        // 0.2 V computes to -1.126 PSI; the floor is not a real vacuum
        assert_eq!(channel.convert_volts(0.2), Ok(0.0));
        assert_eq!(channel.convert_volts(0.4), Ok(0.0));
    }

    #[test]
    fn test_raw_counts_rescaled_to_sender_range() {
        let channel = PressureChannel::new(PressureSensorModel::Aem2131_100);
        // Raw 511.5 is half the ADC range: 2.5 V on the sender scale
        let psi = channel.convert(511.5).unwrap();
        assert!(fabsf(psi - 50.0) < 0.01);
    }

    #[test]
    fn test_raw_below_window_fails() {
        let channel = PressureChannel::new(PressureSensorModel::Aem2131_100);
        // 0.3 V on the sender scale, well under the 0.5 V floor
        assert_eq!(channel.convert(61.4), Err(SensorError::OutOfRange));
    }
}
