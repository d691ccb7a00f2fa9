//! Averaged analog acquisition.
//!
//! Every reading is the mean of several conversions with a settling delay
//! between them. The very first conversion after switching channels only
//! settles the ADC multiplexer and is discarded.

use embedded_hal::delay::DelayNs;

use argus_core::channel::ChannelId;
use argus_core::config::{SamplingConfig, ADC_FULL_SCALE_VOLTS, ADC_MAX_COUNT};

/// Raw analog access, one conversion per call.
///
/// Readings are in the 10-bit domain (0-1023); adapters for converters
/// with a different native resolution scale before returning.
pub trait AnalogReader {
    /// Read one raw conversion for the channel
    fn read_raw(&mut self, channel: ChannelId) -> u16;
}

/// Averaging sampler over an [`AnalogReader`].
///
/// `sample` blocks for `(samples + 1) * settle_delay_us` and always
/// produces a value; a dead input legitimately averages to zero and is
/// reported as a fault by the converter downstream.
pub struct AnalogSampler<A, D> {
    adc: A,
    delay: D,
    config: SamplingConfig,
}

impl<A: AnalogReader, D: DelayNs> AnalogSampler<A, D> {
    pub fn new(adc: A, delay: D, config: SamplingConfig) -> Self {
        Self { adc, delay, config }
    }

    /// Mean of `samples` conversions, first (settling) conversion discarded
    pub fn sample(&mut self, channel: ChannelId) -> f32 {
        let mut cumulative: u32 = 0;

        for i in 0..=self.config.samples {
            let value = self.adc.read_raw(channel);
            if i > 0 {
                cumulative += u32::from(value);
            }
            self.delay.delay_us(self.config.settle_delay_us);
        }

        cumulative as f32 / f32::from(self.config.samples)
    }

    /// Mean reading converted to volts at the ADC pin
    pub fn sample_volts(&mut self, channel: ChannelId) -> f32 {
        counts_to_volts(self.sample(channel))
    }
}

/// Convert a (possibly fractional) raw count to volts at the ADC pin
pub fn counts_to_volts(counts: f32) -> f32 {
    (ADC_FULL_SCALE_VOLTS / ADC_MAX_COUNT) * counts
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed sequence of conversions
    struct ScriptedAdc {
        readings: &'static [u16],
        next: usize,
    }

    impl ScriptedAdc {
        fn new(readings: &'static [u16]) -> Self {
            Self { readings, next: 0 }
        }
    }

    impl AnalogReader for ScriptedAdc {
        fn read_raw(&mut self, _channel: ChannelId) -> u16 {
            let value = self.readings[self.next % self.readings.len()];
            self.next += 1;
            value
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn sampler(readings: &'static [u16]) -> AnalogSampler<ScriptedAdc, NoDelay> {
        AnalogSampler::new(ScriptedAdc::new(readings), NoDelay, SamplingConfig::DEFAULT)
    }

    #[test]
    fn test_first_conversion_is_discarded() {
        // A wild settling artifact must not skew the mean
        let mut s = sampler(&[1023, 10, 20, 30, 40, 50]);
        assert_eq!(s.sample(ChannelId::OilTemp), 30.0);
    }

    #[test]
    fn test_mean_of_constant_input() {
        let mut s = sampler(&[600]);
        assert_eq!(s.sample(ChannelId::CoolantTemp), 600.0);
    }

    #[test]
    fn test_dead_input_averages_to_zero() {
        let mut s = sampler(&[0]);
        assert_eq!(s.sample(ChannelId::OilPressure), 0.0);
    }

    #[test]
    fn test_counts_to_volts_full_scale() {
        assert!(libm::fabsf(counts_to_volts(1023.0) - 3.3) < 1e-5);
        assert_eq!(counts_to_volts(0.0), 0.0);
    }

    #[test]
    fn test_sample_volts() {
        let mut s = sampler(&[1023]);
        let volts = s.sample_volts(ChannelId::SupplyVoltage);
        assert!(libm::fabsf(volts - 3.3) < 1e-5);
    }
}
