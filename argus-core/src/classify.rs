//! Per-channel fault classification.
//!
//! Turns each channel's conversion outcome into one of three states:
//! a failed acquisition is a fault, a successful reading beyond its
//! configured threshold is a warning, anything else is normal.

use crate::channel::{ChannelId, ConversionResult};
use crate::config::WarnThresholds;

/// Per-channel health, decided fresh every cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelStatus {
    /// Reading valid and inside the configured band
    Normal,
    /// Reading valid but at or beyond a warning threshold
    Warning,
    /// Acquisition or conversion failed
    Fault,
}

impl ChannelStatus {
    /// Whether this status engages the alert controller
    pub fn is_alerting(self) -> bool {
        !matches!(self, ChannelStatus::Normal)
    }
}

/// Classifies converted readings against the configured warning thresholds.
///
/// All threshold comparisons are inclusive: a reading exactly on the
/// boundary classifies as a warning.
#[derive(Debug, Clone)]
pub struct FaultClassifier {
    thresholds: WarnThresholds,
}

impl FaultClassifier {
    pub const fn new(thresholds: WarnThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, channel: ChannelId, result: ConversionResult) -> ChannelStatus {
        let value = match result {
            Ok(value) => value,
            Err(_) => return ChannelStatus::Fault,
        };

        let t = &self.thresholds;
        let warning = match channel {
            ChannelId::OilTemp => value >= t.oil_temp_max_c,
            ChannelId::CoolantTemp => value >= t.coolant_temp_max_c,
            ChannelId::OilPressure => {
                value <= t.oil_psi_low || value >= t.oil_psi_high
            }
            ChannelId::SupplyVoltage => {
                value <= t.supply_volts_low || value >= t.supply_volts_high
            }
        };

        if warning {
            ChannelStatus::Warning
        } else {
            ChannelStatus::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::SensorError;

    fn classifier() -> FaultClassifier {
        FaultClassifier::new(WarnThresholds::DEFAULT)
    }

    #[test]
    fn test_acquisition_failure_is_fault() {
        let c = classifier();
        for err in [
            SensorError::DivisionByZero,
            SensorError::OutOfRange,
            SensorError::InvalidInput,
        ] {
            assert_eq!(c.classify(ChannelId::OilTemp, Err(err)), ChannelStatus::Fault);
        }
    }

    #[test]
    fn test_temperature_boundary_is_inclusive() {
        let c = classifier();
        // Exactly at the threshold classifies as a warning
        assert_eq!(
            c.classify(ChannelId::CoolantTemp, Ok(110.0)),
            ChannelStatus::Warning
        );
        assert_eq!(
            c.classify(ChannelId::CoolantTemp, Ok(109.9)),
            ChannelStatus::Normal
        );
        assert_eq!(
            c.classify(ChannelId::OilTemp, Ok(120.0)),
            ChannelStatus::Warning
        );
        assert_eq!(
            c.classify(ChannelId::OilTemp, Ok(119.0)),
            ChannelStatus::Normal
        );
    }

    #[test]
    fn test_pressure_warns_low_and_high() {
        let c = classifier();
        assert_eq!(
            c.classify(ChannelId::OilPressure, Ok(13.0)),
            ChannelStatus::Warning
        );
        assert_eq!(
            c.classify(ChannelId::OilPressure, Ok(13.1)),
            ChannelStatus::Normal
        );
        assert_eq!(
            c.classify(ChannelId::OilPressure, Ok(150.0)),
            ChannelStatus::Warning
        );
        assert_eq!(
            c.classify(ChannelId::OilPressure, Ok(42.0)),
            ChannelStatus::Normal
        );
    }

    #[test]
    fn test_voltage_warns_low_and_high() {
        let c = classifier();
        assert_eq!(
            c.classify(ChannelId::SupplyVoltage, Ok(11.5)),
            ChannelStatus::Warning
        );
        assert_eq!(
            c.classify(ChannelId::SupplyVoltage, Ok(15.0)),
            ChannelStatus::Warning
        );
        assert_eq!(
            c.classify(ChannelId::SupplyVoltage, Ok(13.8)),
            ChannelStatus::Normal
        );
    }

    #[test]
    fn test_alerting_statuses() {
        assert!(!ChannelStatus::Normal.is_alerting());
        assert!(ChannelStatus::Warning.is_alerting());
        assert!(ChannelStatus::Fault.is_alerting());
    }
}
