//! Unit selection and conversion.
//!
//! Units are chosen once at boot from the board jumpers and passed into the
//! renderer; all internal math stays in Celsius, PSI and volts.

/// PSI per bar
pub const PSI_PER_BAR: f32 = 14.5038;

/// Kelvin to Celsius offset
pub const KELVIN_OFFSET: f32 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureUnit {
    Psi,
    Bar,
}

/// Display units selected by the boot-time jumpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnitSelection {
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
}

impl UnitSelection {
    pub const METRIC: Self = Self {
        temperature: TemperatureUnit::Celsius,
        pressure: PressureUnit::Psi,
    };
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn psi_to_bar(psi: f32) -> f32 {
    psi / PSI_PER_BAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert!(libm::fabsf(celsius_to_fahrenheit(-40.0) - -40.0) < 1e-4);
    }

    #[test]
    fn test_psi_to_bar() {
        assert_eq!(psi_to_bar(PSI_PER_BAR), 1.0);
        assert!(libm::fabsf(psi_to_bar(29.0) - 2.0) < 0.01);
    }
}
