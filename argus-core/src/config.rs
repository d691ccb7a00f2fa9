//! Compile-time calibration and threshold configuration.
//!
//! Every value here mirrors a measured component or a chosen limit on the
//! gauge board; there is no runtime configuration. Threshold ordering is
//! checked at compile time.

/// Full-scale count of the 10-bit converter
pub const ADC_MAX_COUNT: f32 = 1023.0;

/// Highest voltage tolerable by the ADC inputs
pub const ADC_FULL_SCALE_VOLTS: f32 = 3.3;

/// Native full-scale of the pressure senders, before the onboard divider
pub const SENSOR_FULL_SCALE_VOLTS: f32 = 5.0;

/// Thermistor validity band: -40 C to 150 C in Kelvin
pub const SENSOR_KELVIN_MIN: f32 = 233.15;
pub const SENSOR_KELVIN_MAX: f32 = 423.15;

/// Supply readings below this cannot be real: the controller itself
/// would not be running. Treated as a measurement fault.
pub const SUPPLY_VOLTS_MIN_VALID: f32 = 7.0;

/// Display refresh rate, which is also the acquisition rate
pub const REFRESH_RATE_HZ: u32 = 5;

/// Calibration for one thermistor channel.
///
/// Thermistor curves lose ADC resolution at one end of the range, so each
/// channel carries two pull-down reference resistors and switches between
/// them. The two switch thresholds are deliberately apart (hysteresis) so
/// the reference does not flap when the reading hovers near the boundary.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermistorCalibration {
    /// Steinhart-Hart coefficients for the sensor
    pub c1: f32,
    pub c2: f32,
    pub c3: f32,
    /// Reference resistor used for the low-to-mid range, ohms
    pub r_ref_high_ohms: f32,
    /// Parallel value of both reference resistors, used for the high end, ohms
    pub r_ref_low_ohms: f32,
    /// Above this temperature (high mode) the low reference takes over, C
    pub switch_to_low_c: f32,
    /// Below this temperature (low mode) the high reference takes over, C
    pub switch_to_high_c: f32,
}

/// Oil thermistor: AEM 30-2012 sender, reference resistors measured on the
/// board (R9 high, R8/R9 parallel low).
///
/// Steinhart-Hart coefficients fitted from the sender datasheet points
/// -40 C / 402392 ohm, 50 C / 3911 ohm, 150 C / 189.3 ohm.
pub const OIL_THERMISTOR: ThermistorCalibration = ThermistorCalibration {
    c1: 1.144169514e-3,
    c2: 2.302830665e-4,
    c3: 0.8052469400e-7,
    r_ref_high_ohms: 14960.0,
    r_ref_low_ohms: 935.59,
    switch_to_low_c: 55.0,
    switch_to_high_c: 50.0,
};

/// Coolant thermistor: same sender family, reference resistors measured on
/// the board (R11 high, R10/R11 parallel low).
pub const COOLANT_THERMISTOR: ThermistorCalibration = ThermistorCalibration {
    c1: 1.144169514e-3,
    c2: 2.302830665e-4,
    c3: 0.8052469400e-7,
    r_ref_high_ohms: 14960.0,
    r_ref_low_ohms: 935.59,
    switch_to_low_c: 55.0,
    switch_to_high_c: 50.0,
};

// Hysteresis requires a gap between the switch points
const _: () = assert!(OIL_THERMISTOR.switch_to_low_c > OIL_THERMISTOR.switch_to_high_c);
const _: () = assert!(COOLANT_THERMISTOR.switch_to_low_c > COOLANT_THERMISTOR.switch_to_high_c);

/// Supported pressure sender models, each a linear volts-to-PSI transform
/// valid over a documented voltage window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureSensorModel {
    /// AEM 30-2131-100 / 30-2130-100: PSI = 25 V - 12.5, valid 0.5-4.5 V
    Aem2131_100,
    /// AEM 30-2131-15G: PSI = 3.7529 V - 1.8765, valid 0.2-4.8 V
    Aem2131_15G,
}

impl PressureSensorModel {
    /// Valid sender output window in volts, boundaries included
    pub const fn volts_range(self) -> (f32, f32) {
        match self {
            PressureSensorModel::Aem2131_100 => (0.5, 4.5),
            PressureSensorModel::Aem2131_15G => (0.2, 4.8),
        }
    }

    /// Linear transform (gain, offset): PSI = gain * volts + offset
    pub const fn coefficients(self) -> (f32, f32) {
        match self {
            PressureSensorModel::Aem2131_100 => (25.0, -12.5),
            PressureSensorModel::Aem2131_15G => (3.7529, -1.8765),
        }
    }
}

/// Resistive divider scaling the supply rail down to the ADC range
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VoltageDivider {
    pub r1_ohms: f32,
    pub r2_ohms: f32,
}

impl VoltageDivider {
    /// Supply sense divider (R4 / R3), good for 0-18 V input
    pub const SUPPLY_SENSE: Self = Self {
        r1_ohms: 6800.0,
        r2_ohms: 1500.0,
    };

    /// Fraction of the input voltage seen at the ADC pin
    pub fn ratio(&self) -> f32 {
        self.r2_ohms / (self.r1_ohms + self.r2_ohms)
    }
}

/// Warning thresholds, compared inclusively at the boundary
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WarnThresholds {
    pub oil_temp_max_c: f32,
    pub coolant_temp_max_c: f32,
    pub oil_psi_low: f32,
    pub oil_psi_high: f32,
    pub supply_volts_low: f32,
    pub supply_volts_high: f32,
}

impl WarnThresholds {
    pub const DEFAULT: Self = Self {
        oil_temp_max_c: 120.0,
        coolant_temp_max_c: 110.0,
        oil_psi_low: 13.0,
        oil_psi_high: 150.0,
        supply_volts_low: 11.5,
        supply_volts_high: 15.0,
    };
}

const _: () = assert!(WarnThresholds::DEFAULT.oil_psi_low < WarnThresholds::DEFAULT.oil_psi_high);
const _: () =
    assert!(WarnThresholds::DEFAULT.supply_volts_low < WarnThresholds::DEFAULT.supply_volts_high);

/// Analog acquisition parameters
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SamplingConfig {
    /// Number of conversions averaged per reading (one extra settling
    /// conversion is taken and discarded)
    pub samples: u16,
    /// Settling delay after each conversion, microseconds
    pub settle_delay_us: u32,
}

impl SamplingConfig {
    pub const DEFAULT: Self = Self {
        samples: 5,
        settle_delay_us: 5_000,
    };
}

const _: () = assert!(SamplingConfig::DEFAULT.samples > 0);

/// Alert output behaviour
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertConfig {
    /// Sound the buzzer on entering an alert
    pub buzzer_enabled: bool,
    /// Length of one buzzer pulse, milliseconds
    pub buzzer_pulse_ms: u64,
}

impl AlertConfig {
    pub const DEFAULT: Self = Self {
        buzzer_enabled: true,
        buzzer_pulse_ms: 2_000,
    };
}
