//! Sensor channel identities and the per-channel reading cache.

use crate::classify::ChannelStatus;

/// Errors that can occur while converting a raw sample to a physical value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Zero raw sample fed into a divider computation
    DivisionByZero,
    /// Raw, intermediate or converted value outside the sensor's valid band
    OutOfRange,
    /// Malformed configuration or input (reserved)
    InvalidInput,
}

/// Outcome of one acquisition/conversion step, consumed the same cycle
pub type ConversionResult = Result<f32, SensorError>;

/// The four monitored quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelId {
    /// Engine oil temperature (thermistor)
    OilTemp,
    /// Engine oil pressure (analog sender)
    OilPressure,
    /// Coolant temperature (thermistor)
    CoolantTemp,
    /// Supply rail voltage before the DC-DC converter
    SupplyVoltage,
}

/// The two physical gauge panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelId {
    /// Oil temperature and pressure
    Oil,
    /// Coolant temperature and supply voltage
    Coolant,
}

/// Which half of a gauge panel a channel is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayHalf {
    Top,
    Bottom,
}

impl ChannelId {
    /// The panel this channel is drawn on
    pub const fn panel(self) -> PanelId {
        match self {
            ChannelId::OilTemp | ChannelId::OilPressure => PanelId::Oil,
            ChannelId::CoolantTemp | ChannelId::SupplyVoltage => PanelId::Coolant,
        }
    }

    /// The panel half this channel is drawn on
    pub const fn half(self) -> DisplayHalf {
        match self {
            ChannelId::OilTemp | ChannelId::CoolantTemp => DisplayHalf::Top,
            ChannelId::OilPressure | ChannelId::SupplyVoltage => DisplayHalf::Bottom,
        }
    }
}

impl PanelId {
    /// Stable index for panel-addressed buffers
    pub const fn index(self) -> usize {
        match self {
            PanelId::Oil => 0,
            PanelId::Coolant => 1,
        }
    }
}

impl DisplayHalf {
    /// Row index within a panel
    pub const fn row(self) -> usize {
        match self {
            DisplayHalf::Top => 0,
            DisplayHalf::Bottom => 1,
        }
    }
}

/// Cached state of one sensor channel across cycles.
///
/// Starts unset so the first reading always registers as a change, and
/// drops the cached value after a fault so the recovery cycle redraws.
#[derive(Debug, Clone, Copy)]
pub struct ChannelState {
    last_value: Option<f32>,
    last_status: Option<ChannelStatus>,
}

impl ChannelState {
    pub const fn new() -> Self {
        Self {
            last_value: None,
            last_status: None,
        }
    }

    /// Record this cycle's outcome; returns true when the panel half must redraw.
    pub fn observe(&mut self, result: ConversionResult, status: ChannelStatus) -> bool {
        let status_changed = self.last_status != Some(status);
        self.last_status = Some(status);

        match result {
            Ok(value) => {
                let value_changed = self.last_value != Some(value);
                self.last_value = Some(value);
                status_changed || value_changed
            }
            Err(_) => {
                self.last_value = None;
                status_changed
            }
        }
    }

    /// Drop the cached reading so the next cycle redraws unconditionally
    pub fn invalidate(&mut self) {
        self.last_value = None;
        self.last_status = None;
    }

    pub fn is_unset(&self) -> bool {
        self.last_value.is_none() && self.last_status.is_none()
    }
}

impl Default for ChannelState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ChannelStatus;

    #[test]
    fn test_first_observation_is_a_change() {
        let mut state = ChannelState::new();
        assert!(state.is_unset());
        assert!(state.observe(Ok(54.0), ChannelStatus::Normal));
    }

    #[test]
    fn test_same_reading_is_not_a_change() {
        let mut state = ChannelState::new();
        state.observe(Ok(54.0), ChannelStatus::Normal);
        assert!(!state.observe(Ok(54.0), ChannelStatus::Normal));
        assert!(state.observe(Ok(54.5), ChannelStatus::Normal));
    }

    #[test]
    fn test_status_change_forces_redraw() {
        let mut state = ChannelState::new();
        state.observe(Ok(109.0), ChannelStatus::Normal);
        // Same value, new status (thresholds moved elsewhere) still redraws
        assert!(state.observe(Ok(109.0), ChannelStatus::Warning));
    }

    #[test]
    fn test_fault_drops_cached_value() {
        let mut state = ChannelState::new();
        state.observe(Ok(54.0), ChannelStatus::Normal);
        state.observe(Err(SensorError::OutOfRange), ChannelStatus::Fault);
        // Recovery to the previous value must still redraw
        assert!(state.observe(Ok(54.0), ChannelStatus::Normal));
    }

    #[test]
    fn test_invalidate_forces_redraw() {
        let mut state = ChannelState::new();
        state.observe(Ok(12.5), ChannelStatus::Normal);
        state.invalidate();
        assert!(state.observe(Ok(12.5), ChannelStatus::Normal));
    }

    #[test]
    fn test_channel_panel_mapping() {
        assert_eq!(ChannelId::OilTemp.panel(), PanelId::Oil);
        assert_eq!(ChannelId::OilPressure.panel(), PanelId::Oil);
        assert_eq!(ChannelId::CoolantTemp.panel(), PanelId::Coolant);
        assert_eq!(ChannelId::SupplyVoltage.panel(), PanelId::Coolant);

        assert_eq!(ChannelId::OilTemp.half(), DisplayHalf::Top);
        assert_eq!(ChannelId::SupplyVoltage.half(), DisplayHalf::Bottom);
    }
}
