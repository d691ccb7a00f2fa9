//! Gauge panel rendering boundary.
//!
//! The cluster draws on two OLED panels, each split into a top and bottom
//! half with one channel per half. Implementations own the transport and
//! the actual drawing; the gauge cycle only dictates what each half shows.

use crate::channel::{ChannelId, PanelId};
use crate::units::UnitSelection;

/// Errors that can occur on the panel link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Transport write failed
    Transport,
    /// Content did not fit the outgoing frame
    BufferOverflow,
}

/// Rendering collaborator for the gauge panels.
///
/// `begin`/`render_*` stage content for a panel; `commit` pushes the staged
/// frame out. Staging is infallible, only the transport can fail.
pub trait GaugePanel {
    /// Start a fresh frame for one panel, clearing its staged content
    fn begin(&mut self, panel: PanelId);

    /// Stage a converted value on the channel's half, in the selected units
    fn render_value(&mut self, channel: ChannelId, value: f32, units: UnitSelection);

    /// Stage a warning marker on the channel's half
    fn render_warning(&mut self, channel: ChannelId);

    /// Stage a fault message in place of the channel's value
    fn render_fault(&mut self, channel: ChannelId);

    /// Push the staged frame for one panel to the hardware
    fn commit(&mut self, panel: PanelId) -> Result<(), PanelError>;

    /// Show the boot identification screen on both panels
    fn show_boot(&mut self) -> Result<(), PanelError>;

    /// Full brightness in daylight, dimmed when the lights are on
    fn set_brightness(&mut self, daylight: bool) -> Result<(), PanelError>;

    /// Power both panels on or off (lid closed turns them off)
    fn set_power(&mut self, on: bool) -> Result<(), PanelError>;
}
