//! Gauge panel adapter.
//!
//! The two panels act as dumb text terminals: the gauge cycle stages two
//! rows per panel and `commit` ships them as frames over one UART to the
//! panel controller, which owns fonts, icons and raster drawing. Staged
//! content survives between commits so unchanged panels cost nothing.

mod frame;

pub use frame::{Frame, FrameError, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD};

use core::fmt::Write as _;

use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{Blocking, Uart};
use heapless::String;

use argus_core::channel::{ChannelId, PanelId};
use argus_core::traits::{GaugePanel, PanelError};
use argus_core::units::{self, PressureUnit, TemperatureUnit, UnitSelection};

use frame::{MSG_CLEAR, MSG_CONTRAST, MSG_POWER, MSG_TEXT};

/// Characters per panel row
pub const LINE_COLS: usize = 18;

/// Contrast when the headlights are on; full brightness in daylight
const NIGHT_CONTRAST: u8 = 2;
const DAY_CONTRAST: u8 = 0xFF;

/// Pending text rows for one panel
struct Screen {
    lines: [String<LINE_COLS>; 2],
}

impl Screen {
    const fn new() -> Self {
        Self {
            lines: [String::new(), String::new()],
        }
    }

    fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }
}

/// Panel adapter over the UART link to the panel controller
pub struct UartPanel {
    uart: Uart<'static, UART0, Blocking>,
    screens: [Screen; 2],
}

impl UartPanel {
    pub fn new(uart: Uart<'static, UART0, Blocking>) -> Self {
        Self {
            uart,
            screens: [Screen::new(), Screen::new()],
        }
    }

    fn set_line(&mut self, panel: PanelId, row: usize, text: &str) {
        let line = &mut self.screens[panel.index()].lines[row];
        line.clear();
        let _ = line.push_str(&text[..text.len().min(LINE_COLS)]);
    }

    fn send(&mut self, frame: &Frame) -> Result<(), PanelError> {
        let mut buf = [0u8; MAX_FRAME_SIZE];
        let len = frame
            .encode(&mut buf)
            .map_err(|_| PanelError::BufferOverflow)?;
        self.uart
            .blocking_write(&buf[..len])
            .map_err(|_| PanelError::Transport)
    }

    fn send_panel(&mut self, panel: PanelId) -> Result<(), PanelError> {
        let idx = panel.index() as u8;

        let clear = Frame::new(MSG_CLEAR, &[idx]).map_err(|_| PanelError::BufferOverflow)?;
        self.send(&clear)?;

        for row in 0..2 {
            let frame = {
                let text = self.screens[panel.index()].lines[row].as_bytes();
                let mut payload = [0u8; 2 + LINE_COLS];
                payload[0] = idx;
                payload[1] = row as u8;
                payload[2..2 + text.len()].copy_from_slice(text);
                Frame::new(MSG_TEXT, &payload[..2 + text.len()])
                    .map_err(|_| PanelError::BufferOverflow)?
            };
            self.send(&frame)?;
        }

        Ok(())
    }
}

impl GaugePanel for UartPanel {
    fn begin(&mut self, panel: PanelId) {
        self.screens[panel.index()].clear();
    }

    fn render_value(&mut self, channel: ChannelId, value: f32, units: UnitSelection) {
        let text = format_value(channel, value, units);
        self.set_line(channel.panel(), channel.half().row(), &text);
    }

    fn render_warning(&mut self, channel: ChannelId) {
        let line = &mut self.screens[channel.panel().index()].lines[channel.half().row()];
        let _ = line.push_str(" !");
    }

    fn render_fault(&mut self, channel: ChannelId) {
        self.set_line(channel.panel(), channel.half().row(), fault_text(channel));
    }

    fn commit(&mut self, panel: PanelId) -> Result<(), PanelError> {
        self.send_panel(panel)
    }

    fn show_boot(&mut self) -> Result<(), PanelError> {
        for panel in [PanelId::Oil, PanelId::Coolant] {
            self.begin(panel);
            self.set_line(panel, 0, "      ARGUS");
            self.set_line(panel, 1, "  ENGINE VITALS");
            self.send_panel(panel)?;
        }
        Ok(())
    }

    fn set_brightness(&mut self, daylight: bool) -> Result<(), PanelError> {
        let level = if daylight { DAY_CONTRAST } else { NIGHT_CONTRAST };
        let frame = Frame::new(MSG_CONTRAST, &[level]).map_err(|_| PanelError::BufferOverflow)?;
        self.send(&frame)
    }

    fn set_power(&mut self, on: bool) -> Result<(), PanelError> {
        let frame =
            Frame::new(MSG_POWER, &[u8::from(on)]).map_err(|_| PanelError::BufferOverflow)?;
        self.send(&frame)
    }
}

/// Format one channel's reading in the selected units
fn format_value(channel: ChannelId, value: f32, units: UnitSelection) -> String<LINE_COLS> {
    let mut line = String::new();

    let _ = match channel {
        ChannelId::OilTemp | ChannelId::CoolantTemp => {
            let label = if channel == ChannelId::OilTemp {
                "OIL T"
            } else {
                "H2O T"
            };
            match units.temperature {
                TemperatureUnit::Celsius => write!(line, "{} {:>5.0} C", label, value),
                TemperatureUnit::Fahrenheit => {
                    write!(line, "{} {:>5.0} F", label, units::celsius_to_fahrenheit(value))
                }
            }
        }
        ChannelId::OilPressure => match units.pressure {
            PressureUnit::Psi => write!(line, "OIL P {:>5.1} PSI", value),
            PressureUnit::Bar => write!(line, "OIL P {:>5.2} BAR", units::psi_to_bar(value)),
        },
        ChannelId::SupplyVoltage => write!(line, "BATT  {:>5.1} V", value),
    };

    line
}

/// Fault message shown in place of the channel's value
fn fault_text(channel: ChannelId) -> &'static str {
    match channel {
        ChannelId::OilTemp => "OIL T  FAULT",
        ChannelId::CoolantTemp => "H2O T  FAULT",
        ChannelId::OilPressure => "OIL P  FAULT",
        ChannelId::SupplyVoltage => "BATT   FAULT",
    }
}

// Tests require std feature (not available on embedded target)
#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_format_metric_temperature() {
        let text = format_value(ChannelId::OilTemp, 54.4, UnitSelection::METRIC);
        assert_eq!(text.as_str(), "OIL T    54 C");
    }

    #[test]
    fn test_format_fahrenheit_temperature() {
        let units = UnitSelection {
            temperature: TemperatureUnit::Fahrenheit,
            pressure: PressureUnit::Psi,
        };
        let text = format_value(ChannelId::CoolantTemp, 100.0, units);
        assert_eq!(text.as_str(), "H2O T   212 F");
    }

    #[test]
    fn test_format_pressure_psi_and_bar() {
        let text = format_value(ChannelId::OilPressure, 42.25, UnitSelection::METRIC);
        assert_eq!(text.as_str(), "OIL P  42.2 PSI");

        let units = UnitSelection {
            temperature: TemperatureUnit::Celsius,
            pressure: PressureUnit::Bar,
        };
        let text = format_value(ChannelId::OilPressure, 29.0076, units);
        assert_eq!(text.as_str(), "OIL P  2.00 BAR");
    }

    #[test]
    fn test_format_supply_voltage() {
        let text = format_value(ChannelId::SupplyVoltage, 13.83, UnitSelection::METRIC);
        assert_eq!(text.as_str(), "BATT   13.8 V");
    }

    #[test]
    fn test_warning_marker_fits_with_widest_value() {
        let text = format_value(ChannelId::OilPressure, 150.0, UnitSelection::METRIC);
        // Two columns must remain for the warning marker
        assert!(text.len() + 2 <= LINE_COLS);
    }
}
