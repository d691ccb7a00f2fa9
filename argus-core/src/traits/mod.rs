//! Hardware abstraction traits
//!
//! These traits define the interface between the gauge logic and the
//! hardware-specific implementations in the firmware crate.

pub mod indicator;
pub mod panel;

pub use indicator::IndicatorOutput;
pub use panel::{GaugePanel, PanelError};
