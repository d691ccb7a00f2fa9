//! Sensor conversion implementations

pub mod pressure;
pub mod supply;
pub mod thermistor;

pub use pressure::PressureChannel;
pub use supply::SupplyMonitor;
pub use thermistor::{ReferenceSelect, ThermistorChannel};
