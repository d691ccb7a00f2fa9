//! Firmware tasks

pub mod gauge;

pub use gauge::gauge_task;
