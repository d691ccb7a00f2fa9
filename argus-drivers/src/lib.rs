//! Sensor acquisition and conversion for the Argus gauge cluster
//!
//! This crate turns raw ADC counts into engineering units behind the small
//! hardware traits it defines:
//!
//! - Averaged analog acquisition with settling-read rejection
//! - Dual-reference thermistor linearization (Steinhart-Hart)
//! - Pressure sender voltage-to-PSI conversion
//! - Supply rail voltage monitoring

#![no_std]
#![deny(unsafe_code)]

pub mod sampler;
pub mod sensor;
