//! Board adapters binding the RP2040 peripherals to the gauge traits.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Output;

use argus_core::channel::ChannelId;
use argus_core::traits::IndicatorOutput;
use argus_drivers::sampler::AnalogReader;
use argus_drivers::sensor::ReferenceSelect;

/// Analog front end: one ADC, four sense channels.
pub struct BoardAdc<'d> {
    adc: Adc<'d, Blocking>,
    oil_temp: Channel<'d>,
    coolant_temp: Channel<'d>,
    oil_pressure: Channel<'d>,
    supply: Channel<'d>,
}

impl<'d> BoardAdc<'d> {
    pub fn new(
        adc: Adc<'d, Blocking>,
        oil_temp: Channel<'d>,
        coolant_temp: Channel<'d>,
        oil_pressure: Channel<'d>,
        supply: Channel<'d>,
    ) -> Self {
        Self {
            adc,
            oil_temp,
            coolant_temp,
            oil_pressure,
            supply,
        }
    }
}

impl AnalogReader for BoardAdc<'_> {
    fn read_raw(&mut self, channel: ChannelId) -> u16 {
        let input = match channel {
            ChannelId::OilTemp => &mut self.oil_temp,
            ChannelId::CoolantTemp => &mut self.coolant_temp,
            ChannelId::OilPressure => &mut self.oil_pressure,
            ChannelId::SupplyVoltage => &mut self.supply,
        };

        // A failed conversion reads as zero and surfaces as a fault
        // downstream. The RP2040 converter is 12-bit; the gauge math runs
        // in the 10-bit domain.
        self.adc.blocking_read(input).map_or(0, |raw| raw >> 2)
    }
}

/// Reference-resistor select line for one thermistor channel.
///
/// The FET driver on the board inverts the logic: driving the pin low
/// selects the high reference resistor.
pub struct ReferencePin<'d> {
    pin: Output<'d>,
}

impl<'d> ReferencePin<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl ReferenceSelect for ReferencePin<'_> {
    fn select_high(&mut self, high: bool) {
        if high {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
    }
}

/// Push-pull indicator output (warning LED, buzzer driver)
pub struct Indicator<'d> {
    pin: Output<'d>,
}

impl<'d> Indicator<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl IndicatorOutput for Indicator<'_> {
    fn set_on(&mut self, on: bool) {
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }

    fn is_on(&self) -> bool {
        self.pin.is_set_high()
    }
}
