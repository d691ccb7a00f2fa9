//! Argus - Engine vitals gauge cluster firmware
//!
//! Main firmware binary for RP2040-based gauge pods. Samples the oil and
//! coolant senders, converts the readings to engineering units and drives
//! two OLED text panels plus the warning LED and buzzer on a fixed 5 Hz
//! cycle.
//!
//! Named after Argus Panoptes, the hundred-eyed watchman of Greek myth.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::uart::{Config as UartConfig, Uart};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use argus_core::traits::GaugePanel;
use argus_core::units::{PressureUnit, TemperatureUnit, UnitSelection};

mod board;
mod display;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Argus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Analog inputs (the four ADC-capable pins)
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let board_adc = board::BoardAdc::new(
        adc,
        AdcChannel::new_pin(p.PIN_26, Pull::None), // oil thermistor
        AdcChannel::new_pin(p.PIN_27, Pull::None), // coolant thermistor
        AdcChannel::new_pin(p.PIN_28, Pull::None), // oil pressure sender
        AdcChannel::new_pin(p.PIN_29, Pull::None), // supply divider
    );

    // Thermistor reference-select lines (inverted by the FET drivers)
    let oil_ref = board::ReferencePin::new(Output::new(p.PIN_3, Level::Low));
    let coolant_ref = board::ReferencePin::new(Output::new(p.PIN_4, Level::Low));

    // Alert outputs
    let buzzer = board::Indicator::new(Output::new(p.PIN_6, Level::Low));
    let led = board::Indicator::new(Output::new(p.PIN_7, Level::Low));

    // Unit jumpers, read once at boot: a fitted jumper pulls the line low
    let fahrenheit_jumper = Input::new(p.PIN_2, Pull::Up);
    let bar_jumper = Input::new(p.PIN_10, Pull::Up);
    let units = UnitSelection {
        temperature: if fahrenheit_jumper.is_low() {
            TemperatureUnit::Fahrenheit
        } else {
            TemperatureUnit::Celsius
        },
        pressure: if bar_jumper.is_low() {
            PressureUnit::Bar
        } else {
            PressureUnit::Psi
        },
    };
    info!("Units: {:?}", units);

    // Lid hall-effect sensor (high when the magnet closes it) and the
    // headlight sense line (pulled low while the lights are on)
    let lid_sensor = Input::new(p.PIN_5, Pull::Up);
    let lights_sense = Input::new(p.PIN_8, Pull::Up);

    // Panel controller link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);

    let mut panel = display::UartPanel::new(uart);
    if panel.show_boot().is_err() {
        warn!("boot screen failed");
    }

    spawner
        .spawn(tasks::gauge_task(
            board_adc,
            oil_ref,
            coolant_ref,
            led,
            buzzer,
            lid_sensor,
            lights_sense,
            panel,
            units,
        ))
        .unwrap();

    info!("Gauge task spawned, firmware running");

    // Main task has nothing else to do - all work happens in the gauge task
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
