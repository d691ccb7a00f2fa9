//! The gauge cycle task.
//!
//! One fixed-period iteration: acquire raw samples, convert, classify,
//! update the panels and the alert outputs, then sleep whatever is left of
//! the period. Everything runs in this single task; the only suspension
//! points are the sampler's settling delays and the end-of-cycle sleep.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Delay, Duration, Instant, Timer};

use argus_core::alert::AlertController;
use argus_core::channel::{ChannelId, ChannelState, ConversionResult, PanelId};
use argus_core::classify::{ChannelStatus, FaultClassifier};
use argus_core::config::{
    AlertConfig, PressureSensorModel, SamplingConfig, VoltageDivider, WarnThresholds,
    COOLANT_THERMISTOR, OIL_THERMISTOR, REFRESH_RATE_HZ,
};
use argus_core::traits::{GaugePanel, IndicatorOutput};
use argus_core::units::UnitSelection;
use argus_drivers::sampler::AnalogSampler;
use argus_drivers::sensor::{PressureChannel, SupplyMonitor, ThermistorChannel};

use crate::board::{BoardAdc, Indicator, ReferencePin};
use crate::display::UartPanel;

/// One channel's outcome for this cycle
struct HalfCycle {
    channel: ChannelId,
    result: ConversionResult,
    status: ChannelStatus,
}

/// Gauge cycle task
///
/// Samples all four channels, drives both panels and the alert outputs at
/// the fixed refresh rate.
#[embassy_executor::task]
pub async fn gauge_task(
    adc: BoardAdc<'static>,
    oil_ref: ReferencePin<'static>,
    coolant_ref: ReferencePin<'static>,
    mut led: Indicator<'static>,
    mut buzzer: Indicator<'static>,
    lid_sensor: Input<'static>,
    lights_sense: Input<'static>,
    mut panel: UartPanel,
    units: UnitSelection,
) {
    info!("Gauge task started ({} Hz refresh)", REFRESH_RATE_HZ);

    let mut sampler = AnalogSampler::new(adc, Delay, SamplingConfig::DEFAULT);

    // Both thermistor channels boot on the high reference
    let mut oil_thermistor = ThermistorChannel::new(OIL_THERMISTOR, oil_ref);
    let mut coolant_thermistor = ThermistorChannel::new(COOLANT_THERMISTOR, coolant_ref);
    let oil_pressure = PressureChannel::new(PressureSensorModel::Aem2131_100);
    let supply = SupplyMonitor::new(VoltageDivider::SUPPLY_SENSE);

    let classifier = FaultClassifier::new(WarnThresholds::DEFAULT);
    let mut alert = AlertController::new(AlertConfig::DEFAULT);

    let mut oil_states = [ChannelState::new(); 2];
    let mut coolant_states = [ChannelState::new(); 2];

    // Assume the lid is open and daylight until the first poll says otherwise
    let mut lid_closed = false;
    let mut daylight = true;

    let period = Duration::from_millis(u64::from(1000 / REFRESH_RATE_HZ));

    loop {
        let start = Instant::now();

        // Oil panel: temperature on top, pressure below
        let oil_temp = oil_thermistor.convert(sampler.sample(ChannelId::OilTemp));
        let oil_psi = oil_pressure.convert(sampler.sample(ChannelId::OilPressure));

        let oil_halves = [
            half(ChannelId::OilTemp, oil_temp, &classifier),
            half(ChannelId::OilPressure, oil_psi, &classifier),
        ];

        // Coolant panel: temperature on top, supply voltage below
        let coolant_temp = coolant_thermistor.convert(sampler.sample(ChannelId::CoolantTemp));
        let supply_volts = supply.convert(sampler.sample(ChannelId::SupplyVoltage));

        let coolant_halves = [
            half(ChannelId::CoolantTemp, coolant_temp, &classifier),
            half(ChannelId::SupplyVoltage, supply_volts, &classifier),
        ];

        // The lid gates the panels, never the classification: readings and
        // the alert outputs keep running with the lid shut
        let lid_now = lid_sensor.is_high();
        if lid_now != lid_closed {
            lid_closed = lid_now;
            info!("lid {}", if lid_closed { "closed" } else { "open" });
            if panel.set_power(!lid_closed).is_err() {
                warn!("panel power command failed");
            }
            if !lid_closed {
                for state in oil_states.iter_mut().chain(coolant_states.iter_mut()) {
                    state.invalidate();
                }
            }
        }

        if !lid_closed {
            // Headlights pull the sense line low; lights off means daylight
            let daylight_now = lights_sense.is_high();
            if daylight_now != daylight {
                daylight = daylight_now;
                debug!("daylight {}", daylight);
                if panel.set_brightness(daylight).is_err() {
                    warn!("panel brightness command failed");
                }
            }

            refresh_panel(&mut panel, PanelId::Oil, &oil_halves, &mut oil_states, units);
            refresh_panel(
                &mut panel,
                PanelId::Coolant,
                &coolant_halves,
                &mut coolant_states,
                units,
            );
        }

        let alert_now = oil_halves
            .iter()
            .chain(coolant_halves.iter())
            .any(|h| h.status.is_alerting());

        let cmd = alert.update(alert_now, Instant::now().as_millis());
        if let Some(on) = cmd.led {
            led.set_on(on);
        }
        if let Some(on) = cmd.buzzer {
            buzzer.set_on(on);
        }

        // Hold the refresh rate; a long cycle just starts the next one
        // immediately
        let elapsed = start.elapsed();
        if let Some(remaining) = period.checked_sub(elapsed) {
            Timer::after(remaining).await;
        }
    }
}

fn half(channel: ChannelId, result: ConversionResult, classifier: &FaultClassifier) -> HalfCycle {
    let status = classifier.classify(channel, result);

    match result {
        Ok(value) => trace!("{:?}: {}", channel, value),
        Err(e) => warn!("{:?} fault: {:?}", channel, e),
    }

    HalfCycle {
        channel,
        result,
        status,
    }
}

/// Redraw one panel when any of its halves changed or is faulted
fn refresh_panel(
    panel: &mut UartPanel,
    id: PanelId,
    halves: &[HalfCycle; 2],
    states: &mut [ChannelState; 2],
    units: UnitSelection,
) {
    let mut redraw = false;
    for (half, state) in halves.iter().zip(states.iter_mut()) {
        let changed = state.observe(half.result, half.status);
        redraw = redraw || changed || half.status == ChannelStatus::Fault;
    }

    if !redraw {
        return;
    }

    panel.begin(id);
    for half in halves {
        match half.result {
            Ok(value) => {
                panel.render_value(half.channel, value, units);
                if half.status == ChannelStatus::Warning {
                    panel.render_warning(half.channel);
                }
            }
            Err(_) => panel.render_fault(half.channel),
        }
    }

    if panel.commit(id).is_err() {
        warn!("{:?} panel update failed", id);
    }
}
