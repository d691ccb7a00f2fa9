//! Alert state machine: warning LED plus a timed buzzer pulse.
//!
//! The controller is Idle or Alerting; a fresh transition into Alerting
//! switches the LED on and, when enabled, starts one fixed-length buzzer
//! pulse. The pulse runs against an absolute deadline that the scheduler
//! polls once per cycle, so pulse accuracy is bounded by the cycle period.

use crate::config::AlertConfig;

/// Buzzer sub-state, timed independently of the Idle/Alerting display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerState {
    Idle,
    /// Sounding until the monotonic clock reaches the deadline
    Playing { deadline_ms: u64 },
}

/// Output levels to apply this cycle; `None` suppresses a redundant write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertCommand {
    pub led: Option<bool>,
    pub buzzer: Option<bool>,
}

/// Aggregated alert state for the whole cluster
#[derive(Debug, Clone)]
pub struct AlertController {
    config: AlertConfig,
    in_alert: bool,
    buzzer: BuzzerState,
}

impl AlertController {
    pub const fn new(config: AlertConfig) -> Self {
        Self {
            config,
            in_alert: false,
            buzzer: BuzzerState::Idle,
        }
    }

    pub fn in_alert(&self) -> bool {
        self.in_alert
    }

    pub fn buzzer_active(&self) -> bool {
        matches!(self.buzzer, BuzzerState::Playing { .. })
    }

    /// Advance the state machine one cycle.
    ///
    /// `alert_now` is true when any channel is in warning or fault this
    /// cycle; `now_ms` comes from the monotonic clock. A pulse already in
    /// progress is never restarted or extended; only a fresh Idle to
    /// Alerting transition starts one.
    pub fn update(&mut self, alert_now: bool, now_ms: u64) -> AlertCommand {
        let mut cmd = AlertCommand::default();

        if alert_now && !self.in_alert {
            self.in_alert = true;
            cmd.led = Some(true);

            if self.config.buzzer_enabled && matches!(self.buzzer, BuzzerState::Idle) {
                self.buzzer = BuzzerState::Playing {
                    deadline_ms: now_ms + self.config.buzzer_pulse_ms,
                };
                cmd.buzzer = Some(true);
            }
        } else if !alert_now && self.in_alert {
            self.in_alert = false;
            cmd.led = Some(false);
        }

        // Deadline is polled, not awaited; expiry silences the buzzer
        // regardless of the display state
        if let BuzzerState::Playing { deadline_ms } = self.buzzer {
            if now_ms >= deadline_ms {
                self.buzzer = BuzzerState::Idle;
                cmd.buzzer = Some(false);
            }
        }

        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> AlertController {
        AlertController::new(AlertConfig {
            buzzer_enabled: true,
            buzzer_pulse_ms: 2000,
        })
    }

    #[test]
    fn test_fresh_alert_starts_pulse_and_led() {
        let mut alert = controller();
        let cmd = alert.update(true, 1000);
        assert_eq!(cmd.led, Some(true));
        assert_eq!(cmd.buzzer, Some(true));
        assert!(alert.in_alert());
        assert!(alert.buzzer_active());
    }

    #[test]
    fn test_steady_alert_emits_no_writes() {
        let mut alert = controller();
        alert.update(true, 0);
        let cmd = alert.update(true, 200);
        assert_eq!(cmd.led, None);
        assert_eq!(cmd.buzzer, None);
    }

    #[test]
    fn test_reentry_does_not_extend_pulse() {
        let mut alert = controller();
        alert.update(true, 0);

        // Alert drops, then reasserts while the pulse is still playing
        let cmd = alert.update(false, 400);
        assert_eq!(cmd.led, Some(false));
        assert_eq!(cmd.buzzer, None);

        let cmd = alert.update(true, 800);
        assert_eq!(cmd.led, Some(true));
        // No new pulse: the original one is still running
        assert_eq!(cmd.buzzer, None);

        // Original deadline still applies
        let cmd = alert.update(true, 2000);
        assert_eq!(cmd.buzzer, Some(false));
        assert!(!alert.buzzer_active());
    }

    #[test]
    fn test_deadline_polled_while_still_alerting() {
        let mut alert = controller();
        alert.update(true, 0);

        let cmd = alert.update(true, 1999);
        assert_eq!(cmd.buzzer, None);

        let cmd = alert.update(true, 2000);
        assert_eq!(cmd.buzzer, Some(false));
        // Display state unaffected by buzzer expiry
        assert!(alert.in_alert());
        assert_eq!(cmd.led, None);
    }

    #[test]
    fn test_new_pulse_after_idle_and_expiry() {
        let mut alert = controller();
        alert.update(true, 0);
        alert.update(true, 2500); // pulse expires
        alert.update(false, 2600); // back to idle

        let cmd = alert.update(true, 3000);
        assert_eq!(cmd.buzzer, Some(true));
        assert!(alert.buzzer_active());
    }

    #[test]
    fn test_buzzer_disabled_by_config() {
        let mut alert = AlertController::new(AlertConfig {
            buzzer_enabled: false,
            buzzer_pulse_ms: 2000,
        });
        let cmd = alert.update(true, 0);
        assert_eq!(cmd.led, Some(true));
        assert_eq!(cmd.buzzer, None);
        assert!(!alert.buzzer_active());
    }

    #[test]
    fn test_alert_clears_when_all_channels_recover() {
        let mut alert = controller();
        alert.update(true, 0);
        let cmd = alert.update(false, 5000);
        assert_eq!(cmd.led, Some(false));
        assert!(!alert.in_alert());
    }
}
