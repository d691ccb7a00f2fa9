//! Discrete indicator outputs.

/// A single on/off indicator (warning LED, alert buzzer driver).
///
/// Implementations drive the output via GPIO; any inversion required by
/// the board's driver transistors stays in the implementation.
pub trait IndicatorOutput {
    /// Turn the indicator on or off
    fn set_on(&mut self, on: bool);

    /// Check if the indicator is currently on
    fn is_on(&self) -> bool;
}
