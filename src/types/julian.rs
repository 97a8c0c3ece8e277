//! Day / millisecond pairs used for drawing timestamps and edit durations.

use std::fmt;

/// A Julian day number plus milliseconds into that day.
///
/// The same shape stores elapsed time (TDINDWG, TDUSRTIMER), in which case
/// `day` counts whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JulianDate {
    pub day: i32,
    pub milliseconds: i32,
}

impl JulianDate {
    /// Julian day of 1970-01-01T00:00:00Z.
    const UNIX_EPOCH_DAY: f64 = 2_440_587.5;

    pub const fn new(day: i32, milliseconds: i32) -> Self {
        Self { day, milliseconds }
    }

    /// Fractional day value as AutoCAD displays it.
    pub fn as_days(&self) -> f64 {
        self.day as f64 + self.milliseconds as f64 / 86_400_000.0
    }

    /// Seconds since the Unix epoch.
    pub fn to_unix_seconds(&self) -> f64 {
        (self.as_days() - Self::UNIX_EPOCH_DAY) * 86_400.0
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}ms", self.day, self.milliseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_days() {
        let d = JulianDate::new(2_451_545, 43_200_000);
        assert_eq!(d.as_days(), 2_451_545.5);
    }

    #[test]
    fn test_unix_epoch() {
        let d = JulianDate::new(2_440_587, 43_200_000);
        assert_eq!(d.to_unix_seconds(), 0.0);
    }
}
