//! Month length lookup table
//!
//! The table is a plain owned value handed to whoever enumerates dates.
//! Leap years are not special-cased: February always has 28 days.

/// Month (1-12) to day-count mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaysInMonth([u32; 12]);

impl DaysInMonth {
    /// Non-leap-year table
    pub const STANDARD: DaysInMonth =
        DaysInMonth([31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);

    pub const fn new(days: [u32; 12]) -> Self {
        Self(days)
    }

    /// Number of days in `month` (1-based). Out-of-range months have no days.
    pub fn days(&self, month: u32) -> u32 {
        match month {
            1..=12 => self.0[(month - 1) as usize],
            _ => 0,
        }
    }
}

impl Default for DaysInMonth {
    fn default() -> Self {
        Self::STANDARD
    }
}
