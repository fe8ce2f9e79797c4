//! Exact percentage rendering for completion ratios.

use std::fmt;

/// Completion ratio rounded half-up to hundredths of a percent.
///
/// Displays with at most two fractional digits, trailing zeros and a bare
/// decimal point trimmed, and a `%` suffix. A zero total renders as `0%`.
///
/// # Examples
/// ```
/// use exdriver_core::Percentage;
///
/// assert_eq!(Percentage::from_ratio(1, 2).to_string(), "50%");
/// assert_eq!(Percentage::from_ratio(2, 3).to_string(), "66.67%");
/// assert_eq!(Percentage::from_ratio(1, 8).to_string(), "12.5%");
/// assert_eq!(Percentage::from_ratio(7, 0).to_string(), "0%");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Percentage {
    hundredths: u128,
}

impl Percentage {
    /// Computes `succeeded / total` without floating-point arithmetic.
    #[must_use]
    pub const fn from_ratio(succeeded: u64, total: u64) -> Self {
        if total == 0 {
            return Self { hundredths: 0 };
        }
        let numerator = succeeded as u128 * 10_000;
        let denominator = total as u128;
        // floor(n / d + 1/2) == floor((2n + d) / 2d)
        let hundredths = (2 * numerator + denominator) / (2 * denominator);
        Self { hundredths }
    }

    /// Returns the value in hundredths of a percent (`33.33%` is `3333`).
    #[must_use]
    pub const fn hundredths(self) -> u128 {
        self.hundredths
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.hundredths / 100;
        let fraction = self.hundredths % 100;
        if fraction == 0 {
            write!(f, "{whole}%")
        } else if fraction % 10 == 0 {
            write!(f, "{whole}.{}%", fraction / 10)
        } else {
            write!(f, "{whole}.{fraction:02}%")
        }
    }
}
