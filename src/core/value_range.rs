use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Shared numeric window every column value is clamped into and normalized against.
///
/// Changing the range never rewrites stored column values; they are only
/// clamped again when next written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct ValueRange {
    min: i32,
    max: i32,
}

impl ValueRange {
    pub fn new(min: i32, max: i32) -> ChartResult<Self> {
        if min >= max {
            return Err(ChartError::InvalidParam(format!(
                "value range min must be < max (got {min}..{max})"
            )));
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(self) -> i32 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> i32 {
        self.max
    }

    /// Range width, never below `f64::EPSILON`.
    #[must_use]
    pub fn span(self) -> f64 {
        (f64::from(self.max) - f64::from(self.min)).max(f64::EPSILON)
    }

    /// Clamps both values into the range, then pulls `value1` down to `value2`
    /// when it would exceed it. `value2` is authoritative on conflict.
    #[must_use]
    pub fn clamp_and_order(self, value1: f64, value2: f64) -> (f64, f64) {
        let lo = f64::from(self.min);
        let hi = f64::from(self.max);
        let v1 = value1.clamp(lo, hi);
        let v2 = value2.clamp(lo, hi);
        if v1 > v2 { (v2, v2) } else { (v1, v2) }
    }

    /// Maps `value` to a fraction in `[0, 1]`.
    ///
    /// Values written under an earlier, wider range may lie outside the
    /// current one; the fraction is clamped so geometry stays inside the bar slot.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        ((value - f64::from(self.min)) / self.span()).clamp(0.0, 1.0)
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 0, max: 100 }
    }
}

impl TryFrom<(i32, i32)> for ValueRange {
    type Error = ChartError;

    fn try_from((min, max): (i32, i32)) -> ChartResult<Self> {
        Self::new(min, max)
    }
}

impl From<ValueRange> for (i32, i32) {
    fn from(range: ValueRange) -> Self {
        (range.min, range.max)
    }
}

/// Text used for the y-axis min/max labels.
#[must_use]
pub fn format_axis_value(value: i32) -> String {
    value.to_string()
}
