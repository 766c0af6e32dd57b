//! Range normalization

use topic_bar_types::ValueRange;

use crate::constants::{PERCENT_MAX, PERCENT_MIN};

/// Map a scalar into a display percentage in `[0, 100]`.
///
/// No value, or a zero-width range, gives 0. Values outside the range
/// saturate at the ends. An inverted range (`min > max`) fills the bar as the
/// value decreases.
pub fn normalize(scalar: Option<f64>, range: ValueRange) -> f64 {
    let Some(value) = scalar else {
        return PERCENT_MIN;
    };

    let span = range.span();
    if span == 0.0 {
        return PERCENT_MIN;
    }

    let percentage = (value - range.min) / span * PERCENT_MAX;
    if percentage.is_nan() {
        return PERCENT_MIN;
    }
    percentage.clamp(PERCENT_MIN, PERCENT_MAX)
}
