//! Shared constants for value extraction and presentation

/// Keys tried, in order, when no field path is configured.
/// Common sensor and robotics field names.
pub const PRIORITY_FIELDS: [&str; 9] = [
    "value",
    "data",
    "x",
    "y",
    "z",
    "position",
    "velocity",
    "temperature",
    "pressure",
];

/// Field names offered as `channel.field` completions in the settings UI
pub const SUGGESTED_FIELDS: [&str; 9] = [
    "data",
    "value",
    "x",
    "y",
    "z",
    "position",
    "velocity",
    "temperature",
    "pressure",
];

/// Lower bound of the display percentage
pub const PERCENT_MIN: f64 = 0.0;

/// Upper bound of the display percentage
pub const PERCENT_MAX: f64 = 100.0;
