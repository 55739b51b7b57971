//! Display rounding for dose figures.
//!
//! `f64::round` rounds half away from zero; rounding is applied before
//! formatting so the printed digit never depends on the formatter's own
//! tie-breaking. Serialized outputs go through the same rounding.

use serde::Serializer;

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Volumes are shown with one decimal (e.g. `5.9`).
pub fn format_volume(ml: f64) -> String {
    format!("{:.1}", round_to(ml, 1))
}

/// Masses are shown as whole milligrams (e.g. `188`).
pub fn format_mass(mg: f64) -> String {
    format!("{:.0}", round_to(mg, 0))
}

/// Weights are shown with one decimal, like volumes.
pub fn format_weight(value: f64) -> String {
    format!("{:.1}", round_to(value, 1))
}

/// Serializes a volume (or weight) rounded to one decimal.
pub fn serialize_volume<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 1))
}

/// Serializes a mass rounded to whole milligrams.
pub fn serialize_mass<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 0))
}
