//! Precision policies.
//!
//! Coordinates leave the resolver canonicalized so that equal geography
//! compares and prints identically (no `-0.0`, one NaN).

/// Canonicalize a floating-point value.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        // Handles +0.0 and -0.0.
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}
