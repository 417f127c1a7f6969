//! Derived-column formulas over already aggregated base sums.
//!
//! Ratios are suppressed (`None`) whenever either operand is zero, so a group
//! with no labor sale reports no ELR rather than 0.

use crate::util::{is_truthy, round2};

pub fn difference(a: f64, b: f64) -> f64 {
    round2(a - b)
}

pub fn ratio(a: f64, b: f64) -> Option<f64> {
    if !(is_truthy(a) && is_truthy(b)) {
        return None;
    }
    Some(round2(a / b)).filter(|v| v.is_finite())
}

pub fn percentage_ratio(a: f64, b: f64) -> Option<f64> {
    if !(is_truthy(a) && is_truthy(b)) {
        return None;
    }
    Some(round2(a * 100.0 / b)).filter(|v| v.is_finite())
}
