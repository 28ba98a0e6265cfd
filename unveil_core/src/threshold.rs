// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Threshold normalization.
//!
//! Page authors configure how much of the trigger element must be on screen
//! as a percentage. The platform observer wants a ratio in `[0, 1]`.
//! [`normalize`] bridges the two and never fails: anything it cannot make
//! sense of means "require the whole element".

/// Ratio used when no usable threshold was configured.
pub const FULL_VISIBILITY: f64 = 1.0;

/// Maps a configured percentage to an intersection ratio.
///
/// - `None`, `0` and `NaN` are treated as unset and yield [`FULL_VISIBILITY`].
/// - Values outside `[0, 100]` also yield [`FULL_VISIBILITY`].
/// - Anything else yields `percent / 100`.
#[must_use]
pub fn normalize(percent: Option<f64>) -> f64 {
    match percent {
        Some(p) if is_set(p) && (0.0..=100.0).contains(&p) => p / 100.0,
        _ => FULL_VISIBILITY,
    }
}

/// `0` and `NaN` count as "not configured".
fn is_set(p: f64) -> bool {
    p != 0.0 && !p.is_nan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_requires_full_visibility() {
        assert_eq!(normalize(None), 1.0);
    }

    #[test]
    fn zero_and_nan_count_as_absent() {
        assert_eq!(normalize(Some(0.0)), 1.0);
        assert_eq!(normalize(Some(-0.0)), 1.0);
        assert_eq!(normalize(Some(f64::NAN)), 1.0);
    }

    #[test]
    fn in_range_divides_by_hundred() {
        assert!((normalize(Some(66.0)) - 0.66).abs() < 1e-12);
        assert!((normalize(Some(0.5)) - 0.005).abs() < 1e-12);
        assert_eq!(normalize(Some(100.0)), 1.0);
        assert_eq!(normalize(Some(50.0)), 0.5);
    }

    #[test]
    fn out_of_range_falls_back() {
        assert_eq!(normalize(Some(150.0)), 1.0);
        assert_eq!(normalize(Some(-10.0)), 1.0);
        assert_eq!(normalize(Some(100.0001)), 1.0);
        assert_eq!(normalize(Some(f64::INFINITY)), 1.0);
        assert_eq!(normalize(Some(f64::NEG_INFINITY)), 1.0);
    }

    #[test]
    fn whole_percent_sweep() {
        let mut p = 1;
        while p <= 100 {
            let ratio = normalize(Some(f64::from(p)));
            assert!((ratio - f64::from(p) / 100.0).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&ratio));
            p += 1;
        }
    }
}
