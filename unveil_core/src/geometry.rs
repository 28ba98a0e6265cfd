// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference intersection geometry.
//!
//! Browsers compute intersections themselves; these helpers exist so that
//! hosts without a native observer, and test simulators, can derive the same
//! [`IntersectionRecord`]s from plain rectangles.

use kurbo::Rect;

use crate::backend::IntersectionRecord;
use crate::margin::RootMargin;

/// Returns `true` if `target` overlaps or touches `root`.
///
/// Edge-adjacent rectangles count as intersecting, and so does a
/// zero-area target lying on the root's boundary.
#[must_use]
pub fn touches(target: Rect, root: Rect) -> bool {
    let (t, r) = (target.abs(), root.abs());
    t.x0 <= r.x1 && r.x0 <= t.x1 && t.y0 <= r.y1 && r.y0 <= t.y1
}

/// Fraction of `target`'s area that lies inside `root`, in `[0, 1]`.
///
/// A zero-area target reports `1` while it touches the root and `0`
/// otherwise.
#[must_use]
pub fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    if !touches(target, root) {
        return 0.0;
    }
    let t = target.abs();
    let area = t.area();
    if area == 0.0 {
        return 1.0;
    }
    let r = root.abs();
    let w = t.x1.min(r.x1) - t.x0.max(r.x0);
    let h = t.y1.min(r.y1) - t.y0.max(r.y0);
    ((w.max(0.0) * h.max(0.0)) / area).clamp(0.0, 1.0)
}

/// Whether `ratio` satisfies a normalized threshold.
#[must_use]
pub fn meets_threshold(ratio: f64, threshold: f64) -> bool {
    ratio >= threshold
}

/// Computes the record a platform observer would report for `target`
/// against `viewport` grown by `margin`.
///
/// `is_intersecting` follows the threshold: it is `true` only when the
/// visible fraction reaches `threshold`, and for a zero threshold whenever
/// the target touches the effective root at all.
#[must_use]
pub fn observe_rect(
    target: Rect,
    viewport: Rect,
    margin: &RootMargin,
    threshold: f64,
) -> IntersectionRecord {
    let root = margin.apply(viewport);
    let ratio = intersection_ratio(target, root);
    let is_intersecting = touches(target, root) && meets_threshold(ratio, threshold);
    IntersectionRecord {
        is_intersecting,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);

    #[test]
    fn fully_inside_is_one() {
        let t = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(intersection_ratio(t, VIEWPORT), 1.0);
    }

    #[test]
    fn half_overlap() {
        let t = Rect::new(0.0, 90.0, 10.0, 110.0);
        assert!((intersection_ratio(t, VIEWPORT) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn disjoint_is_zero() {
        let t = Rect::new(0.0, 200.0, 10.0, 210.0);
        assert!(!touches(t, VIEWPORT));
        assert_eq!(intersection_ratio(t, VIEWPORT), 0.0);
    }

    #[test]
    fn edge_adjacent_touches_with_zero_ratio() {
        let t = Rect::new(0.0, 100.0, 10.0, 120.0);
        assert!(touches(t, VIEWPORT));
        assert_eq!(intersection_ratio(t, VIEWPORT), 0.0);
    }

    #[test]
    fn zero_area_target_on_screen() {
        let t = Rect::new(50.0, 50.0, 50.0, 50.0);
        assert_eq!(intersection_ratio(t, VIEWPORT), 1.0);
    }

    #[test]
    fn margin_brings_target_into_range() {
        let t = Rect::new(0.0, 110.0, 10.0, 120.0);
        let none = observe_rect(t, VIEWPORT, &RootMargin::ZERO, 1.0);
        assert!(!none.is_intersecting);

        let margin = RootMargin::parse("25px").unwrap();
        let seen = observe_rect(t, VIEWPORT, &margin, 1.0);
        assert!(seen.is_intersecting);
        assert_eq!(seen.ratio, 1.0);
    }

    #[test]
    fn threshold_gates_intersecting_flag() {
        let t = Rect::new(0.0, 80.0, 10.0, 120.0);
        let r = observe_rect(t, VIEWPORT, &RootMargin::ZERO, 0.66);
        assert!((r.ratio - 0.5).abs() < 1e-12);
        assert!(!r.is_intersecting);

        let r = observe_rect(t, VIEWPORT, &RootMargin::ZERO, 0.5);
        assert!(r.is_intersecting);
    }
}
