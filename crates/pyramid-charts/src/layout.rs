//! # layout
//!
//! Pyramid geometry: slice heights, triangle vertices, auto-fit ratio.
//!
//! Coordinates are relative to the chart group (already translated by the
//! margins); y grows downward and every triangle shares the apex at
//! `(center_x, 0)`.

use pyramid_core::{Dataset, Point};

/// Label baseline sits this fraction of a slice above the slice bottom
pub const LABEL_OFFSET_DIVISOR: f64 = 2.5;

// ============================================================================
// GEOMETRY PRIMITIVES
// ============================================================================

/// Height of one slice when `item_count` slices share `chart_height` evenly.
///
/// An `item_count` of zero yields a non-finite value.
pub fn slice_height(chart_height: f64, item_count: usize) -> f64 {
    chart_height / item_count as f64
}

/// Vertices `[apex, bottom_left, bottom_right]` of the slice at `stack_index`
/// (0 = narrowest, topmost slice).
pub fn slice_points(stack_index: usize, center_x: f64, slice_height: f64, ratio: f64) -> [Point; 3] {
    let depth = (stack_index + 1) as f64;
    let bottom = depth * slice_height;
    let half_width = depth * ratio * slice_height;

    [
        Point::new(center_x, 0.0),
        Point::new(center_x - half_width, bottom),
        Point::new(center_x + half_width, bottom),
    ]
}

/// Base-to-height ratio that makes the widest slice span the chart width
pub fn auto_fit_ratio(chart_width: f64, chart_height: f64) -> f64 {
    (chart_width / 2.0) / chart_height
}

/// Text position for the slice at `stack_index`
pub fn label_anchor(stack_index: usize, center_x: f64, slice_height: f64) -> Point {
    let bottom = (stack_index + 1) as f64 * slice_height;
    Point::new(center_x, bottom - slice_height / LABEL_OFFSET_DIVISOR)
}

// ============================================================================
// LAYOUT PASS
// ============================================================================

/// One triangular slice, derived from its label's position
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    /// Distance from the apex (0 = topmost)
    pub stack_index: usize,
    pub label: String,
    /// `[apex, bottom_left, bottom_right]`
    pub points: [Point; 3],
    pub label_at: Point,
}

impl Slice {
    pub fn apex(&self) -> Point {
        self.points[0]
    }

    pub fn bottom_left(&self) -> Point {
        self.points[1]
    }

    pub fn bottom_right(&self) -> Point {
        self.points[2]
    }

    /// Width of the triangle's base
    pub fn base_width(&self) -> f64 {
        self.bottom_right().x - self.bottom_left().x
    }
}

/// Computed pyramid layout, slices in paint order (base first)
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidLayout {
    pub slice_height: f64,
    pub ratio: f64,
    pub center_x: f64,
    pub slices: Vec<Slice>,
}

impl PyramidLayout {
    /// Lay out `data` inside a `chart_width` × `chart_height` area.
    ///
    /// The dataset is walked in reverse on a copy so the widest triangle is
    /// painted first; reversed position `r` maps to stack index `len - r - 1`.
    pub fn compute(data: &Dataset, chart_width: f64, chart_height: f64, ratio: f64) -> Self {
        let len = data.len();
        let h = slice_height(chart_height, len);
        let center_x = chart_width / 2.0;

        let slices = data
            .paint_order()
            .into_iter()
            .enumerate()
            .map(|(r, label)| {
                let stack_index = len - r - 1;
                Slice {
                    stack_index,
                    label: label.to_string(),
                    points: slice_points(stack_index, center_x, h, ratio),
                    label_at: label_anchor(stack_index, center_x, h),
                }
            })
            .collect();

        Self {
            slice_height: h,
            ratio,
            center_x,
            slices,
        }
    }

    /// Slice by stack index (0 = apex)
    pub fn slice(&self, stack_index: usize) -> Option<&Slice> {
        self.slices.iter().find(|s| s.stack_index == stack_index)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn abc() -> Dataset {
        Dataset::new(["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_slice_points() {
        let [apex, left, right] = slice_points(1, 100.0, 10.0, 0.5);

        assert_eq!(apex, Point::new(100.0, 0.0));
        assert_eq!(left, Point::new(90.0, 20.0));
        assert_eq!(right, Point::new(110.0, 20.0));
    }

    #[test]
    fn test_empty_count_is_non_finite() {
        assert!(!slice_height(100.0, 0).is_finite());
    }

    #[test]
    fn test_fixed_ratio_scenario() {
        // 300x400 container, 25px margins → 250x350 chart
        let layout = PyramidLayout::compute(&abc(), 250.0, 350.0, 0.75);
        let h = 350.0 / 3.0;

        assert!((layout.slice_height - 116.666_666_666).abs() < 1e-6);
        assert_eq!(layout.center_x, 125.0);

        let apex = layout.slice(0).unwrap();
        assert_eq!(apex.label, "A");
        assert!((apex.bottom_left().x - (125.0 - 0.75 * h)).abs() < EPS);
        assert!((apex.bottom_right().x - (125.0 + 0.75 * h)).abs() < EPS);

        let base = layout.slice(2).unwrap();
        assert_eq!(base.label, "C");
        assert!((base.base_width() - 3.0 * apex.base_width()).abs() < EPS);
        assert!((base.bottom_left().y - 350.0).abs() < EPS);
    }

    #[test]
    fn test_paint_order_base_first() {
        let layout = PyramidLayout::compute(&abc(), 250.0, 350.0, 0.75);
        let order: Vec<_> = layout.slices.iter().map(|s| s.label.as_str()).collect();
        let stacks: Vec<_> = layout.slices.iter().map(|s| s.stack_index).collect();

        assert_eq!(order, vec!["C", "B", "A"]);
        assert_eq!(stacks, vec![2, 1, 0]);
    }

    #[test]
    fn test_label_positions() {
        let layout = PyramidLayout::compute(&abc(), 250.0, 300.0, 0.75);

        // reversed position r=0 (base): y = 3*100 - 100/2.5
        assert_eq!(layout.slices[0].label_at, Point::new(125.0, 260.0));
        assert_eq!(layout.slices[2].label_at, Point::new(125.0, 60.0));
    }

    #[test]
    fn test_auto_fit_scenario() {
        let ratio = auto_fit_ratio(250.0, 350.0);
        assert!((ratio - 0.357_142_857).abs() < 1e-6);

        let layout = PyramidLayout::compute(&abc(), 250.0, 350.0, ratio);
        let base = layout.slice(2).unwrap();
        assert!((base.bottom_left().x - 0.0).abs() < EPS);
        assert!((base.bottom_right().x - 250.0).abs() < EPS);
    }

    proptest! {
        #[test]
        fn prop_slices_partition_height(h in 1.0f64..5000.0, n in 1usize..200) {
            let sh = slice_height(h, n);
            prop_assert!((sh - h / n as f64).abs() < 1e-12);
            let total: f64 = (0..n).map(|_| sh).sum();
            prop_assert!((total - h).abs() < 1e-6 * h);
        }

        #[test]
        fn prop_points_symmetric(i in 0usize..100, cx in -1000.0f64..1000.0, sh in 0.1f64..500.0, r in 0.01f64..10.0) {
            let [apex, left, right] = slice_points(i, cx, sh, r);
            prop_assert_eq!(apex.y, 0.0);
            prop_assert_eq!(apex.x, cx);
            prop_assert!((left.x + right.x - 2.0 * cx).abs() < 1e-6 * (1.0 + cx.abs() + right.x.abs()));
            prop_assert_eq!(left.y, right.y);
        }

        #[test]
        fn prop_auto_fit_spans_width(w in 1.0f64..5000.0, h in 1.0f64..5000.0, n in 1usize..50) {
            let ratio = auto_fit_ratio(w, h);
            let [_, left, right] = slice_points(n - 1, w / 2.0, slice_height(h, n), ratio);
            prop_assert!((right.x - left.x - w).abs() < 1e-6 * w);
        }
    }
}
