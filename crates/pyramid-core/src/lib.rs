//! # pyramid-core
//!
//! Core domain types for the pyramid chart.
//! Uses Strategy pattern for label coloring (see [`ColorScale`]).

pub mod dataset;
pub mod error;
pub mod options;
pub mod scale;

pub use dataset::*;
pub use error::*;
pub use options::*;
pub use scale::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// 2D point in chart coordinates (y grows downward, SVG-style)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Width/height pair in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ============================================================================
// MARGINS
// ============================================================================

/// Default margin on every side, in pixels
pub const DEFAULT_MARGIN: f64 = 25.0;

/// Side of the chart a margin applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarginSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl MarginSide {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl std::fmt::Display for MarginSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Merge the sides set in `patch`; unset sides keep their current value.
    ///
    /// Fails without touching `self` if the patch is empty or carries a
    /// negative or non-finite side.
    pub fn merge(&mut self, patch: &MarginsPatch) -> Result<(), PyramidError> {
        if patch.is_empty() {
            return Err(PyramidError::MissingMargins);
        }
        patch.validate()?;

        if let Some(top) = patch.top {
            self.top = top;
        }
        if let Some(right) = patch.right {
            self.right = right;
        }
        if let Some(bottom) = patch.bottom {
            self.bottom = bottom;
        }
        if let Some(left) = patch.left {
            self.left = left;
        }
        Ok(())
    }

    /// Horizontal margin total
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Vertical margin total
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(DEFAULT_MARGIN)
    }
}

/// Partial margin update: only the sides that are `Some` get applied
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginsPatch {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl MarginsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(mut self, value: f64) -> Self {
        self.top = Some(value);
        self
    }

    pub fn right(mut self, value: f64) -> Self {
        self.right = Some(value);
        self
    }

    pub fn bottom(mut self, value: f64) -> Self {
        self.bottom = Some(value);
        self
    }

    pub fn left(mut self, value: f64) -> Self {
        self.left = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    fn sides(&self) -> [(MarginSide, Option<f64>); 4] {
        [
            (MarginSide::Top, self.top),
            (MarginSide::Right, self.right),
            (MarginSide::Bottom, self.bottom),
            (MarginSide::Left, self.left),
        ]
    }

    /// Reject negative or non-finite sides
    pub fn validate(&self) -> Result<(), PyramidError> {
        for (side, value) in self.sides() {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(PyramidError::InvalidMargin { side, value });
                }
            }
        }
        Ok(())
    }
}

impl From<Margins> for MarginsPatch {
    fn from(m: Margins) -> Self {
        Self {
            top: Some(m.top),
            right: Some(m.right),
            bottom: Some(m.bottom),
            left: Some(m.left),
        }
    }
}

// ============================================================================
// DIMENSIONS
// ============================================================================

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Measured container size
    pub outer: Size,
    pub margins: Margins,
}

impl Dimensions {
    pub fn new(outer: Size, margins: Margins) -> Self {
        Self { outer, margins }
    }

    /// Drawing area before margins (same as the container)
    pub fn inner_width(&self) -> f64 {
        self.outer.width
    }

    pub fn inner_height(&self) -> f64 {
        self.outer.height
    }

    /// Width left for slices once margins are removed. May be non-positive.
    pub fn chart_width(&self) -> f64 {
        self.inner_width() - self.margins.horizontal()
    }

    /// Height left for slices once margins are removed. May be non-positive.
    pub fn chart_height(&self) -> f64 {
        self.inner_height() - self.margins.vertical()
    }

    /// Horizontal center of the chart area, in group coordinates
    pub fn center_x(&self) -> f64 {
        self.chart_width() / 2.0
    }

    /// Fails when either chart extent is not a positive finite number
    pub fn ensure_drawable(&self) -> Result<(), PyramidError> {
        let (width, height) = (self.chart_width(), self.chart_height());
        let drawable = |v: f64| v.is_finite() && v > 0.0;
        if drawable(width) && drawable(height) {
            Ok(())
        } else {
            Err(PyramidError::DegenerateLayout { width, height })
        }
    }

    /// SVG transform for the chart group
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margins.left, self.margins.top)
    }

    /// ViewBox string for the drawing surface
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.outer.width, self.outer.height)
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    /// d3 `schemeCategory20`
    pub const CATEGORY20: [&str; 20] = [
        "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
        "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
        "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
    ];

    /// d3 `schemeCategory10`
    pub const CATEGORY10: [&str; 10] = [
        "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
        "#bcbd22", "#17becf",
    ];

    pub const LABEL: &str = "#fafafa";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_margins() {
        let m = Margins::default();
        assert_eq!(m, Margins::uniform(25.0));
    }

    #[test]
    fn test_merge_single_side() {
        let mut m = Margins::default();
        m.merge(&MarginsPatch::new().left(40.0)).unwrap();

        assert_eq!(m.left, 40.0);
        assert_eq!(m.top, 25.0);
        assert_eq!(m.right, 25.0);
        assert_eq!(m.bottom, 25.0);
    }

    #[test]
    fn test_merge_keeps_previous_values() {
        let mut m = Margins::default();
        m.merge(&MarginsPatch::new().top(10.0)).unwrap();
        m.merge(&MarginsPatch::new().bottom(5.0)).unwrap();

        assert_eq!(m, Margins::new(10.0, 25.0, 5.0, 25.0));
    }

    #[test]
    fn test_merge_rejects_empty_patch() {
        let mut m = Margins::default();
        let err = m.merge(&MarginsPatch::new()).unwrap_err();
        assert!(matches!(err, PyramidError::MissingMargins));
        assert_eq!(m, Margins::default());
    }

    #[test]
    fn test_merge_rejects_negative_side_atomically() {
        let mut m = Margins::default();
        let err = m
            .merge(&MarginsPatch::new().top(5.0).right(-1.0))
            .unwrap_err();

        assert!(matches!(
            err,
            PyramidError::InvalidMargin { side: MarginSide::Right, .. }
        ));
        assert_eq!(m, Margins::default());
    }

    #[test]
    fn test_patch_from_json() {
        let patch: MarginsPatch = serde_json::from_str(r#"{"left": 40}"#).unwrap();
        assert_eq!(patch, MarginsPatch::new().left(40.0));
    }

    #[test]
    fn test_dimensions_chart_area() {
        let dims = Dimensions::new(Size::new(300.0, 400.0), Margins::default());

        assert_eq!(dims.chart_width(), 250.0);
        assert_eq!(dims.chart_height(), 350.0);
        assert_eq!(dims.center_x(), 125.0);
        assert_eq!(dims.inner_transform(), "translate(25, 25)");
        assert!(dims.ensure_drawable().is_ok());
    }

    #[test]
    fn test_dimensions_degenerate() {
        let dims = Dimensions::new(Size::new(40.0, 400.0), Margins::default());
        let err = dims.ensure_drawable().unwrap_err();
        assert!(matches!(err, PyramidError::DegenerateLayout { width, .. } if width == -10.0));
    }

    mod property_tests {
        use crate::{DEFAULT_MARGIN, Margins, MarginsPatch};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_merge_touches_only_given_side(value in 0.0f64..500.0, side in 0usize..4) {
                let mut m = Margins::default();
                let patch = match side {
                    0 => MarginsPatch::new().top(value),
                    1 => MarginsPatch::new().right(value),
                    2 => MarginsPatch::new().bottom(value),
                    _ => MarginsPatch::new().left(value),
                };
                m.merge(&patch).unwrap();

                let sides = [m.top, m.right, m.bottom, m.left];
                for (i, v) in sides.iter().enumerate() {
                    if i == side {
                        prop_assert_eq!(*v, value);
                    } else {
                        prop_assert_eq!(*v, DEFAULT_MARGIN);
                    }
                }
            }
        }
    }
}
