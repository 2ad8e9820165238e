//! Imperative pyramid renderer
//!
//! Construct once per visualization, tweak with setters, render as often as
//! needed. Every render clears what the previous one drew (matched by class
//! name) and redraws from scratch.

use crate::{
    layout::{PyramidLayout, auto_fit_ratio},
    scene::Node,
    target::{ContainerSizeProvider, RenderTarget},
};
use pyramid_core::{
    ColorScale, Dataset, Dimensions, Margins, MarginsPatch, OrdinalScale, PyramidError,
    PyramidOptions, Size, validate_class_name, validate_ratio,
};

/// Pyramid chart bound to a container
pub struct Pyramid {
    data: Dataset,
    parent_container: String,
    class_name: String,
    auto_fit: bool,
    relative_width: f64,
    margins: Margins,
    outer: Size,
    /// Selector `outer` was measured from
    measured_for: String,
    color_scale: Box<dyn ColorScale>,
}

impl std::fmt::Debug for Pyramid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pyramid")
            .field("data", &self.data)
            .field("parent_container", &self.parent_container)
            .field("class_name", &self.class_name)
            .field("auto_fit", &self.auto_fit)
            .field("relative_width", &self.relative_width)
            .field("margins", &self.margins)
            .field("outer", &self.outer)
            .finish_non_exhaustive()
    }
}

/// Log a configuration failure where it is detected
fn reject<T>(err: PyramidError) -> Result<T, PyramidError> {
    tracing::warn!("Pyramid configuration rejected: {}", err);
    Err(err)
}

impl Pyramid {
    /// Validate inputs and measure the container once.
    pub fn new<I, S>(
        labels: I,
        parent_container: impl Into<String>,
        options: PyramidOptions,
        sizes: &impl ContainerSizeProvider,
    ) -> Result<Self, PyramidError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let data = Dataset::new(labels).or_else(reject)?;
        let parent_container = parent_container.into();
        if parent_container.trim().is_empty() {
            return reject(PyramidError::MissingContainer);
        }
        options.validate().or_else(reject)?;

        let outer = sizes.container_size(&parent_container).or_else(reject)?;
        tracing::debug!(
            container = %parent_container,
            width = outer.width,
            height = outer.height,
            "measured pyramid container"
        );

        Ok(Self {
            data,
            measured_for: parent_container.clone(),
            parent_container,
            class_name: options.class_name,
            auto_fit: options.auto_fit,
            relative_width: options.relative_width,
            margins: options.margins,
            outer,
            color_scale: Box::new(OrdinalScale::category20()),
        })
    }

    pub fn with_color_scale(mut self, scale: impl ColorScale + 'static) -> Self {
        self.set_color_scale(scale);
        self
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Replace the label → color mapping
    pub fn set_color_scale(&mut self, scale: impl ColorScale + 'static) {
        self.color_scale = Box::new(scale);
    }

    /// Point at another container; it is measured on the next render
    pub fn set_parent_container(&mut self, selector: impl Into<String>) -> Result<(), PyramidError> {
        let selector = selector.into();
        if selector.trim().is_empty() {
            return reject(PyramidError::MissingContainer);
        }
        self.parent_container = selector;
        Ok(())
    }

    pub fn set_class_name(&mut self, name: impl Into<String>) -> Result<(), PyramidError> {
        let name = name.into();
        validate_class_name(&name).or_else(reject)?;
        self.class_name = name;
        Ok(())
    }

    /// Override the base-to-height ratio. Overwritten by the next render
    /// while auto-fit is on.
    pub fn set_relative_width(&mut self, ratio: f64) -> Result<(), PyramidError> {
        validate_ratio(ratio).or_else(reject)?;
        self.relative_width = ratio;
        Ok(())
    }

    /// Merge the given sides into the current margins
    pub fn set_margins(&mut self, patch: MarginsPatch) -> Result<(), PyramidError> {
        self.margins.merge(&patch).or_else(reject)
    }

    pub fn set_auto_fit(&mut self, auto_fit: bool) {
        self.auto_fit = auto_fit;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn data(&self) -> &Dataset {
        &self.data
    }

    pub fn parent_container(&self) -> &str {
        &self.parent_container
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn auto_fit(&self) -> bool {
        self.auto_fit
    }

    pub fn relative_width(&self) -> f64 {
        self.relative_width
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Dimensions from the last measured size and current margins
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.outer, self.margins)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Clear this instance's previous drawing and redraw into `target`.
    pub fn render(&mut self, target: &mut impl RenderTarget) -> Result<PyramidLayout, PyramidError> {
        if self.measured_for != self.parent_container {
            self.outer = target.container_size(&self.parent_container).or_else(reject)?;
            self.measured_for = self.parent_container.clone();
        }

        let dims = self.dimensions();
        if let Err(err) = dims.ensure_drawable() {
            tracing::warn!("Pyramid not rendered: {}", err);
            return Err(err);
        }

        if self.auto_fit {
            self.relative_width = auto_fit_ratio(dims.chart_width(), dims.chart_height());
        }

        let layout = PyramidLayout::compute(
            &self.data,
            dims.chart_width(),
            dims.chart_height(),
            self.relative_width,
        );

        // Nothing is removed until the new drawing is built for its container
        let scene = self.draw(&dims, &layout);
        let staged = target.stage(&self.parent_container, scene).or_else(reject)?;
        let removed = target.remove_class(&self.class_name);
        target.attach(staged)?;

        tracing::debug!(
            class = %self.class_name,
            slices = layout.len(),
            removed,
            chart_width = dims.chart_width(),
            chart_height = dims.chart_height(),
            slice_height = layout.slice_height,
            ratio = layout.ratio,
            "rendered pyramid"
        );

        Ok(layout)
    }

    /// Scene for `layout`: surface → translated group → polygon + label per slice
    fn draw(&mut self, dims: &Dimensions, layout: &PyramidLayout) -> Node {
        let mut group = Node::translated_group(dims.margins.left, dims.margins.top);
        for slice in &layout.slices {
            let fill = self.color_scale.color(&slice.label);
            group.push(Node::polygon(&slice.points, fill));
            group.push(Node::label(slice.label_at, slice.label.clone()));
        }
        Node::surface(self.class_name.clone(), dims.outer).with_child(group)
    }
}

// ============================================================================
// TESTS
// ============================================================================
