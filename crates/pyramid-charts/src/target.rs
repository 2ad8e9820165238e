//! Render targets: where a pyramid measures its container and draws into it.
//!
//! - [`FixedSize`] - constant size, for headless layout
//! - [`HeadlessDocument`] - in-memory containers holding scene nodes
//! - [`DomDocument`] - the browser document, through `web-sys`

use crate::scene::{Node, remove_class_from};
use pyramid_core::{PyramidError, Size};
use std::collections::HashMap;
use wasm_bindgen::JsValue;

// ============================================================================
// STRATEGY PATTERN: Container Capabilities
// ============================================================================

/// Reports the pixel size of a container
pub trait ContainerSizeProvider {
    fn container_size(&self, selector: &str) -> Result<Size, PyramidError>;
}

/// A document the renderer can clear and draw into.
///
/// Drawing is split in two: [`stage`](Self::stage) does every fallible lookup
/// and build step without touching the document, [`attach`](Self::attach)
/// only inserts what was staged.
pub trait RenderTarget: ContainerSizeProvider {
    /// A drawing bound to its container, not yet in the document
    type Staged;

    /// Remove every element carrying `class`, anywhere in the document.
    /// Returns the number of elements removed.
    fn remove_class(&mut self, class: &str) -> usize;

    /// Resolve the container and build `node` for it
    fn stage(&self, selector: &str, node: Node) -> Result<Self::Staged, PyramidError>;

    /// Insert a staged drawing as the last child of its container
    fn attach(&mut self, staged: Self::Staged) -> Result<(), PyramidError>;

    /// Append `node` as the last child of the container
    fn append(&mut self, selector: &str, node: Node) -> Result<(), PyramidError> {
        let staged = self.stage(selector, node)?;
        self.attach(staged)
    }
}

/// Same size for every selector
#[derive(Debug, Clone, Copy)]
pub struct FixedSize(pub Size);

impl ContainerSizeProvider for FixedSize {
    fn container_size(&self, _selector: &str) -> Result<Size, PyramidError> {
        Ok(self.0)
    }
}

// ============================================================================
// HEADLESS DOCUMENT
// ============================================================================

/// In-memory container
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub size: Size,
    pub children: Vec<Node>,
}

/// Selector-addressed containers kept in memory
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    containers: HashMap<String, Container>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, selector: impl Into<String>, size: Size) -> Self {
        self.insert_container(selector, size);
        self
    }

    /// Add or resize a container, keeping its children
    pub fn insert_container(&mut self, selector: impl Into<String>, size: Size) {
        self.containers.entry(selector.into()).or_default().size = size;
    }

    pub fn container(&self, selector: &str) -> Option<&Container> {
        self.containers.get(selector)
    }

    /// Drain a container's children
    pub fn take_children(&mut self, selector: &str) -> Vec<Node> {
        self.containers
            .get_mut(selector)
            .map(|c| std::mem::take(&mut c.children))
            .unwrap_or_default()
    }

    /// Concatenated SVG markup of a container's children
    pub fn to_svg(&self, selector: &str) -> Option<String> {
        self.container(selector)
            .map(|c| c.children.iter().map(Node::to_svg).collect())
    }
}

impl ContainerSizeProvider for HeadlessDocument {
    fn container_size(&self, selector: &str) -> Result<Size, PyramidError> {
        let size = self
            .container(selector)
            .ok_or_else(|| PyramidError::ContainerNotFound(selector.to_string()))?
            .size;

        for value in [size.width, size.height] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PyramidError::InvalidDimension {
                    selector: selector.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(size)
    }
}

/// Node waiting for a headless container
#[derive(Debug, Clone)]
pub struct StagedNode {
    selector: String,
    node: Node,
}

impl RenderTarget for HeadlessDocument {
    type Staged = StagedNode;

    fn remove_class(&mut self, class: &str) -> usize {
        self.containers
            .values_mut()
            .map(|c| remove_class_from(&mut c.children, class))
            .sum()
    }

    fn stage(&self, selector: &str, node: Node) -> Result<StagedNode, PyramidError> {
        if !self.containers.contains_key(selector) {
            return Err(PyramidError::ContainerNotFound(selector.to_string()));
        }
        Ok(StagedNode {
            selector: selector.to_string(),
            node,
        })
    }

    fn attach(&mut self, staged: StagedNode) -> Result<(), PyramidError> {
        self.containers
            .get_mut(&staged.selector)
            .ok_or(PyramidError::ContainerNotFound(staged.selector))?
            .children
            .push(staged.node);
        Ok(())
    }
}

// ============================================================================
// BROWSER DOCUMENT
// ============================================================================

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Live browser document
#[derive(Debug, Clone)]
pub struct DomDocument {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl DomDocument {
    /// Grab the current window's document
    pub fn new() -> Result<Self, PyramidError> {
        let window = web_sys::window().ok_or_else(|| PyramidError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| PyramidError::Dom("no document".into()))?;
        Ok(Self { window, document })
    }

    fn query(&self, selector: &str) -> Result<web_sys::Element, PyramidError> {
        self.document
            .query_selector(selector)
            .map_err(js_err)?
            .ok_or_else(|| PyramidError::ContainerNotFound(selector.to_string()))
    }

    /// Build the element tree for `node`
    fn build(&self, node: &Node) -> Result<web_sys::Element, PyramidError> {
        let el = match node {
            Node::Surface { class, size, .. } => {
                let el = self.create("svg")?;
                set(&el, "class", class)?;
                set(&el, "width", &size.width.to_string())?;
                set(&el, "height", &size.height.to_string())?;
                set(&el, "viewBox", &format!("0 0 {} {}", size.width, size.height))?;
                el
            }
            Node::Group { class, transform, .. } => {
                let el = self.create("g")?;
                if let Some(class) = class {
                    set(&el, "class", class)?;
                }
                if let Some(transform) = transform {
                    set(&el, "transform", transform)?;
                }
                el
            }
            Node::Polygon { class, points, fill } => {
                let el = self.create("polygon")?;
                set(&el, "class", class)?;
                set(&el, "points", &crate::scene::points_attr(points))?;
                set(&el, "fill", fill)?;
                el
            }
            Node::Text { class, at, content } => {
                let el = self.create("text")?;
                set(&el, "class", class)?;
                set(&el, "x", &at.x.to_string())?;
                set(&el, "y", &at.y.to_string())?;
                el.set_text_content(Some(content.as_str()));
                el
            }
        };

        for child in node.children() {
            let child_el = self.build(child)?;
            el.append_child(&child_el).map_err(js_err)?;
        }
        Ok(el)
    }

    fn create(&self, tag: &str) -> Result<web_sys::Element, PyramidError> {
        self.document
            .create_element_ns(Some(SVG_NS), tag)
            .map_err(js_err)
    }
}

impl ContainerSizeProvider for DomDocument {
    fn container_size(&self, selector: &str) -> Result<Size, PyramidError> {
        let el = self.query(selector)?;
        let style = self
            .window
            .get_computed_style(&el)
            .map_err(js_err)?
            .ok_or_else(|| PyramidError::Dom(format!("no computed style for {}", selector)))?;

        let width = style.get_property_value("width").map_err(js_err)?;
        let height = style.get_property_value("height").map_err(js_err)?;
        Ok(Size::new(
            parse_px(selector, &width)?,
            parse_px(selector, &height)?,
        ))
    }
}

/// Built SVG element and the container it goes into
#[derive(Debug, Clone)]
pub struct StagedElement {
    parent: web_sys::Element,
    element: web_sys::Element,
}

impl RenderTarget for DomDocument {
    type Staged = StagedElement;

    fn remove_class(&mut self, class: &str) -> usize {
        let nodes = match self.document.query_selector_all(&format!(".{}", class)) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!("Failed to query .{}: {:?}", class, e);
                return 0;
            }
        };

        let mut removed = 0;
        for i in 0..nodes.length() {
            let Some(node) = nodes.item(i) else { continue };
            let Some(parent) = node.parent_node() else { continue };
            match parent.remove_child(&node) {
                Ok(_) => removed += 1,
                Err(e) => tracing::debug!("Failed to remove .{} element: {:?}", class, e),
            }
        }
        removed
    }

    fn stage(&self, selector: &str, node: Node) -> Result<StagedElement, PyramidError> {
        let parent = self.query(selector)?;
        let element = self.build(&node)?;
        Ok(StagedElement { parent, element })
    }

    fn attach(&mut self, staged: StagedElement) -> Result<(), PyramidError> {
        staged.parent.append_child(&staged.element).map_err(js_err)?;
        Ok(())
    }
}

fn set(el: &web_sys::Element, name: &str, value: &str) -> Result<(), PyramidError> {
    el.set_attribute(name, value).map_err(js_err)
}

fn js_err(e: JsValue) -> PyramidError {
    PyramidError::Dom(format!("{:?}", e))
}

/// Parse a computed-style pixel length such as `"300px"` or `"312.5px"`
pub fn parse_px(selector: &str, value: &str) -> Result<f64, PyramidError> {
    let invalid = || PyramidError::InvalidDimension {
        selector: selector.to_string(),
        value: value.to_string(),
    };

    let number = value.trim().strip_suffix("px").ok_or_else(invalid)?;
    let px: f64 = number.trim().parse().map_err(|_| invalid())?;
    if px.is_finite() && px > 0.0 {
        Ok(px)
    } else {
        Err(invalid())
    }
}
