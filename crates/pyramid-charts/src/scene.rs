//! # scene
//!
//! Retained scene graph for rendered pyramids, with an SVG serializer.

use pyramid_core::{Point, Size};
use std::fmt::Write;

/// Class of every slice polygon
pub const SLICE_CLASS: &str = "slice triangle";

/// Class of every slice label
pub const LABEL_CLASS: &str = "pyramid-label";

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Scene graph node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root drawing surface (`<svg>`)
    Surface {
        class: String,
        size: Size,
        children: Vec<Node>,
    },
    Group {
        class: Option<String>,
        transform: Option<String>,
        children: Vec<Node>,
    },
    /// Closed filled polygon
    Polygon {
        class: String,
        points: Vec<Point>,
        fill: String,
    },
    Text {
        class: String,
        at: Point,
        content: String,
    },
}

impl Node {
    pub fn surface(class: impl Into<String>, size: Size) -> Self {
        Self::Surface {
            class: class.into(),
            size,
            children: Vec::new(),
        }
    }

    /// Group translated by `(dx, dy)`
    pub fn translated_group(dx: f64, dy: f64) -> Self {
        Self::Group {
            class: None,
            transform: Some(format!("translate({}, {})", dx, dy)),
            children: Vec::new(),
        }
    }

    pub fn polygon(points: &[Point], fill: impl Into<String>) -> Self {
        Self::Polygon {
            class: SLICE_CLASS.to_string(),
            points: points.to_vec(),
            fill: fill.into(),
        }
    }

    pub fn label(at: Point, content: impl Into<String>) -> Self {
        Self::Text {
            class: LABEL_CLASS.to_string(),
            at,
            content: content.into(),
        }
    }

    /// Append a child; no-op on leaf nodes
    pub fn push(&mut self, child: Node) {
        if let Some(children) = self.children_mut() {
            children.push(child);
        }
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.push(child);
        self
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            Self::Surface { class, .. } | Self::Polygon { class, .. } | Self::Text { class, .. } => {
                Some(class.as_str())
            }
            Self::Group { class, .. } => class.as_deref(),
        }
    }

    /// Whitespace-separated class list contains `name`
    pub fn has_class(&self, name: &str) -> bool {
        self.class()
            .is_some_and(|c| c.split_whitespace().any(|token| token == name))
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Surface { children, .. } | Self::Group { children, .. } => children.as_slice(),
            Self::Polygon { .. } | Self::Text { .. } => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Surface { children, .. } | Self::Group { children, .. } => Some(children),
            Self::Polygon { .. } | Self::Text { .. } => None,
        }
    }

    /// Remove every descendant carrying `class`; returns how many were removed
    pub fn remove_class(&mut self, class: &str) -> usize {
        match self.children_mut() {
            Some(children) => remove_class_from(children, class),
            None => 0,
        }
    }

    /// Depth-first walk over this node and its descendants
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }

    /// Serialize to SVG markup
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(512);
        self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) {
        match self {
            Self::Surface { class, size, children } => {
                write!(
                    out,
                    r#"<svg xmlns="{}" class="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
                    SVG_NS,
                    escape_xml(class),
                    size.width,
                    size.height,
                    size.width,
                    size.height
                )
                .unwrap();
                for child in children {
                    child.write_svg(out);
                }
                out.push_str("</svg>");
            }
            Self::Group { class, transform, children } => {
                out.push_str("<g");
                if let Some(class) = class {
                    write!(out, r#" class="{}""#, escape_xml(class)).unwrap();
                }
                if let Some(transform) = transform {
                    write!(out, r#" transform="{}""#, escape_xml(transform)).unwrap();
                }
                out.push('>');
                for child in children {
                    child.write_svg(out);
                }
                out.push_str("</g>");
            }
            Self::Polygon { class, points, fill } => {
                write!(
                    out,
                    r#"<polygon class="{}" points="{}" fill="{}"/>"#,
                    escape_xml(class),
                    points_attr(points),
                    escape_xml(fill)
                )
                .unwrap();
            }
            Self::Text { class, at, content } => {
                write!(
                    out,
                    r#"<text class="{}" x="{:.2}" y="{:.2}">{}</text>"#,
                    escape_xml(class),
                    at.x,
                    at.y,
                    escape_xml(content)
                )
                .unwrap();
            }
        }
    }
}

/// Remove matching nodes from `nodes` and recurse into the survivors
pub(crate) fn remove_class_from(nodes: &mut Vec<Node>, class: &str) -> usize {
    let before = nodes.len();
    nodes.retain(|n| !n.has_class(class));
    let mut removed = before - nodes.len();
    for node in nodes.iter_mut() {
        removed += node.remove_class(class);
    }
    removed
}

/// SVG `points` attribute value: `x1,y1 x2,y2 ...`
pub fn points_attr(points: &[Point]) -> String {
    let mut attr = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            attr.push(' ');
        }
        write!(attr, "{:.2},{:.2}", p.x, p.y).unwrap();
    }
    attr
}

/// Escape text for XML content and attribute values
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::surface("pyramid", Size::new(100.0, 80.0)).with_child(
            Node::translated_group(5.0, 5.0)
                .with_child(Node::polygon(
                    &[Point::new(45.0, 0.0), Point::new(0.0, 70.0), Point::new(90.0, 70.0)],
                    "#1f77b4",
                ))
                .with_child(Node::label(Point::new(45.0, 42.0), "Base & <co>")),
        )
    }

    #[test]
    fn test_points_attr() {
        let attr = points_attr(&[Point::new(1.0, 2.0), Point::new(3.5, 4.25)]);
        assert_eq!(attr, "1.00,2.00 3.50,4.25");
    }

    #[test]
    fn test_has_class_tokenized() {
        let poly = Node::polygon(&[], "red");
        assert!(poly.has_class("slice"));
        assert!(poly.has_class("triangle"));
        assert!(!poly.has_class("slice triangle"));
        assert!(!poly.has_class("tri"));
    }

    #[test]
    fn test_to_svg() {
        let svg = sample().to_svg();

        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" class="pyramid""#));
        assert!(svg.contains(r#"<g transform="translate(5, 5)">"#));
        assert!(svg.contains(r##"points="45.00,0.00 0.00,70.00 90.00,70.00" fill="#1f77b4""##));
        assert!(svg.contains("Base &amp; &lt;co&gt;</text>"));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn test_remove_class_recursive() {
        let mut root = Node::Group {
            class: None,
            transform: None,
            children: vec![sample()],
        };

        assert_eq!(root.remove_class("pyramid-label"), 1);
        assert_eq!(root.remove_class("pyramid-label"), 0);
        assert_eq!(root.descendants().len(), 4);
        assert_eq!(root.remove_class("pyramid"), 1);
        assert!(root.children().is_empty());
    }
}
