//! Reactive pyramid chart component
//!
//! Renders the same scene as [`Pyramid`] through Leptos instead of direct DOM
//! calls, recomputing whenever the labels change.

use crate::{
    pyramid::Pyramid,
    scene::{Node, points_attr},
    target::HeadlessDocument,
};
use leptos::prelude::*;
use pyramid_core::{PyramidOptions, Size};

const SCENE_CONTAINER: &str = "#pyramid-chart";

/// Render `labels` into a scene, or `None` if the input cannot be drawn
fn build_scene(labels: Vec<String>, size: Size, options: PyramidOptions) -> Option<Node> {
    if labels.is_empty() {
        return None;
    }

    let mut doc = HeadlessDocument::new().with_container(SCENE_CONTAINER, size);
    let mut pyramid = Pyramid::new(labels, SCENE_CONTAINER, options, &doc).ok()?;
    pyramid.render(&mut doc).ok()?;
    doc.take_children(SCENE_CONTAINER).into_iter().next()
}

fn node_view(node: Node) -> AnyView {
    match node {
        Node::Surface { class, size, children } => view! {
            <svg
                class=class
                width=size.width
                height=size.height
                viewBox=format!("0 0 {} {}", size.width, size.height)
            >
                {children.into_iter().map(node_view).collect_view()}
            </svg>
        }
        .into_any(),
        Node::Group { class, transform, children } => view! {
            <g class=class transform=transform>
                {children.into_iter().map(node_view).collect_view()}
            </g>
        }
        .into_any(),
        Node::Polygon { class, points, fill } => view! {
            <polygon class=class points=points_attr(&points) fill=fill />
        }
        .into_any(),
        Node::Text { class, at, content } => view! {
            <text class=class x=at.x y=at.y>
                {content}
            </text>
        }
        .into_any(),
    }
}

/// Pyramid chart component
#[component]
pub fn PyramidChart(
    #[prop(into)] labels: Signal<Vec<String>>,
    #[prop(default = 300.0)] width: f64,
    #[prop(default = 400.0)] height: f64,
    #[prop(optional)] options: Option<PyramidOptions>,
) -> impl IntoView {
    let options = options.unwrap_or_default();
    let size = Size::new(width, height);

    let scene = move || build_scene(labels.get(), size, options.clone()).map(node_view);

    view! {
        <div
            class="pyramid-chart"
            style=format!("width: {}px; height: {}px;", width, height)
        >
            {scene}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_scene() {
        let scene = build_scene(
            labels(&["A", "B"]),
            Size::new(300.0, 400.0),
            PyramidOptions::default(),
        )
        .unwrap();

        assert!(scene.has_class("pyramid"));
        let polygons = scene
            .descendants()
            .into_iter()
            .filter(|n| matches!(n, Node::Polygon { .. }))
            .count();
        assert_eq!(polygons, 2);
    }

    #[test]
    fn test_build_scene_empty_or_degenerate() {
        assert!(build_scene(Vec::new(), Size::new(300.0, 400.0), PyramidOptions::default()).is_none());
        assert!(build_scene(labels(&["A"]), Size::new(40.0, 40.0), PyramidOptions::default()).is_none());
    }
}
