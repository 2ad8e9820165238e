//! Pyramid chart sample page
//!
//! Draws the same labels twice: once imperatively into a sized container,
//! once through the reactive component.

use leptos::prelude::*;
use pyramid_charts::{DomDocument, Pyramid, PyramidChart};
use pyramid_core::{PyramidError, PyramidOptions};

const CONTAINER_ID: &str = "pyramid-container";
const CONTAINER: &str = "#pyramid-container";

/// Apex first
const LEVELS: [&str; 5] = [
    "Self-actualization",
    "Esteem",
    "Love/belonging",
    "Safety",
    "Physiological",
];

const SAMPLE_OPTIONS: &str = r#"{
    "className": "maslow",
    "autoFit": true,
    "margins": { "top": 25, "right": 25, "bottom": 25, "left": 25 }
}"#;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Mounting pyramid sample page");
    mount_to_body(App);
}

fn sample_options() -> PyramidOptions {
    PyramidOptions::from_json(SAMPLE_OPTIONS).unwrap_or_else(|e| {
        tracing::warn!("Falling back to default options: {}", e);
        PyramidOptions::default()
    })
}

/// Measure the container and draw into the live document
fn draw(options: PyramidOptions) -> Result<(), PyramidError> {
    let mut document = DomDocument::new()?;
    let mut pyramid = Pyramid::new(LEVELS, CONTAINER, options, &document)?;
    let layout = pyramid.render(&mut document)?;
    tracing::info!("Rendered {} slices into {}", layout.len(), CONTAINER);
    Ok(())
}

#[component]
fn App() -> impl IntoView {
    let options = sample_options();
    let container = NodeRef::<leptos::html::Div>::new();

    let draw_options = options.clone();
    Effect::new(move |_| {
        if container.get().is_some() {
            if let Err(e) = draw(draw_options.clone()) {
                tracing::error!("Failed to render pyramid: {}", e);
            }
        }
    });

    let labels = Signal::derive(|| LEVELS.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    let reactive_options = options.class_name("maslow-reactive");

    view! {
        <main class="pyramid-page">
            <h1>"Hierarchy of needs"</h1>
            <div
                id=CONTAINER_ID
                node_ref=container
                style="width: 300px; height: 400px;"
            ></div>
            <PyramidChart labels=labels width=300.0 height=400.0 options=reactive_options />
        </main>
    }
}
