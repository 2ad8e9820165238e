//! # pyramid-charts
//!
//! D3.js-style SVG pyramid chart built on a small retained scene graph.
//! One triangle per label, stacked from a wide base to a narrow apex.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Label coloring (`pyramid_core::ColorScale`)
//! - Container measurement and drawing (`ContainerSizeProvider`, `RenderTarget`)
//!
//! ## Modules
//!
//! - `layout` - Slice geometry and the layout pass
//! - `scene` - Scene graph nodes and SVG serialization
//! - `target` - Headless and browser render targets
//! - `pyramid` - Imperative renderer with setters
//! - `component` - Reactive Leptos component

pub mod component;
pub mod layout;
pub mod pyramid;
pub mod scene;
pub mod target;

pub use component::*;
pub use layout::*;
pub use pyramid::*;
pub use scene::*;
pub use target::*;

// Re-export core types for convenience
pub use pyramid_core::{
    ColorScale, Dataset, Dimensions, Margins, MarginsPatch, OrdinalScale, Point, PyramidError,
    PyramidOptions, Size, colors,
};
