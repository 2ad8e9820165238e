//! Error type shared by every pyramid crate

use crate::MarginSide;
use thiserror::Error;

/// Errors raised while configuring or rendering a pyramid chart
#[derive(Debug, Error)]
pub enum PyramidError {
    /// No labels were supplied
    #[error("no data provided")]
    MissingData,

    /// The container selector is empty
    #[error("no parent container provided")]
    MissingContainer,

    #[error("no class name provided")]
    MissingClassName,

    /// Class names are used as CSS selectors and must be a plain identifier
    #[error("invalid class name: {0:?}")]
    InvalidClassName(String),

    /// A margin update carried no sides at all
    #[error("no margins provided")]
    MissingMargins,

    #[error("invalid {side} margin: {value}")]
    InvalidMargin { side: MarginSide, value: f64 },

    /// Base-to-height ratio must be positive and finite
    #[error("invalid relative width: {0}")]
    InvalidRatio(f64),

    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// The container reported a size that is not a positive pixel length
    #[error("container {selector} has invalid dimension {value:?}")]
    InvalidDimension { selector: String, value: String },

    /// Margins leave no room for slices
    #[error("degenerate layout: chart area is {width}x{height}")]
    DegenerateLayout { width: f64, height: f64 },

    #[error("DOM error: {0}")]
    Dom(String),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}
