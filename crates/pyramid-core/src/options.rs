//! Renderer configuration

use crate::{Margins, PyramidError};
use serde::{Deserialize, Serialize};

/// Default CSS class of the drawing surface
pub const DEFAULT_CLASS_NAME: &str = "pyramid";

/// Default base-to-height ratio (3-4-5 right triangle)
pub const DEFAULT_RELATIVE_WIDTH: f64 = 0.75;

/// Pyramid renderer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PyramidOptions {
    pub class_name: String,
    /// Recompute the ratio on every render so the base spans the chart width
    pub auto_fit: bool,
    pub relative_width: f64,
    pub margins: Margins,
}

impl Default for PyramidOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            auto_fit: true,
            relative_width: DEFAULT_RELATIVE_WIDTH,
            margins: Margins::default(),
        }
    }
}

impl PyramidOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON; absent fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, PyramidError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    pub fn auto_fit(mut self, auto_fit: bool) -> Self {
        self.auto_fit = auto_fit;
        self
    }

    pub fn relative_width(mut self, ratio: f64) -> Self {
        self.relative_width = ratio;
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn validate(&self) -> Result<(), PyramidError> {
        validate_class_name(&self.class_name)?;
        validate_ratio(self.relative_width)?;
        crate::MarginsPatch::from(self.margins).validate()
    }
}

/// Class name must be a plain CSS identifier: a letter or `_` followed by
/// letters, digits, `_` or `-`. It is used verbatim in a `.class` selector.
pub fn validate_class_name(name: &str) -> Result<(), PyramidError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(PyramidError::MissingClassName);
    };

    let starts_ok = first.is_ascii_alphabetic() || first == '_';
    let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if starts_ok && rest_ok {
        Ok(())
    } else {
        Err(PyramidError::InvalidClassName(name.to_string()))
    }
}

/// Ratio must be a positive finite number
pub fn validate_ratio(ratio: f64) -> Result<(), PyramidError> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(PyramidError::InvalidRatio(ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = PyramidOptions::default();
        assert_eq!(opts.class_name, "pyramid");
        assert!(opts.auto_fit);
        assert_eq!(opts.relative_width, 0.75);
        assert_eq!(opts.margins, Margins::uniform(25.0));
    }

    #[test]
    fn test_from_json_partial() {
        let opts = PyramidOptions::from_json(r#"{"className": "maslow", "autoFit": false}"#).unwrap();

        assert_eq!(opts.class_name, "maslow");
        assert!(!opts.auto_fit);
        assert_eq!(opts.relative_width, 0.75);
    }

    #[test]
    fn test_from_json_rejects_bad_ratio() {
        let err = PyramidOptions::from_json(r#"{"relativeWidth": -1}"#).unwrap_err();
        assert!(matches!(err, PyramidError::InvalidRatio(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = PyramidOptions::from_json("{").unwrap_err();
        assert!(matches!(err, PyramidError::Options(_)));
    }

    #[test]
    fn test_class_name_validation() {
        assert!(matches!(validate_class_name(""), Err(PyramidError::MissingClassName)));
        assert!(matches!(
            validate_class_name("two words"),
            Err(PyramidError::InvalidClassName(_))
        ));
        assert!(validate_class_name("pyramid-2").is_ok());
        assert!(validate_class_name("_chart_v2").is_ok());
    }

    #[test]
    fn test_class_name_rejects_selector_syntax() {
        for bad in ["2024", "-x", "chart.v2", "a,b", "x:hover", "#id", "a>b", "[x]", "caf\u{e9}"] {
            assert!(
                matches!(validate_class_name(bad), Err(PyramidError::InvalidClassName(ref n)) if n == bad),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let opts = PyramidOptions::new().class_name("maslow").auto_fit(false);
        let json = serde_json::to_value(&opts).unwrap();

        assert_eq!(json["className"], "maslow");
        assert_eq!(json["autoFit"], false);
        assert_eq!(json["relativeWidth"], 0.75);
        assert_eq!(json["margins"]["left"], 25.0);
        assert_eq!(PyramidOptions::from_json(&json.to_string()).unwrap(), opts);
    }

    #[test]
    fn test_builder() {
        let opts = PyramidOptions::new()
            .class_name("p2")
            .auto_fit(false)
            .relative_width(0.5)
            .margins(Margins::uniform(10.0));

        assert!(opts.validate().is_ok());
        assert_eq!(opts.margins.left, 10.0);
    }
}
