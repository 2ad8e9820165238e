//! Ordered label datasets

use crate::PyramidError;
use serde::{Deserialize, Serialize};

/// Ordered, immutable sequence of slice labels.
///
/// The first label is the apex (topmost, narrowest) slice; the last one is
/// the base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Dataset(Vec<String>);

impl Dataset {
    /// Build a dataset, rejecting an empty label list
    pub fn new<I, S>(labels: I) -> Result<Self, PyramidError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(PyramidError::MissingData);
        }
        Ok(Self(labels))
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: construction rejects empty label lists
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Labels in paint order (base first), as a fresh copy
    pub fn paint_order(&self) -> Vec<&str> {
        self.0.iter().rev().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for Dataset {
    type Error = PyramidError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

impl From<Dataset> for Vec<String> {
    fn from(d: Dataset) -> Self {
        d.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_rejected() {
        let err = Dataset::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, PyramidError::MissingData));
    }

    #[test]
    fn test_paint_order_is_a_copy() {
        let data = Dataset::new(["A", "B", "C"]).unwrap();

        assert_eq!(data.paint_order(), vec!["C", "B", "A"]);
        assert_eq!(data.paint_order(), vec!["C", "B", "A"]);
        assert_eq!(data.labels(), &["A", "B", "C"]);
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<Dataset>("[]").is_err());

        let data: Dataset = serde_json::from_str(r#"["x","y"]"#).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get(1), Some("y"));
    }
}
