//! Label → color mappings

use crate::colors;
use std::collections::HashMap;

// ============================================================================
// STRATEGY PATTERN: Color Scale
// ============================================================================

/// Strategy trait mapping a slice label to a CSS color
///
/// Takes `&mut self` so ordinal scales can grow their domain as new labels
/// show up.
pub trait ColorScale {
    fn color(&mut self, label: &str) -> String;
}

impl<F> ColorScale for F
where
    F: FnMut(&str) -> String,
{
    fn color(&mut self, label: &str) -> String {
        self(label)
    }
}

/// Ordinal scale: labels get palette entries in order of first appearance,
/// wrapping around once the palette is exhausted.
#[derive(Debug, Clone)]
pub struct OrdinalScale {
    range: Vec<String>,
    domain: HashMap<String, usize>,
}

impl OrdinalScale {
    pub fn new<I, S>(range: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            range: range.into_iter().map(Into::into).collect(),
            domain: HashMap::new(),
        }
    }

    /// 20-color categorical palette
    pub fn category20() -> Self {
        Self::new(colors::CATEGORY20)
    }

    pub fn category10() -> Self {
        Self::new(colors::CATEGORY10)
    }

    /// Number of labels seen so far
    pub fn domain_len(&self) -> usize {
        self.domain.len()
    }
}

impl Default for OrdinalScale {
    fn default() -> Self {
        Self::category20()
    }
}

impl ColorScale for OrdinalScale {
    fn color(&mut self, label: &str) -> String {
        if self.range.is_empty() {
            return String::from("none");
        }
        let next = self.domain.len();
        let index = *self.domain.entry(label.to_string()).or_insert(next);
        self.range[index % self.range.len()].clone()
    }
}

/// Same color for every label
#[derive(Debug, Clone)]
pub struct UniformColor(pub String);

impl ColorScale for UniformColor {
    fn color(&mut self, _label: &str) -> String {
        self.0.clone()
    }
}
