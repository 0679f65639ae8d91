use std::collections::HashMap;

use crate::config::{DEFAULT_FALLBACK_COLOR, DEFAULT_PALETTE};

/// Assigns node colors to cuisines.
///
/// Each new cuisine takes the next palette color in first-seen order,
/// wrapping around when the palette runs out. Assignments live as long as
/// the palette and are never persisted. A blank cuisine gets the fallback
/// color without using up a palette slot.
#[derive(Debug, Clone)]
pub struct CuisinePalette {
    colors: Vec<String>,
    fallback: String,
    assigned: HashMap<String, String>,
    next: usize,
}

impl CuisinePalette {
    pub fn new(colors: Vec<String>, fallback: impl Into<String>) -> Self {
        Self {
            colors,
            fallback: fallback.into(),
            assigned: HashMap::new(),
            next: 0,
        }
    }

    /// Returns the color of `cuisine`, assigning one on first encounter.
    pub fn color_for(&mut self, cuisine: &str) -> String {
        if cuisine.trim().is_empty() || self.colors.is_empty() {
            return self.fallback.clone();
        }
        if let Some(color) = self.assigned.get(cuisine) {
            return color.clone();
        }

        let color = self.colors[self.next % self.colors.len()].clone();
        self.next += 1;
        self.assigned.insert(cuisine.to_string(), color.clone());
        color
    }

    /// Returns the color already assigned to `cuisine`, if any.
    pub fn assigned(&self, cuisine: &str) -> Option<&str> {
        self.assigned.get(cuisine).map(String::as_str)
    }
}

impl Default for CuisinePalette {
    fn default() -> Self {
        Self::new(
            DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            DEFAULT_FALLBACK_COLOR,
        )
    }
}
