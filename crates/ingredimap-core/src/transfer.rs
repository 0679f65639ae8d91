//! Import and export of whole recipe collections.
//!
//! Pure functions only: the host reads and writes files and asks the user
//! to confirm a destructive import.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::Value;

use crate::recipe::{RawRecipe, Recipe};

/// Result of validating an import payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    /// Recipes that passed validation, in payload order.
    pub accepted: Vec<Recipe>,
    /// Number of entries that were dropped.
    pub rejected: usize,
}

/// Validates an import payload.
///
/// An entry is accepted when it is a recipe-shaped object with a non-blank
/// `id` and `name`, and no id rendering the same text was accepted earlier
/// in the same payload. Everything else counts as rejected.
pub fn import_replace(raw: Vec<Value>) -> ImportOutcome {
    let mut accepted = Vec::new();
    let mut seen = HashSet::new();
    let mut rejected = 0;

    for entry in raw {
        let recipe = serde_json::from_value::<RawRecipe>(entry)
            .ok()
            .and_then(RawRecipe::into_valid_recipe);

        match recipe {
            Some(recipe) if seen.insert(recipe.id.to_string()) => accepted.push(recipe),
            _ => rejected += 1,
        }
    }

    if rejected > 0 {
        tracing::warn!(rejected, accepted = accepted.len(), "Skipped invalid recipes in import");
    }

    ImportOutcome { accepted, rejected }
}

/// Parses import file content. The top level must be a JSON array.
pub fn parse_import(json: &str) -> Result<Vec<Value>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Copy of the collection for export.
pub fn export_snapshot(recipes: &[Recipe]) -> Vec<Recipe> {
    recipes.to_vec()
}

/// Pretty-printed JSON array of the collection.
pub fn export_json(recipes: &[Recipe]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(recipes)
}

/// Default export file name, e.g. `ingredimap-recipes-2024-06-01.json`.
pub fn default_export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.json", prefix, date.format("%Y-%m-%d"))
}
