//! Shared-ingredient computation between two recipes.

use std::collections::HashSet;

use crate::recipe::Recipe;

use super::types::SharedIngredient;

/// Normalized, non-blank ingredient names of a recipe.
pub fn ingredient_keys(recipe: &Recipe) -> HashSet<String> {
    recipe
        .ingredients
        .iter()
        .map(|ing| ing.normalized_name())
        .filter(|key| !key.is_empty())
        .collect()
}

/// Ingredients of `first` whose normalized name is in `second_keys`.
///
/// Scans `first` in order, keeps the first spelling of every name and skips
/// later repeats, so the result has no duplicate normalized names.
pub fn shared_ingredients(first: &Recipe, second_keys: &HashSet<String>) -> Vec<SharedIngredient> {
    let mut seen = HashSet::new();
    first
        .ingredients
        .iter()
        .filter_map(|ing| {
            let key = ing.normalized_name();
            if second_keys.contains(&key) && seen.insert(key.clone()) {
                Some(SharedIngredient {
                    name: key,
                    display: ing.name.clone(),
                })
            } else {
                None
            }
        })
        .collect()
}
