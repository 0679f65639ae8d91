use std::collections::HashSet;

use crate::recipe::{Recipe, RecipeId};

/// A recipe as a graph node.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: RecipeId,
    /// Display label (the recipe name).
    pub label: String,
    /// Hex color derived from the cuisine.
    pub color: String,
    /// Full recipe for detail display.
    pub recipe: Recipe,
    /// Position in graph order; the earlier node of a pair drives edge display.
    pub(crate) seq: u64,
    /// Normalized ingredient names.
    pub(crate) keys: HashSet<String>,
}

/// One ingredient two recipes have in common.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedIngredient {
    /// Normalized name (lowercased, trimmed) used for matching.
    pub name: String,
    /// Original spelling from the first recipe of the pair.
    pub display: String,
}

/// Unordered recipe pair, stored with the smaller id first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(RecipeId, RecipeId);

impl EdgeKey {
    pub fn new(a: &RecipeId, b: &RecipeId) -> Self {
        if a <= b {
            EdgeKey(a.clone(), b.clone())
        } else {
            EdgeKey(b.clone(), a.clone())
        }
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        &self.0 == id || &self.1 == id
    }
}

/// Two recipes sharing at least the threshold number of ingredients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Endpoint that comes first in graph order.
    pub source: RecipeId,
    pub target: RecipeId,
    /// Shared ingredients, deduplicated, in the source recipe's order.
    pub shared: Vec<SharedIngredient>,
}

impl Edge {
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(&self.source, &self.target)
    }

    /// Number of distinct shared ingredients.
    pub fn count(&self) -> usize {
        self.shared.len()
    }

    /// Normalized shared names, sorted. Independent of which endpoint is source.
    pub fn shared_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shared.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Tooltip text, e.g. `Shared Ingredients: Flour, Eggs (2)`.
    pub fn title(&self) -> String {
        let names: Vec<&str> = self.shared.iter().map(|s| s.display.as_str()).collect();
        format!("Shared Ingredients: {} ({})", names.join(", "), self.count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_is_unordered() {
        let a = RecipeId::Number(1);
        let b = RecipeId::from("b");
        assert_eq!(EdgeKey::new(&a, &b), EdgeKey::new(&b, &a));
        assert!(EdgeKey::new(&a, &b).contains(&b));
        assert!(!EdgeKey::new(&a, &b).contains(&RecipeId::Number(2)));
    }

    #[test]
    fn test_edge_title() {
        let edge = Edge {
            source: RecipeId::Number(1),
            target: RecipeId::Number(2),
            shared: vec![
                SharedIngredient {
                    name: "flour".to_string(),
                    display: "Flour".to_string(),
                },
                SharedIngredient {
                    name: "eggs".to_string(),
                    display: "Eggs".to_string(),
                },
            ],
        };
        assert_eq!(edge.title(), "Shared Ingredients: Flour, Eggs (2)");
        assert_eq!(edge.shared_names(), vec!["eggs", "flour"]);
    }
}
