use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a recipe.
///
/// Seed data and older collections use integers (any sign), recipes created
/// by the application use generated strings. Both shapes survive a round
/// trip through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(i64),
    Text(String),
}

impl RecipeId {
    /// Generates a fresh identifier for a recipe with the given name.
    ///
    /// Format: `<slug>-<unix millis>-<5 random hex chars>`, e.g.
    /// `pancakes-1718000000000-3fa9c`.
    pub fn generate(name: &str) -> Self {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(5).collect();
        RecipeId::Text(format!(
            "{}-{}-{}",
            slugify(name),
            Utc::now().timestamp_millis(),
            suffix
        ))
    }

    /// Returns true for an empty or whitespace-only text identifier.
    pub fn is_blank(&self) -> bool {
        match self {
            RecipeId::Number(_) => false,
            RecipeId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{}", n),
            RecipeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecipeId {
    fn from(n: i64) -> Self {
        RecipeId::Number(n)
    }
}

impl From<&str> for RecipeId {
    fn from(s: &str) -> Self {
        RecipeId::Text(s.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(s: String) -> Self {
        RecipeId::Text(s)
    }
}

/// Lowercases a name and joins its words with dashes.
fn slugify(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    if slug.is_empty() {
        "recipe".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_uses_slug() {
        let id = RecipeId::generate("Spicy  Tomato Soup");
        let text = id.to_string();
        assert!(text.starts_with("spicy-tomato-soup-"));
        assert_eq!(text.rsplit('-').next().unwrap().len(), 5);
    }

    #[test]
    fn test_generate_is_distinct() {
        assert_ne!(RecipeId::generate("Soup"), RecipeId::generate("Soup"));
    }

    #[test]
    fn test_untagged_json_shapes() {
        let num: RecipeId = serde_json::from_str("7").unwrap();
        let text: RecipeId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(num, RecipeId::Number(7));
        assert_eq!(text, RecipeId::Text("7".to_string()));
        assert_eq!(serde_json::to_string(&num).unwrap(), "7");
    }

    #[test]
    fn test_negative_and_large_numbers() {
        let neg: RecipeId = serde_json::from_str("-3").unwrap();
        assert_eq!(neg, RecipeId::Number(-3));
        assert_eq!(neg.to_string(), "-3");
        assert_eq!(serde_json::to_string(&neg).unwrap(), "-3");

        let big: RecipeId = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(big, RecipeId::Number(9_007_199_254_740_993));
    }

    #[test]
    fn test_fractional_number_is_not_an_id() {
        assert!(serde_json::from_str::<RecipeId>("2.5").is_err());
    }

    #[test]
    fn test_is_blank() {
        assert!(RecipeId::from("  ").is_blank());
        assert!(!RecipeId::Number(0).is_blank());
    }
}
