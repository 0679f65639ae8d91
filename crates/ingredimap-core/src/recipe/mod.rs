//! Recipe data model.
//!
//! Ingredients are stored as `{ name, quantity }` objects. Older collections
//! and seed files list ingredients as bare strings; both shapes deserialize
//! into [`Ingredient`].

mod form;
mod id;

pub use form::{format_ingredients, parse_ingredients, parse_instructions};
pub use id::RecipeId;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Lowercases and trims an ingredient name for matching.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A single ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IngredientRepr")]
pub struct Ingredient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
        }
    }

    pub fn with_quantity(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: Some(quantity.into()),
        }
    }

    /// The name used for overlap matching. Quantity never takes part.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientRepr {
    Bare(String),
    Full {
        #[serde(default, deserialize_with = "nullable")]
        name: String,
        #[serde(default)]
        quantity: Option<String>,
    },
}

impl From<IngredientRepr> for Ingredient {
    fn from(repr: IngredientRepr) -> Self {
        match repr {
            IngredientRepr::Bare(name) => Ingredient::new(name),
            IngredientRepr::Full { name, quantity } => Ingredient {
                name,
                quantity: quantity.filter(|q| !q.trim().is_empty()),
            },
        }
    }
}

/// A recipe as held by the store and fed to the overlap graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub cuisine: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "nullable")]
    pub instructions: Vec<String>,
}

impl Recipe {
    pub fn new(id: impl Into<RecipeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cuisine: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = cuisine.into();
        self
    }

    /// Appends ingredients given by name only.
    pub fn with_ingredients<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.ingredients.extend(names.into_iter().map(Ingredient::new));
        self
    }

    pub fn with_instructions<I, N>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.instructions.extend(steps.into_iter().map(Into::into));
        self
    }

    /// Converts the recipe back to an editable draft (drops the id).
    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft {
            name: self.name.clone(),
            cuisine: self.cuisine.clone(),
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
        }
    }
}

/// Recipe-shaped JSON with every field optional.
///
/// Used for persisted data, seed files and import payloads, which may carry
/// legacy shapes or miss fields entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecipe {
    #[serde(default)]
    pub id: Option<RecipeId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub cuisine: String,
    #[serde(default, deserialize_with = "nullable")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "nullable")]
    pub instructions: Vec<String>,
}

impl RawRecipe {
    /// Converts into a recipe, using `fallback` when the id is missing.
    pub fn into_recipe(self, fallback: RecipeId) -> Recipe {
        Recipe {
            id: self.id.unwrap_or(fallback),
            name: self.name.unwrap_or_default(),
            cuisine: self.cuisine,
            ingredients: self.ingredients,
            instructions: self.instructions,
        }
    }

    /// Converts into a recipe only if both id and name are present and non-blank.
    pub fn into_valid_recipe(self) -> Option<Recipe> {
        let id = self.id.filter(|id| !id.is_blank())?;
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        Some(Recipe {
            id,
            name,
            cuisine: self.cuisine,
            ingredients: self.ingredients,
            instructions: self.instructions,
        })
    }
}

/// Form input for creating or editing a recipe. Carries no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeDraft {
    pub name: String,
    pub cuisine: String,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

impl RecipeDraft {
    /// Name and cuisine are required; everything else may be empty.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.cuisine.trim().is_empty() {
            return Err(DraftError::MissingCuisine);
        }
        Ok(())
    }

    /// Builds a recipe with the given id, trimming name and cuisine.
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            name: self.name.trim().to_string(),
            cuisine: self.cuisine.trim().to_string(),
            ingredients: self.ingredients,
            instructions: self.instructions,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Recipe name is required")]
    MissingName,

    #[error("Recipe cuisine is required")]
    MissingCuisine,
}

/// Treats an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_accepts_both_shapes() {
        let json = r#"["Flour", {"name": "Sugar", "quantity": "1 cup"}, {"name": "Salt", "quantity": ""}]"#;
        let ingredients: Vec<Ingredient> = serde_json::from_str(json).unwrap();
        assert_eq!(
            ingredients,
            vec![
                Ingredient::new("Flour"),
                Ingredient::with_quantity("Sugar", "1 cup"),
                Ingredient::new("Salt"),
            ]
        );
    }

    #[test]
    fn test_ingredient_serializes_as_object() {
        let json = serde_json::to_string(&Ingredient::new("Eggs")).unwrap();
        assert_eq!(json, r#"{"name":"Eggs"}"#);
    }

    #[test]
    fn test_recipe_tolerates_missing_and_null_fields() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": 3, "name": null, "ingredients": null}"#).unwrap();
        assert_eq!(recipe.id, RecipeId::Number(3));
        assert!(recipe.name.is_empty());
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
    }

    #[test]
    fn test_raw_recipe_fallback_id() {
        let raw: RawRecipe = serde_json::from_str(r#"{"name": "Toast"}"#).unwrap();
        let recipe = raw.into_recipe(RecipeId::Number(4));
        assert_eq!(recipe.id, RecipeId::Number(4));
        assert_eq!(recipe.name, "Toast");
    }

    #[test]
    fn test_raw_recipe_validation() {
        let blank_id: RawRecipe = serde_json::from_str(r#"{"id": "", "name": "X"}"#).unwrap();
        assert!(blank_id.into_valid_recipe().is_none());

        let no_name: RawRecipe = serde_json::from_str(r#"{"id": "5"}"#).unwrap();
        assert!(no_name.into_valid_recipe().is_none());

        let ok: RawRecipe = serde_json::from_str(r#"{"id": "5", "name": "Y"}"#).unwrap();
        assert_eq!(ok.into_valid_recipe().unwrap().name, "Y");
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = RecipeDraft {
            name: "  ".to_string(),
            cuisine: "Italian".to_string(),
            ..Default::default()
        };
        assert_eq!(draft.validate(), Err(DraftError::MissingName));

        draft.name = "Pasta".to_string();
        draft.cuisine = String::new();
        assert_eq!(draft.validate(), Err(DraftError::MissingCuisine));

        draft.cuisine = " Italian ".to_string();
        assert!(draft.validate().is_ok());
        let recipe = draft.into_recipe(RecipeId::from("pasta-1"));
        assert_eq!(recipe.cuisine, "Italian");
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Olive Oil "), "olive oil");
        assert_eq!(Ingredient::new("FLOUR ").normalized_name(), "flour");
    }
}
