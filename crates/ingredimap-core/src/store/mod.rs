//! Authoritative in-memory recipe collection.
//!
//! The store keeps recipes in insertion order next to an index keyed by the
//! rendered id. Ids are unique for as long as a recipe is resident, and two
//! ids that render the same text (`5` and `"5"`) count as the same id, so
//! every recipe can be reached from untyped text. `add` rejects a duplicate
//! instead of overwriting.

mod error;

pub use error::StoreError;

use std::collections::HashMap;

use crate::recipe::{Recipe, RecipeId};

#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    index: HashMap<String, usize>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from a collection, see [`RecipeStore::replace_all`].
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let mut store = Self::new();
        store.replace_all(recipes);
        store
    }

    /// Appends a recipe. Fails if an id rendering the same is already resident.
    pub fn add(&mut self, recipe: Recipe) -> Result<(), StoreError> {
        let key = recipe.id.to_string();
        if self.index.contains_key(&key) {
            return Err(StoreError::DuplicateId(recipe.id));
        }
        self.index.insert(key, self.recipes.len());
        self.recipes.push(recipe);
        Ok(())
    }

    /// Replaces the recipe stored under `id` in place.
    ///
    /// The stored id wins over whatever id `recipe` carries, so edits can
    /// never re-key a recipe.
    pub fn update(&mut self, id: &RecipeId, mut recipe: Recipe) -> Result<&Recipe, StoreError> {
        let pos = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        recipe.id = id.clone();
        self.recipes[pos] = recipe;
        Ok(&self.recipes[pos])
    }

    /// Removes and returns the recipe stored under `id`.
    pub fn remove(&mut self, id: &RecipeId) -> Result<Recipe, StoreError> {
        let pos = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.index.remove(&id.to_string());
        let removed = self.recipes.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Ok(removed)
    }

    /// Replaces the whole collection.
    ///
    /// Later entries repeating an earlier id are dropped; the number of
    /// dropped entries is returned.
    pub fn replace_all(&mut self, recipes: Vec<Recipe>) -> usize {
        self.recipes.clear();
        self.index.clear();

        let mut dropped = 0;
        for recipe in recipes {
            if let Err(StoreError::DuplicateId(id)) = self.add(recipe) {
                tracing::warn!(id = %id, "Dropping recipe with duplicate id");
                dropped += 1;
            }
        }
        dropped
    }

    /// Read-only view of the collection in insertion order.
    pub fn snapshot(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.position(id).map(|pos| &self.recipes[pos])
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.position(id).is_some()
    }

    /// Finds the id that renders as `raw`, e.g. an id typed on the command line.
    ///
    /// An exact match wins. Otherwise surrounding whitespace is ignored and
    /// integers are compared by value, so `" 007"` finds the id `7`.
    pub fn resolve(&self, raw: &str) -> Option<&RecipeId> {
        let pos = self
            .index
            .get(raw)
            .or_else(|| self.index.get(raw.trim()))
            .or_else(|| {
                let n = raw.trim().parse::<i64>().ok()?;
                self.index.get(&n.to_string())
            })?;
        Some(&self.recipes[*pos].id)
    }

    /// Generates an id for a new recipe that is not resident in the store.
    pub fn next_id(&self, name: &str) -> RecipeId {
        loop {
            let id = RecipeId::generate(name);
            if !self.contains(&id) {
                return id;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Position of the recipe with exactly this id.
    fn position(&self, id: &RecipeId) -> Option<usize> {
        self.index
            .get(&id.to_string())
            .copied()
            .filter(|&pos| self.recipes[pos].id == *id)
    }
}
