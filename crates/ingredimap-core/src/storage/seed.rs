//! Initial load of the recipe collection.
//!
//! The persisted collection wins when it holds at least one recipe;
//! otherwise the seed dataset is used. Both are normalized the same way:
//! bare-string ingredients become objects and recipes without an id get
//! their 1-based position as id. Entries that cannot be read as a recipe are
//! skipped one by one; they never discard the rest of the collection.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::config::StorageConfig;
use crate::recipe::{RawRecipe, Recipe, RecipeId};

use super::{Storage, StorageError};

/// Seed dataset compiled into the binary.
pub const BUNDLED_SEED: &str = include_str!("../../data/recipes.json");

/// Where seed recipes come from when nothing is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    Bundled,
    File(PathBuf),
}

impl SeedSource {
    pub fn from_config(config: &StorageConfig) -> Self {
        match &config.seed_file {
            Some(path) => SeedSource::File(PathBuf::from(path)),
            None => SeedSource::Bundled,
        }
    }

    fn read(&self) -> Result<Cow<'static, str>, StorageError> {
        match self {
            SeedSource::Bundled => Ok(Cow::Borrowed(BUNDLED_SEED)),
            SeedSource::File(path) => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|e| StorageError::io(path, e)),
        }
    }
}

/// Which data the loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Seed,
    Empty,
}

/// Persisted or seed data could not be read or parsed.
#[derive(Debug, Error)]
#[error("Could not load recipe data: {0}")]
pub struct LoadFailure(#[from] pub StorageError);

/// Result of [`load_all`]. Never an error: failures become a warning next to
/// an empty collection.
#[derive(Debug)]
pub struct LoadOutcome {
    pub recipes: Vec<Recipe>,
    pub source: LoadSource,
    /// Entries dropped because they were not recipe-shaped.
    pub skipped: usize,
    pub warning: Option<LoadFailure>,
}

/// Recipes read from a JSON array, plus the number of unreadable entries.
#[derive(Debug, Default)]
pub(crate) struct ParsedCollection {
    pub recipes: Vec<Recipe>,
    pub skipped: usize,
}

/// Loads the recipe collection stored under `key`, falling back to `seed`.
pub fn load_all<S: Storage + ?Sized>(storage: &S, key: &str, seed: &SeedSource) -> LoadOutcome {
    match try_load(storage, key, seed) {
        Ok((parsed, source)) => {
            tracing::info!(
                count = parsed.recipes.len(),
                skipped = parsed.skipped,
                source = ?source,
                "Loaded recipes"
            );
            LoadOutcome {
                recipes: parsed.recipes,
                source,
                skipped: parsed.skipped,
                warning: None,
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load recipes, starting with an empty collection");
            LoadOutcome {
                recipes: Vec::new(),
                source: LoadSource::Empty,
                skipped: 0,
                warning: Some(LoadFailure(e)),
            }
        }
    }
}

fn try_load<S: Storage + ?Sized>(
    storage: &S,
    key: &str,
    seed: &SeedSource,
) -> Result<(ParsedCollection, LoadSource), StorageError> {
    if let Some(saved) = storage.get(key)? {
        // "[]" or shorter counts as nothing persisted
        if saved.len() > 2 {
            let parsed = parse_collection(&saved)?;
            if !parsed.recipes.is_empty() {
                return Ok((parsed, LoadSource::Persisted));
            }
        }
        tracing::debug!(key, "Persisted collection is empty, using seed data");
    }

    let parsed = parse_collection(&seed.read()?)?;
    let source = if parsed.recipes.is_empty() {
        LoadSource::Empty
    } else {
        LoadSource::Seed
    };
    Ok((parsed, source))
}

/// Parses a JSON array of recipe-shaped objects into normalized recipes.
///
/// Only a payload that is not a JSON array fails as a whole.
pub(crate) fn parse_collection(json: &str) -> Result<ParsedCollection, StorageError> {
    let entries: Vec<Value> = serde_json::from_str(json)?;
    let mut parsed = ParsedCollection::default();

    for (i, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawRecipe>(entry) {
            Ok(raw) => parsed.recipes.push(raw.into_recipe(RecipeId::Number(i as i64 + 1))),
            Err(e) => {
                tracing::warn!(position = i + 1, error = %e, "Skipping unreadable recipe");
                parsed.skipped += 1;
            }
        }
    }
    Ok(parsed)
}
