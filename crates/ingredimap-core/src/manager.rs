use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::graph::OverlapGraph;
use crate::recipe::{DraftError, Recipe, RecipeDraft, RecipeId};
use crate::storage::{load_all, LoadFailure, LoadSource, SeedSource, Storage, StorageError};
use crate::store::{RecipeStore, StoreError};
use crate::transfer::{export_snapshot, import_replace, ImportOutcome};

/// Manages the recipe collection and its overlap graph.
///
/// Every mutation goes to the store first, then updates the graph
/// incrementally, then persists the collection. When persisting fails the
/// in-memory change stays and the error is returned.
pub struct RecipeManager<S: Storage> {
    storage: S,
    recipes_key: String,
    store: RecipeStore,
    graph: OverlapGraph,
}

/// What happened while opening a [`RecipeManager`].
#[derive(Debug)]
pub struct OpenReport {
    pub source: LoadSource,
    pub loaded: usize,
    /// Stored entries that could not be read as recipes.
    pub skipped: usize,
    /// Set when persisted or seed data could not be read.
    pub load_failure: Option<LoadFailure>,
    /// Set when seed data could not be written back to storage.
    pub persist_failure: Option<StorageError>,
}

impl<S: Storage> RecipeManager<S> {
    /// Loads the collection and builds the graph.
    ///
    /// Seed data is written back to storage right away so the next start
    /// reads the persisted copy.
    pub fn open(storage: S, config: &Config) -> (Self, OpenReport) {
        let seed = SeedSource::from_config(&config.storage);
        let outcome = load_all(&storage, &config.storage.recipes_key, &seed);

        let store = RecipeStore::from_recipes(outcome.recipes);
        let mut graph = OverlapGraph::from_config(&config.graph);
        graph.build(store.snapshot());

        let mut manager = Self {
            storage,
            recipes_key: config.storage.recipes_key.clone(),
            store,
            graph,
        };

        let persist_failure = match outcome.source {
            LoadSource::Seed => manager.persist().err(),
            _ => None,
        };

        let report = OpenReport {
            source: outcome.source,
            loaded: manager.store.len(),
            skipped: outcome.skipped,
            load_failure: outcome.warning,
            persist_failure,
        };
        (manager, report)
    }

    /// Recipes in collection order.
    pub fn recipes(&self) -> &[Recipe] {
        self.store.snapshot()
    }

    pub fn recipe(&self, id: &RecipeId) -> Option<&Recipe> {
        self.store.get(id)
    }

    /// Finds a recipe id from untyped text.
    pub fn resolve_id(&self, raw: &str) -> Option<RecipeId> {
        self.store.resolve(raw).cloned()
    }

    pub fn graph(&self) -> &OverlapGraph {
        &self.graph
    }

    /// Creates a recipe with a freshly generated id.
    pub fn add_recipe(&mut self, draft: RecipeDraft) -> Result<Recipe, ManagerError> {
        draft.validate()?;

        let id = self.store.next_id(&draft.name);
        let recipe = draft.into_recipe(id);
        self.store.add(recipe.clone())?;
        self.graph.insert(recipe.clone());
        tracing::info!(id = %recipe.id, name = %recipe.name, "Added recipe");

        self.persist()?;
        Ok(recipe)
    }

    /// Replaces the contents of an existing recipe, keeping its id.
    pub fn update_recipe(
        &mut self,
        id: &RecipeId,
        draft: RecipeDraft,
    ) -> Result<Recipe, ManagerError> {
        draft.validate()?;

        let recipe = self.store.update(id, draft.into_recipe(id.clone()))?.clone();
        self.graph.update(recipe.clone());
        tracing::info!(id = %recipe.id, name = %recipe.name, "Updated recipe");

        self.persist()?;
        Ok(recipe)
    }

    /// Deletes a recipe and every edge touching it.
    pub fn delete_recipe(&mut self, id: &RecipeId) -> Result<Recipe, ManagerError> {
        let removed = self.store.remove(id)?;
        self.graph.remove(id);
        tracing::info!(id = %removed.id, name = %removed.name, "Deleted recipe");

        self.persist()?;
        Ok(removed)
    }

    /// Replaces the whole collection with the valid entries of `raw`.
    ///
    /// The caller is responsible for confirming with the user first. Nothing
    /// changes when `raw` is empty or contains no valid recipe.
    pub fn import_recipes(&mut self, raw: Vec<Value>) -> Result<ImportOutcome, ManagerError> {
        if raw.is_empty() {
            return Err(ManagerError::EmptyImport);
        }

        let outcome = import_replace(raw);
        if outcome.accepted.is_empty() {
            return Err(ManagerError::ImportRejected {
                rejected: outcome.rejected,
            });
        }

        self.store.replace_all(outcome.accepted.clone());
        self.graph.build(self.store.snapshot());
        tracing::info!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected,
            "Imported recipes"
        );

        self.persist()?;
        Ok(outcome)
    }

    /// Snapshot of the collection for export.
    pub fn export_recipes(&self) -> Vec<Recipe> {
        export_snapshot(self.store.snapshot())
    }

    /// Writes the collection to storage.
    pub fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(self.store.snapshot())?;
        self.storage.set(&self.recipes_key, &json).map_err(|e| {
            tracing::warn!(error = %e, "Failed to persist recipes");
            e
        })
    }
}

/// Errors that can occur in RecipeManager operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid recipe: {0}")]
    InvalidDraft(#[from] DraftError),

    #[error("Failed to save recipes: {0}")]
    Persist(#[from] StorageError),

    #[error("Import failed: no valid recipes found ({rejected} rejected)")]
    ImportRejected { rejected: usize },

    #[error("Import canceled: the file contains no recipes")]
    EmptyImport,
}
