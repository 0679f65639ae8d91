use thiserror::Error;

use crate::recipe::RecipeId;

/// Errors returned by [`RecipeStore`](super::RecipeStore) mutations.
///
/// Both are recoverable: the store is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),

    #[error("Recipe id already exists: {0}")]
    DuplicateId(RecipeId),
}
