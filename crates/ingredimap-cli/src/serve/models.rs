//! API request and response models for the recipe server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use ingredimap_core::recipe::{parse_ingredients, parse_instructions};
use ingredimap_core::{ManagerError, RecipeDraft, StoreError};

// =============================================================================
// Request Models
// =============================================================================

/// Recipe form as submitted by the page.
///
/// Ingredients use the comma-separated `Name (quantity)` syntax and
/// instructions have one step per line.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipeForm {
    pub name: String,
    pub cuisine: String,
    pub ingredients: String,
    pub instructions: String,
}

impl RecipeForm {
    pub fn into_draft(self) -> RecipeDraft {
        RecipeDraft {
            name: self.name,
            cuisine: self.cuisine,
            ingredients: parse_ingredients(&self.ingredients),
            instructions: parse_instructions(&self.instructions),
        }
    }
}

// =============================================================================
// Response Models
// =============================================================================

/// Result of `POST /api/import`.
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub rejected: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

// =============================================================================
// Errors
// =============================================================================

/// Error returned from API handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    Manager(ManagerError),
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        Self::Manager(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Manager(err) => match err {
                ManagerError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
                ManagerError::Store(StoreError::DuplicateId(_)) => StatusCode::CONFLICT,
                ManagerError::InvalidDraft(_) => StatusCode::BAD_REQUEST,
                ManagerError::ImportRejected { .. } | ManagerError::EmptyImport => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ManagerError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotFound(id) => format!("Recipe not found: {}", id),
            Self::BadRequest(msg) | Self::Internal(msg) => msg.clone(),
            Self::Manager(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.message(), "Request failed");
        }
        (status, Json(ErrorBody { error: self.message() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingredimap_core::RecipeId;

    #[test]
    fn test_form_into_draft() {
        let draft = RecipeForm {
            name: "Crepes".to_string(),
            cuisine: "French".to_string(),
            ingredients: "Flour (1 cup), Milk".to_string(),
            instructions: "Mix\n\nCook".to_string(),
        }
        .into_draft();

        assert_eq!(draft.ingredients.len(), 2);
        assert_eq!(draft.ingredients[0].quantity.as_deref(), Some("1 cup"));
        assert_eq!(draft.instructions, vec!["Mix", "Cook"]);
    }

    #[test]
    fn test_error_status() {
        let missing = ApiError::from(ManagerError::Store(StoreError::NotFound(RecipeId::Number(
            1,
        ))));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let duplicate = ApiError::from(ManagerError::Store(StoreError::DuplicateId(
            RecipeId::Number(1),
        )));
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let empty = ApiError::from(ManagerError::EmptyImport);
        assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
