//! HTTP route handlers for the recipe server.
//!
//! Handlers are kept thin and delegate to `RecipeManager`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use serde_json::Value;

use ingredimap_core::transfer::{default_export_filename, export_json};
use ingredimap_core::{FileStorage, GraphData, Recipe, RecipeId, RecipeManager};

use super::models::{ApiError, ImportSummary, RecipeForm};
use super::templates;
use super::AppState;

/// Resolves a path id. Call it under the same guard that uses the result.
fn lookup(manager: &RecipeManager<FileStorage>, raw: &str) -> Result<RecipeId, ApiError> {
    manager
        .resolve_id(raw)
        .ok_or_else(|| ApiError::NotFound(raw.to_string()))
}

// =============================================================================
// Page Handlers
// =============================================================================

/// GET `/` - Recipe map page.
pub async fn index() -> Html<String> {
    Html(templates::render_map_page("IngrediMap"))
}

// =============================================================================
// API Handlers
// =============================================================================

/// GET `/api/graph` - Nodes and edges in vis-network format.
pub async fn api_graph(State(state): State<Arc<AppState>>) -> Json<GraphData> {
    let manager = state.manager.read().await;
    Json(manager.graph().graph_data())
}

/// GET `/api/recipes/{id}`
pub async fn api_recipe(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let manager = state.manager.read().await;
    let resolved = lookup(&manager, &id)?;
    manager
        .recipe(&resolved)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// POST `/api/recipes`
pub async fn api_create(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RecipeForm>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let mut manager = state.manager.write().await;
    let recipe = manager.add_recipe(form.into_draft())?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// PUT `/api/recipes/{id}`
pub async fn api_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(form): Json<RecipeForm>,
) -> Result<Json<Recipe>, ApiError> {
    let mut manager = state.manager.write().await;
    let resolved = lookup(&manager, &id)?;
    let recipe = manager.update_recipe(&resolved, form.into_draft())?;
    Ok(Json(recipe))
}

/// DELETE `/api/recipes/{id}`
pub async fn api_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let mut manager = state.manager.write().await;
    let resolved = lookup(&manager, &id)?;
    let removed = manager.delete_recipe(&resolved)?;
    Ok(Json(removed))
}

/// GET `/api/export` - Collection as a downloadable JSON file.
pub async fn api_export(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let manager = state.manager.read().await;
    let body = export_json(&manager.export_recipes())
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let filename = default_export_filename(
        &state.export_prefix,
        chrono::Local::now().date_naive(),
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// POST `/api/import` - Replace the collection with a JSON array of recipes.
pub async fn api_import(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<ImportSummary>, ApiError> {
    let Value::Array(raw) = payload else {
        return Err(ApiError::BadRequest(
            "Import payload must be a JSON array of recipes".to_string(),
        ));
    };

    let mut manager = state.manager.write().await;
    let outcome = manager.import_recipes(raw)?;
    Ok(Json(ImportSummary {
        imported: outcome.accepted.len(),
        rejected: outcome.rejected,
    }))
}
