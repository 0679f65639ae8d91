//! Local web server for the recipe map.
//!
//! Serves a single page that renders the ingredient-overlap graph with
//! vis-network, plus a small JSON API for managing recipes.
//!
//! # Module Structure
//!
//! - `handlers` - HTTP route handlers
//! - `models` - API request/response types (DTOs)
//! - `templates` - HTML/CSS/JS template rendering

mod handlers;
mod models;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use ingredimap_core::{FileStorage, RecipeManager};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state for the server.
pub struct AppState {
    /// Recipe collection and its graph.
    pub manager: RwLock<RecipeManager<FileStorage>>,
    /// Prefix used for export file names.
    pub export_prefix: String,
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the visualization server.
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Whether to open the browser automatically.
    pub open_browser: bool,
    /// Prefix used for export file names.
    pub export_prefix: String,
}

// =============================================================================
// Server Entry Point
// =============================================================================

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/graph", get(handlers::api_graph))
        .route("/api/recipes", post(handlers::api_create))
        .route(
            "/api/recipes/{id}",
            get(handlers::api_recipe)
                .put(handlers::api_update)
                .delete(handlers::api_delete),
        )
        .route("/api/export", get(handlers::api_export))
        .route("/api/import", post(handlers::api_import))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Start the visualization server.
pub async fn start_server(manager: RecipeManager<FileStorage>, config: ServeConfig) -> Result<()> {
    let state = Arc::new(AppState {
        manager: RwLock::new(manager),
        export_prefix: config.export_prefix,
    });
    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let url = format!("http://localhost:{}", config.port);

    println!("Starting IngrediMap server...");
    println!("Recipe map: {}", url);
    println!("Press Ctrl+C to stop\n");

    if config.open_browser {
        if let Err(e) = open::that(&url) {
            eprintln!("Could not open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
