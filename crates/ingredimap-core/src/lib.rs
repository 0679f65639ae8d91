pub mod config;
pub mod graph;
pub mod manager;
pub mod recipe;
pub mod storage;
pub mod store;
pub mod transfer;

pub use config::{Config, ConfigError, ExportConfig, GraphConfig, ServerConfig, StorageConfig};
pub use graph::{Edge, GraphData, Node, OverlapGraph};
pub use manager::{ManagerError, OpenReport, RecipeManager};
pub use recipe::{Ingredient, Recipe, RecipeDraft, RecipeId};
pub use storage::{FileStorage, LoadSource, SeedSource, Storage, StorageError};
pub use store::{RecipeStore, StoreError};
pub use transfer::ImportOutcome;
