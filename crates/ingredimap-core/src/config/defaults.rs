//! Default values for IngrediMap configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Storage Defaults
// ============================================================================

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = ".ingredimap";

/// Key the recipe collection is persisted under.
pub const DEFAULT_RECIPES_KEY: &str = "ingrediMapRecipes";

// ============================================================================
// Graph Defaults
// ============================================================================

/// Minimum number of shared ingredients for an edge.
///
/// One shared ingredient is enough to connect two recipes.
pub const DEFAULT_THRESHOLD: usize = 1;

/// Colors handed out to cuisines in first-seen order.
pub const DEFAULT_PALETTE: &[&str] = &[
    "#FFADAD", "#FFD6A5", "#FDFFB6", "#CAFFBF", "#9BF6FF", "#A0C4FF", "#BDB2FF", "#FFC6FF",
    "#FFFFFC",
];

/// Color for recipes without a cuisine.
pub const DEFAULT_FALLBACK_COLOR: &str = "#CCCCCC";

// ============================================================================
// Export Defaults
// ============================================================================

/// Prefix of the default export file name.
pub const DEFAULT_EXPORT_PREFIX: &str = "ingredimap-recipes";

// ============================================================================
// Server Defaults
// ============================================================================

/// Default port of the visualization server.
pub const DEFAULT_SERVER_PORT: u16 = 3333;

// ============================================================================
// Config Files
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "ingredimap.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "ingredimap";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";
