//! Serializable graph snapshot handed to the rendering layer.
//!
//! The field names follow what vis-network's `DataSet` expects
//! (`id`/`label`/`color`/`title` for nodes, `from`/`to`/`value`/`title` for
//! edges), so the JSON can be fed to it without reshaping.

use serde::Serialize;

use crate::recipe::{Recipe, RecipeId};

/// Full graph data in graph order.
#[derive(Debug, Clone, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: RecipeId,
    pub label: String,
    pub color: String,
    /// Tooltip text.
    pub title: String,
    /// Ingredient count, used to size the node.
    pub value: usize,
    #[serde(rename = "recipeData")]
    pub recipe: Recipe,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub from: RecipeId,
    pub to: RecipeId,
    /// Shared ingredient count, used for edge width.
    pub value: usize,
    pub title: String,
    /// Shared ingredients as displayed.
    pub shared: Vec<String>,
}
