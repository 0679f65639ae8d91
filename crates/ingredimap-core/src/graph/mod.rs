//! Ingredient-overlap graph.
//!
//! Nodes are recipes; an edge joins two recipes that share at least
//! `threshold` normalized ingredient names. The graph is always derived from
//! recipe data and can be maintained in two ways that give the same result:
//!
//! - [`OverlapGraph::build`] recomputes everything, comparing every pair
//!   (O(n²·k) for n recipes of k ingredients).
//! - [`OverlapGraph::insert`], [`OverlapGraph::update`] and
//!   [`OverlapGraph::remove`] touch only the edges of one recipe (O(n·k)).
//!
//! Every node has a position in graph order: input order for a full build,
//! append order for inserts. An update keeps the node's position. For each
//! edge the earlier node is the source, whose ingredient order and spelling
//! are used for the shared list.

mod models;
mod overlap;
mod palette;
mod types;

pub use models::{GraphData, GraphEdge, GraphNode};
pub use overlap::{ingredient_keys, shared_ingredients};
pub use palette::CuisinePalette;
pub use types::{Edge, EdgeKey, Node, SharedIngredient};

use std::collections::{HashMap, HashSet};

use crate::config::GraphConfig;
use crate::recipe::{Recipe, RecipeId};

#[derive(Debug, Clone)]
pub struct OverlapGraph {
    threshold: usize,
    palette: CuisinePalette,
    nodes: HashMap<RecipeId, Node>,
    edges: HashMap<EdgeKey, Edge>,
    adjacency: HashMap<RecipeId, HashSet<RecipeId>>,
    next_seq: u64,
}

impl OverlapGraph {
    /// Creates an empty graph. A threshold of 0 is raised to 1.
    pub fn new(threshold: usize, palette: CuisinePalette) -> Self {
        Self {
            threshold: threshold.max(1),
            palette,
            nodes: HashMap::new(),
            edges: HashMap::new(),
            adjacency: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(
            config.threshold,
            CuisinePalette::new(config.palette.clone(), config.fallback_color.clone()),
        )
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn palette(&self) -> &CuisinePalette {
        &self.palette
    }

    // =========================================================================
    // Full rebuild
    // =========================================================================

    /// Discards the current contents and rebuilds from `recipes`.
    ///
    /// If an id repeats, the first occurrence is kept.
    pub fn build(&mut self, recipes: &[Recipe]) {
        self.clear();

        for recipe in recipes {
            if self.nodes.contains_key(&recipe.id) {
                tracing::warn!(id = %recipe.id, "Skipping recipe with duplicate id");
                continue;
            }
            let seq = self.take_seq();
            let node = self.make_node(recipe.clone(), seq);
            self.nodes.insert(node.id.clone(), node);
        }

        let ordered = self.nodes_in_order();
        let mut found = Vec::new();
        for (i, first) in ordered.iter().enumerate() {
            for second in &ordered[i + 1..] {
                if let Some(edge) = self.overlap(first, second) {
                    found.push(edge);
                }
            }
        }

        for edge in found {
            self.add_edge(edge);
        }

        tracing::debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "Rebuilt overlap graph"
        );
    }

    /// Removes all nodes and edges. Palette assignments are kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
        self.next_seq = 0;
    }

    // =========================================================================
    // Incremental maintenance
    // =========================================================================

    /// Adds a recipe and its edges to every other node.
    ///
    /// A recipe whose id is already present is treated as an update.
    pub fn insert(&mut self, recipe: Recipe) {
        if self.nodes.contains_key(&recipe.id) {
            tracing::warn!(id = %recipe.id, "Node already exists, updating instead");
            self.update(recipe);
            return;
        }
        let seq = self.take_seq();
        self.insert_at(recipe, seq);
    }

    /// Replaces a recipe: removes its node and edges, then inserts the new
    /// data at the same position.
    pub fn update(&mut self, recipe: Recipe) {
        let seq = match self.remove(&recipe.id) {
            Some(old) => old.seq,
            None => self.take_seq(),
        };
        self.insert_at(recipe, seq);
    }

    /// Removes a node and every edge touching it.
    pub fn remove(&mut self, id: &RecipeId) -> Option<Node> {
        let node = self.nodes.remove(id)?;

        if let Some(neighbors) = self.adjacency.remove(id) {
            for neighbor in neighbors {
                self.edges.remove(&EdgeKey::new(id, &neighbor));
                if let Some(back) = self.adjacency.get_mut(&neighbor) {
                    back.remove(id);
                }
            }
        }

        tracing::debug!(id = %id, "Removed node");
        Some(node)
    }

    fn insert_at(&mut self, recipe: Recipe, seq: u64) {
        let node = self.make_node(recipe, seq);

        let found: Vec<Edge> = self
            .nodes
            .values()
            .filter_map(|other| self.overlap(&node, other))
            .collect();

        tracing::debug!(id = %node.id, edges = found.len(), "Inserted node");
        self.nodes.insert(node.id.clone(), node);
        for edge in found {
            self.add_edge(edge);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn node(&self, id: &RecipeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, a: &RecipeId, b: &RecipeId) -> Option<&Edge> {
        self.edges.get(&EdgeKey::new(a, b))
    }

    /// Ids of the recipes sharing an edge with `id`, in graph order.
    pub fn neighbors(&self, id: &RecipeId) -> Vec<&RecipeId> {
        let mut neighbors: Vec<&Node> = self
            .adjacency
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(|n| self.nodes.get(n))
            .collect();
        neighbors.sort_by_key(|n| n.seq);
        neighbors.into_iter().map(|n| &n.id).collect()
    }

    /// Nodes in graph order.
    pub fn nodes_in_order(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by_key(|n| n.seq);
        nodes
    }

    /// Edges ordered by the positions of their source, then target.
    pub fn edges_in_order(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.edges.values().collect();
        edges.sort_by_key(|e| (self.seq_of(&e.source), self.seq_of(&e.target)));
        edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Snapshot for the rendering layer.
    pub fn graph_data(&self) -> GraphData {
        let nodes = self
            .nodes_in_order()
            .into_iter()
            .map(|n| GraphNode {
                id: n.id.clone(),
                label: n.label.clone(),
                color: n.color.clone(),
                title: format!("Cuisine: {}", n.recipe.cuisine),
                value: n.recipe.ingredients.len(),
                recipe: n.recipe.clone(),
            })
            .collect();

        let edges = self
            .edges_in_order()
            .into_iter()
            .map(|e| GraphEdge {
                from: e.source.clone(),
                to: e.target.clone(),
                value: e.count(),
                title: e.title(),
                shared: e.shared.iter().map(|s| s.display.clone()).collect(),
            })
            .collect();

        GraphData { nodes, edges }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn seq_of(&self, id: &RecipeId) -> u64 {
        self.nodes.get(id).map(|n| n.seq).unwrap_or(u64::MAX)
    }

    fn make_node(&mut self, recipe: Recipe, seq: u64) -> Node {
        Node {
            id: recipe.id.clone(),
            label: recipe.name.clone(),
            color: self.palette.color_for(&recipe.cuisine),
            keys: ingredient_keys(&recipe),
            recipe,
            seq,
        }
    }

    /// Edge between two distinct nodes if they meet the threshold.
    fn overlap(&self, a: &Node, b: &Node) -> Option<Edge> {
        if a.id == b.id {
            return None;
        }
        let (first, second) = if a.seq <= b.seq { (a, b) } else { (b, a) };
        let shared = shared_ingredients(&first.recipe, &second.keys);
        if shared.len() < self.threshold {
            return None;
        }
        Some(Edge {
            source: first.id.clone(),
            target: second.id.clone(),
            shared,
        })
    }

    fn add_edge(&mut self, edge: Edge) {
        let key = edge.key();
        if self.edges.contains_key(&key) {
            return;
        }
        self.adjacency
            .entry(edge.source.clone())
            .or_default()
            .insert(edge.target.clone());
        self.adjacency
            .entry(edge.target.clone())
            .or_default()
            .insert(edge.source.clone());
        self.edges.insert(key, edge);
    }
}

impl Default for OverlapGraph {
    fn default() -> Self {
        Self::from_config(&GraphConfig::default())
    }
}
