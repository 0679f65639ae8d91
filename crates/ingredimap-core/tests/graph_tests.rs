use std::collections::HashSet;

use ingredimap_core::graph::{CuisinePalette, EdgeKey};
use ingredimap_core::{Ingredient, OverlapGraph, Recipe, RecipeId};
use proptest::prelude::*;
use proptest::sample::Index;

const POOL: &[&str] = &[
    "Flour", "sugar", "Eggs", "MILK", "Butter", "salt", "Tomato", "basil", "Garlic", "onion",
];
const CUISINES: &[&str] = &["Italian", "Mexican", "Dessert", ""];

// =============================================================================
// Strategies
// =============================================================================

prop_compose! {
    /// A pool name with random case and surrounding whitespace.
    fn ingredient_name()(
        base in prop::sample::select(POOL),
        upper in any::<bool>(),
        lead in 0usize..2,
        trail in 0usize..2,
    ) -> String {
        let name = if upper { base.to_uppercase() } else { base.to_string() };
        format!("{}{}{}", " ".repeat(lead), name, " ".repeat(trail))
    }
}

prop_compose! {
    fn recipe_body()(
        cuisine in prop::sample::select(CUISINES),
        ingredients in prop::collection::vec(ingredient_name(), 0..5),
    ) -> (&'static str, Vec<String>) {
        (cuisine, ingredients)
    }
}

fn make_recipe(id: RecipeId, (cuisine, ingredients): (&'static str, Vec<String>)) -> Recipe {
    Recipe::new(id.clone(), format!("Recipe {}", id))
        .with_cuisine(cuisine)
        .with_ingredients(ingredients)
}

/// Mixes integer (some negative) and text ids.
fn id_for(i: usize) -> RecipeId {
    match i % 3 {
        0 => RecipeId::Number(i as i64 + 1),
        1 => RecipeId::Number(-(i as i64) - 1),
        _ => RecipeId::from(format!("r-{}", i)),
    }
}

prop_compose! {
    fn collection(min: usize, max: usize)(
        bodies in prop::collection::vec(recipe_body(), min..max),
    ) -> Vec<Recipe> {
        bodies
            .into_iter()
            .enumerate()
            .map(|(i, body)| make_recipe(id_for(i), body))
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Change {
    Insert((&'static str, Vec<String>)),
    Update(Index, (&'static str, Vec<String>)),
    Remove(Index),
}

fn change() -> impl Strategy<Value = Change> {
    prop_oneof![
        recipe_body().prop_map(Change::Insert),
        (any::<Index>(), recipe_body()).prop_map(|(i, b)| Change::Update(i, b)),
        any::<Index>().prop_map(Change::Remove),
    ]
}

// =============================================================================
// Helpers
// =============================================================================

fn recipe(id: i64, ingredients: &[&str]) -> Recipe {
    Recipe::new(id, format!("Recipe {}", id)).with_ingredients(ingredients.iter().copied())
}

type NodeSig = Vec<(RecipeId, String, String)>;
type EdgeSig = Vec<(EdgeKey, Vec<String>)>;

/// Order-independent view of a graph.
fn signature(graph: &OverlapGraph) -> (NodeSig, EdgeSig) {
    let mut nodes: NodeSig = graph
        .nodes_in_order()
        .into_iter()
        .map(|n| (n.id.clone(), n.label.clone(), n.color.clone()))
        .collect();
    nodes.sort();

    let mut edges: EdgeSig = graph
        .edges_in_order()
        .into_iter()
        .map(|e| {
            let names = e.shared_names().into_iter().map(str::to_string).collect();
            (e.key(), names)
        })
        .collect();
    edges.sort();

    (nodes, edges)
}

/// Shared display lists in render order.
fn shared_lists(graph: &OverlapGraph) -> Vec<Vec<String>> {
    graph.graph_data().edges.into_iter().map(|e| e.shared).collect()
}

fn keys(recipe: &Recipe) -> HashSet<String> {
    recipe
        .ingredients
        .iter()
        .map(|i| i.name.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Rebuilds `recipes` from scratch with the palette state of `graph`.
fn rebuilt(graph: &OverlapGraph, recipes: &[Recipe]) -> OverlapGraph {
    let mut full = graph.clone();
    full.build(recipes);
    full
}

// =============================================================================
// Full rebuild
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn build_matches_brute_force(recipes in collection(0, 20), threshold in 1usize..4) {
        let mut graph = OverlapGraph::new(threshold, CuisinePalette::default());
        graph.build(&recipes);

        prop_assert_eq!(graph.node_count(), recipes.len());

        let mut expected = 0;
        for (i, a) in recipes.iter().enumerate() {
            for b in &recipes[i + 1..] {
                let shared = keys(a).intersection(&keys(b)).count();
                let edge = graph.edge(&a.id, &b.id);
                if shared >= threshold {
                    expected += 1;
                    prop_assert_eq!(edge.map(|e| e.count()), Some(shared));
                } else {
                    prop_assert!(edge.is_none());
                }
            }
        }
        prop_assert_eq!(graph.edge_count(), expected);
    }

    #[test]
    fn no_self_or_duplicate_edges(recipes in collection(0, 25)) {
        let mut graph = OverlapGraph::default();
        graph.build(&recipes);

        let mut pairs = HashSet::new();
        for edge in graph.edges_in_order() {
            prop_assert_ne!(&edge.source, &edge.target);
            prop_assert!(pairs.insert(edge.key()));
        }
    }

    #[test]
    fn build_is_idempotent(recipes in collection(0, 20)) {
        let mut graph = OverlapGraph::default();

        graph.build(&recipes);
        let first = signature(&graph);
        let first_shared = shared_lists(&graph);

        graph.build(&recipes);
        prop_assert_eq!(signature(&graph), first);
        prop_assert_eq!(shared_lists(&graph), first_shared);
    }
}

// =============================================================================
// Incremental maintenance
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn insert_matches_full_build(mut recipes in collection(0, 12), body in recipe_body()) {
        let added = make_recipe(RecipeId::from("added"), body);

        let mut graph = OverlapGraph::default();
        graph.build(&recipes);
        graph.insert(added.clone());

        recipes.push(added);
        let full = rebuilt(&graph, &recipes);
        prop_assert_eq!(signature(&graph), signature(&full));
        prop_assert_eq!(shared_lists(&graph), shared_lists(&full));
    }

    #[test]
    fn update_matches_full_build(
        mut recipes in collection(1, 12),
        at in any::<Index>(),
        body in recipe_body(),
    ) {
        let i = at.index(recipes.len());
        let changed = make_recipe(recipes[i].id.clone(), body);

        let mut graph = OverlapGraph::default();
        graph.build(&recipes);
        graph.update(changed.clone());

        recipes[i] = changed;
        let full = rebuilt(&graph, &recipes);
        prop_assert_eq!(signature(&graph), signature(&full));
        prop_assert_eq!(shared_lists(&graph), shared_lists(&full));
    }

    #[test]
    fn remove_matches_full_build(mut recipes in collection(1, 12), at in any::<Index>()) {
        let mut graph = OverlapGraph::default();
        graph.build(&recipes);

        let removed = recipes.remove(at.index(recipes.len()));
        prop_assert!(graph.remove(&removed.id).is_some());
        prop_assert!(graph.neighbors(&removed.id).is_empty());

        let full = rebuilt(&graph, &recipes);
        prop_assert_eq!(signature(&graph), signature(&full));
        prop_assert_eq!(shared_lists(&graph), shared_lists(&full));
    }

    #[test]
    fn change_sequence_matches_full_build(
        mut recipes in collection(0, 10),
        changes in prop::collection::vec(change(), 1..12),
    ) {
        let mut graph = OverlapGraph::default();
        graph.build(&recipes);

        for (n, change) in changes.into_iter().enumerate() {
            match change {
                Change::Insert(body) => {
                    let added = make_recipe(RecipeId::from(format!("new-{}", n)), body);
                    graph.insert(added.clone());
                    recipes.push(added);
                }
                Change::Update(at, body) if !recipes.is_empty() => {
                    let i = at.index(recipes.len());
                    let changed = make_recipe(recipes[i].id.clone(), body);
                    graph.update(changed.clone());
                    recipes[i] = changed;
                }
                Change::Remove(at) if !recipes.is_empty() => {
                    let removed = recipes.remove(at.index(recipes.len()));
                    graph.remove(&removed.id);
                }
                _ => {}
            }
        }

        let full = rebuilt(&graph, &recipes);
        prop_assert_eq!(signature(&graph), signature(&full));
        prop_assert_eq!(shared_lists(&graph), shared_lists(&full));
    }
}

// =============================================================================
// Fixed cases
// =============================================================================

#[test]
fn test_example_collection() {
    let mut graph = OverlapGraph::default();
    graph.build(&[
        recipe(1, &["Flour", "Sugar"]),
        recipe(2, &["flour ", "Eggs"]),
        recipe(3, &["Salt"]),
    ]);

    let edges = graph.edges_in_order();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].source, RecipeId::Number(1));
    assert_eq!(edges[0].target, RecipeId::Number(2));
    assert_eq!(edges[0].shared[0].display, "Flour");
    assert_eq!(edges[0].count(), 1);
}

#[test]
fn test_threshold_boundary() {
    let mut graph = OverlapGraph::new(2, CuisinePalette::default());
    graph.build(&[
        recipe(1, &["Rice", "Beans", "Corn"]),
        recipe(2, &["rice", "Pepper"]),
        recipe(3, &["RICE", "beans"]),
    ]);

    assert!(graph.edge(&RecipeId::Number(1), &RecipeId::Number(2)).is_none());
    assert!(graph.edge(&RecipeId::Number(1), &RecipeId::Number(3)).is_some());
    assert!(graph.edge(&RecipeId::Number(2), &RecipeId::Number(3)).is_none());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_normalized_matching_keeps_first_spelling() {
    let mut graph = OverlapGraph::default();
    graph.build(&[
        recipe(1, &["  Olive Oil", "GARLIC"]),
        recipe(2, &["olive oil  ", "garlic", "Garlic"]),
    ]);

    let edge = graph
        .edge(&RecipeId::Number(2), &RecipeId::Number(1))
        .unwrap();
    let display: Vec<&str> = edge.shared.iter().map(|s| s.display.as_str()).collect();
    assert_eq!(display, vec!["  Olive Oil", "GARLIC"]);
    assert_eq!(edge.shared_names(), vec!["garlic", "olive oil"]);
}

#[test]
fn test_quantity_does_not_affect_matching() {
    let mut a = recipe(1, &[]);
    a.ingredients.push(Ingredient::with_quantity("Milk", "1 cup"));
    let mut b = recipe(2, &[]);
    b.ingredients.push(Ingredient::with_quantity("milk", "2 l"));

    let mut graph = OverlapGraph::default();
    graph.build(&[a, b]);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_malformed_recipes_are_tolerated() {
    let blank = Recipe::new(1, "");
    let mut graph = OverlapGraph::default();
    graph.build(&[blank, recipe(2, &["Salt"])]);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.node(&RecipeId::Number(1)).unwrap().label, "");
}

// =============================================================================
// Delete cascade
// =============================================================================

#[test]
fn test_delete_cascade_leaves_other_edges() {
    let mut graph = OverlapGraph::default();
    graph.build(&[
        recipe(1, &["Rice", "Beans"]),
        recipe(2, &["rice"]),
        recipe(3, &["beans"]),
        recipe(4, &["Rice", "Beans"]),
    ]);
    let before: Vec<EdgeKey> = graph
        .edges_in_order()
        .into_iter()
        .map(|e| e.key())
        .filter(|k| !k.contains(&RecipeId::Number(1)))
        .collect();

    let removed = graph.remove(&RecipeId::Number(1)).unwrap();
    assert_eq!(removed.label, "Recipe 1");

    let after: Vec<EdgeKey> = graph.edges_in_order().into_iter().map(|e| e.key()).collect();
    assert_eq!(before, after);
    assert!(graph.neighbors(&RecipeId::Number(1)).is_empty());
    assert!(graph
        .edges_in_order()
        .iter()
        .all(|e| !e.key().contains(&RecipeId::Number(1))));
}

#[test]
fn test_remove_missing_is_noop() {
    let mut graph = OverlapGraph::default();
    graph.build(&[recipe(1, &["Rice"]), recipe(2, &["Rice"])]);

    assert!(graph.remove(&RecipeId::Number(9)).is_none());
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}
