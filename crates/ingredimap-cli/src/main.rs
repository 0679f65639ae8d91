mod serve;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use ingredimap_core::recipe::{format_ingredients, parse_ingredients, parse_instructions};
use ingredimap_core::transfer::{default_export_filename, export_json, parse_import};
use ingredimap_core::{Config, FileStorage, RecipeDraft, RecipeId, RecipeManager};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ingredimap")]
#[command(about = "Manage recipes and explore how they share ingredients", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to ./ingredimap.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all recipes
    List,
    /// Show a single recipe
    Show {
        /// Recipe id
        id: String,
    },
    /// Add a new recipe
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cuisine: String,
        /// Comma separated, e.g. "Flour (1 cup), Sugar"
        #[arg(long, default_value = "")]
        ingredients: String,
        /// One step per line
        #[arg(long, default_value = "")]
        instructions: String,
    },
    /// Edit an existing recipe; omitted fields keep their value
    Edit {
        /// Recipe id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        cuisine: Option<String>,
        #[arg(long)]
        ingredients: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
    },
    /// Delete a recipe
    Delete {
        /// Recipe id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the ingredient-overlap graph
    Graph {
        /// Print the renderer JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Replace the collection with recipes from a JSON file
    Import {
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the collection to a JSON file
    Export {
        /// Output file (defaults to a dated file name)
        file: Option<PathBuf>,
    },
    /// Print the default configuration as TOML
    InitConfig,
    /// Start the graph visualization server
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
        /// Do not open the browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::InitConfig = cli.command {
        print!("{}", Config::default_config_string());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
    .wrap_err("Failed to load configuration")?;

    let manager = open_manager(&config);

    match cli.command {
        Commands::List => list(&manager),
        Commands::Show { id } => show(&manager, &id),
        Commands::Add {
            name,
            cuisine,
            ingredients,
            instructions,
        } => {
            let mut manager = manager;
            let recipe = manager.add_recipe(RecipeDraft {
                name,
                cuisine,
                ingredients: parse_ingredients(&ingredients),
                instructions: parse_instructions(&instructions),
            })?;
            println!("Added recipe: {}", recipe.name);
            println!("  ID: {}", recipe.id);
            Ok(())
        }
        Commands::Edit {
            id,
            name,
            cuisine,
            ingredients,
            instructions,
        } => {
            let mut manager = manager;
            let id = resolve(&manager, &id)?;
            let mut draft = manager
                .recipe(&id)
                .map(|r| r.to_draft())
                .unwrap_or_default();
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(cuisine) = cuisine {
                draft.cuisine = cuisine;
            }
            if let Some(ingredients) = ingredients {
                draft.ingredients = parse_ingredients(&ingredients);
            }
            if let Some(instructions) = instructions {
                draft.instructions = parse_instructions(&instructions);
            }
            let recipe = manager.update_recipe(&id, draft)?;
            println!("Updated recipe: {}", recipe.name);
            Ok(())
        }
        Commands::Delete { id, yes } => {
            let mut manager = manager;
            let id = resolve(&manager, &id)?;
            let name = manager
                .recipe(&id)
                .map(|r| r.name.clone())
                .unwrap_or_default();
            let question = format!(
                "Are you sure you want to delete \"{}\"? This cannot be undone.",
                name
            );
            if !yes && !confirm(&question)? {
                println!("Delete canceled.");
                return Ok(());
            }
            manager.delete_recipe(&id)?;
            println!("Deleted recipe: {}", name);
            Ok(())
        }
        Commands::Graph { json } => graph(&manager, json),
        Commands::Import { file, yes } => {
            let mut manager = manager;
            let content = std::fs::read_to_string(&file)
                .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
            let raw = parse_import(&content).wrap_err("Import file must be a JSON array")?;

            let question =
                "Importing will replace your current recipe collection. This cannot be undone. Are you sure?";
            if !yes && !confirm(question)? {
                println!("Import canceled.");
                return Ok(());
            }

            let outcome = manager.import_recipes(raw)?;
            if outcome.rejected > 0 {
                println!(
                    "Warning: {} invalid recipes were skipped.",
                    outcome.rejected
                );
            }
            println!(
                "Recipes imported successfully! {} recipes loaded.",
                outcome.accepted.len()
            );
            Ok(())
        }
        Commands::Export { file } => {
            let path = file.unwrap_or_else(|| {
                let today = chrono::Local::now().date_naive();
                PathBuf::from(default_export_filename(&config.export.file_prefix, today))
            });
            let json = export_json(&manager.export_recipes())?;
            std::fs::write(&path, json)
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            println!(
                "Exported {} recipes to {}",
                manager.recipes().len(),
                path.display()
            );
            Ok(())
        }
        Commands::Serve { port, no_open } => {
            let serve_config = serve::ServeConfig {
                port: port.unwrap_or(config.server.port),
                open_browser: config.server.open_browser && !no_open,
                export_prefix: config.export.file_prefix.clone(),
            };
            serve::start_server(manager, serve_config).await
        }
        Commands::InitConfig => Ok(()),
    }
}

/// Initialize tracing. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Opens the manager, printing load problems without failing.
fn open_manager(config: &Config) -> RecipeManager<FileStorage> {
    let storage = FileStorage::with_config(&config.storage);
    let (manager, report) = RecipeManager::open(storage, config);

    if let Some(failure) = &report.load_failure {
        eprintln!("{}\nStarting with an empty map.", failure);
    }
    if report.skipped > 0 {
        eprintln!(
            "Warning: {} stored entries could not be read as recipes and were skipped.",
            report.skipped
        );
    }
    if let Some(failure) = &report.persist_failure {
        eprintln!("Could not save seed recipes: {}", failure);
    }
    tracing::debug!(source = ?report.source, loaded = report.loaded, "Opened recipe collection");

    manager
}

fn resolve(manager: &RecipeManager<FileStorage>, raw: &str) -> Result<RecipeId> {
    manager
        .resolve_id(raw)
        .ok_or_else(|| eyre!("Recipe not found: {}", raw))
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn list(manager: &RecipeManager<FileStorage>) -> Result<()> {
    if manager.recipes().is_empty() {
        println!("No recipes found. Use 'ingredimap add' to create one.");
        return Ok(());
    }
    for recipe in manager.recipes() {
        let cuisine = if recipe.cuisine.is_empty() {
            "-"
        } else {
            recipe.cuisine.as_str()
        };
        println!("{:<40} {:<24} {}", recipe.id, recipe.name, cuisine);
    }
    Ok(())
}

fn show(manager: &RecipeManager<FileStorage>, raw: &str) -> Result<()> {
    let id = resolve(manager, raw)?;
    let Some(recipe) = manager.recipe(&id) else {
        bail!("Recipe not found: {}", raw);
    };

    println!("{}", recipe.name);
    println!("  ID: {}", recipe.id);
    println!("  Cuisine: {}", recipe.cuisine);
    println!("  Ingredients: {}", format_ingredients(&recipe.ingredients));
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    let graph = manager.graph();
    for neighbor in graph.neighbors(&id) {
        if let (Some(node), Some(edge)) = (graph.node(neighbor), graph.edge(&id, neighbor)) {
            println!("  ~ {} ({})", node.label, edge.title());
        }
    }
    Ok(())
}

fn graph(manager: &RecipeManager<FileStorage>, json: bool) -> Result<()> {
    let graph = manager.graph();
    if json {
        println!("{}", serde_json::to_string_pretty(&graph.graph_data())?);
        return Ok(());
    }

    println!(
        "{} recipes, {} connections (threshold {})",
        graph.node_count(),
        graph.edge_count(),
        graph.threshold()
    );

    let mut cuisines: Vec<&str> = Vec::new();
    for node in graph.nodes_in_order() {
        let cuisine = node.recipe.cuisine.as_str();
        if !cuisines.contains(&cuisine) {
            cuisines.push(cuisine);
        }
    }
    for cuisine in cuisines {
        if let Some(color) = graph.palette().assigned(cuisine) {
            println!("  [{}] {}", color, cuisine);
        }
    }

    for edge in graph.edges_in_order() {
        let label = |id: &RecipeId| {
            graph
                .node(id)
                .map(|n| n.label.clone())
                .unwrap_or_else(|| id.to_string())
        };
        println!(
            "  {} <-> {}: {}",
            label(&edge.source),
            label(&edge.target),
            edge.title()
        );
    }
    Ok(())
}
