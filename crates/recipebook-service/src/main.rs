mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cli::{Cli, Commands};
use recipebook_core::{BigDecimal, Ingredient, RecipeId};
use recipebook_db_memory::create_storage;
use recipebook_service::config::loader::{DEFAULT_CONFIG_FILE, load_config};
use recipebook_service::{
    AppConfig, AppServices, observability, retry_on_conflict, seed_sample_data,
};

#[tokio::main]
async fn main() {
    if let Err(e) = dotenvy::dotenv() {
        // Running without a .env file is the normal case
        let missing = matches!(
            e,
            dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        );
        if !missing {
            eprintln!("Warning: Failed to load .env file: {e}");
        }
    }

    observability::init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_FILE);

    let cfg = load_config(Some(config_path))
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("loading configuration from {config_path}"))?;
    observability::apply_logging_level(&cfg.logging.level);
    tracing::info!(path = %config_path, "Configuration loaded");

    let storage = create_storage(&cfg.storage);
    let services = AppServices::new(&storage);
    if cfg.bootstrap.seed_sample_data {
        seed_sample_data(&services.recipes).await?;
    }

    match cli.command {
        Commands::List => print_json(&services.recipes.list_recipes().await?)?,
        Commands::Show { recipe_id } => {
            let recipe_id: RecipeId = recipe_id.parse()?;
            print_json(&services.recipes.find_recipe(&recipe_id).await?)?;
        }
        Commands::Units => print_json(&services.recipes.list_units().await?)?,
        Commands::Demo => demo(&services, &cfg).await?,
    }
    Ok(())
}

/// Walks one ingredient through add, update and delete on the first recipe.
async fn demo(services: &AppServices, cfg: &AppConfig) -> Result<()> {
    let recipe = services
        .recipes
        .list_recipes()
        .await?
        .into_iter()
        .next()
        .context("no recipes available; enable bootstrap.seed_sample_data")?;
    let recipe_id = recipe.id.context("stored recipe has no id")?;

    let mut payload = Ingredient::new("jalapeno, minced", BigDecimal::from(1));
    if let Some(uom) = services.recipes.find_unit_of_measure("Each").await? {
        payload = payload.with_uom(uom);
    }

    let added = retry_on_conflict(&cfg.retry, || {
        services.ingredients.save_ingredient(&recipe_id, payload.clone())
    })
    .await?;
    println!("added:");
    print_json(&added)?;

    let ingredient_id = added.id.clone().context("saved ingredient has no id")?;
    let mut change = added.clone();
    change.amount = BigDecimal::from(2);
    let updated = retry_on_conflict(&cfg.retry, || {
        services.ingredients.save_ingredient(&recipe_id, change.clone())
    })
    .await?;
    println!("updated:");
    print_json(&updated)?;

    let found = services
        .ingredients
        .find_ingredient(&recipe_id, &ingredient_id)
        .await?;
    println!("found:");
    print_json(&found)?;

    let after = retry_on_conflict(&cfg.retry, || {
        services.ingredients.delete_ingredient(&recipe_id, &ingredient_id)
    })
    .await?;
    println!(
        "deleted: recipe {} now has {} ingredients",
        recipe_id,
        after.ingredients().len()
    );
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
