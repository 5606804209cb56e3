use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "recipebook")]
#[command(about = "Recipebook: browse recipes and edit their ingredients")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (overrides RECIPEBOOK_CONFIG env var)
    #[arg(short, long, global = true, env = "RECIPEBOOK_CONFIG")]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all recipes
    List,
    /// Show a single recipe
    Show {
        /// Recipe id
        recipe_id: String,
    },
    /// List units of measure
    Units,
    /// Add, update and delete an ingredient on the first recipe
    Demo,
}
