//! Recipe and ingredient services for Recipebook.
//!
//! [`IngredientService`] reconciles a single ingredient against its owning
//! recipe: find, save (update or add) and delete, each as one load and one
//! save of the whole recipe through a [`recipebook_storage::RecipeStore`].
//! [`RecipeService`] covers whole-recipe CRUD and reference data lookups.
//!
//! # Example
//!
//! ```ignore
//! use recipebook_db_memory::create_in_memory_storage;
//! use recipebook_service::AppServices;
//!
//! let services = AppServices::new(&create_in_memory_storage());
//! let ingredient = services
//!     .ingredients
//!     .find_ingredient(&recipe_id, &ingredient_id)
//!     .await?;
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod observability;
pub mod recipes;
pub mod retry;

pub use bootstrap::{BootstrapStats, seed_sample_data};
pub use config::AppConfig;
pub use error::{Result, ServiceError};
pub use ingredients::IngredientService;
pub use recipes::RecipeService;
pub use retry::{RetryPolicy, retry_on_conflict};

use recipebook_db_memory::Storage;

/// Both services wired to the same set of stores.
#[derive(Clone)]
pub struct AppServices {
    pub recipes: RecipeService,
    pub ingredients: IngredientService,
}

impl AppServices {
    pub fn new(storage: &Storage) -> Self {
        Self {
            recipes: RecipeService::new(
                storage.recipes.clone(),
                storage.units.clone(),
                storage.categories.clone(),
            ),
            ingredients: IngredientService::new(storage.recipes.clone()),
        }
    }
}
