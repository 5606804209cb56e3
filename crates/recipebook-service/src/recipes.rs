use recipebook_core::{Category, Recipe, RecipeId, UnitOfMeasure, validation};
use recipebook_storage::{DynCategoryStore, DynRecipeStore, DynUnitOfMeasureStore};
use tracing::{debug, info, instrument};

use crate::error::{Result, ServiceError};

/// Whole-recipe CRUD plus reference data lookups.
#[derive(Clone)]
pub struct RecipeService {
    recipes: DynRecipeStore,
    units: DynUnitOfMeasureStore,
    categories: DynCategoryStore,
}

impl RecipeService {
    pub fn new(
        recipes: DynRecipeStore,
        units: DynUnitOfMeasureStore,
        categories: DynCategoryStore,
    ) -> Self {
        Self {
            recipes,
            units,
            categories,
        }
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        self.recipes
            .list()
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "list_recipes",
                source,
            })
    }

    #[instrument(skip(self), fields(recipe_id = %recipe_id))]
    pub async fn find_recipe(&self, recipe_id: &RecipeId) -> Result<Recipe> {
        debug!("Loading recipe");
        self.recipes
            .find(recipe_id)
            .await
            .map_err(|err| ServiceError::from_storage("find_recipe", recipe_id, err))
    }

    /// Validates and persists a recipe. New recipes (no id) are created.
    #[instrument(skip(self, recipe), fields(recipe_id = ?recipe.id))]
    pub async fn save_recipe(&self, recipe: Recipe) -> Result<Recipe> {
        validation::validate_recipe(&recipe)
            .map_err(|err| ServiceError::validation("save_recipe", err))?;

        let key = recipe.id.clone().unwrap_or_else(|| RecipeId::new("<new>"));
        let saved = self
            .recipes
            .save(recipe)
            .await
            .map_err(|err| ServiceError::from_storage("save_recipe", &key, err))?;

        info!(
            saved_id = ?saved.id,
            version_id = ?saved.meta.version_id,
            "Recipe saved"
        );
        Ok(saved)
    }

    #[instrument(skip(self), fields(recipe_id = %recipe_id))]
    pub async fn delete_recipe(&self, recipe_id: &RecipeId) -> Result<()> {
        self.recipes
            .delete(recipe_id)
            .await
            .map_err(|err| ServiceError::from_storage("delete_recipe", recipe_id, err))?;
        info!("Recipe deleted");
        Ok(())
    }

    pub async fn find_unit_of_measure(&self, description: &str) -> Result<Option<UnitOfMeasure>> {
        self.units
            .find_by_description(description)
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "find_unit_of_measure",
                source,
            })
    }

    pub async fn list_units(&self) -> Result<Vec<UnitOfMeasure>> {
        self.units
            .list()
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "list_units",
                source,
            })
    }

    pub async fn find_category(&self, description: &str) -> Result<Option<Category>> {
        self.categories
            .find_by_description(description)
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "find_category",
                source,
            })
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.categories
            .list()
            .await
            .map_err(|source| ServiceError::Storage {
                operation: "list_categories",
                source,
            })
    }
}
