//! Ingredient reconciliation over the recipe aggregate.
//!
//! Ingredients have no storage of their own. Every operation here is one
//! read-modify-write cycle against the [`RecipeStore`]:
//!
//! 1. load the owning recipe (suspends on the store)
//! 2. mutate its ingredient set in memory (synchronous)
//! 3. persist the whole recipe (suspends on the store)
//!
//! Nothing is cached between calls and nothing is retried here. The loaded
//! recipe carries its version stamp into the save, so a concurrent writer
//! surfaces as [`ServiceError::Conflict`] instead of a lost update; callers that
//! want to retry wrap the call in [`crate::retry_on_conflict`].
//!
//! Dropping a returned future before it completes cancels the pending store
//! call. The store commits a recipe atomically, so a cancelled operation
//! leaves either the old recipe or the new one, never a mix.

use recipebook_core::{Ingredient, IngredientId, Recipe, RecipeId, validation};
use recipebook_storage::{DynRecipeStore, StorageError};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{Result, ServiceError};

const FIND_INGREDIENT: &str = "find_ingredient";
const SAVE_INGREDIENT: &str = "save_ingredient";
const DELETE_INGREDIENT: &str = "delete_ingredient";

#[derive(Clone)]
pub struct IngredientService {
    recipes: DynRecipeStore,
}

impl IngredientService {
    pub fn new(recipes: DynRecipeStore) -> Self {
        Self { recipes }
    }

    async fn load(&self, operation: &'static str, recipe_id: &RecipeId) -> Result<Recipe> {
        let recipe = self.recipes.find(recipe_id).await.map_err(|err| {
            if err.is_not_found() {
                warn!(operation, recipe_id = %recipe_id, "Recipe not found");
            }
            ServiceError::from_storage(operation, recipe_id, err)
        })?;

        let duplicates = recipe.duplicate_ingredient_ids();
        if !duplicates.is_empty() {
            error!(
                operation,
                recipe_id = %recipe_id,
                duplicates = ?duplicates,
                "Recipe holds duplicate ingredient ids; the first match will be used"
            );
        }
        Ok(recipe)
    }

    async fn persist(
        &self,
        operation: &'static str,
        recipe_id: &RecipeId,
        recipe: Recipe,
    ) -> Result<Recipe> {
        self.recipes.save(recipe).await.map_err(|err| {
            if err.is_version_conflict() {
                warn!(
                    operation,
                    recipe_id = %recipe_id,
                    error = %err,
                    "Concurrent modification detected"
                );
            }
            ServiceError::from_storage(operation, recipe_id, err)
        })
    }

    /// Returns the ingredient with `ingredient_id` from the recipe's set.
    ///
    /// # Errors
    ///
    /// `RecipeNotFound` if the recipe does not exist, `IngredientNotFound` if
    /// no ingredient in its set carries the identifier.
    #[instrument(skip(self), fields(recipe_id = %recipe_id, ingredient_id = %ingredient_id))]
    pub async fn find_ingredient(
        &self,
        recipe_id: &RecipeId,
        ingredient_id: &IngredientId,
    ) -> Result<Ingredient> {
        debug!("Looking up ingredient");
        let recipe = self.load(FIND_INGREDIENT, recipe_id).await?;

        recipe
            .find_ingredient(ingredient_id)
            .cloned()
            .ok_or_else(|| ServiceError::IngredientNotFound {
                operation: FIND_INGREDIENT,
                recipe_id: recipe_id.clone(),
                ingredient_id: ingredient_id.clone(),
            })
    }

    /// Updates the ingredient sharing the payload's identifier, or adds the
    /// payload as a new ingredient when no identifier matches.
    ///
    /// An update changes only description, amount and unit; the existing
    /// entry keeps its identity. Returns the ingredient as persisted, with any
    /// store-assigned identifier filled in.
    #[instrument(skip(self, payload), fields(recipe_id = %recipe_id, ingredient_id = ?payload.id))]
    pub async fn save_ingredient(
        &self,
        recipe_id: &RecipeId,
        payload: Ingredient,
    ) -> Result<Ingredient> {
        validation::validate_ingredient(&payload).map_err(|err| {
            debug!(category = %err.category(), error = %err, "Payload rejected");
            ServiceError::validation(SAVE_INGREDIENT, err)
        })?;

        let mut recipe = self.load(SAVE_INGREDIENT, recipe_id).await?;

        let (index, updated) = recipe.upsert_ingredient(payload);
        let target_id = recipe.ingredients()[index].id.clone();
        debug!(updated, position = index, "Ingredient reconciled");

        let saved = self.persist(SAVE_INGREDIENT, recipe_id, recipe).await?;

        // New ingredients without an id are found by position: the store keeps set order
        let persisted = match &target_id {
            Some(id) => saved.find_ingredient(id),
            None => saved.ingredients().get(index),
        };
        let ingredient = persisted.cloned().ok_or_else(|| ServiceError::Storage {
            operation: SAVE_INGREDIENT,
            source: StorageError::internal(format!(
                "saved recipe {recipe_id} lost the ingredient at position {index}"
            )),
        })?;

        info!(
            ingredient_id = ?ingredient.id,
            updated,
            ingredients = saved.ingredients().len(),
            "Ingredient saved"
        );
        Ok(ingredient)
    }

    /// Removes the ingredient with `ingredient_id`, if present, and persists the recipe.
    ///
    /// Removing an absent ingredient is not an error: the recipe is still
    /// persisted once and returned unchanged apart from its version stamp.
    #[instrument(skip(self), fields(recipe_id = %recipe_id, ingredient_id = %ingredient_id))]
    pub async fn delete_ingredient(
        &self,
        recipe_id: &RecipeId,
        ingredient_id: &IngredientId,
    ) -> Result<Recipe> {
        let mut recipe = self.load(DELETE_INGREDIENT, recipe_id).await?;

        let removed = recipe.remove_ingredient(ingredient_id);
        if removed == 0 {
            debug!("Ingredient not present, nothing to remove");
        }

        let saved = self.persist(DELETE_INGREDIENT, recipe_id, recipe).await?;
        info!(
            removed,
            ingredients = saved.ingredients().len(),
            "Ingredient deleted"
        );
        Ok(saved)
    }
}
