//! Storage traits for the recipe storage abstraction layer.
//!
//! This module defines the core traits that all storage backends must implement.

use async_trait::async_trait;
use recipebook_core::{Category, Recipe, RecipeId, UnitOfMeasure};

use crate::error::StorageError;

/// Persistence contract for the recipe aggregate.
///
/// Implementations must be thread-safe (`Send + Sync`). Each call is atomic:
/// a `save` either commits the whole recipe graph or nothing.
///
/// # Example
///
/// ```ignore
/// use recipebook_storage::{RecipeStore, StorageError};
///
/// async fn count_ingredients(
///     store: &dyn RecipeStore,
///     id: &RecipeId,
/// ) -> Result<usize, StorageError> {
///     Ok(store.find(id).await?.ingredients().len())
/// }
/// ```
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Loads a recipe with its full ingredient set and current version stamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no recipe has this identifier.
    async fn find(&self, id: &RecipeId) -> Result<Recipe, StorageError>;

    /// Persists the full recipe graph and returns its canonical stored form.
    ///
    /// The stored ingredient set is replaced by exactly the submitted set, in
    /// the submitted order. Backends must:
    /// - assign an identifier to the recipe and to every ingredient lacking one
    /// - point every ingredient's and the notes' back-reference at the recipe
    /// - stamp a new `meta.version_id`
    ///
    /// When `meta.version_id` is set on the submitted recipe, the write only
    /// succeeds if the stored version still matches it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::VersionConflict` if the stored version moved on.
    /// Returns `StorageError::InvalidRecipe` if the graph is malformed.
    async fn save(&self, recipe: Recipe) -> Result<Recipe, StorageError>;

    /// Deletes a recipe together with everything it owns.
    ///
    /// Deleting an absent recipe succeeds.
    async fn delete(&self, id: &RecipeId) -> Result<(), StorageError>;

    /// Returns all stored recipes.
    async fn list(&self) -> Result<Vec<Recipe>, StorageError>;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Read access to unit-of-measure reference data.
#[async_trait]
pub trait UnitOfMeasureStore: Send + Sync {
    /// Finds a unit by its exact description (e.g. "Teaspoon").
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<UnitOfMeasure>, StorageError>;

    /// Returns all units.
    async fn list(&self) -> Result<Vec<UnitOfMeasure>, StorageError>;
}

/// Read access to category reference data.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Finds a category by its exact description (e.g. "Mexican").
    async fn find_by_description(&self, description: &str)
    -> Result<Option<Category>, StorageError>;

    /// Returns all categories.
    async fn list(&self) -> Result<Vec<Category>, StorageError>;
}
