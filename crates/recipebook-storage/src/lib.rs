//! # recipebook-storage
//!
//! Storage abstraction layer for Recipebook.
//!
//! This crate defines the traits that all storage backends must implement.
//! It does not contain any implementations - those are provided by separate crates.
//!
//! ## Overview
//!
//! The main trait is [`RecipeStore`]. The recipe is the unit of persistence:
//! ingredients and notes are read and written only as part of their owning
//! recipe, so there is no ingredient-level storage API.
//!
//! Reference data (units of measure, categories) is read through
//! [`UnitOfMeasureStore`] and [`CategoryStore`].
//!
//! ## Example
//!
//! ```ignore
//! use recipebook_storage::{RecipeStore, StorageError};
//! use recipebook_core::{Ingredient, RecipeId};
//!
//! async fn add_salt(store: &dyn RecipeStore, id: &RecipeId) -> Result<(), StorageError> {
//!     let mut recipe = store.find(id).await?;
//!     recipe.add_ingredient(Ingredient::new("Salt", 1.into()));
//!     store.save(recipe).await?;
//!     Ok(())
//! }
//! ```

mod error;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::{CategoryStore, RecipeStore, UnitOfMeasureStore};

/// Type alias for a shared recipe store trait object.
pub type DynRecipeStore = std::sync::Arc<dyn RecipeStore>;

/// Type alias for a shared unit-of-measure store trait object.
pub type DynUnitOfMeasureStore = std::sync::Arc<dyn UnitOfMeasureStore>;

/// Type alias for a shared category store trait object.
pub type DynCategoryStore = std::sync::Arc<dyn CategoryStore>;
