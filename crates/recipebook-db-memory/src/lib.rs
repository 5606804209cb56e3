//! In-memory recipe storage backend for Recipebook.
//!
//! This crate provides an in-memory implementation of the storage traits
//! from `recipebook-storage`, using papaya lock-free HashMap for concurrent access.
//!
//! # Example
//!
//! ```ignore
//! use recipebook_db_memory::InMemoryRecipeStore;
//! use recipebook_storage::RecipeStore;
//!
//! let store = InMemoryRecipeStore::new();
//! let saved = store.save(Recipe::new("Guacamole")).await?;
//! assert!(saved.id.is_some());
//! ```

pub mod factory;
pub mod reference;
pub mod storage;

// Re-export the storage traits for convenience
pub use recipebook_storage::{CategoryStore, RecipeStore, StorageError, UnitOfMeasureStore};

pub use factory::{Storage, StorageBackend, StorageConfig, StorageOptions, create_storage};
pub use reference::InMemoryReferenceData;
pub use storage::InMemoryRecipeStore;

/// Creates a new in-memory storage with the default configuration.
pub fn create_in_memory_storage() -> Storage {
    create_storage(&StorageConfig::default())
}
