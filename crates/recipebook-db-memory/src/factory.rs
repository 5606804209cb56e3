use std::sync::Arc;

use recipebook_storage::{DynCategoryStore, DynRecipeStore, DynUnitOfMeasureStore};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{InMemoryRecipeStore, InMemoryReferenceData};

/// Supported storage backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    /// In-memory storage implemented on top of papaya::HashMap
    #[default]
    InMemoryPapaya,
}

/// Storage-specific configuration options.
///
/// These are best-effort for the in-memory backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageOptions {
    /// Initial recipe map capacity.
    #[serde(default)]
    pub preallocate_items: Option<usize>,
    /// Load the standard units of measure and categories.
    #[serde(default = "default_seed_reference_data")]
    pub seed_reference_data: bool,
}

fn default_seed_reference_data() -> bool {
    true
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            preallocate_items: None,
            seed_reference_data: default_seed_reference_data(),
        }
    }
}

/// Factory configuration to construct a storage instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub options: StorageOptions,
}

/// The set of stores a running application needs.
#[derive(Clone)]
pub struct Storage {
    pub recipes: DynRecipeStore,
    pub units: DynUnitOfMeasureStore,
    pub categories: DynCategoryStore,
}

/// Create a storage instance based on the provided configuration.
pub fn create_storage(config: &StorageConfig) -> Storage {
    match config.backend {
        StorageBackend::InMemoryPapaya => {
            let recipes = Arc::new(InMemoryRecipeStore::with_options(config.options.clone()));
            let reference = Arc::new(if config.options.seed_reference_data {
                InMemoryReferenceData::with_defaults()
            } else {
                InMemoryReferenceData::new()
            });
            info!(
                backend = "in-memory-papaya",
                seed_reference_data = config.options.seed_reference_data,
                "Storage initialized"
            );
            Storage {
                recipes,
                units: reference.clone(),
                categories: reference,
            }
        }
    }
}
