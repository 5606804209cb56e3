//! Error types surfaced by the recipe and ingredient services.
//!
//! Every variant names the operation that failed and the identifiers involved,
//! so a log line or a caller-facing message is diagnosable on its own.

use recipebook_core::{CoreError, IngredientId, RecipeId};
use recipebook_storage::{ErrorCategory, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{operation}: recipe {recipe_id} not found")]
    RecipeNotFound {
        operation: &'static str,
        recipe_id: RecipeId,
    },

    #[error("{operation}: ingredient {ingredient_id} not found in recipe {recipe_id}")]
    IngredientNotFound {
        operation: &'static str,
        recipe_id: RecipeId,
        ingredient_id: IngredientId,
    },

    #[error("{operation}: recipe {recipe_id} was modified concurrently")]
    Conflict {
        operation: &'static str,
        recipe_id: RecipeId,
        #[source]
        source: StorageError,
    },

    #[error("{operation}: {source}")]
    Validation {
        operation: &'static str,
        #[source]
        source: CoreError,
    },

    #[error("{operation}: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: StorageError,
    },
}

impl ServiceError {
    /// Maps a store failure for `recipe_id` onto the service taxonomy.
    pub fn from_storage(operation: &'static str, recipe_id: &RecipeId, err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => Self::RecipeNotFound {
                operation,
                recipe_id: recipe_id.clone(),
            },
            StorageError::VersionConflict { .. } => Self::Conflict {
                operation,
                recipe_id: recipe_id.clone(),
                source: err,
            },
            other => Self::Storage {
                operation,
                source: other,
            },
        }
    }

    pub fn validation(operation: &'static str, source: CoreError) -> Self {
        Self::Validation { operation, source }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Self::RecipeNotFound { operation, .. }
            | Self::IngredientNotFound { operation, .. }
            | Self::Conflict { operation, .. }
            | Self::Validation { operation, .. }
            | Self::Storage { operation, .. } => operation,
        }
    }

    pub fn is_recipe_not_found(&self) -> bool {
        matches!(self, Self::RecipeNotFound { .. })
    }

    pub fn is_ingredient_not_found(&self) -> bool {
        matches!(self, Self::IngredientNotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RecipeNotFound { .. } | Self::IngredientNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::Storage { source, .. } => source.category(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
