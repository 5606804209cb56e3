//! Reference data shared between recipes: units of measure and categories.
//!
//! These are looked up by description and never mutated by recipe operations.

use serde::{Deserialize, Serialize};

use crate::id::{CategoryId, UnitOfMeasureId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    pub id: UnitOfMeasureId,
    pub description: String,
}

impl UnitOfMeasure {
    pub fn new(id: impl Into<UnitOfMeasureId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub description: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}
