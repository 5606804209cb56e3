pub mod error;
pub mod id;
pub mod ingredient;
pub mod recipe;
pub mod reference;
pub mod validation;

pub use error::{CoreError, ErrorCategory, Result};
pub use id::{CategoryId, IngredientId, RecipeId, UnitOfMeasureId, generate_id};
pub use ingredient::Ingredient;
pub use recipe::{Difficulty, Notes, Recipe, RecipeMeta};
pub use reference::{Category, UnitOfMeasure};

// Re-exported so downstream crates build amounts without a direct dependency.
pub use bigdecimal::BigDecimal;
