//! Ingredients owned by a recipe.
//!
//! An ingredient has two notions of equality:
//! - identity: both identifiers are present and equal ([`Ingredient::same_identity`])
//! - value: description, amount and unit match ([`Ingredient::is_equal_by_value`])
//!
//! The two are independent. Value-equal ingredients with different ids are
//! not the same ingredient.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::id::{IngredientId, RecipeId};
use crate::reference::UnitOfMeasure;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IngredientId>,
    pub description: String,
    pub amount: BigDecimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<UnitOfMeasure>,
    /// Owning recipe. Maintained by [`crate::Recipe`] and the store, never set by callers.
    #[serde(rename = "recipeId", default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<RecipeId>,
}

impl Ingredient {
    /// Creates a transient ingredient with no identifier and no owner.
    pub fn new(description: impl Into<String>, amount: BigDecimal) -> Self {
        Self {
            id: None,
            description: description.into(),
            amount,
            uom: None,
            recipe_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<IngredientId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_uom(mut self, uom: UnitOfMeasure) -> Self {
        self.uom = Some(uom);
        self
    }

    pub fn has_id(&self, id: &IngredientId) -> bool {
        self.id.as_ref() == Some(id)
    }

    pub fn same_identity(&self, other: &Ingredient) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn is_equal_by_value(&self, other: &Ingredient) -> bool {
        self.description == other.description
            && self.amount == other.amount
            && self.uom == other.uom
    }

    /// Copies the mutable value fields from `other`, keeping identity and owner.
    pub fn update_value(&mut self, other: &Ingredient) -> &mut Self {
        self.description = other.description.clone();
        self.amount = other.amount.clone();
        self.uom = other.uom.clone();
        self
    }
}
