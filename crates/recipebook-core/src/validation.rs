//! Field-level validation for recipes and ingredient payloads.
//!
//! Returns the first violation found; callers reject the whole payload.

use bigdecimal::BigDecimal;

use crate::error::{CoreError, Result};
use crate::ingredient::Ingredient;
use crate::recipe::Recipe;

fn require_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "must not be blank"));
    }
    Ok(())
}

pub fn validate_ingredient(ingredient: &Ingredient) -> Result<()> {
    require_not_blank("ingredient.description", &ingredient.description)?;
    if ingredient.amount < BigDecimal::from(0) {
        return Err(CoreError::validation(
            "ingredient.amount",
            format!("must be >= 0, got {}", ingredient.amount),
        ));
    }
    Ok(())
}

pub fn validate_recipe(recipe: &Recipe) -> Result<()> {
    require_not_blank("description", &recipe.description)?;
    require_not_blank("directions", &recipe.directions)?;

    if let Some(url) = recipe.url.as_deref().filter(|u| !u.trim().is_empty()) {
        url::Url::parse(url)
            .map_err(|e| CoreError::validation("url", format!("'{url}' is not a valid URL: {e}")))?;
    }

    for ingredient in recipe.ingredients() {
        validate_ingredient(ingredient)?;
    }
    Ok(())
}
