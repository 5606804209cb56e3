use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::id::{IngredientId, RecipeId};
use crate::ingredient::Ingredient;
use crate::reference::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Trivial,
    #[default]
    Easy,
    Moderate,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trivial => write!(f, "TRIVIAL"),
            Self::Easy => write!(f, "EASY"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Hard => write!(f, "HARD"),
        }
    }
}

/// Store-managed metadata. Callers carry it through a read-modify-write cycle
/// untouched so the store can detect concurrent writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RecipeMeta {
    #[serde(rename = "versionId", default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(
        rename = "lastUpdated",
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<OffsetDateTime>,
}

impl RecipeMeta {
    pub fn stamp(&mut self, version_id: impl Into<String>) {
        self.version_id = Some(version_id.into());
        self.last_updated = Some(OffsetDateTime::now_utc());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Notes {
    pub text: String,
    #[serde(rename = "recipeId", default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<RecipeId>,
}

impl Notes {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            recipe_id: None,
        }
    }
}

/// Aggregate root. Owns its ingredients and notes outright; categories are
/// shared reference data held by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecipeId>,
    #[serde(default)]
    pub meta: RecipeMeta,
    pub description: String,
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub directions: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<Notes>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<RecipeId>) -> Self {
        self.id = Some(id.into());
        self.relink();
        self
    }

    pub fn with_directions(mut self, directions: impl Into<String>) -> Self {
        self.directions = directions.into();
        self
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn notes(&self) -> Option<&Notes> {
        self.notes.as_ref()
    }

    pub fn set_notes(&mut self, mut notes: Notes) -> &mut Self {
        notes.recipe_id = self.id.clone();
        self.notes = Some(notes);
        self
    }

    pub fn add_category(&mut self, category: Category) -> &mut Self {
        if !self.categories.iter().any(|c| c.id == category.id) {
            self.categories.push(category);
        }
        self
    }

    /// Adds an ingredient to the set, pointing its back-reference at this recipe.
    /// Returns the position of the new entry.
    pub fn add_ingredient(&mut self, mut ingredient: Ingredient) -> usize {
        ingredient.recipe_id = self.id.clone();
        self.ingredients.push(ingredient);
        self.ingredients.len() - 1
    }

    pub fn find_ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.has_id(id))
    }

    pub fn ingredient_position(&self, id: &IngredientId) -> Option<usize> {
        self.ingredients.iter().position(|i| i.has_id(id))
    }

    /// Updates the first ingredient sharing `payload`'s identifier in place, or
    /// adds `payload` as a new ingredient when no identifier matches.
    ///
    /// Returns the position of the affected entry and whether it was an update.
    pub fn upsert_ingredient(&mut self, payload: Ingredient) -> (usize, bool) {
        let existing = payload
            .id
            .as_ref()
            .and_then(|id| self.ingredient_position(id));

        match existing {
            Some(index) => {
                self.ingredients[index].update_value(&payload);
                (index, true)
            }
            None => (self.add_ingredient(payload), false),
        }
    }

    /// Removes every ingredient with the given identifier. Returns how many were removed.
    pub fn remove_ingredient(&mut self, id: &IngredientId) -> usize {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| !i.has_id(id));
        before - self.ingredients.len()
    }

    /// Identifiers that occur on more than one ingredient.
    pub fn duplicate_ingredient_ids(&self) -> Vec<IngredientId> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for id in self.ingredients.iter().filter_map(|i| i.id.as_ref()) {
            if !seen.insert(id) && !duplicates.contains(id) {
                duplicates.push(id.clone());
            }
        }
        duplicates
    }

    /// Assigns identifiers to ingredients that lack one.
    pub fn assign_ingredient_ids(&mut self) {
        for ingredient in self.ingredients.iter_mut().filter(|i| i.id.is_none()) {
            ingredient.id = Some(IngredientId::generate());
        }
    }

    /// Points every owned entity's back-reference at this recipe's current id.
    pub fn relink(&mut self) {
        for ingredient in &mut self.ingredients {
            ingredient.recipe_id = self.id.clone();
        }
        if let Some(notes) = self.notes.as_mut() {
            notes.recipe_id = self.id.clone();
        }
    }

    pub fn is_linked(&self) -> bool {
        self.ingredients.iter().all(|i| i.recipe_id == self.id)
            && self
                .notes
                .as_ref()
                .is_none_or(|notes| notes.recipe_id == self.id)
    }
}
