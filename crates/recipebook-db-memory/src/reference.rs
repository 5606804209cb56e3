//! In-memory reference data: units of measure and categories, keyed by description.

use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;
use recipebook_core::{Category, UnitOfMeasure};
use recipebook_storage::{CategoryStore, StorageError, UnitOfMeasureStore};

const DEFAULT_UNITS: &[(&str, &str)] = &[
    ("uom-teaspoon", "Teaspoon"),
    ("uom-tablespoon", "Tablespoon"),
    ("uom-cup", "Cup"),
    ("uom-pinch", "Pinch"),
    ("uom-ounce", "Ounce"),
    ("uom-each", "Each"),
    ("uom-dash", "Dash"),
    ("uom-pint", "Pint"),
];

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("cat-american", "American"),
    ("cat-italian", "Italian"),
    ("cat-mexican", "Mexican"),
    ("cat-fast-food", "Fast Food"),
];

#[derive(Debug, Default)]
pub struct InMemoryReferenceData {
    units: PapayaHashMap<String, UnitOfMeasure>,
    categories: PapayaHashMap<String, Category>,
}

impl InMemoryReferenceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the standard units and categories.
    pub fn with_defaults() -> Self {
        let data = Self::new();
        for (id, description) in DEFAULT_UNITS {
            data.insert_unit(UnitOfMeasure::new(*id, *description));
        }
        for (id, description) in DEFAULT_CATEGORIES {
            data.insert_category(Category::new(*id, *description));
        }
        data
    }

    pub fn insert_unit(&self, unit: UnitOfMeasure) {
        self.units.pin().insert(unit.description.clone(), unit);
    }

    pub fn insert_category(&self, category: Category) {
        self.categories
            .pin()
            .insert(category.description.clone(), category);
    }
}

#[async_trait]
impl UnitOfMeasureStore for InMemoryReferenceData {
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<UnitOfMeasure>, StorageError> {
        Ok(self.units.pin().get(description).cloned())
    }

    async fn list(&self) -> Result<Vec<UnitOfMeasure>, StorageError> {
        let mut units: Vec<UnitOfMeasure> =
            self.units.pin().iter().map(|(_, u)| u.clone()).collect();
        units.sort_by(|a, b| a.description.cmp(&b.description));
        Ok(units)
    }
}

#[async_trait]
impl CategoryStore for InMemoryReferenceData {
    async fn find_by_description(
        &self,
        description: &str,
    ) -> Result<Option<Category>, StorageError> {
        Ok(self.categories.pin().get(description).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, StorageError> {
        let mut categories: Vec<Category> =
            self.categories.pin().iter().map(|(_, c)| c.clone()).collect();
        categories.sort_by(|a, b| a.description.cmp(&b.description));
        Ok(categories)
    }
}
