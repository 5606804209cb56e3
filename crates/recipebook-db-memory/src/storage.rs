use crate::factory::StorageOptions;
use async_trait::async_trait;
use papaya::{Compute, HashMap as PapayaHashMap, Operation};
use recipebook_core::{Recipe, RecipeId};
use recipebook_storage::{RecipeStore, StorageError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

const ENTITY: &str = "Recipe";

/// In-memory recipe store using papaya lock-free HashMap.
///
/// This storage implementation provides:
/// - Lock-free concurrent access via papaya::HashMap
/// - Whole-aggregate writes committed with a single compare-and-swap
/// - Optimistic concurrency on `meta.version_id`
/// - Identifier assignment for new recipes and ingredients
#[derive(Debug)]
pub struct InMemoryRecipeStore {
    /// Recipes keyed by id, each holding its full ingredient set
    pub(crate) data: Arc<PapayaHashMap<RecipeId, Recipe>>,
    /// Atomic counter for generating version IDs
    pub(crate) version_counter: AtomicU64,
    /// Storage configuration options (soft hints for in-memory backend)
    _options: StorageOptions,
}

impl InMemoryRecipeStore {
    /// Creates a new in-memory store with default options.
    pub fn new() -> Self {
        Self::with_options(StorageOptions::default())
    }

    /// Creates a new in-memory store with the given options.
    pub fn with_options(options: StorageOptions) -> Self {
        let data = match options.preallocate_items {
            Some(capacity) => PapayaHashMap::with_capacity(capacity),
            None => PapayaHashMap::new(),
        };
        Self {
            data: Arc::new(data),
            version_counter: AtomicU64::new(1),
            _options: options,
        }
    }

    /// Generates the next version ID.
    pub(crate) fn next_version(&self) -> String {
        self.version_counter
            .fetch_add(1, Ordering::SeqCst)
            .to_string()
    }

    pub fn count(&self) -> usize {
        self.data.pin().len()
    }

    pub fn exists(&self, id: &RecipeId) -> bool {
        self.data.pin().contains_key(id)
    }

    /// Current version stamp of a stored recipe.
    pub fn current_version(&self, id: &RecipeId) -> Option<String> {
        self.data
            .pin()
            .get(id)
            .and_then(|recipe| recipe.meta.version_id.clone())
    }

    /// Gives the recipe its canonical stored shape: ids everywhere, back-references
    /// pointing at the recipe, and a fresh version stamp.
    fn prepare(&self, recipe: &mut Recipe) -> Result<RecipeId, StorageError> {
        let duplicates = recipe.duplicate_ingredient_ids();
        if !duplicates.is_empty() {
            let ids: Vec<&str> = duplicates.iter().map(|id| id.as_str()).collect();
            return Err(StorageError::invalid_recipe(format!(
                "duplicate ingredient ids: {}",
                ids.join(", ")
            )));
        }

        let id = recipe.id.clone().unwrap_or_else(RecipeId::generate);
        recipe.id = Some(id.clone());
        recipe.assign_ingredient_ids();
        recipe.relink();
        Ok(id)
    }
}

impl Default for InMemoryRecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn find(&self, id: &RecipeId) -> Result<Recipe, StorageError> {
        let guard = self.data.pin();
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(ENTITY, id.as_str()))
    }

    async fn save(&self, mut recipe: Recipe) -> Result<Recipe, StorageError> {
        let id = self.prepare(&mut recipe)?;
        let expected = recipe.meta.version_id.take();
        recipe.meta.stamp(self.next_version());

        // Use block scope so the pinned guard never outlives the write
        {
            let guard = self.data.pin();
            let outcome = guard.compute(id.clone(), |entry| match (entry, expected.as_deref()) {
                (Some((_, current)), Some(expected)) => {
                    let actual = current.meta.version_id.as_deref().unwrap_or_default();
                    if actual == expected {
                        Operation::Insert(recipe.clone())
                    } else {
                        Operation::Abort(StorageError::version_conflict(expected, actual))
                    }
                }
                // A versioned write for a recipe that is gone must not resurrect it
                (None, Some(_)) => Operation::Abort(StorageError::not_found(ENTITY, id.as_str())),
                (_, None) => Operation::Insert(recipe.clone()),
            });

            if let Compute::Aborted(err) = outcome {
                return Err(err);
            }
        }

        debug!(
            recipe_id = %id,
            version_id = recipe.meta.version_id.as_deref().unwrap_or_default(),
            ingredients = recipe.ingredients().len(),
            "Recipe saved"
        );
        Ok(recipe)
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), StorageError> {
        let guard = self.data.pin();
        // Deleting an absent recipe is a successful no-op
        if guard.remove(id).is_some() {
            debug!(recipe_id = %id, "Recipe deleted");
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        let guard = self.data.pin();
        let mut recipes: Vec<Recipe> = guard.iter().map(|(_, recipe)| recipe.clone()).collect();
        recipes.sort_by(|a, b| a.description.cmp(&b.description));
        Ok(recipes)
    }

    fn backend_name(&self) -> &'static str {
        "in-memory-papaya"
    }
}
