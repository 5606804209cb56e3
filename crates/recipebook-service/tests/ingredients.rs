//! Integration tests for ingredient reconciliation.
//!
//! These run the services against the real in-memory store. Two small
//! wrappers around it observe and perturb the store traffic: one counts
//! calls, the other slips in a competing write right before a save. A third
//! store hands out a recipe the in-memory backend would refuse to hold.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use recipebook_core::{BigDecimal, Ingredient, IngredientId, Recipe, RecipeId, UnitOfMeasure};
use recipebook_db_memory::InMemoryRecipeStore;
use recipebook_service::{IngredientService, RetryPolicy, ServiceError, retry_on_conflict};
use recipebook_storage::{RecipeStore, StorageError};

// =============================================================================
// Store wrappers
// =============================================================================

/// Counts `find` and `save` calls before delegating.
#[derive(Default)]
struct CountingStore {
    inner: InMemoryRecipeStore,
    finds: AtomicUsize,
    saves: AtomicUsize,
}

impl CountingStore {
    fn calls(&self) -> (usize, usize) {
        (
            self.finds.load(Ordering::SeqCst),
            self.saves.load(Ordering::SeqCst),
        )
    }

    fn reset(&self) {
        self.finds.store(0, Ordering::SeqCst);
        self.saves.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl RecipeStore for CountingStore {
    async fn find(&self, id: &RecipeId) -> Result<Recipe, StorageError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find(id).await
    }

    async fn save(&self, recipe: Recipe) -> Result<Recipe, StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(recipe).await
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), StorageError> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        self.inner.list().await
    }

    fn backend_name(&self) -> &'static str {
        "counting"
    }
}

/// On the first save only, another writer adds "Pepper" to the stored recipe
/// before the caller's save reaches the store.
#[derive(Default)]
struct InterleavingStore {
    inner: InMemoryRecipeStore,
    fired: AtomicBool,
}

#[async_trait]
impl RecipeStore for InterleavingStore {
    async fn find(&self, id: &RecipeId) -> Result<Recipe, StorageError> {
        self.inner.find(id).await
    }

    async fn save(&self, recipe: Recipe) -> Result<Recipe, StorageError> {
        // Creating a recipe is not a race; only updates get a competitor
        if let Some(id) = recipe.id.as_ref() {
            if !self.fired.swap(true, Ordering::SeqCst) {
                let mut competing = self.inner.find(id).await?;
                competing.add_ingredient(Ingredient::new("Pepper", BigDecimal::from(1)));
                self.inner.save(competing).await?;
            }
        }
        self.inner.save(recipe).await
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), StorageError> {
        self.inner.delete(id).await
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        self.inner.list().await
    }

    fn backend_name(&self) -> &'static str {
        "interleaving"
    }
}

/// Serves one recipe whose ingredient set repeats an id, and keeps whatever is
/// saved without checking it.
struct DuplicateIdStore {
    recipe: Mutex<Recipe>,
}

impl DuplicateIdStore {
    fn new() -> Self {
        let mut recipe = Recipe::new("Doubled").with_id("dup");
        recipe.add_ingredient(Ingredient::new("A", BigDecimal::from(1)).with_id("1"));
        recipe.add_ingredient(Ingredient::new("B", BigDecimal::from(2)).with_id("1"));
        Self {
            recipe: Mutex::new(recipe),
        }
    }

    fn stored(&self) -> Recipe {
        self.recipe.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeStore for DuplicateIdStore {
    async fn find(&self, id: &RecipeId) -> Result<Recipe, StorageError> {
        let recipe = self.stored();
        if recipe.id.as_ref() == Some(id) {
            Ok(recipe)
        } else {
            Err(StorageError::not_found("Recipe", id.as_str()))
        }
    }

    async fn save(&self, recipe: Recipe) -> Result<Recipe, StorageError> {
        *self.recipe.lock().unwrap() = recipe.clone();
        Ok(recipe)
    }

    async fn delete(&self, _id: &RecipeId) -> Result<(), StorageError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Recipe>, StorageError> {
        Ok(vec![self.stored()])
    }

    fn backend_name(&self) -> &'static str {
        "duplicate-id"
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn cup() -> UnitOfMeasure {
    UnitOfMeasure::new("uom-cup", "Cup")
}

fn pancakes() -> Recipe {
    let mut recipe = Recipe::new("Pancakes").with_directions("Mix and fry.");
    recipe.add_ingredient(
        Ingredient::new("Flour", BigDecimal::from(2))
            .with_id("1")
            .with_uom(cup()),
    );
    recipe.add_ingredient(Ingredient::new("Sugar", BigDecimal::from(1)).with_id("2"));
    recipe
}

async fn seeded<S: RecipeStore + 'static>(
    store: Arc<S>,
    recipe: Recipe,
) -> (IngredientService, RecipeId) {
    let saved = store.save(recipe).await.expect("seed recipe");
    let id = saved.id.expect("store assigns recipe id");
    (IngredientService::new(store), id)
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn add_to_empty_recipe() {
    let store = Arc::new(InMemoryRecipeStore::new());
    let recipe = Recipe::new("Plain").with_directions("Season.");
    let (service, recipe_id) = seeded(store.clone(), recipe).await;

    let saved = service
        .save_ingredient(&recipe_id, Ingredient::new("Salt", BigDecimal::from(1)))
        .await
        .expect("save salt");

    assert!(saved.id.is_some());
    assert_eq!(saved.recipe_id.as_ref(), Some(&recipe_id));
    let stored = store.find(&recipe_id).await.unwrap();
    assert_eq!(stored.ingredients().len(), 1);
}

#[tokio::test]
async fn update_existing_keeps_set_size() {
    let store = Arc::new(InMemoryRecipeStore::new());
    let (service, recipe_id) = seeded(store.clone(), pancakes()).await;

    let payload = Ingredient::new("Flour", BigDecimal::from(5))
        .with_id("1")
        .with_uom(cup());
    let saved = service.save_ingredient(&recipe_id, payload).await.unwrap();

    assert_eq!(saved.id, Some(IngredientId::from("1")));
    assert_eq!(saved.amount, BigDecimal::from(5));

    let stored = store.find(&recipe_id).await.unwrap();
    assert_eq!(stored.ingredients().len(), 2);
    // Only the matched entry changed
    let sugar = stored.find_ingredient(&IngredientId::from("2")).unwrap();
    assert_eq!(sugar.amount, BigDecimal::from(1));
    assert_eq!(stored.ingredients()[0].description, "Flour");
}

#[tokio::test]
async fn find_unknown_ingredient_is_not_found() {
    let store = Arc::new(InMemoryRecipeStore::new());
    let (service, recipe_id) = seeded(store, pancakes()).await;

    let err = service
        .find_ingredient(&recipe_id, &IngredientId::from("99"))
        .await
        .unwrap_err();

    assert!(err.is_ingredient_not_found());
    assert!(matches!(
        err,
        ServiceError::IngredientNotFound { ref ingredient_id, .. } if ingredient_id.as_str() == "99"
    ));
}

#[tokio::test]
async fn delete_twice_is_idempotent() {
    let store = Arc::new(InMemoryRecipeStore::new());
    let (service, recipe_id) = seeded(store, pancakes()).await;
    let sugar = IngredientId::from("2");

    let first = service.delete_ingredient(&recipe_id, &sugar).await.unwrap();
    assert_eq!(first.ingredients().len(), 1);
    assert!(first.find_ingredient(&sugar).is_none());
    assert!(first.find_ingredient(&IngredientId::from("1")).is_some());

    let second = service.delete_ingredient(&recipe_id, &sugar).await.unwrap();
    assert_eq!(second.ingredients().len(), 1);
    assert_ne!(first.meta.version_id, second.meta.version_id);
}

#[tokio::test]
async fn missing_recipe_fails_before_any_save() {
    let store = Arc::new(CountingStore::default());
    let service = IngredientService::new(store.clone());
    let missing = RecipeId::from("missing");

    let err = service
        .save_ingredient(&missing, Ingredient::new("Salt", BigDecimal::from(1)))
        .await
        .unwrap_err();
    assert!(err.is_recipe_not_found());
    assert_eq!(err.to_string(), "save_ingredient: recipe missing not found");

    // Nothing reached save
    assert_eq!(store.calls(), (1, 0));
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn find_after_save_returns_value_equal_ingredient() {
    let store = Arc::new(InMemoryRecipeStore::new());
    let (service, recipe_id) = seeded(store, pancakes()).await;

    let payload = Ingredient::new("Butter", "0.50".parse().unwrap()).with_uom(cup());
    let saved = service
        .save_ingredient(&recipe_id, payload.clone())
        .await
        .unwrap();
    let found = service
        .find_ingredient(&recipe_id, saved.id.as_ref().unwrap())
        .await
        .unwrap();

    assert!(found.is_equal_by_value(&payload));
    // Scale does not matter for value equality
    let rescaled = Ingredient::new("Butter", "0.5".parse().unwrap()).with_uom(cup());
    assert!(found.is_equal_by_value(&rescaled));
}

#[tokio::test]
async fn save_with_unknown_id_adds_and_keeps_id() {
    let store = Arc::new(InMemoryRecipeStore::new());
    let (service, recipe_id) = seeded(store.clone(), pancakes()).await;

    let payload = Ingredient::new("Eggs", BigDecimal::from(3)).with_id("42");
    let saved = service.save_ingredient(&recipe_id, payload).await.unwrap();

    assert_eq!(saved.id, Some(IngredientId::from("42")));
    let stored = store.find(&recipe_id).await.unwrap();
    assert_eq!(stored.ingredients().len(), 3);
    assert_eq!(stored.ingredients()[2].description, "Eggs");
}

#[tokio::test]
async fn each_operation_loads_once_and_saves_once() {
    let store = Arc::new(CountingStore::default());
    let (service, recipe_id) = seeded(store.clone(), pancakes()).await;
    store.reset();

    service
        .find_ingredient(&recipe_id, &IngredientId::from("1"))
        .await
        .unwrap();
    assert_eq!(store.calls(), (1, 0));

    store.reset();
    service
        .save_ingredient(&recipe_id, Ingredient::new("Milk", BigDecimal::from(1)))
        .await
        .unwrap();
    assert_eq!(store.calls(), (1, 1));

    store.reset();
    service
        .delete_ingredient(&recipe_id, &IngredientId::from("nope"))
        .await
        .unwrap();
    assert_eq!(store.calls(), (1, 1));
}

#[tokio::test]
async fn invalid_payload_never_touches_the_store() {
    let store = Arc::new(CountingStore::default());
    let (service, recipe_id) = seeded(store.clone(), pancakes()).await;
    store.reset();

    let err = service
        .save_ingredient(&recipe_id, Ingredient::new("   ", BigDecimal::from(1)))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
    assert_eq!(store.calls(), (0, 0));
}

#[tokio::test]
async fn concurrent_writers_from_same_version_conflict_once() {
    let store = InMemoryRecipeStore::new();
    let saved = store.save(pancakes()).await.unwrap();
    let recipe_id = saved.id.clone().unwrap();

    let mut first = store.find(&recipe_id).await.unwrap();
    let mut second = store.find(&recipe_id).await.unwrap();
    first.add_ingredient(Ingredient::new("Milk", BigDecimal::from(1)));
    second.add_ingredient(Ingredient::new("Eggs", BigDecimal::from(2)));

    let results = [store.save(first).await, store.save(second).await];
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.is_version_conflict()))
        .count();
    assert_eq!(conflicts, 1);
    assert_eq!(store.find(&recipe_id).await.unwrap().ingredients().len(), 3);
}

#[tokio::test]
async fn interleaved_write_surfaces_as_conflict() {
    let store = Arc::new(InterleavingStore::default());
    let (service, recipe_id) = seeded(store.clone(), pancakes()).await;

    let err = service
        .save_ingredient(&recipe_id, Ingredient::new("Salt", BigDecimal::from(1)))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert_eq!(err.operation(), "save_ingredient");

    // The competing write won; ours was not applied
    let stored = store.find(&recipe_id).await.unwrap();
    assert_eq!(stored.ingredients().len(), 3);
    assert!(stored.ingredients().iter().all(|i| i.description != "Salt"));
}

#[tokio::test]
async fn retry_on_conflict_applies_both_writes() {
    let store = Arc::new(InterleavingStore::default());
    let (service, recipe_id) = seeded(store.clone(), pancakes()).await;

    let payload = Ingredient::new("Salt", BigDecimal::from(1));
    let saved = retry_on_conflict(&RetryPolicy::no_backoff(3), || {
        service.save_ingredient(&recipe_id, payload.clone())
    })
    .await
    .expect("second attempt succeeds");

    assert_eq!(saved.description, "Salt");
    let stored = store.find(&recipe_id).await.unwrap();
    let names: Vec<_> = stored
        .ingredients()
        .iter()
        .map(|i| i.description.as_str())
        .collect();
    assert_eq!(names, ["Flour", "Sugar", "Pepper", "Salt"]);
}

#[tokio::test]
async fn back_references_hold_after_every_mutation() {
    let store = Arc::new(InMemoryRecipeStore::new());
    let (service, recipe_id) = seeded(store.clone(), pancakes()).await;

    // A payload pointing at some other recipe is relinked on save
    let mut stray = Ingredient::new("Vanilla", BigDecimal::from(1));
    stray.recipe_id = Some(RecipeId::from("elsewhere"));
    service.save_ingredient(&recipe_id, stray).await.unwrap();
    assert!(store.find(&recipe_id).await.unwrap().is_linked());

    let after_delete = service
        .delete_ingredient(&recipe_id, &IngredientId::from("1"))
        .await
        .unwrap();
    assert!(after_delete.is_linked());
    assert!(
        after_delete
            .ingredients()
            .iter()
            .all(|i| i.recipe_id.as_ref() == Some(&recipe_id))
    );
}

#[tokio::test]
async fn duplicate_ids_resolve_to_first_member() {
    let store = Arc::new(DuplicateIdStore::new());
    let service = IngredientService::new(store.clone());
    let recipe_id = RecipeId::from("dup");
    let id = IngredientId::from("1");

    let found = service.find_ingredient(&recipe_id, &id).await.unwrap();
    assert_eq!(found.description, "A");

    let payload = Ingredient::new("Z", BigDecimal::from(9)).with_id("1");
    let saved = service.save_ingredient(&recipe_id, payload).await.unwrap();
    assert_eq!(saved.description, "Z");

    let stored = store.stored();
    assert_eq!(stored.ingredients().len(), 2);
    assert_eq!(stored.ingredients()[0].description, "Z");
    assert_eq!(stored.ingredients()[0].amount, BigDecimal::from(9));
    assert_eq!(stored.ingredients()[1].description, "B");
    assert_eq!(stored.ingredients()[1].amount, BigDecimal::from(2));

    // Delete drops every member carrying the id
    let after = service.delete_ingredient(&recipe_id, &id).await.unwrap();
    assert!(after.ingredients().is_empty());
}
