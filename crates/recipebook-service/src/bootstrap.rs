//! Sample recipes loaded on first startup.
//!
//! Seeding is idempotent: if the store already holds any recipe nothing is
//! written. Units and categories are looked up by description from the
//! reference stores, so a store seeded without reference data still gets the
//! recipes, just without units.

use recipebook_core::{BigDecimal, CoreError, Difficulty, Ingredient, Notes, Recipe, UnitOfMeasure};
use tracing::{info, warn};

use crate::error::{Result, ServiceError};
use crate::recipes::RecipeService;

/// Statistics about a bootstrap run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapStats {
    pub recipes: usize,
    pub ingredients: usize,
    /// Units referenced by the sample data but missing from the unit store
    pub missing_units: usize,
}

/// (description, amount, unit description)
type SampleIngredient = (&'static str, &'static str, Option<&'static str>);

struct SampleRecipe {
    description: &'static str,
    prep_time: u32,
    cook_time: u32,
    servings: u32,
    difficulty: Difficulty,
    source: &'static str,
    url: &'static str,
    categories: &'static [&'static str],
    directions: &'static str,
    notes: &'static str,
    ingredients: &'static [SampleIngredient],
}

const GUACAMOLE: SampleRecipe = SampleRecipe {
    description: "Perfect Guacamole",
    prep_time: 10,
    cook_time: 0,
    servings: 4,
    difficulty: Difficulty::Easy,
    source: "Simply Recipes",
    url: "https://www.simplyrecipes.com/recipes/perfect_guacamole/",
    categories: &["American", "Mexican"],
    directions: "1 Cut avocado, remove flesh.\n\
                 2 Mash with a fork, leaving some chunks.\n\
                 3 Add salt, lime juice, onion, chiles and cilantro.\n\
                 4 Cover with plastic wrap and chill until ready to serve.",
    notes: "Be careful handling chiles. Wash your hands thoroughly after handling.",
    ingredients: &[
        ("ripe avocados", "2", Some("Each")),
        ("Kosher salt", ".5", Some("Teaspoon")),
        ("fresh lime juice or lemon juice", "2", Some("Tablespoon")),
        ("minced red onion or thinly sliced green onion", "2", Some("Tablespoon")),
        ("serrano chiles, stems and seeds removed, minced", "2", Some("Each")),
        ("Cilantro", "2", Some("Tablespoon")),
        ("freshly grated black pepper", "2", Some("Dash")),
        ("ripe tomato, seeds and pulp removed, chopped", ".5", Some("Each")),
    ],
};

const CHICKEN_TACOS: SampleRecipe = SampleRecipe {
    description: "Spicy Grilled Chicken Tacos",
    prep_time: 20,
    cook_time: 15,
    servings: 6,
    difficulty: Difficulty::Moderate,
    source: "Simply Recipes",
    url: "https://www.simplyrecipes.com/recipes/spicy_grilled_chicken_tacos/",
    categories: &["American", "Mexican"],
    directions: "1 Prepare a gas or charcoal grill for medium-high, direct heat.\n\
                 2 Make the marinade and coat the chicken.\n\
                 3 Grill the chicken 3 to 4 minutes per side.\n\
                 4 Warm the tortillas.\n\
                 5 Assemble the tacos.",
    notes: "Look for ancho chile powder with the Mexican ingredients at your grocery store.",
    ingredients: &[
        ("Ancho Chili Powder", "2", Some("Tablespoon")),
        ("Dried Oregano", "1", Some("Teaspoon")),
        ("Dried Cumin", "1", Some("Teaspoon")),
        ("Sugar", "1", Some("Teaspoon")),
        ("Salt", ".5", Some("Teaspoon")),
        ("Clove of Garlic, Chopped", "1", Some("Each")),
        ("finely grated orange zest", "1", Some("Tablespoon")),
        ("fresh-squeezed orange juice", "3", Some("Tablespoon")),
        ("Olive Oil", "2", Some("Tablespoon")),
        ("boneless chicken thighs", "4", Some("Tablespoon")),
        ("small corn tortillas", "8", Some("Each")),
        ("packed baby arugula", "3", Some("Cup")),
        ("medium ripe avocados, slice", "2", Some("Each")),
        ("radishes, thinly sliced", "4", Some("Each")),
        ("cherry tomatoes, halved", ".5", Some("Pint")),
        ("red onion, thinly sliced", ".25", Some("Each")),
        ("Roughly chopped cilantro", "4", None),
        ("cup sour cream thinned with 1/4 cup milk", "4", Some("Cup")),
        ("lime, cut into wedges", "4", Some("Each")),
    ],
};

/// Seeds the sample recipes unless the store already holds recipes.
pub async fn seed_sample_data(service: &RecipeService) -> Result<BootstrapStats> {
    if !service.list_recipes().await?.is_empty() {
        info!("Recipes already present, skipping sample data");
        return Ok(BootstrapStats::default());
    }

    let mut stats = BootstrapStats::default();
    for sample in [&GUACAMOLE, &CHICKEN_TACOS] {
        let recipe = build_recipe(service, sample, &mut stats).await?;
        stats.ingredients += recipe.ingredients().len();
        service.save_recipe(recipe).await?;
        stats.recipes += 1;
    }

    info!(
        recipes = stats.recipes,
        ingredients = stats.ingredients,
        missing_units = stats.missing_units,
        "Sample data loaded"
    );
    Ok(stats)
}

async fn build_recipe(
    service: &RecipeService,
    sample: &SampleRecipe,
    stats: &mut BootstrapStats,
) -> Result<Recipe> {
    let mut recipe = Recipe::new(sample.description).with_directions(sample.directions);
    recipe.prep_time = sample.prep_time;
    recipe.cook_time = sample.cook_time;
    recipe.servings = Some(sample.servings);
    recipe.difficulty = sample.difficulty;
    recipe.source = Some(sample.source.to_string());
    recipe.url = Some(sample.url.to_string());
    recipe.set_notes(Notes::new(sample.notes));

    for name in sample.categories {
        match service.find_category(name).await? {
            Some(category) => {
                recipe.add_category(category);
            }
            None => warn!(category = name, "Sample category not found"),
        }
    }

    for (description, amount, unit) in sample.ingredients {
        let mut ingredient = sample_ingredient(description, amount)?;
        if let Some(uom) = find_unit(service, *unit, stats).await? {
            ingredient = ingredient.with_uom(uom);
        }
        recipe.add_ingredient(ingredient);
    }
    Ok(recipe)
}

fn sample_ingredient(description: &str, amount: &str) -> Result<Ingredient> {
    let amount: BigDecimal = amount.parse().map_err(|err| {
        ServiceError::validation(
            "seed_sample_data",
            CoreError::validation(
                "ingredient.amount",
                format!("`{amount}` for {description} is not a decimal: {err}"),
            ),
        )
    })?;
    Ok(Ingredient::new(description, amount))
}

async fn find_unit(
    service: &RecipeService,
    unit: Option<&str>,
    stats: &mut BootstrapStats,
) -> Result<Option<UnitOfMeasure>> {
    let Some(description) = unit else {
        return Ok(None);
    };
    let found = service.find_unit_of_measure(description).await?;
    if found.is_none() {
        warn!(unit = description, "Sample unit of measure not found");
        stats.missing_units += 1;
    }
    Ok(found)
}
