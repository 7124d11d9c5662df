//! Generated Recipe MCP Tools
//!
//! Asks the configured AI endpoint for a recipe and renders its amounts the
//! same way MealDB measures are rendered.

use serde::Serialize;

use crate::client::{AiRecipeClient, GeneratedRecipe};
use crate::db::KeyValueStore;
use crate::measure::{display_measure_with, FormatTolerances, RenderOptions, UnitSystem};

use super::measures::resolve_unit_system;

/// Generated ingredient with its rendered amount
#[derive(Debug, Serialize)]
pub struct GeneratedIngredientView {
    pub name: String,
    pub amount: String,
    pub display: String,
}

/// Response for generate_recipe
#[derive(Debug, Serialize)]
pub struct GenerateRecipeResponse {
    pub name: String,
    pub unit_system: UnitSystem,
    pub ingredients: Vec<GeneratedIngredientView>,
    pub instructions: Vec<String>,
}

pub fn render_generated_recipe(recipe: GeneratedRecipe, options: &RenderOptions) -> GenerateRecipeResponse {
    let ingredients = recipe
        .ingredients
        .into_iter()
        .map(|ing| GeneratedIngredientView {
            display: display_measure_with(&ing.amount, options),
            name: ing.name,
            amount: ing.amount,
        })
        .collect();

    GenerateRecipeResponse {
        name: recipe.name,
        unit_system: options.system,
        ingredients,
        instructions: recipe.instructions,
    }
}

pub async fn generate_recipe<S: KeyValueStore>(
    client: &AiRecipeClient,
    store: &S,
    prompt: &str,
    unit_system: Option<&str>,
    tolerances: FormatTolerances,
) -> Result<GenerateRecipeResponse, String> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err("prompt cannot be empty".to_string());
    }
    let system = resolve_unit_system(store, unit_system)?;

    let recipe = client
        .generate(prompt)
        .await
        .map_err(|e| format!("Recipe generation failed: {}", e))?;

    let options = RenderOptions::new(1.0, system).with_tolerances(tolerances);
    Ok(render_generated_recipe(recipe, &options))
}
