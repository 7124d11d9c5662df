//! Serving MCP Tools
//!
//! Per-recipe serving counts. Recipe ids are MealDB ids or festival dish ids.

use serde::Serialize;

use crate::db::KeyValueStore;
use crate::scaling::{ServingScaler, ServingStepper};

/// Response for the servings tools
#[derive(Debug, Serialize)]
pub struct ServingsResponse {
    pub recipe_id: String,
    pub base_servings: f64,
    pub servings: f64,
    pub factor: f64,
    /// Serving count label, e.g. "×1 ½"
    pub label: String,
}

impl<S: KeyValueStore> From<&ServingScaler<'_, S>> for ServingsResponse {
    fn from(scaler: &ServingScaler<'_, S>) -> Self {
        Self {
            recipe_id: scaler.recipe_id().to_string(),
            base_servings: scaler.base_servings(),
            servings: scaler.servings(),
            factor: scaler.factor(),
            label: ServingStepper::label(scaler.servings()),
        }
    }
}

fn load_scaler<'a, S: KeyValueStore>(
    store: &'a S,
    recipe_id: &str,
    base_servings: f64,
) -> Result<ServingScaler<'a, S>, String> {
    let recipe_id = recipe_id.trim();
    if recipe_id.is_empty() {
        return Err("recipe_id cannot be empty".to_string());
    }
    ServingScaler::load(store, recipe_id, base_servings).map_err(|e| e.to_string())
}

pub fn get_servings<S: KeyValueStore>(store: &S, recipe_id: &str, base_servings: f64) -> Result<ServingsResponse, String> {
    let scaler = load_scaler(store, recipe_id, base_servings)?;
    Ok(ServingsResponse::from(&scaler))
}

pub fn set_servings<S: KeyValueStore>(
    store: &S,
    recipe_id: &str,
    base_servings: f64,
    servings: f64,
) -> Result<ServingsResponse, String> {
    let mut scaler = load_scaler(store, recipe_id, base_servings)?;
    scaler.set_servings(servings).map_err(|e| e.to_string())?;
    Ok(ServingsResponse::from(&scaler))
}

/// Move servings one stepper step up or down, clamped to the stepper range
pub fn step_servings<S: KeyValueStore>(
    store: &S,
    recipe_id: &str,
    base_servings: f64,
    direction: &str,
) -> Result<ServingsResponse, String> {
    let stepper = ServingStepper::default();
    let mut scaler = load_scaler(store, recipe_id, base_servings)?;

    let next = match direction.trim().to_lowercase().as_str() {
        "up" | "increment" | "+" => stepper.increment(scaler.servings()),
        "down" | "decrement" | "-" => stepper.decrement(scaler.servings()),
        other => return Err(format!("Unknown direction '{}'; use 'up' or 'down'", other)),
    };
    scaler.set_servings(next).map_err(|e| e.to_string())?;
    Ok(ServingsResponse::from(&scaler))
}

pub fn reset_servings<S: KeyValueStore>(store: &S, recipe_id: &str, base_servings: f64) -> Result<ServingsResponse, String> {
    let mut scaler = load_scaler(store, recipe_id, base_servings)?;
    scaler.reset();
    Ok(ServingsResponse::from(&scaler))
}
