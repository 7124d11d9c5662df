//! Per-recipe serving scaler
//!
//! Keeps the chosen serving count for a recipe in the key-value store under
//! `servings:<recipeId>` and exposes the resulting scale factor.

use thiserror::Error;

use crate::db::KeyValueStore;

const SERVINGS_KEY_PREFIX: &str = "servings:";

#[derive(Debug, Error, PartialEq)]
pub enum ScalingError {
    #[error("base servings must be a positive number, got {0}")]
    InvalidBaseServings(f64),

    #[error("servings must be a positive number, got {0}")]
    InvalidServings(f64),
}

/// Store key for a recipe's servings
pub fn servings_key(recipe_id: &str) -> String {
    format!("{}{}", SERVINGS_KEY_PREFIX, recipe_id)
}

/// Serving count for one recipe, persisted on every change
///
/// Persistence failures are logged and otherwise ignored; the scaler keeps
/// working in memory for the rest of its lifetime.
pub struct ServingScaler<'a, S: KeyValueStore> {
    store: &'a S,
    recipe_id: String,
    base_servings: f64,
    servings: f64,
}

impl<'a, S: KeyValueStore> ServingScaler<'a, S> {
    /// Load the scaler for a recipe, restoring a previously persisted serving count
    pub fn load(
        store: &'a S,
        recipe_id: impl Into<String>,
        base_servings: f64,
    ) -> Result<Self, ScalingError> {
        if !is_positive(base_servings) {
            return Err(ScalingError::InvalidBaseServings(base_servings));
        }

        let recipe_id = recipe_id.into();
        let servings = read_persisted(store, &recipe_id).unwrap_or(base_servings);

        Ok(Self {
            store,
            recipe_id,
            base_servings,
            servings,
        })
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    pub fn base_servings(&self) -> f64 {
        self.base_servings
    }

    pub fn servings(&self) -> f64 {
        self.servings
    }

    /// servings / base servings
    pub fn factor(&self) -> f64 {
        self.servings / self.base_servings
    }

    /// Set the serving count. Range clamping is the caller's job (see `ServingStepper`).
    pub fn set_servings(&mut self, servings: f64) -> Result<(), ScalingError> {
        if !is_positive(servings) {
            return Err(ScalingError::InvalidServings(servings));
        }
        self.servings = servings;
        self.persist();
        Ok(())
    }

    /// Back to base servings (factor 1)
    pub fn reset(&mut self) {
        self.servings = self.base_servings;
        self.persist();
    }

    fn persist(&self) {
        let key = servings_key(&self.recipe_id);
        if let Err(e) = self.store.set(&key, &self.servings.to_string()) {
            tracing::warn!("Failed to persist {}: {}", key, e);
        }
    }
}

fn read_persisted<S: KeyValueStore>(store: &S, recipe_id: &str) -> Option<f64> {
    let key = servings_key(recipe_id);
    let raw = match store.get(&key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            return None;
        }
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if is_positive(value) => Some(value),
        _ => {
            tracing::debug!("Discarding invalid persisted servings {:?} for {}", raw, key);
            None
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
