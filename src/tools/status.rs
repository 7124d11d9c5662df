//! Mealwise Status Tool
//!
//! Provides runtime status information about the Mealwise service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::Config;

/// Usage guide for AI assistants
pub const RECIPE_INSTRUCTIONS: &str = r#"
# Mealwise Usage

## Finding a meal
- `list_categories` → category names (Dessert, Vegetarian and Pasta first)
- `list_meals_by_category` / `search_meals` → meal ids
- `get_meal` with an `id` (omit it for a random meal)

## Servings
MealDB recipes are assumed to serve the configured base servings (2 unless
changed). Pass `servings` to `get_meal`, or use `set_servings`,
`step_servings` (up/down by 1, kept between ½ and 12) and `reset_servings`.
The chosen value is remembered per recipe.

## Units
`set_unit_system` with `metric` or `us` changes how every measure is shown.
Teaspoons and tablespoons are never converted. Measures that cannot be read
("to taste", "2-3 cloves") are shown exactly as written.

## Lists
- `toggle_favorite`, `list_favorites`
- `list_recent_meals` (last five opened)
- `add_meal_to_shopping_list`, `get_shopping_list`, `remove_shopping_item`,
  `clear_shopping_list`. Same ingredient with the same unit is summed.

## Other
- `list_festival_dishes` / `get_festival_dish` for Holi, Diwali, Christmas
  and Eid dishes
- `calculate_diet_targets` for daily calories and macros
- `generate_recipe` when an AI endpoint is configured
"#;

/// Runtime status of the Mealwise service
#[derive(Debug, Clone, Serialize)]
pub struct MealwiseStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Upstream services
    pub mealdb_url: String,
    pub ai_endpoint_configured: bool,
    pub base_servings: f64,

    /// Process information
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    database_path: PathBuf,
    mealdb_url: String,
    ai_endpoint_configured: bool,
    base_servings: f64,
}

impl StatusTracker {
    pub fn new(config: &Config) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            database_path: config.database_path.clone(),
            mealdb_url: config.mealdb_url.clone(),
            ai_endpoint_configured: config.ai_endpoint.is_some(),
            base_servings: config.base_servings,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> MealwiseStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MealwiseStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            mealdb_url: self.mealdb_url.clone(),
            ai_endpoint_configured: self.ai_endpoint_configured,
            base_servings: self.base_servings,
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
