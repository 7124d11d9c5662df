//! Runtime configuration
//!
//! Read once from the environment at startup. Bad numeric values fall back
//! to their defaults with a warning rather than aborting the server.

use std::path::PathBuf;

use crate::measure::{FormatTolerances, FRACTION_TOLERANCE, NEAR_INTEGER_TOLERANCE};

pub const DATABASE_PATH_VAR: &str = "MEALWISE_DATABASE_PATH";
pub const MEALDB_URL_VAR: &str = "MEALWISE_MEALDB_URL";
pub const AI_ENDPOINT_VAR: &str = "MEALWISE_AI_ENDPOINT";
pub const BASE_SERVINGS_VAR: &str = "MEALWISE_BASE_SERVINGS";
pub const NEAR_INTEGER_TOLERANCE_VAR: &str = "MEALWISE_NEAR_INTEGER_TOLERANCE";
pub const FRACTION_TOLERANCE_VAR: &str = "MEALWISE_FRACTION_TOLERANCE";

pub const DEFAULT_MEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Servings a MealDB recipe is assumed to make; the API does not say
pub const DEFAULT_BASE_SERVINGS: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub mealdb_url: String,
    pub ai_endpoint: Option<String>,
    pub base_servings: f64,
    pub tolerances: FormatTolerances,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_path = non_empty(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let mealdb_url = non_empty(MEALDB_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_MEALDB_URL.to_string());

        let base_servings = positive_number(BASE_SERVINGS_VAR, non_empty(BASE_SERVINGS_VAR), DEFAULT_BASE_SERVINGS);

        let tolerances = FormatTolerances {
            near_integer: positive_number(
                NEAR_INTEGER_TOLERANCE_VAR,
                non_empty(NEAR_INTEGER_TOLERANCE_VAR),
                NEAR_INTEGER_TOLERANCE,
            ),
            fraction: positive_number(
                FRACTION_TOLERANCE_VAR,
                non_empty(FRACTION_TOLERANCE_VAR),
                FRACTION_TOLERANCE,
            ),
        };

        Self {
            database_path,
            mealdb_url,
            ai_endpoint: non_empty(AI_ENDPOINT_VAR),
            base_servings,
            tolerances,
        }
    }
}

fn positive_number(key: &str, raw: Option<String>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => {
            tracing::warn!("Invalid {}={:?}, using default {}", key, raw, default);
            default
        }
    }
}

/// `<project>/data/mealwise.db`, walking up out of `target/{debug,release}`
pub fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("mealwise.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.mealdb_url, DEFAULT_MEALDB_URL);
        assert_eq!(config.ai_endpoint, None);
        assert_eq!(config.base_servings, 2.0);
        assert_eq!(config.tolerances, FormatTolerances::default());
        assert!(config.database_path.ends_with("data/mealwise.db"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (DATABASE_PATH_VAR, "/tmp/meals.db"),
            (MEALDB_URL_VAR, "http://localhost:8080/api/"),
            (AI_ENDPOINT_VAR, "http://localhost:9000/generate"),
            (BASE_SERVINGS_VAR, "4"),
            (FRACTION_TOLERANCE_VAR, "0.1"),
        ]);
        assert_eq!(config.database_path, PathBuf::from("/tmp/meals.db"));
        assert_eq!(config.mealdb_url, "http://localhost:8080/api");
        assert_eq!(config.ai_endpoint.as_deref(), Some("http://localhost:9000/generate"));
        assert_eq!(config.base_servings, 4.0);
        assert_eq!(config.tolerances.fraction, 0.1);
        assert_eq!(config.tolerances.near_integer, NEAR_INTEGER_TOLERANCE);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            (BASE_SERVINGS_VAR, "zero"),
            (NEAR_INTEGER_TOLERANCE_VAR, "-1"),
            (FRACTION_TOLERANCE_VAR, "NaN"),
        ]);
        assert_eq!(config.base_servings, DEFAULT_BASE_SERVINGS);
        assert_eq!(config.tolerances, FormatTolerances::default());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[(AI_ENDPOINT_VAR, "  ")]);
        assert_eq!(config.ai_endpoint, None);
    }
}
