//! Recently viewed meals
//!
//! Most recent first, one entry per meal, at most `MAX_RECENT_MEALS`.

use crate::db::KeyValueStore;

use super::meal::MealSummary;

pub const RECENT_MEALS_KEY: &str = "recentMeals";
pub const MAX_RECENT_MEALS: usize = 5;

pub fn list_recent_meals<S: KeyValueStore>(store: &S) -> Vec<MealSummary> {
    match store.get_json::<Vec<MealSummary>>(RECENT_MEALS_KEY) {
        Ok(Some(list)) => list,
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::debug!("Unreadable recent meals: {}", e);
            Vec::new()
        }
    }
}

/// Move `meal` to the front of the recent list
///
/// A stored value that cannot be read is replaced by a list holding just
/// this meal.
pub fn record_recent_meal<S: KeyValueStore>(store: &S, meal: MealSummary) -> Vec<MealSummary> {
    let updated = match store.get_json::<Vec<MealSummary>>(RECENT_MEALS_KEY) {
        Ok(previous) => {
            let mut list = Vec::with_capacity(MAX_RECENT_MEALS);
            let id = meal.id.clone();
            list.push(meal);
            list.extend(previous.unwrap_or_default().into_iter().filter(|m| m.id != id));
            list.truncate(MAX_RECENT_MEALS);
            list
        }
        Err(e) => {
            tracing::warn!("Resetting unreadable recent meals: {}", e);
            vec![meal]
        }
    };

    if let Err(e) = store.set_json(RECENT_MEALS_KEY, &updated) {
        tracing::warn!("Failed to persist recent meals: {}", e);
    }
    updated
}
