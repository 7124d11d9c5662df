//! Favorite meals
//!
//! Stored as a JSON array of meal summaries under one key. Read failures
//! and unreadable values behave as an empty list.

use crate::db::KeyValueStore;

use super::meal::MealSummary;

pub const FAVORITES_KEY: &str = "favorites";

pub fn list_favorites<S: KeyValueStore>(store: &S) -> Vec<MealSummary> {
    match store.get_json::<Vec<MealSummary>>(FAVORITES_KEY) {
        Ok(Some(list)) => list,
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable favorites: {}", e);
            Vec::new()
        }
    }
}

pub fn is_favorite<S: KeyValueStore>(store: &S, meal_id: &str) -> bool {
    list_favorites(store).iter().any(|m| m.id == meal_id)
}

/// Add or remove a meal; returns whether it is now a favorite
pub fn toggle_favorite<S: KeyValueStore>(store: &S, meal: MealSummary) -> bool {
    let mut list = list_favorites(store);
    let now_favorite = match list.iter().position(|m| m.id == meal.id) {
        Some(index) => {
            list.remove(index);
            false
        }
        None => {
            list.push(meal);
            true
        }
    };

    if let Err(e) = store.set_json(FAVORITES_KEY, &list) {
        tracing::warn!("Failed to persist favorites: {}", e);
    }
    now_favorite
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn summary(id: &str) -> MealSummary {
        MealSummary {
            id: id.to_string(),
            name: format!("Meal {}", id),
            thumb: None,
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let store = MemoryStore::new();
        assert!(toggle_favorite(&store, summary("1")));
        assert!(toggle_favorite(&store, summary("2")));
        assert!(is_favorite(&store, "1"));

        assert!(!toggle_favorite(&store, summary("1")));
        assert!(!is_favorite(&store, "1"));
        assert_eq!(list_favorites(&store), vec![summary("2")]);
    }

    #[test]
    fn test_corrupt_value_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{not json").unwrap();
        assert!(list_favorites(&store).is_empty());
        assert!(toggle_favorite(&store, summary("7")));
        assert_eq!(list_favorites(&store).len(), 1);
    }

    #[test]
    fn test_stored_in_mealdb_shape() {
        let store = MemoryStore::new();
        toggle_favorite(&store, summary("52772"));
        let raw = store.get(FAVORITES_KEY).unwrap().unwrap();
        assert!(raw.contains("\"idMeal\":\"52772\""));
    }
}
