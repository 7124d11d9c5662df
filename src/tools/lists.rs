//! List MCP Tools
//!
//! Favorites, recently viewed meals and the shopping list.

use serde::Serialize;

use crate::client::MealDbClient;
use crate::db::KeyValueStore;
use crate::models::{
    add_items, clear_shopping_list as clear_list, get_shopping_list as load_list, is_favorite,
    items_for_meal, list_favorites as load_favorites, list_recent_meals as load_recent,
    remove_item, toggle_favorite as toggle, MealSummary, ShoppingItem,
};

use super::meals::fetch_meal;

/// Response for toggle_favorite
#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub meal_id: String,
    pub is_favorite: bool,
    pub total_favorites: usize,
}

/// Response for list_favorites and list_recent_meals
#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<MealSummary>,
    pub total: usize,
}

impl From<Vec<MealSummary>> for MealListResponse {
    fn from(meals: Vec<MealSummary>) -> Self {
        let total = meals.len();
        Self { meals, total }
    }
}

/// Response for the shopping list tools
#[derive(Debug, Serialize)]
pub struct ShoppingListResponse {
    pub items: Vec<ShoppingItem>,
    pub total: usize,
}

impl From<Vec<ShoppingItem>> for ShoppingListResponse {
    fn from(items: Vec<ShoppingItem>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Response for remove_shopping_item
#[derive(Debug, Serialize)]
pub struct RemoveShoppingItemResponse {
    pub name: String,
    pub removed: usize,
    pub remaining: usize,
}

/// Response for clear_shopping_list
#[derive(Debug, Serialize)]
pub struct ClearShoppingListResponse {
    pub success: bool,
}

/// Toggle a meal in favorites; only adding needs the meal record
pub async fn toggle_favorite<S: KeyValueStore>(
    client: &MealDbClient,
    store: &S,
    meal_id: &str,
) -> Result<ToggleFavoriteResponse, String> {
    let meal_id = meal_id.trim();
    if meal_id.is_empty() {
        return Err("meal_id cannot be empty".to_string());
    }

    let summary = if is_favorite(store, meal_id) {
        MealSummary {
            id: meal_id.to_string(),
            name: String::new(),
            thumb: None,
        }
    } else {
        fetch_meal(client, meal_id)
            .await?
            .ok_or_else(|| format!("Meal {} not found", meal_id))?
            .summary()
    };

    let now_favorite = toggle(store, summary);
    Ok(ToggleFavoriteResponse {
        meal_id: meal_id.to_string(),
        is_favorite: now_favorite,
        total_favorites: load_favorites(store).len(),
    })
}

pub fn list_favorites<S: KeyValueStore>(store: &S) -> MealListResponse {
    load_favorites(store).into()
}

pub fn list_recent_meals<S: KeyValueStore>(store: &S) -> MealListResponse {
    load_recent(store).into()
}

/// Add every ingredient of a meal to the shopping list
pub async fn add_meal_to_shopping_list<S: KeyValueStore>(
    client: &MealDbClient,
    store: &S,
    meal_id: &str,
) -> Result<ShoppingListResponse, String> {
    let meal = fetch_meal(client, meal_id)
        .await?
        .ok_or_else(|| format!("Meal {} not found", meal_id.trim()))?;
    let items = items_for_meal(&meal);
    if items.is_empty() {
        return Err(format!("Meal {} has no ingredients", meal.id));
    }
    add_shopping_items(store, items)
}

pub fn add_shopping_items<S: KeyValueStore>(store: &S, items: Vec<ShoppingItem>) -> Result<ShoppingListResponse, String> {
    let list = add_items(store, items).map_err(|e| format!("Failed to update shopping list: {}", e))?;
    Ok(list.into())
}

pub fn get_shopping_list<S: KeyValueStore>(store: &S) -> Result<ShoppingListResponse, String> {
    let list = load_list(store).map_err(|e| format!("Failed to read shopping list: {}", e))?;
    Ok(list.into())
}

pub fn remove_shopping_item<S: KeyValueStore>(store: &S, name: &str) -> Result<RemoveShoppingItemResponse, String> {
    if name.trim().is_empty() {
        return Err("name cannot be empty".to_string());
    }
    let removed = remove_item(store, name).map_err(|e| format!("Failed to update shopping list: {}", e))?;
    let remaining = load_list(store)
        .map_err(|e| format!("Failed to read shopping list: {}", e))?
        .len();
    Ok(RemoveShoppingItemResponse {
        name: name.trim().to_string(),
        removed,
        remaining,
    })
}

pub fn clear_shopping_list<S: KeyValueStore>(store: &S) -> Result<ClearShoppingListResponse, String> {
    clear_list(store).map_err(|e| format!("Failed to clear shopping list: {}", e))?;
    Ok(ClearShoppingListResponse { success: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn item(name: &str, qty: Option<f64>, unit: Option<&str>) -> ShoppingItem {
        ShoppingItem {
            name: name.to_string(),
            qty,
            unit: unit.map(str::to_string),
        }
    }

    #[test]
    fn test_shopping_list_against_sqlite() {
        let db = Database::in_memory().unwrap();
        add_shopping_items(&db, vec![item("Flour", Some(2.0), Some("cup"))]).unwrap();
        let list = add_shopping_items(&db, vec![item("flour", Some(1.0), Some("cup")), item("Salt", None, None)]).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.items[0].qty, Some(3.0));

        let removed = remove_shopping_item(&db, "salt").unwrap();
        assert_eq!(removed.removed, 1);
        assert_eq!(removed.remaining, 1);

        clear_shopping_list(&db).unwrap();
        assert_eq!(get_shopping_list(&db).unwrap().total, 0);
    }

    #[test]
    fn test_remove_requires_name() {
        let db = Database::in_memory().unwrap();
        assert!(remove_shopping_item(&db, "  ").is_err());
    }

    #[test]
    fn test_empty_lists() {
        let db = Database::in_memory().unwrap();
        assert_eq!(list_favorites(&db).total, 0);
        assert_eq!(list_recent_meals(&db).total, 0);
    }
}
