//! Shopping list
//!
//! Items are keyed by lower-cased name plus unit; adding an item that is
//! already on the list sums the quantities.

use serde::{Deserialize, Serialize};

use crate::db::{DbResult, KeyValueStore};
use crate::measure::parse;

use super::meal::Meal;

pub const SHOPPING_LIST_KEY: &str = "shoppingList";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub qty: Option<f64>,
    pub unit: Option<String>,
}

impl ShoppingItem {
    /// Item from an ingredient name and its raw measure text
    pub fn from_measure(name: &str, measure: &str) -> Self {
        let parsed = parse(measure);
        Self {
            name: name.trim().to_string(),
            qty: parsed.qty,
            unit: parsed.unit,
        }
    }

    fn same_entry(&self, other: &ShoppingItem) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
            && self.unit.as_deref().map(str::to_lowercase) == other.unit.as_deref().map(str::to_lowercase)
    }
}

/// Every named ingredient of a meal, measures parsed as written
pub fn items_for_meal(meal: &Meal) -> Vec<ShoppingItem> {
    meal.ingredients()
        .iter()
        .map(|line| ShoppingItem::from_measure(&line.name, &line.measure))
        .collect()
}

/// Merge `items` into `list` in place
pub fn merge_items(list: &mut Vec<ShoppingItem>, items: Vec<ShoppingItem>) {
    for item in items {
        match list.iter_mut().find(|existing| existing.same_entry(&item)) {
            Some(existing) => {
                existing.qty = match (existing.qty, item.qty) {
                    (Some(a), Some(b)) => Some(a + b),
                    (None, b) => b,
                    (a, None) => a,
                };
            }
            None => list.push(item),
        }
    }
}

pub fn get_shopping_list<S: KeyValueStore>(store: &S) -> DbResult<Vec<ShoppingItem>> {
    Ok(store.get_json(SHOPPING_LIST_KEY)?.unwrap_or_default())
}

/// Add items, returning the updated list
pub fn add_items<S: KeyValueStore>(store: &S, items: Vec<ShoppingItem>) -> DbResult<Vec<ShoppingItem>> {
    let mut list = get_shopping_list(store)?;
    merge_items(&mut list, items);
    store.set_json(SHOPPING_LIST_KEY, &list)?;
    Ok(list)
}

/// Remove every entry with this name (any unit); returns how many went
pub fn remove_item<S: KeyValueStore>(store: &S, name: &str) -> DbResult<usize> {
    let mut list = get_shopping_list(store)?;
    let needle = name.trim().to_lowercase();
    let before = list.len();
    list.retain(|item| item.name.to_lowercase() != needle);
    let removed = before - list.len();
    if removed > 0 {
        store.set_json(SHOPPING_LIST_KEY, &list)?;
    }
    Ok(removed)
}

pub fn clear_shopping_list<S: KeyValueStore>(store: &S) -> DbResult<()> {
    store.remove(SHOPPING_LIST_KEY)
}
