//! Data models
//!
//! Recipe records from MealDB and the festival catalog, plus the
//! key-value backed lists kept per user.

mod diet;
mod favorites;
mod festival;
mod meal;
mod recent;
mod shopping;

pub use diet::{ActivityLevel, BodyProfile, DietTargets, Goal};
pub use favorites::{is_favorite, list_favorites, toggle_favorite, FAVORITES_KEY};
pub use festival::{FestivalCatalog, FestivalDish, FestivalInfo, ALL_FESTIVALS};
pub use meal::{order_categories, Category, IngredientLine, Meal, MealSummary, ALLERGEN_KEYWORDS};
pub use recent::{list_recent_meals, record_recent_meal, MAX_RECENT_MEALS, RECENT_MEALS_KEY};
pub use shopping::{
    add_items, clear_shopping_list, get_shopping_list, items_for_meal, merge_items, remove_item,
    ShoppingItem, SHOPPING_LIST_KEY,
};
