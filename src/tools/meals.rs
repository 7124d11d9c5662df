//! Meal MCP Tools
//!
//! Browse MealDB and open a meal with its ingredient table rendered for the
//! current servings and unit system.

use serde::Serialize;

use crate::client::MealDbClient;
use crate::db::KeyValueStore;
use crate::measure::{display_measure_with, FormatTolerances, RenderOptions, UnitSystem};
use crate::models::{is_favorite, list_favorites, record_recent_meal, Category, Meal, MealSummary};

use super::measures::resolve_unit_system;
use super::servings::{get_servings, set_servings, ServingsResponse};

/// Category entry for list_categories
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub thumb: Option<String>,
    pub description: Option<String>,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            thumb: category.thumb.clone(),
            description: category.description.clone(),
        }
    }
}

/// Response for list_categories
#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategorySummary>,
    pub total: usize,
}

/// Meal entry for list/search results
#[derive(Debug, Serialize)]
pub struct MealListItem {
    pub id: String,
    pub name: String,
    pub thumb: Option<String>,
    pub is_favorite: bool,
}

/// Response for list_meals_by_category and search_meals
#[derive(Debug, Serialize)]
pub struct ListMealsResponse {
    pub meals: Vec<MealListItem>,
    pub total: usize,
}

/// One row of the ingredient table
#[derive(Debug, Serialize)]
pub struct RenderedIngredient {
    pub name: String,
    /// Measure as written in the recipe
    pub measure: String,
    /// Measure after scaling and unit conversion
    pub display: String,
}

/// Full meal detail for get_meal
#[derive(Debug, Serialize)]
pub struct MealDetail {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub thumb: Option<String>,
    pub youtube: Option<String>,
    pub is_favorite: bool,
    pub unit_system: UnitSystem,
    pub servings: ServingsResponse,
    pub ingredients: Vec<RenderedIngredient>,
    /// Ingredients listed without a measure
    pub unmeasured_ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub allergens: Vec<&'static str>,
    /// Ingredient lines as copied to the clipboard
    pub copy_text: String,
}

fn list_items<S: KeyValueStore>(store: &S, summaries: Vec<MealSummary>) -> ListMealsResponse {
    let favorites = list_favorites(store);
    let meals: Vec<MealListItem> = summaries
        .into_iter()
        .map(|m| MealListItem {
            is_favorite: favorites.iter().any(|f| f.id == m.id),
            id: m.id,
            name: m.name,
            thumb: m.thumb,
        })
        .collect();
    let total = meals.len();
    ListMealsResponse { meals, total }
}

/// Render a meal's table for the given factor and unit system
pub fn render_meal_ingredients(meal: &Meal, options: &RenderOptions) -> Vec<RenderedIngredient> {
    meal.measured_ingredients()
        .into_iter()
        .map(|line| RenderedIngredient {
            display: display_measure_with(&line.measure, options),
            name: line.name,
            measure: line.measure,
        })
        .collect()
}

/// Build the detail view of a meal and record it as recently viewed
pub fn meal_detail<S: KeyValueStore>(
    store: &S,
    meal: &Meal,
    servings: Option<f64>,
    unit_system: Option<&str>,
    base_servings: f64,
    tolerances: FormatTolerances,
) -> Result<MealDetail, String> {
    let system = resolve_unit_system(store, unit_system)?;
    let servings = match servings {
        Some(value) => set_servings(store, &meal.id, base_servings, value)?,
        None => get_servings(store, &meal.id, base_servings)?,
    };

    let options = RenderOptions::new(servings.factor, system).with_tolerances(tolerances);
    let ingredients = render_meal_ingredients(meal, &options);
    let unmeasured_ingredients = meal
        .ingredients()
        .into_iter()
        .filter(|line| line.measure.is_empty())
        .map(|line| line.name)
        .collect();

    record_recent_meal(store, meal.summary());

    Ok(MealDetail {
        id: meal.id.clone(),
        name: meal.name.clone(),
        category: meal.category.clone(),
        area: meal.area.clone(),
        thumb: meal.thumb.clone(),
        youtube: meal.youtube.clone(),
        is_favorite: is_favorite(store, &meal.id),
        unit_system: system,
        servings,
        ingredients,
        unmeasured_ingredients,
        instructions: meal.instruction_sentences(),
        allergens: meal.allergens(),
        copy_text: meal.ingredients_copy_text(),
    })
}

pub async fn list_categories(client: &MealDbClient) -> Result<ListCategoriesResponse, String> {
    let categories = client
        .categories()
        .await
        .map_err(|e| format!("Failed to load categories: {}", e))?;
    let categories: Vec<CategorySummary> = categories.iter().map(CategorySummary::from).collect();
    let total = categories.len();
    Ok(ListCategoriesResponse { categories, total })
}

pub async fn list_meals_by_category<S: KeyValueStore>(
    client: &MealDbClient,
    store: &S,
    category: &str,
) -> Result<ListMealsResponse, String> {
    let category = category.trim();
    if category.is_empty() {
        return Err("category cannot be empty".to_string());
    }
    let meals = client
        .filter_by_category(category)
        .await
        .map_err(|e| format!("Failed to list meals for {}: {}", category, e))?;
    Ok(list_items(store, meals))
}

pub async fn search_meals<S: KeyValueStore>(
    client: &MealDbClient,
    store: &S,
    query: &str,
) -> Result<ListMealsResponse, String> {
    let meals = client
        .search(query.trim())
        .await
        .map_err(|e| format!("Search failed: {}", e))?;
    Ok(list_items(store, meals.iter().map(Meal::summary).collect()))
}

/// Fetch a meal by id, or a random one when no id is given
pub async fn get_meal<S: KeyValueStore>(
    client: &MealDbClient,
    store: &S,
    id: Option<&str>,
    servings: Option<f64>,
    unit_system: Option<&str>,
    base_servings: f64,
    tolerances: FormatTolerances,
) -> Result<Option<MealDetail>, String> {
    let meal = match id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => client.lookup(id).await,
        None => client.random().await,
    }
    .map_err(|e| format!("Failed to fetch meal: {}", e))?;

    match meal {
        Some(meal) => meal_detail(store, &meal, servings, unit_system, base_servings, tolerances).map(Some),
        None => Ok(None),
    }
}

/// Fetch a meal without rendering, for tools that only need its ingredients
pub async fn fetch_meal(client: &MealDbClient, id: &str) -> Result<Option<Meal>, String> {
    client
        .lookup(id.trim())
        .await
        .map_err(|e| format!("Failed to fetch meal {}: {}", id, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::{list_recent_meals, toggle_favorite};
    use crate::scaling::save_unit_system;
    use serde_json::json;

    fn meal() -> Meal {
        serde_json::from_value(json!({
            "idMeal": "52959",
            "strMeal": "Baked salmon with fennel & tomatoes",
            "strCategory": "Seafood",
            "strInstructions": "1. Heat oven to 180C.\r\n2. Roast the fennel.",
            "strIngredient1": "Fennel",
            "strMeasure1": "2 medium",
            "strIngredient2": "Olive Oil",
            "strMeasure2": "2 tbs",
            "strIngredient3": "Milk",
            "strMeasure3": "1/2 cup",
            "strIngredient4": "Salmon",
            "strMeasure4": ""
        }))
        .unwrap()
    }

    #[test]
    fn test_meal_detail_renders_table() {
        let store = MemoryStore::new();
        save_unit_system(&store, UnitSystem::Us);
        let detail = meal_detail(&store, &meal(), Some(4.0), None, 2.0, FormatTolerances::default()).unwrap();

        assert_eq!(detail.servings.factor, 2.0);
        let displays: Vec<&str> = detail.ingredients.iter().map(|i| i.display.as_str()).collect();
        assert_eq!(displays, ["4 medium", "4 tbs", "1 cup"]);
        assert_eq!(detail.unmeasured_ingredients, ["Salmon"]);
        assert_eq!(detail.instructions, ["Heat oven to 180C.", "Roast the fennel."]);
        assert_eq!(detail.allergens, ["milk"]);
        assert!(detail.copy_text.starts_with("2 medium Fennel\n"));
    }

    #[test]
    fn test_meal_detail_metric() {
        let store = MemoryStore::new();
        let detail = meal_detail(&store, &meal(), None, Some("metric"), 2.0, FormatTolerances::default()).unwrap();
        assert_eq!(detail.servings.servings, 2.0);
        assert_eq!(detail.ingredients[2].display, "118 ml");
    }

    #[test]
    fn test_meal_detail_records_recent_and_favorite() {
        let store = MemoryStore::new();
        toggle_favorite(&store, meal().summary());
        let detail = meal_detail(&store, &meal(), None, None, 2.0, FormatTolerances::default()).unwrap();
        assert!(detail.is_favorite);
        assert_eq!(list_recent_meals(&store)[0].id, "52959");
    }

    #[test]
    fn test_list_items_marks_favorites() {
        let store = MemoryStore::new();
        let a = MealSummary { id: "1".into(), name: "A".into(), thumb: None };
        let b = MealSummary { id: "2".into(), name: "B".into(), thumb: None };
        toggle_favorite(&store, b.clone());
        let list = list_items(&store, vec![a, b]);
        assert_eq!(list.total, 2);
        assert!(!list.meals[0].is_favorite);
        assert!(list.meals[1].is_favorite);
    }
}
