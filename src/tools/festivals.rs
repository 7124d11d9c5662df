//! Festival MCP Tools
//!
//! Browse the bundled festival catalog and open a dish rendered for the
//! chosen servings and unit system.

use serde::Serialize;

use crate::db::KeyValueStore;
use crate::measure::{display_measure_with, FormatTolerances, RenderOptions, UnitSystem};
use crate::models::{FestivalCatalog, FestivalDish, ALL_FESTIVALS};

use super::measures::resolve_unit_system;
use super::servings::{get_servings, set_servings, ServingsResponse};

/// Key holding the last opened festival dish
pub const CURRENT_RECIPE_KEY: &str = "current_recipe";

/// Dish entry for list_festival_dishes
#[derive(Debug, Serialize)]
pub struct FestivalDishSummary {
    pub id: String,
    pub name: String,
    pub festival: String,
    pub description: String,
    pub image: String,
    pub cook_time: String,
    pub servings: u32,
    pub difficulty: String,
}

impl From<&FestivalDish> for FestivalDishSummary {
    fn from(dish: &FestivalDish) -> Self {
        Self {
            id: dish.id.clone(),
            name: dish.name.clone(),
            festival: dish.festival.clone(),
            description: dish.description.clone(),
            image: dish.image.clone(),
            cook_time: dish.cook_time.clone(),
            servings: dish.servings,
            difficulty: dish.difficulty.clone(),
        }
    }
}

/// Response for list_festival_dishes
#[derive(Debug, Serialize)]
pub struct ListFestivalDishesResponse {
    pub festival: String,
    pub description: Option<String>,
    pub festivals: Vec<String>,
    pub dishes: Vec<FestivalDishSummary>,
    pub total: usize,
}

/// Ingredient line before and after rendering
#[derive(Debug, Serialize)]
pub struct RenderedLine {
    pub original: String,
    pub display: String,
}

/// Response for get_festival_dish
#[derive(Debug, Serialize)]
pub struct FestivalDishDetail {
    #[serde(flatten)]
    pub summary: FestivalDishSummary,
    pub unit_system: UnitSystem,
    pub scaling: ServingsResponse,
    pub ingredients: Vec<RenderedLine>,
    pub instructions: Vec<String>,
}

pub fn list_festival_dishes(catalog: &FestivalCatalog, festival: Option<&str>) -> ListFestivalDishesResponse {
    let festival = festival
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .unwrap_or(ALL_FESTIVALS);
    let dishes: Vec<FestivalDishSummary> = catalog
        .dishes_for(festival)
        .into_iter()
        .map(FestivalDishSummary::from)
        .collect();
    let total = dishes.len();

    ListFestivalDishesResponse {
        festival: festival.to_string(),
        description: catalog.description(festival).map(str::to_string),
        festivals: catalog.festival_names().into_iter().map(str::to_string).collect(),
        dishes,
        total,
    }
}

/// Open a dish; its own serving count is the scaling base
pub fn get_festival_dish<S: KeyValueStore>(
    store: &S,
    catalog: &FestivalCatalog,
    id: &str,
    servings: Option<f64>,
    unit_system: Option<&str>,
    tolerances: FormatTolerances,
) -> Result<Option<FestivalDishDetail>, String> {
    let Some(dish) = catalog.dish(id.trim()) else {
        return Ok(None);
    };

    let system = resolve_unit_system(store, unit_system)?;
    let base = f64::from(dish.servings);
    let scaling = match servings {
        Some(value) => set_servings(store, &dish.id, base, value)?,
        None => get_servings(store, &dish.id, base)?,
    };

    let options = RenderOptions::new(scaling.factor, system).with_tolerances(tolerances);
    let ingredients = dish
        .ingredients
        .iter()
        .map(|line| RenderedLine {
            original: line.clone(),
            display: display_measure_with(line, &options),
        })
        .collect();

    if let Err(e) = store.set_json(CURRENT_RECIPE_KEY, dish) {
        tracing::warn!("Failed to persist {}: {}", CURRENT_RECIPE_KEY, e);
    }

    Ok(Some(FestivalDishDetail {
        summary: FestivalDishSummary::from(dish),
        unit_system: system,
        scaling,
        ingredients,
        instructions: dish.instructions.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn catalog() -> FestivalCatalog {
        FestivalCatalog::bundled().unwrap()
    }

    #[test]
    fn test_list_all_by_default() {
        let out = list_festival_dishes(&catalog(), None);
        assert_eq!(out.festival, "All");
        assert_eq!(out.total, 8);
        assert_eq!(out.festivals.len(), 5);
        assert!(out.description.is_some());
    }

    #[test]
    fn test_list_one_festival() {
        let out = list_festival_dishes(&catalog(), Some("Diwali"));
        let names: Vec<&str> = out.dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Kaju Katli", "Samosa"]);
    }

    #[test]
    fn test_dish_scaled_and_converted() {
        let store = MemoryStore::new();
        // Biryani serves 8; doubling it
        let dish = get_festival_dish(&store, &catalog(), "eid_2", Some(16.0), Some("us"), FormatTolerances::default())
            .unwrap()
            .unwrap();
        assert_eq!(dish.scaling.factor, 2.0);
        let displays: Vec<&str> = dish.ingredients.iter().map(|l| l.display.as_str()).collect();
        assert_eq!(displays[0], "4 cups basmati rice");
        assert_eq!(displays[1], "4.4 lb mutton");
        assert_eq!(displays[2], "Yogurt");
    }

    #[test]
    fn test_dish_remembered_as_current() {
        let store = MemoryStore::new();
        get_festival_dish(&store, &catalog(), "holi_2", None, None, FormatTolerances::default()).unwrap();
        let current: FestivalDish = store.get_json(CURRENT_RECIPE_KEY).unwrap().unwrap();
        assert_eq!(current.name, "Thandai");
    }

    #[test]
    fn test_unknown_dish() {
        let store = MemoryStore::new();
        assert!(get_festival_dish(&store, &catalog(), "nope", None, None, FormatTolerances::default())
            .unwrap()
            .is_none());
    }
}
