//! MealDB records
//!
//! A meal arrives as one flat JSON object with up to twenty numbered
//! `strIngredientN` / `strMeasureN` pairs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const MAX_INGREDIENTS: usize = 20;

/// Ingredient-name keywords flagged as allergens
pub const ALLERGEN_KEYWORDS: &[&str] = &[
    "milk", "cheese", "butter", "cream", "egg",
    "peanut", "almond", "cashew", "walnut", "pecan", "hazelnut",
    "wheat", "barley", "rye", "soy", "soybean",
    "shrimp", "prawn", "crab", "lobster", "clam", "mussel", "oyster", "fish",
];

/// Categories listed ahead of the rest
const PRIORITY_CATEGORIES: &[&str] = &["Dessert", "Vegetarian", "Pasta"];

/// Full meal record from the lookup/search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumb: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    /// Numbered ingredient/measure fields and anything else the API sends
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// One ingredient row; `measure` is trimmed and may be empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientLine {
    pub name: String,
    pub measure: String,
}

impl Meal {
    fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }

    /// Non-empty ingredients in index order, with their measures
    pub fn ingredients(&self) -> Vec<IngredientLine> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|n| {
                let name = self.field(&format!("strIngredient{}", n))?.trim();
                if name.is_empty() {
                    return None;
                }
                let measure = self
                    .field(&format!("strMeasure{}", n))
                    .unwrap_or("")
                    .trim();
                Some(IngredientLine {
                    name: name.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }

    /// Ingredients that have a measure; these are shown and spoken
    pub fn measured_ingredients(&self) -> Vec<IngredientLine> {
        self.ingredients()
            .into_iter()
            .filter(|line| !line.measure.is_empty())
            .collect()
    }

    /// Instruction text split into spoken steps
    ///
    /// One step per line, with leading numbering (`1.`, `2)`, `3`) removed.
    pub fn instruction_sentences(&self) -> Vec<String> {
        let Some(text) = self.instructions.as_deref() else {
            return Vec::new();
        };
        text.lines()
            .map(strip_step_number)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// `"<measure> <name>"` per measured ingredient
    pub fn ingredient_sentences(&self) -> Vec<String> {
        self.measured_ingredients()
            .iter()
            .map(|line| format!("{} {}", line.measure, line.name))
            .collect()
    }

    /// Ingredient list as copied to the clipboard
    pub fn ingredients_copy_text(&self) -> String {
        self.ingredient_sentences().join("\n")
    }

    /// Allergen keywords found in any ingredient name, in keyword order
    pub fn allergens(&self) -> Vec<&'static str> {
        let names: Vec<String> = self
            .ingredients()
            .iter()
            .map(|line| line.name.to_lowercase())
            .collect();
        ALLERGEN_KEYWORDS
            .iter()
            .copied()
            .filter(|keyword| names.iter().any(|name| name.contains(keyword)))
            .collect()
    }

    pub fn summary(&self) -> MealSummary {
        MealSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumb: self.thumb.clone(),
        }
    }
}

fn strip_step_number(line: &str) -> &str {
    let line = line.trim_start();
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    rest.strip_prefix('.')
        .or_else(|| rest.strip_prefix(')'))
        .unwrap_or(rest)
}

/// List entry from the filter endpoint; also what favorites and recents store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumb: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategory")]
    pub id: String,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumb: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

/// Priority categories first, the rest in source order
pub fn order_categories(categories: Vec<Category>) -> Vec<Category> {
    let (mut priority, rest): (Vec<_>, Vec<_>) = categories
        .into_iter()
        .partition(|c| PRIORITY_CATEGORIES.contains(&c.name.as_str()));
    priority.sort_by_key(|c| {
        PRIORITY_CATEGORIES
            .iter()
            .position(|p| *p == c.name)
            .unwrap_or(usize::MAX)
    });
    priority.extend(rest);
    priority
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meal() -> Meal {
        serde_json::from_value(json!({
            "idMeal": "52772",
            "strMeal": "Teriyaki Chicken Casserole",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/wvpsxx1468256321.jpg",
            "strCategory": "Chicken",
            "strArea": "Japanese",
            "strInstructions": "1. Preheat oven to 350° F.\r\n\r\n2) Combine soy sauce.\n3 Bake for 15 minutes\n",
            "strYoutube": null,
            "strTags": "Meat,Casserole",
            "strIngredient1": "soy sauce",
            "strIngredient2": "water",
            "strIngredient3": "Butter",
            "strIngredient4": "",
            "strIngredient5": null,
            "strIngredient6": "Salt",
            "strMeasure1": "3/4 cup",
            "strMeasure2": "1/2 cup ",
            "strMeasure3": "2 tbs",
            "strMeasure4": "",
            "strMeasure5": null,
            "strMeasure6": " "
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_flat_record() {
        let meal = meal();
        assert_eq!(meal.id, "52772");
        assert_eq!(meal.area.as_deref(), Some("Japanese"));
        assert_eq!(meal.youtube, None);
    }

    #[test]
    fn test_ingredients_in_order() {
        let lines = meal().ingredients();
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["soy sauce", "water", "Butter", "Salt"]);
        assert_eq!(lines[1].measure, "1/2 cup");
        assert_eq!(lines[3].measure, "");
    }

    #[test]
    fn test_unmeasured_ingredients_not_spoken() {
        let meal = meal();
        assert_eq!(meal.measured_ingredients().len(), 3);
        assert_eq!(
            meal.ingredient_sentences(),
            ["3/4 cup soy sauce", "1/2 cup water", "2 tbs Butter"]
        );
        assert_eq!(
            meal.ingredients_copy_text(),
            "3/4 cup soy sauce\n1/2 cup water\n2 tbs Butter"
        );
    }

    #[test]
    fn test_instruction_sentences_strip_numbering() {
        assert_eq!(
            meal().instruction_sentences(),
            ["Preheat oven to 350° F.", "Combine soy sauce.", "Bake for 15 minutes"]
        );
    }

    #[test]
    fn test_allergens() {
        assert_eq!(meal().allergens(), ["butter", "soy"]);
    }

    #[test]
    fn test_round_trip_keeps_numbered_fields() {
        let meal = meal();
        let value = serde_json::to_value(&meal).unwrap();
        assert_eq!(value["strIngredient1"], "soy sauce");
        assert_eq!(value["idMeal"], "52772");
    }

    #[test]
    fn test_category_order() {
        let categories: Vec<Category> = ["Beef", "Pasta", "Dessert", "Seafood", "Vegetarian"]
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: i.to_string(),
                name: name.to_string(),
                thumb: None,
                description: None,
            })
            .collect();
        let names: Vec<String> = order_categories(categories).into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["Dessert", "Vegetarian", "Pasta", "Beef", "Seafood"]);
    }
}
