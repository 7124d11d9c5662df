//! Festival dish catalog
//!
//! A fixed set of dishes grouped by festival, bundled with the binary.

use serde::{Deserialize, Serialize};

/// Filter value that matches every festival
pub const ALL_FESTIVALS: &str = "All";

const BUNDLED_CATALOG: &str = include_str!("../../data/festivals.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestivalDish {
    pub id: String,
    pub name: String,
    pub festival: String,
    pub description: String,
    pub image: String,
    /// Raw measure lines, e.g. "1/2 cup sugar"
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cook_time: String,
    pub servings: u32,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FestivalInfo {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FestivalCatalog {
    pub festivals: Vec<FestivalInfo>,
    pub dishes: Vec<FestivalDish>,
}

impl FestivalCatalog {
    /// The catalog shipped in `data/festivals.json`
    pub fn bundled() -> serde_json::Result<Self> {
        serde_json::from_str(BUNDLED_CATALOG)
    }

    /// Festival filter names, `All` first
    pub fn festival_names(&self) -> Vec<&str> {
        self.festivals.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn description(&self, festival: &str) -> Option<&str> {
        self.festivals
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(festival))
            .map(|f| f.description.as_str())
    }

    /// Dishes for one festival; `All` returns the whole catalog
    pub fn dishes_for(&self, festival: &str) -> Vec<&FestivalDish> {
        let festival = festival.trim();
        if festival.is_empty() || festival.eq_ignore_ascii_case(ALL_FESTIVALS) {
            return self.dishes.iter().collect();
        }
        self.dishes
            .iter()
            .filter(|d| d.festival.eq_ignore_ascii_case(festival))
            .collect()
    }

    pub fn dish(&self, id: &str) -> Option<&FestivalDish> {
        self.dishes.iter().find(|d| d.id == id)
    }
}
