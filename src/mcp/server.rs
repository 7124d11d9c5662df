//! Mealwise MCP Server Implementation
//!
//! Implements the MCP server with all Mealwise tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::client::{AiRecipeClient, ClientResult, MealDbClient};
use crate::config::Config;
use crate::db::Database;
use crate::measure::FormatTolerances;
use crate::models::FestivalCatalog;
use crate::tools::status::StatusTracker;
use crate::tools::{diet, festivals, lists, meals, measures, recipes, servings};

/// Mealwise MCP Service
#[derive(Clone)]
pub struct MealwiseService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    mealdb: Arc<MealDbClient>,
    ai: Arc<AiRecipeClient>,
    festivals: Arc<FestivalCatalog>,
    base_servings: f64,
    tolerances: FormatTolerances,
    tool_router: ToolRouter<MealwiseService>,
}

impl MealwiseService {
    pub fn new(config: &Config, database: Database, festivals: FestivalCatalog) -> ClientResult<Self> {
        Ok(Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config))),
            database,
            mealdb: Arc::new(MealDbClient::new(config.mealdb_url.clone())?),
            ai: Arc::new(AiRecipeClient::new(config.ai_endpoint.clone())?),
            festivals: Arc::new(festivals),
            base_servings: config.base_servings,
            tolerances: config.tolerances,
            tool_router: Self::tool_router(),
        })
    }

    /// Base servings for a recipe: explicit value, then a festival dish's own
    /// count, then the configured default
    fn base_servings_for(&self, recipe_id: &str, explicit: Option<f64>) -> f64 {
        explicit
            .or_else(|| self.festivals.dish(recipe_id.trim()).map(|d| f64::from(d.servings)))
            .unwrap_or(self.base_servings)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn not_found(what: &str, id: &str) -> Result<CallToolResult, McpError> {
    json_result(&serde_json::json!({ "error": format!("{} not found", what), "id": id }))
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListMealsByCategoryParams {
    /// Category name, e.g. "Dessert"
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchMealsParams {
    /// Meal name or part of it
    pub query: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetMealParams {
    /// MealDB id; omit for a random meal
    pub id: Option<String>,
    /// Servings to show; remembered for this meal
    pub servings: Option<f64>,
    /// "metric" or "us"; defaults to the saved preference
    pub unit_system: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealIdParams {
    /// MealDB id
    pub meal_id: String,
}

// ============================================================================
// Measure Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenderMeasureParams {
    /// Measure text, e.g. "1 1/2 cups milk"
    pub measure: String,
    /// Scale factor (default 1)
    pub factor: Option<f64>,
    /// "metric" or "us"; defaults to the saved preference
    pub unit_system: Option<String>,
    /// "auto" (default), "fraction" or "decimal"
    pub style: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseMeasureParams {
    /// Measure text, e.g. "1/2 cup"
    pub measure: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetUnitSystemParams {
    /// "metric" or "us"
    pub unit_system: String,
}

// ============================================================================
// Servings Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ServingsParams {
    /// MealDB id or festival dish id
    pub recipe_id: String,
    /// Servings the recipe makes as written
    pub base_servings: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetServingsParams {
    /// MealDB id or festival dish id
    pub recipe_id: String,
    /// New serving count (> 0)
    pub servings: f64,
    /// Servings the recipe makes as written
    pub base_servings: Option<f64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StepServingsParams {
    /// MealDB id or festival dish id
    pub recipe_id: String,
    /// "up" or "down"
    pub direction: String,
    /// Servings the recipe makes as written
    pub base_servings: Option<f64>,
}

// ============================================================================
// List Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RemoveShoppingItemParams {
    /// Ingredient name (case-insensitive)
    pub name: String,
}

// ============================================================================
// Festival / Diet / Generation Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFestivalDishesParams {
    /// "Holi", "Diwali", "Christmas", "Eid" or "All" (default)
    pub festival: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFestivalDishParams {
    /// Dish id, e.g. "eid_2"
    pub id: String,
    /// Servings to show; remembered for this dish
    pub servings: Option<f64>,
    /// "metric" or "us"; defaults to the saved preference
    pub unit_system: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DietTargetsParams {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: f64,
    /// "male" or "female"
    pub gender: String,
    /// sedentary, lightly_active, moderately_active, very_active, extremely_active
    #[serde(default = "default_activity")]
    pub activity_level: String,
    /// bulk, cut or maintain
    #[serde(default = "default_goal")]
    pub goal: String,
}

fn default_activity() -> String { "sedentary".to_string() }
fn default_goal() -> String { "maintain".to_string() }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateRecipeParams {
    /// What to cook, e.g. "high-protein vegetarian lunch"
    pub prompt: String,
    /// "metric" or "us"; defaults to the saved preference
    pub unit_system: Option<String>,
}

// ============================================================================
// Tool Router
// ============================================================================

#[tool_router]
impl MealwiseService {
    // --- Status ---

    #[tool(description = "Get the current status of the Mealwise service including build info, database status, upstream configuration and process information")]
    async fn mealwise_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the Mealwise tools. Call this when starting a cooking session or when unsure which tool to use.")]
    fn recipe_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::RECIPE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(RECIPE_INSTRUCTIONS)]))
    }

    // --- Meals ---

    #[tool(description = "List MealDB categories (Dessert, Vegetarian and Pasta first)")]
    async fn list_categories(&self) -> Result<CallToolResult, McpError> {
        let result = meals::list_categories(&self.mealdb).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List meals in a MealDB category, marking favorites")]
    async fn list_meals_by_category(&self, Parameters(p): Parameters<ListMealsByCategoryParams>) -> Result<CallToolResult, McpError> {
        let result = meals::list_meals_by_category(&self.mealdb, &self.database, &p.category)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Search MealDB meals by name")]
    async fn search_meals(&self, Parameters(p): Parameters<SearchMealsParams>) -> Result<CallToolResult, McpError> {
        let result = meals::search_meals(&self.mealdb, &self.database, &p.query)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get a meal with its ingredient table scaled to the chosen servings and shown in the chosen unit system, plus instruction steps and allergens. Records the meal as recently viewed. Omit id for a random meal.")]
    async fn get_meal(&self, Parameters(p): Parameters<GetMealParams>) -> Result<CallToolResult, McpError> {
        let result = meals::get_meal(
            &self.mealdb,
            &self.database,
            p.id.as_deref(),
            p.servings,
            p.unit_system.as_deref(),
            self.base_servings,
            self.tolerances,
        )
        .await
        .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => json_result(&detail),
            None => not_found("Meal", p.id.as_deref().unwrap_or("random")),
        }
    }

    // --- Measures ---

    #[tool(description = "Render a measure for display: parse it, scale by factor, convert to the unit system and format with cooking fractions. Unreadable measures come back unchanged.")]
    fn render_measure(&self, Parameters(p): Parameters<RenderMeasureParams>) -> Result<CallToolResult, McpError> {
        let result = measures::render_measure(
            &self.database,
            self.tolerances,
            &p.measure,
            p.factor,
            p.unit_system.as_deref(),
            p.style.as_deref(),
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Parse a measure into quantity and canonical unit. Ranges, zero and free text give null quantity.")]
    fn parse_measure(&self, Parameters(p): Parameters<ParseMeasureParams>) -> Result<CallToolResult, McpError> {
        json_result(&measures::parse_measure_text(&p.measure))
    }

    #[tool(description = "Get the saved unit system (metric or us)")]
    fn get_unit_system(&self) -> Result<CallToolResult, McpError> {
        json_result(&measures::get_unit_system(&self.database))
    }

    #[tool(description = "Save the unit system used to show measures (metric or us)")]
    fn set_unit_system(&self, Parameters(p): Parameters<SetUnitSystemParams>) -> Result<CallToolResult, McpError> {
        let result = measures::set_unit_system(&self.database, &p.unit_system).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Servings ---

    #[tool(description = "Get the saved servings and scale factor for a recipe")]
    fn get_servings(&self, Parameters(p): Parameters<ServingsParams>) -> Result<CallToolResult, McpError> {
        let base = self.base_servings_for(&p.recipe_id, p.base_servings);
        let result = servings::get_servings(&self.database, &p.recipe_id, base).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Set the servings for a recipe; remembered for next time")]
    fn set_servings(&self, Parameters(p): Parameters<SetServingsParams>) -> Result<CallToolResult, McpError> {
        let base = self.base_servings_for(&p.recipe_id, p.base_servings);
        let result = servings::set_servings(&self.database, &p.recipe_id, base, p.servings)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Step a recipe's servings up or down by one, kept between 0.5 and 12")]
    fn step_servings(&self, Parameters(p): Parameters<StepServingsParams>) -> Result<CallToolResult, McpError> {
        let base = self.base_servings_for(&p.recipe_id, p.base_servings);
        let result = servings::step_servings(&self.database, &p.recipe_id, base, &p.direction)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Reset a recipe's servings to its base servings")]
    fn reset_servings(&self, Parameters(p): Parameters<ServingsParams>) -> Result<CallToolResult, McpError> {
        let base = self.base_servings_for(&p.recipe_id, p.base_servings);
        let result = servings::reset_servings(&self.database, &p.recipe_id, base).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Favorites / Recent ---

    #[tool(description = "Add a meal to favorites, or remove it if already there")]
    async fn toggle_favorite(&self, Parameters(p): Parameters<MealIdParams>) -> Result<CallToolResult, McpError> {
        let result = lists::toggle_favorite(&self.mealdb, &self.database, &p.meal_id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List favorite meals")]
    fn list_favorites(&self) -> Result<CallToolResult, McpError> {
        json_result(&lists::list_favorites(&self.database))
    }

    #[tool(description = "List the last five meals opened with get_meal, most recent first")]
    fn list_recent_meals(&self) -> Result<CallToolResult, McpError> {
        json_result(&lists::list_recent_meals(&self.database))
    }

    // --- Shopping List ---

    #[tool(description = "Add every ingredient of a meal to the shopping list; same ingredient and unit are summed")]
    async fn add_meal_to_shopping_list(&self, Parameters(p): Parameters<MealIdParams>) -> Result<CallToolResult, McpError> {
        let result = lists::add_meal_to_shopping_list(&self.mealdb, &self.database, &p.meal_id)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the shopping list")]
    fn get_shopping_list(&self) -> Result<CallToolResult, McpError> {
        let result = lists::get_shopping_list(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Remove an ingredient (all units) from the shopping list")]
    fn remove_shopping_item(&self, Parameters(p): Parameters<RemoveShoppingItemParams>) -> Result<CallToolResult, McpError> {
        let result = lists::remove_shopping_item(&self.database, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Empty the shopping list")]
    fn clear_shopping_list(&self) -> Result<CallToolResult, McpError> {
        let result = lists::clear_shopping_list(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Festivals ---

    #[tool(description = "List festival dishes, optionally for one festival (Holi, Diwali, Christmas, Eid)")]
    fn list_festival_dishes(&self, Parameters(p): Parameters<ListFestivalDishesParams>) -> Result<CallToolResult, McpError> {
        json_result(&festivals::list_festival_dishes(&self.festivals, p.festival.as_deref()))
    }

    #[tool(description = "Get a festival dish with ingredients scaled from the dish's own servings and shown in the chosen unit system")]
    fn get_festival_dish(&self, Parameters(p): Parameters<GetFestivalDishParams>) -> Result<CallToolResult, McpError> {
        let result = festivals::get_festival_dish(
            &self.database,
            &self.festivals,
            &p.id,
            p.servings,
            p.unit_system.as_deref(),
            self.tolerances,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(detail) => json_result(&detail),
            None => not_found("Festival dish", &p.id),
        }
    }

    // --- Diet / Generation ---

    #[tool(description = "Calculate BMR, daily calorie target, BMI and macro grams from height, weight, age, gender, activity level and goal")]
    fn calculate_diet_targets(&self, Parameters(p): Parameters<DietTargetsParams>) -> Result<CallToolResult, McpError> {
        let result = diet::calculate_diet_targets(
            p.height_cm,
            p.weight_kg,
            p.age_years,
            &p.gender,
            &p.activity_level,
            &p.goal,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Generate a recipe from a prompt using the configured AI endpoint; amounts are shown in the chosen unit system")]
    async fn generate_recipe(&self, Parameters(p): Parameters<GenerateRecipeParams>) -> Result<CallToolResult, McpError> {
        let result = recipes::generate_recipe(&self.ai, &self.database, &p.prompt, p.unit_system.as_deref(), self.tolerances)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MealwiseService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealwise".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Mealwise".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Mealwise - recipe discovery with serving scaling and metric/US measure conversion. \
                 Call recipe_instructions first if unsure. \
                 Meals: list_categories, list_meals_by_category, search_meals, get_meal. \
                 Measures: render_measure, parse_measure, get/set_unit_system. \
                 Servings: get/set/step/reset_servings. \
                 Lists: toggle_favorite, list_favorites, list_recent_meals, \
                 add_meal_to_shopping_list, get_shopping_list, remove_shopping_item, clear_shopping_list. \
                 Festivals: list_festival_dishes, get_festival_dish. \
                 Other: calculate_diet_targets, generate_recipe."
                    .into(),
            ),
        }
    }
}
