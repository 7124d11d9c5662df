//! MCP Tools
//!
//! Tool implementations for the Mealwise MCP server.

pub mod diet;
pub mod festivals;
pub mod lists;
pub mod meals;
pub mod measures;
pub mod recipes;
pub mod servings;
pub mod status;
