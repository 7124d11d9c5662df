//! Mealwise Library
//!
//! Ingredient measure parsing, scaling and unit conversion, read-aloud
//! support, and the recipe services exposed by the MCP server.

pub mod build_info;
pub mod client;
pub mod config;
pub mod db;
pub mod mcp;
pub mod measure;
pub mod models;
pub mod scaling;
pub mod speech;
pub mod tools;
