//! Unit types and conversion constants
//!
//! Provides the recognized cooking units, the metric/US unit systems and the
//! fixed conversion factors between them.

use serde::{Deserialize, Serialize};

/// Unit convention selected by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Us,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Us => "us",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Some(UnitSystem::Metric),
            "us" | "imperial" | "customary" => Some(UnitSystem::Us),
            _ => None,
        }
    }
}

/// Physical dimension of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Weight,
    Volume,
    Temperature,
}

/// A recognized cooking unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Milligram,
    Gram,
    Kilogram,
    Ounce,
    Pound,
    Milliliter,
    Liter,
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    Fahrenheit,
    Celsius,
}

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 14.7868;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup (US)
pub const ML_PER_CUP: f64 = 236.588;
/// Milliliters per pint (US)
pub const ML_PER_PINT: f64 = 473.176;
/// Milliliters per quart (US)
pub const ML_PER_QUART: f64 = 946.353;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;
/// Milliliters per gallon (US)
pub const ML_PER_GALLON: f64 = 3785.41;

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce
pub const G_PER_OZ: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;

/// Units that read more naturally as fractions (½ cup rather than 0.5 cup)
pub const FRACTION_FRIENDLY_UNITS: &[&str] = &[
    "tsp",
    "teaspoon",
    "teaspoons",
    "tbsp",
    "tablespoon",
    "tablespoons",
    "cup",
    "cups",
    "oz",
    "ounce",
    "ounces",
];

impl Unit {
    /// Look up a single unit spelling (case-insensitive, surrounding whitespace ignored)
    pub fn from_token(token: &str) -> Option<Self> {
        let lower = token.trim().to_lowercase();
        let unit = match lower.as_str() {
            "mg" | "milligram" | "milligrams" => Unit::Milligram,
            "g" | "gr" | "gram" | "grams" => Unit::Gram,
            "kg" | "kilo" | "kilos" | "kilogram" | "kilograms" => Unit::Kilogram,
            "oz" | "ounce" | "ounces" => Unit::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => Unit::Pound,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Unit::Milliliter,
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liter,
            "tsp" | "teaspoon" | "teaspoons" => Unit::Teaspoon,
            "tbsp" | "tablespoon" | "tablespoons" => Unit::Tablespoon,
            "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Unit::FluidOunce,
            "cup" | "cups" => Unit::Cup,
            "pint" | "pints" => Unit::Pint,
            "quart" | "quarts" => Unit::Quart,
            "gallon" | "gallons" => Unit::Gallon,
            "°f" | "fahrenheit" => Unit::Fahrenheit,
            "°c" | "celsius" => Unit::Celsius,
            _ => return None,
        };
        Some(unit)
    }

    /// Normalized lowercase token
    pub fn token(&self) -> &'static str {
        match self {
            Unit::Milligram => "mg",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::FluidOunce => "fl oz",
            Unit::Cup => "cup",
            Unit::Pint => "pint",
            Unit::Quart => "quart",
            Unit::Gallon => "gallon",
            Unit::Fahrenheit => "°f",
            Unit::Celsius => "°c",
        }
    }

    /// Spelling used when rendering a quantity of this unit
    pub fn label(&self, quantity: f64) -> String {
        match self {
            Unit::Fahrenheit => "°F".to_string(),
            Unit::Celsius => "°C".to_string(),
            Unit::Cup | Unit::Pint | Unit::Quart | Unit::Gallon if quantity > 1.0 => {
                format!("{}s", self.token())
            }
            _ => self.token().to_string(),
        }
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Milligram | Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => {
                UnitKind::Weight
            }
            Unit::Fahrenheit | Unit::Celsius => UnitKind::Temperature,
            _ => UnitKind::Volume,
        }
    }

    /// The unit system this unit belongs to, `None` for units used in both (spoons)
    pub fn system(&self) -> Option<UnitSystem> {
        match self {
            Unit::Milligram
            | Unit::Gram
            | Unit::Kilogram
            | Unit::Milliliter
            | Unit::Liter
            | Unit::Celsius => Some(UnitSystem::Metric),
            Unit::Ounce
            | Unit::Pound
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon
            | Unit::Fahrenheit => Some(UnitSystem::Us),
            Unit::Teaspoon | Unit::Tablespoon => None,
        }
    }

    /// Conversion factor to grams for weight units
    pub fn grams_per_unit(&self) -> Option<f64> {
        match self {
            Unit::Milligram => Some(G_PER_MG),
            Unit::Gram => Some(1.0),
            Unit::Kilogram => Some(G_PER_KG),
            Unit::Ounce => Some(G_PER_OZ),
            Unit::Pound => Some(G_PER_LB),
            _ => None,
        }
    }

    /// Conversion factor to milliliters for volume units
    pub fn ml_per_unit(&self) -> Option<f64> {
        match self {
            Unit::Milliliter => Some(1.0),
            Unit::Liter => Some(ML_PER_LITER),
            Unit::Teaspoon => Some(ML_PER_TSP),
            Unit::Tablespoon => Some(ML_PER_TBSP),
            Unit::FluidOunce => Some(ML_PER_FL_OZ),
            Unit::Cup => Some(ML_PER_CUP),
            Unit::Pint => Some(ML_PER_PINT),
            Unit::Quart => Some(ML_PER_QUART),
            Unit::Gallon => Some(ML_PER_GALLON),
            _ => None,
        }
    }
}

/// Whether fraction glyphs should be preferred for this unit spelling
pub fn is_fraction_friendly(unit: &str) -> bool {
    let lower = unit.trim().to_lowercase();
    FRACTION_FRIENDLY_UNITS.contains(&lower.as_str())
}
