//! Measure MCP Tools
//!
//! Parse and render single measures, and read/write the unit-system
//! preference used when rendering.

use serde::Serialize;

use crate::db::KeyValueStore;
use crate::measure::{
    display_measure_with, parse, parse_measure, FormatTolerances, QuantityStyle, RenderOptions,
    UnitSystem,
};
use crate::scaling::{load_unit_system, save_unit_system};

/// Response for render_measure
#[derive(Debug, Serialize)]
pub struct RenderMeasureResponse {
    pub input: String,
    pub display: String,
    pub factor: f64,
    pub unit_system: UnitSystem,
    pub style: QuantityStyle,
}

/// Response for parse_measure
#[derive(Debug, Serialize)]
pub struct ParseMeasureResponse {
    pub input: String,
    pub qty: Option<f64>,
    pub unit: Option<String>,
    /// Trailing text after quantity and unit, when a quantity was found
    pub descriptor: Option<String>,
}

/// Response for get_unit_system / set_unit_system
#[derive(Debug, Serialize)]
pub struct UnitSystemResponse {
    pub unit_system: UnitSystem,
}

/// Resolve an optional unit-system argument, falling back to the stored preference
pub fn resolve_unit_system<S: KeyValueStore>(store: &S, requested: Option<&str>) -> Result<UnitSystem, String> {
    match requested {
        Some(raw) => UnitSystem::from_str(raw)
            .ok_or_else(|| format!("Unknown unit system '{}'; use 'metric' or 'us'", raw)),
        None => Ok(load_unit_system(store)),
    }
}

/// Render one measure for display
pub fn render_measure<S: KeyValueStore>(
    store: &S,
    tolerances: FormatTolerances,
    measure: &str,
    factor: Option<f64>,
    unit_system: Option<&str>,
    style: Option<&str>,
) -> Result<RenderMeasureResponse, String> {
    let factor = factor.unwrap_or(1.0);
    if !factor.is_finite() || factor <= 0.0 {
        return Err("factor must be greater than 0".to_string());
    }
    let system = resolve_unit_system(store, unit_system)?;
    let style = match style {
        Some(raw) => QuantityStyle::from_str(raw)
            .ok_or_else(|| format!("Unknown style '{}'; use 'auto', 'fraction' or 'decimal'", raw))?,
        None => QuantityStyle::Auto,
    };

    let options = RenderOptions {
        factor,
        system,
        style,
        tolerances,
    };

    Ok(RenderMeasureResponse {
        input: measure.to_string(),
        display: display_measure_with(measure, &options),
        factor,
        unit_system: system,
        style,
    })
}

/// Parse one measure into quantity and unit
pub fn parse_measure_text(measure: &str) -> ParseMeasureResponse {
    let parsed = parse(measure);
    ParseMeasureResponse {
        input: measure.to_string(),
        qty: parsed.qty,
        unit: parsed.unit,
        descriptor: parse_measure(measure)
            .map(|m| m.descriptor)
            .filter(|d| !d.is_empty()),
    }
}

pub fn get_unit_system<S: KeyValueStore>(store: &S) -> UnitSystemResponse {
    UnitSystemResponse {
        unit_system: load_unit_system(store),
    }
}

pub fn set_unit_system<S: KeyValueStore>(store: &S, unit_system: &str) -> Result<UnitSystemResponse, String> {
    let system = resolve_unit_system(store, Some(unit_system))?;
    save_unit_system(store, system);
    Ok(UnitSystemResponse { unit_system: system })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_render_uses_stored_unit_system() {
        let store = MemoryStore::new();
        let metric = render_measure(&store, FormatTolerances::default(), "1 cup milk", None, None, None).unwrap();
        assert_eq!(metric.display, "237 ml milk");

        set_unit_system(&store, "us").unwrap();
        let us = render_measure(&store, FormatTolerances::default(), "1 cup milk", Some(2.0), None, None).unwrap();
        assert_eq!(us.display, "2 cups milk");
        assert_eq!(us.unit_system, UnitSystem::Us);
    }

    #[test]
    fn test_render_explicit_arguments() {
        let store = MemoryStore::new();
        let out = render_measure(
            &store,
            FormatTolerances::default(),
            "1/2 cup sugar",
            None,
            Some("us"),
            Some("decimal"),
        )
        .unwrap();
        assert_eq!(out.display, "0.5 cup sugar");
    }

    #[test]
    fn test_render_rejects_bad_arguments() {
        let store = MemoryStore::new();
        let tol = FormatTolerances::default();
        assert!(render_measure(&store, tol, "1 cup", Some(0.0), None, None).is_err());
        assert!(render_measure(&store, tol, "1 cup", None, Some("cubits"), None).is_err());
        assert!(render_measure(&store, tol, "1 cup", None, None, Some("roman")).is_err());
    }

    #[test]
    fn test_parse_measure_text() {
        let out = parse_measure_text("2 tbsp olive oil");
        assert_eq!(out.qty, Some(2.0));
        assert_eq!(out.unit.as_deref(), Some("tbsp"));
        assert_eq!(out.descriptor.as_deref(), Some("olive oil"));

        let out = parse_measure_text("to taste");
        assert_eq!(out.qty, None);
        assert_eq!(out.descriptor, None);
    }

    #[test]
    fn test_unit_system_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(get_unit_system(&store).unit_system, UnitSystem::Metric);
        set_unit_system(&store, "imperial").unwrap();
        assert_eq!(get_unit_system(&store).unit_system, UnitSystem::Us);
        assert!(set_unit_system(&store, "nautical").is_err());
    }
}
