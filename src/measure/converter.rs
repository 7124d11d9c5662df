//! Unit system conversion
//!
//! Rewrites measures between metric and US customary units. Conversion is a
//! no-op when the unit is missing, unrecognized, shared by both systems or
//! already in the target system, which makes it idempotent.

use super::format::{format_quantity, QuantityStyle};
use super::parser::{parse_measure, Measure};
use super::render::render_measure;
use super::units::{Unit, UnitKind, UnitSystem, G_PER_KG, G_PER_LB, ML_PER_CUP, ML_PER_LITER, ML_PER_TBSP};

/// Convert a display string ("1 ½ cups milk") to the target unit system
///
/// Returns the input unchanged when no conversion applies or the text cannot
/// be parsed.
pub fn convert(display: &str, target: UnitSystem) -> String {
    let Some(measure) = parse_measure(display) else {
        return display.to_string();
    };

    match convert_measure(&measure, target) {
        Some(converted) => {
            let rendered = render_measure(&converted);
            if rendered.is_empty() {
                display.to_string()
            } else {
                rendered
            }
        }
        None => display.to_string(),
    }
}

/// Convert a structured measure, `None` when no conversion applies
///
/// Converted quantities of ten or more are rounded to whole numbers. A
/// conversion that would display as zero is not applied.
pub fn convert_measure(measure: &Measure, target: UnitSystem) -> Option<Measure> {
    let unit = measure.unit?;
    match unit.system() {
        Some(system) if system != target => {}
        _ => return None,
    }
    // mg has no US counterpart
    if unit == Unit::Milligram && target == UnitSystem::Us {
        return None;
    }

    let (quantity, unit) = match unit.kind() {
        UnitKind::Weight => convert_weight(measure.quantity, unit, target)?,
        UnitKind::Volume => convert_volume(measure.quantity, unit, target)?,
        UnitKind::Temperature => convert_temperature(measure.quantity, target),
    };

    if !quantity.is_finite() {
        tracing::debug!("Conversion of {:?} produced a non-finite quantity", measure);
        return None;
    }
    let quantity = round_converted(quantity);
    if format_quantity(quantity, QuantityStyle::Auto, Some(unit.token())) == "0" {
        tracing::debug!("Conversion of {:?} to {:?} rounds to zero, keeping it", measure, target);
        return None;
    }

    Some(Measure {
        quantity,
        unit: Some(unit),
        descriptor: measure.descriptor.clone(),
    })
}

fn convert_weight(quantity: f64, unit: Unit, target: UnitSystem) -> Option<(f64, Unit)> {
    let grams = quantity * unit.grams_per_unit()?;
    let converted = match target {
        UnitSystem::Metric if grams >= G_PER_KG => (grams / G_PER_KG, Unit::Kilogram),
        UnitSystem::Metric => (grams, Unit::Gram),
        UnitSystem::Us if grams >= G_PER_LB => (grams / G_PER_LB, Unit::Pound),
        UnitSystem::Us => (grams / Unit::Ounce.grams_per_unit()?, Unit::Ounce),
    };
    Some(converted)
}

fn convert_volume(quantity: f64, unit: Unit, target: UnitSystem) -> Option<(f64, Unit)> {
    let ml = quantity * unit.ml_per_unit()?;
    let converted = match target {
        UnitSystem::Metric if ml >= ML_PER_LITER => (ml / ML_PER_LITER, Unit::Liter),
        UnitSystem::Metric => (ml, Unit::Milliliter),
        UnitSystem::Us if ml < ML_PER_TBSP => (ml / Unit::Teaspoon.ml_per_unit()?, Unit::Teaspoon),
        UnitSystem::Us if ml < ML_PER_CUP / 4.0 => (ml / ML_PER_TBSP, Unit::Tablespoon),
        UnitSystem::Us => (ml / ML_PER_CUP, Unit::Cup),
    };
    Some(converted)
}

fn round_converted(quantity: f64) -> f64 {
    if quantity >= 10.0 {
        quantity.round()
    } else {
        quantity
    }
}

fn convert_temperature(quantity: f64, target: UnitSystem) -> (f64, Unit) {
    match target {
        UnitSystem::Metric => ((quantity - 32.0) * 5.0 / 9.0, Unit::Celsius),
        UnitSystem::Us => (quantity * 9.0 / 5.0 + 32.0, Unit::Fahrenheit),
    }
}
