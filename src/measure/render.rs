//! Display pipeline
//!
//! raw measure -> parse -> scale -> convert -> render. The measure stays
//! structured until the final string is produced.

use serde::{Deserialize, Serialize};

use super::converter::convert_measure;
use super::format::{format_quantity_with, FormatTolerances, QuantityStyle};
use super::parser::{parse_measure, Measure};
use super::units::UnitSystem;

/// Options for rendering a measure for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub factor: f64,
    pub system: UnitSystem,
    pub style: QuantityStyle,
    pub tolerances: FormatTolerances,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            factor: 1.0,
            system: UnitSystem::default(),
            style: QuantityStyle::default(),
            tolerances: FormatTolerances::default(),
        }
    }
}

impl RenderOptions {
    pub fn new(factor: f64, system: UnitSystem) -> Self {
        Self {
            factor,
            system,
            ..Self::default()
        }
    }

    pub fn with_tolerances(mut self, tolerances: FormatTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }
}

/// Render a raw measure scaled by `factor` in the given unit system
///
/// Unparseable measures ("to taste") come back as the trimmed raw text.
pub fn display_measure(raw: &str, factor: f64, system: UnitSystem) -> String {
    display_measure_with(raw, &RenderOptions::new(factor, system))
}

pub fn display_measure_with(raw: &str, options: &RenderOptions) -> String {
    let raw = raw.trim();
    let Some(measure) = parse_measure(raw) else {
        return raw.to_string();
    };

    let factor = if options.factor.is_finite() && options.factor > 0.0 {
        options.factor
    } else {
        tracing::warn!("Ignoring invalid scale factor {}", options.factor);
        1.0
    };

    let scaled = measure.scale(factor);
    let converted = convert_measure(&scaled, options.system).unwrap_or(scaled);

    let rendered = render_measure_with(&converted, options.style, &options.tolerances);
    if rendered.is_empty() {
        raw.to_string()
    } else {
        rendered
    }
}

/// Serialize a structured measure with default formatting
pub fn render_measure(measure: &Measure) -> String {
    render_measure_with(measure, QuantityStyle::Auto, &FormatTolerances::default())
}

pub fn render_measure_with(
    measure: &Measure,
    style: QuantityStyle,
    tolerances: &FormatTolerances,
) -> String {
    let quantity = measure.quantity;
    let number = format_quantity_with(
        quantity,
        style,
        measure.unit.map(|u| u.token()),
        tolerances,
    );
    if number.is_empty() {
        return number;
    }

    let mut out = number;
    if let Some(unit) = measure.unit {
        out.push(' ');
        out.push_str(&unit.label(quantity));
    }
    if !measure.descriptor.is_empty() {
        out.push(' ');
        out.push_str(&measure.descriptor);
    }
    out
}
