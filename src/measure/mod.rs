//! Measurement module
//!
//! Parsing, formatting, unit conversion and display rendering for
//! ingredient measures.

pub mod converter;
pub mod format;
pub mod parser;
pub mod render;
pub mod units;

pub use converter::{convert, convert_measure};
pub use format::{
    format_quantity, format_quantity_with, FormatTolerances, QuantityStyle, FRACTION_TOLERANCE,
    NEAR_INTEGER_TOLERANCE,
};
pub use parser::{parse, parse_measure, Measure, ParsedMeasure};
pub use render::{display_measure, display_measure_with, render_measure, RenderOptions};
pub use units::{is_fraction_friendly, Unit, UnitKind, UnitSystem};
