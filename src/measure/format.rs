//! Quantity formatting
//!
//! Renders quantities as friendly cooking fractions (¼, ⅓, ½, ⅔, ¾) for
//! spoon/cup/ounce units, otherwise as a one-decimal number.

use serde::{Deserialize, Serialize};

use super::units::is_fraction_friendly;

/// Distance from a whole number below which a quantity renders as that integer
pub const NEAR_INTEGER_TOLERANCE: f64 = 0.02;
/// Maximum distance between a fractional part and a friendly fraction
pub const FRACTION_TOLERANCE: f64 = 0.06;

const FRIENDLY_FRACTIONS: &[(f64, &str)] = &[
    (0.25, "¼"),
    (1.0 / 3.0, "⅓"),
    (0.5, "½"),
    (2.0 / 3.0, "⅔"),
    (0.75, "¾"),
];

/// How a quantity should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityStyle {
    /// Fractions for fraction-friendly units, decimals otherwise
    #[default]
    Auto,
    Fraction,
    Decimal,
}

impl QuantityStyle {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Some(QuantityStyle::Auto),
            "fraction" => Some(QuantityStyle::Fraction),
            "decimal" => Some(QuantityStyle::Decimal),
            _ => None,
        }
    }
}

/// Tolerances used by the formatter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatTolerances {
    pub near_integer: f64,
    pub fraction: f64,
}

impl Default for FormatTolerances {
    fn default() -> Self {
        Self {
            near_integer: NEAR_INTEGER_TOLERANCE,
            fraction: FRACTION_TOLERANCE,
        }
    }
}

/// Format a quantity with the default tolerances
///
/// Examples:
/// - (0.5, Auto, "cup") -> "½"
/// - (1.5, Auto, "cup") -> "1 ½"
/// - (0.98, Auto, "g") -> "1"
/// - (1.23, Auto, "g") -> "1.2"
pub fn format_quantity(qty: f64, style: QuantityStyle, unit: Option<&str>) -> String {
    format_quantity_with(qty, style, unit, &FormatTolerances::default())
}

/// Format a quantity with explicit tolerances. Non-finite input yields "".
pub fn format_quantity_with(
    qty: f64,
    style: QuantityStyle,
    unit: Option<&str>,
    tolerances: &FormatTolerances,
) -> String {
    if !qty.is_finite() {
        return String::new();
    }

    let prefer_fractions = match style {
        QuantityStyle::Fraction => true,
        QuantityStyle::Decimal => false,
        QuantityStyle::Auto => unit.map(is_fraction_friendly).unwrap_or(false),
    };

    let nearest = qty.round();
    if (qty - nearest).abs() < tolerances.near_integer {
        return integer_string(nearest);
    }

    if prefer_fractions && qty > 0.0 {
        let whole = qty.floor();
        if let Some(glyph) = nearest_friendly_fraction(qty - whole, tolerances.fraction) {
            if whole == 0.0 {
                return glyph.to_string();
            }
            return format!("{} {}", integer_string(whole), glyph);
        }
    }

    let rounded = (qty * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        integer_string(rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

fn nearest_friendly_fraction(frac: f64, tolerance: f64) -> Option<&'static str> {
    FRIENDLY_FRACTIONS
        .iter()
        .map(|(value, glyph)| ((frac - value).abs(), *glyph))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .filter(|(diff, _)| *diff <= tolerance)
        .map(|(_, glyph)| glyph)
}

// -0.0 must print as "0"
fn integer_string(value: f64) -> String {
    format!("{:.0}", value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_glyphs_for_cups() {
        assert_eq!(format_quantity(0.5, QuantityStyle::Auto, Some("cup")), "½");
        assert_eq!(format_quantity(1.5, QuantityStyle::Auto, Some("cup")), "1 ½");
        assert_eq!(format_quantity(0.25, QuantityStyle::Auto, Some("Tbsp")), "¼");
        assert_eq!(format_quantity(2.0 / 3.0, QuantityStyle::Auto, Some("cups")), "⅔");
        assert_eq!(format_quantity(2.7, QuantityStyle::Auto, Some("oz")), "2 ⅔");
    }

    #[test]
    fn test_near_integer_absorbs_noise() {
        assert_eq!(format_quantity(0.98, QuantityStyle::Auto, Some("g")), "1");
        assert_eq!(format_quantity(2.999, QuantityStyle::Auto, Some("cup")), "3");
        assert_eq!(format_quantity(4.0, QuantityStyle::Decimal, None), "4");
    }

    #[test]
    fn test_huge_integers_print_exactly() {
        assert_eq!(
            format_quantity(1e25, QuantityStyle::Auto, Some("g")),
            "10000000000000000905969664"
        );
        assert_eq!(format_quantity(-0.001, QuantityStyle::Auto, Some("g")), "0");
    }

    #[test]
    fn test_decimal_fallback() {
        assert_eq!(format_quantity(1.23, QuantityStyle::Auto, Some("g")), "1.2");
        assert_eq!(format_quantity(0.5, QuantityStyle::Auto, Some("ml")), "0.5");
        assert_eq!(format_quantity(0.5, QuantityStyle::Auto, None), "0.5");
        assert_eq!(format_quantity(1.5, QuantityStyle::Decimal, Some("cup")), "1.5");
    }

    #[test]
    fn test_fraction_out_of_tolerance_falls_back() {
        // 0.1 is far from every friendly fraction
        assert_eq!(format_quantity(1.1, QuantityStyle::Auto, Some("cup")), "1.1");
        assert_eq!(format_quantity(0.9, QuantityStyle::Fraction, None), "0.9");
    }

    #[test]
    fn test_forced_fraction_style() {
        assert_eq!(format_quantity(0.75, QuantityStyle::Fraction, Some("g")), "¾");
    }

    #[test]
    fn test_non_finite_is_empty() {
        assert_eq!(format_quantity(f64::NAN, QuantityStyle::Auto, Some("cup")), "");
        assert_eq!(format_quantity(f64::INFINITY, QuantityStyle::Auto, None), "");
    }

    #[test]
    fn test_custom_tolerances() {
        let strict = FormatTolerances { near_integer: 0.001, fraction: 0.01 };
        assert_eq!(
            format_quantity_with(0.98, QuantityStyle::Auto, Some("g"), &strict),
            "1"
        );
        assert_eq!(
            format_quantity_with(0.55, QuantityStyle::Auto, Some("cup"), &strict),
            "0.6"
        );
        assert_eq!(format_quantity(0.55, QuantityStyle::Auto, Some("cup")), "½");
    }

    #[test]
    fn test_never_glyph_and_decimal_point_together() {
        let mut qty = 0.05;
        while qty < 6.0 {
            for unit in ["tsp", "tbsp", "cup", "oz"] {
                let out = format_quantity(qty, QuantityStyle::Auto, Some(unit));
                let has_glyph = out.chars().any(|c| "¼⅓½⅔¾".contains(c));
                assert!(!(has_glyph && out.contains('.')), "{} -> {}", qty, out);
            }
            qty += 0.01;
        }
    }
}
