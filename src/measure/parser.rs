//! Measure parsing
//!
//! Turns free-text ingredient measures ("1/2 cup", "100g", "1 tbsp chopped")
//! into a quantity, an optional recognized unit and the trailing descriptor.

use serde::Serialize;

use super::units::Unit;

/// Fraction glyphs understood on input (the formatter emits the same set)
const GLYPHS: &[(char, f64)] = &[
    ('¼', 0.25),
    ('⅓', 1.0 / 3.0),
    ('½', 0.5),
    ('⅔', 2.0 / 3.0),
    ('¾', 0.75),
];

/// Flat parse result: `qty` is `None` when no leading quantity was recognized
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedMeasure {
    pub qty: Option<f64>,
    pub unit: Option<String>,
}

/// Structured measure carried through scaling, conversion and rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub quantity: f64,
    pub unit: Option<Unit>,
    /// Text after the quantity and unit, e.g. "finely chopped"
    pub descriptor: String,
}

impl Measure {
    /// Multiply the quantity, leaving unit and descriptor untouched
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            quantity: self.quantity * factor,
            unit: self.unit,
            descriptor: self.descriptor.clone(),
        }
    }
}

/// Parse a raw measure string into `{ qty, unit }`
///
/// Examples:
/// - "1/2 cup" -> { qty: 0.5, unit: "cup" }
/// - "1 1/2 tbsp" -> { qty: 1.5, unit: "tbsp" }
/// - "100g" -> { qty: 100, unit: "g" }
/// - "to taste" -> { qty: None, unit: None }
pub fn parse(raw: &str) -> ParsedMeasure {
    match parse_measure(raw) {
        Some(measure) => ParsedMeasure {
            qty: Some(measure.quantity),
            unit: measure.unit.map(|u| u.token().to_string()),
        },
        None => ParsedMeasure::default(),
    }
}

/// Parse a raw measure into its structured form, `None` when there is no usable quantity
pub fn parse_measure(raw: &str) -> Option<Measure> {
    let text = raw.trim();
    let (quantity, rest) = parse_quantity(text)?;

    if !quantity.is_finite() || quantity <= 0.0 {
        return None;
    }

    let rest = rest.trim_start();
    if is_range_tail(rest) {
        return None;
    }

    let (unit, descriptor) = split_unit(rest);
    Some(Measure {
        quantity,
        unit,
        descriptor: descriptor.trim().to_string(),
    })
}

/// Read the leading quantity, returning it with the unconsumed remainder
fn parse_quantity(text: &str) -> Option<(f64, &str)> {
    if let Some(found) = leading_glyph(text) {
        return Some(found);
    }

    let (first, is_integer, rest) = leading_number(text)?;

    // Simple fraction: "3/4"
    if let Some(after_slash) = rest.strip_prefix('/') {
        let (den, _, rest) = leading_number(after_slash)?;
        if den == 0.0 {
            return None;
        }
        return Some((first / den, rest));
    }

    if is_integer {
        // "1½"
        if let Some((glyph, rest)) = leading_glyph(rest) {
            return Some((first + glyph, rest));
        }

        let trimmed = rest.trim_start();
        if trimmed.len() < rest.len() {
            // "1 ½"
            if let Some((glyph, rest)) = leading_glyph(trimmed) {
                return Some((first + glyph, rest));
            }
            // "1 1/2"
            if let Some((fraction, rest)) = simple_fraction(trimmed) {
                return Some((first + fraction, rest));
            }
        }
    }

    Some((first, rest))
}

/// Digits with an optional decimal part; the flag is true when there was no decimal part
fn leading_number(text: &str) -> Option<(f64, bool, &str)> {
    let int_end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    if int_end == 0 {
        return None;
    }

    let mut end = int_end;
    let after = &text[int_end..];
    if let Some(frac) = after.strip_prefix('.') {
        let frac_len = frac
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(frac.len());
        if frac_len > 0 {
            end = int_end + 1 + frac_len;
        }
    }

    let value = text[..end].parse::<f64>().ok()?;
    Some((value, end == int_end, &text[end..]))
}

/// "a/b" with integer numerator and a non-zero denominator
fn simple_fraction(text: &str) -> Option<(f64, &str)> {
    let (num, num_is_int, rest) = leading_number(text)?;
    let rest = rest.strip_prefix('/')?;
    let (den, den_is_int, rest) = leading_number(rest)?;
    if !num_is_int || !den_is_int || den == 0.0 {
        return None;
    }
    Some((num / den, rest))
}

fn leading_glyph(text: &str) -> Option<(f64, &str)> {
    let c = text.chars().next()?;
    GLYPHS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, value)| (*value, &text[c.len_utf8()..]))
}

/// "-3 cups", "– 3", "to 3 cups"
fn is_range_tail(rest: &str) -> bool {
    let after = if let Some(r) = rest.strip_prefix('-') {
        r
    } else if let Some(r) = rest.strip_prefix('–') {
        r
    } else if let Some(r) = rest.strip_prefix("to ") {
        r
    } else {
        return false;
    };
    after
        .trim_start()
        .chars()
        .next()
        .map(|c| c.is_ascii_digit() || GLYPHS.iter().any(|(g, _)| *g == c))
        .unwrap_or(false)
}

/// Split a recognized unit word (or two-word spelling) off the front of `rest`
fn split_unit(rest: &str) -> (Option<Unit>, &str) {
    let (first, after_first) = leading_word(rest);
    if first.is_empty() {
        return (None, rest);
    }

    // Two-word spellings: "fl oz", "fluid ounces"
    let lower = first.to_lowercase();
    if lower == "fl" || lower == "fluid" {
        let trimmed = after_first.trim_start();
        let (second, after_second) = leading_word(trimmed);
        if !second.is_empty() {
            if let Some(unit) = Unit::from_token(&format!("{} {}", first, second)) {
                return (Some(unit), strip_abbreviation_dot(after_second));
            }
        }
    }

    match Unit::from_token(first) {
        Some(unit) => (Some(unit), strip_abbreviation_dot(after_first)),
        None => (None, rest),
    }
}

/// Leading run of letters (and the degree sign)
fn leading_word(text: &str) -> (&str, &str) {
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_alphabetic() || *c == '°'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(end)
}

/// "tsp. salt" keeps "salt"
fn strip_abbreviation_dot(rest: &str) -> &str {
    match rest.strip_prefix('.') {
        Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => after,
        _ => rest,
    }
}
