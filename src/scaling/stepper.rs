//! Serving size stepper
//!
//! The +/- control in front of `ServingScaler`: clamps to a range and moves
//! by a fixed step.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServingStepper {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ServingStepper {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 12.0,
            step: 1.0,
        }
    }
}

impl ServingStepper {
    /// Round to two decimals and clamp into [min, max]
    pub fn clamp(&self, servings: f64) -> f64 {
        if !servings.is_finite() {
            return self.min;
        }
        round_to(servings, 2).clamp(self.min, self.max)
    }

    pub fn increment(&self, servings: f64) -> f64 {
        self.clamp(servings + self.step)
    }

    pub fn decrement(&self, servings: f64) -> f64 {
        self.clamp(servings - self.step)
    }

    /// "×2", "×1 ½", "×¼"
    pub fn label(servings: f64) -> String {
        format!("×{}", servings_glyph(servings))
    }
}

fn servings_glyph(n: f64) -> String {
    let whole = n.floor();
    let frac = n - whole;
    let close = |a: f64, b: f64| (a - b).abs() < 0.001;

    let glyph = if close(frac, 0.5) {
        Some("½")
    } else if close(frac, 0.25) {
        Some("¼")
    } else if close(frac, 0.75) {
        Some("¾")
    } else {
        None
    };

    match glyph {
        Some(glyph) if whole >= 1.0 => format!("{} {}", whole as i64, glyph),
        Some(glyph) => glyph.to_string(),
        None if frac == 0.0 => (n as i64).to_string(),
        None => round_to(n, 1).to_string(),
    }
}

fn round_to(n: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (n * scale).round() / scale
}
