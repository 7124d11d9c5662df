//! Serving size scaling
//!
//! Per-recipe serving counts, the stepper control that drives them, and
//! the unit-system preference applied when rendering scaled measures.

pub mod preferences;
pub mod servings;
pub mod stepper;

pub use preferences::{load_unit_system, save_unit_system, UNIT_SYSTEM_KEY};
pub use servings::{servings_key, ScalingError, ServingScaler};
pub use stepper::ServingStepper;
