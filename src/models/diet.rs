//! Diet targets
//!
//! Daily calorie and macro targets from body measurements, using the
//! Mifflin-St Jeor equation.

use serde::{Deserialize, Serialize};

/// Share of calories and kcal per gram for each macro
const PROTEIN_SHARE: f64 = 0.25;
const CARB_SHARE: f64 = 0.45;
const FAT_SHARE: f64 = 0.30;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARB: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

const BULK_SURPLUS: f64 = 300.0;
const CUT_DEFICIT: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    /// Unknown levels count as sedentary
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "lightly_active" | "light" => ActivityLevel::LightlyActive,
            "moderately_active" | "moderate" => ActivityLevel::ModeratelyActive,
            "very_active" => ActivityLevel::VeryActive,
            "extremely_active" | "extra_active" => ActivityLevel::ExtremelyActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Bulk,
    Cut,
    Maintain,
}

impl Goal {
    /// Anything unrecognized means maintain
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "bulk" => Goal::Bulk,
            "cut" => Goal::Cut,
            _ => Goal::Maintain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: f64,
    pub male: bool,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DietTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub bmi: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl BodyProfile {
    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            ("height_cm", self.height_cm),
            ("weight_kg", self.weight_kg),
            ("age_years", self.age_years),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be greater than 0", field));
            }
        }
        Ok(())
    }

    pub fn bmr(&self) -> f64 {
        let base = 10.0 * self.weight_kg + 6.25 * self.height_cm - 5.0 * self.age_years;
        if self.male {
            base + 5.0
        } else {
            base - 161.0
        }
    }

    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        round_to(self.weight_kg / (height_m * height_m), 1)
    }

    pub fn targets(&self) -> DietTargets {
        let bmr = self.bmr();
        let tdee = bmr * self.activity.multiplier();
        let target_calories = match self.goal {
            Goal::Bulk => tdee + BULK_SURPLUS,
            Goal::Cut => tdee - CUT_DEFICIT,
            Goal::Maintain => tdee,
        }
        .round();

        DietTargets {
            bmr: bmr.round(),
            tdee: tdee.round(),
            target_calories,
            bmi: self.bmi(),
            protein_g: (target_calories * PROTEIN_SHARE / KCAL_PER_G_PROTEIN).round(),
            carbs_g: (target_calories * CARB_SHARE / KCAL_PER_G_CARB).round(),
            fat_g: (target_calories * FAT_SHARE / KCAL_PER_G_FAT).round(),
        }
    }
}

fn round_to(n: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (n * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(male: bool, activity: ActivityLevel, goal: Goal) -> BodyProfile {
        BodyProfile {
            height_cm: 180.0,
            weight_kg: 80.0,
            age_years: 30.0,
            male,
            activity,
            goal,
        }
    }

    #[test]
    fn test_bmr() {
        // 800 + 1125 - 150, then +5 / -161
        assert_eq!(profile(true, ActivityLevel::Sedentary, Goal::Maintain).bmr(), 1780.0);
        assert_eq!(profile(false, ActivityLevel::Sedentary, Goal::Maintain).bmr(), 1614.0);
    }

    #[test]
    fn test_targets_by_goal() {
        let maintain = profile(true, ActivityLevel::ModeratelyActive, Goal::Maintain).targets();
        assert_eq!(maintain.tdee, 2759.0);
        assert_eq!(maintain.target_calories, 2759.0);

        let bulk = profile(true, ActivityLevel::ModeratelyActive, Goal::Bulk).targets();
        assert_eq!(bulk.target_calories, 3059.0);

        let cut = profile(true, ActivityLevel::ModeratelyActive, Goal::Cut).targets();
        assert_eq!(cut.target_calories, 2259.0);
    }

    #[test]
    fn test_macros() {
        let targets = profile(true, ActivityLevel::Sedentary, Goal::Maintain).targets();
        // 1780 * 1.2 = 2136
        assert_eq!(targets.target_calories, 2136.0);
        assert_eq!(targets.protein_g, 134.0);
        assert_eq!(targets.carbs_g, 240.0);
        assert_eq!(targets.fat_g, 71.0);
    }

    #[test]
    fn test_bmi_one_decimal() {
        assert_eq!(profile(true, ActivityLevel::Sedentary, Goal::Maintain).bmi(), 24.7);
    }

    #[test]
    fn test_parsing_levels_and_goals() {
        assert_eq!(ActivityLevel::from_str("very_active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from_str("Lightly Active"), ActivityLevel::LightlyActive);
        assert_eq!(ActivityLevel::from_str("couch"), ActivityLevel::Sedentary);
        assert_eq!(Goal::from_str("CUT"), Goal::Cut);
        assert_eq!(Goal::from_str("recomp"), Goal::Maintain);
    }

    #[test]
    fn test_validate() {
        let mut p = profile(true, ActivityLevel::Sedentary, Goal::Maintain);
        assert!(p.validate().is_ok());
        p.weight_kg = 0.0;
        assert!(p.validate().is_err());
    }
}
