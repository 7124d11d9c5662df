//! Diet MCP Tools

use serde::Serialize;

use crate::models::{ActivityLevel, BodyProfile, DietTargets, Goal};

/// Response for calculate_diet_targets
#[derive(Debug, Serialize)]
pub struct DietTargetsResponse {
    pub profile: BodyProfile,
    #[serde(flatten)]
    pub targets: DietTargets,
}

pub fn calculate_diet_targets(
    height_cm: f64,
    weight_kg: f64,
    age_years: f64,
    gender: &str,
    activity_level: &str,
    goal: &str,
) -> Result<DietTargetsResponse, String> {
    let profile = BodyProfile {
        height_cm,
        weight_kg,
        age_years,
        male: gender.trim().eq_ignore_ascii_case("male"),
        activity: ActivityLevel::from_str(activity_level),
        goal: Goal::from_str(goal),
    };
    profile.validate()?;

    Ok(DietTargetsResponse {
        targets: profile.targets(),
        profile,
    })
}
