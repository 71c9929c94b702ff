//! Target recalculation
//!
//! Composes the metabolic calculator, goal adjustment policy, and macro
//! allocator into one deterministic pass from profile metrics to a full
//! `TargetSet`. The same inputs always yield the same targets, which is
//! what makes health-sync recalculation idempotent.

use chrono::NaiveDate;
use tracing::debug;

use crate::allocation;
use crate::metabolic;
use crate::policy;
use crate::types::{ActivityLevel, Gender, GoalType, TargetSet};

/// The profile fields the pipeline reads. Borrowed view so callers can
/// recalculate from a stored profile or from fresh onboarding input alike.
#[derive(Debug, Clone, Copy)]
pub struct ProfileMetrics {
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub body_fat_percent: Option<f64>,
    pub activity_level: ActivityLevel,
    pub goal: GoalType,
}

/// Run the full pipeline: BMR -> TDEE -> calorie adjustment -> macro split.
///
/// `today` anchors the age derivation; passing it in keeps the function
/// pure and the recalculation reproducible in tests.
pub fn recalculate(metrics: &ProfileMetrics, today: NaiveDate) -> TargetSet {
    let age = metabolic::age_on(metrics.date_of_birth, today);
    let bmr = metabolic::bmr(metrics.gender, metrics.weight_kg, metrics.height_cm, age);
    let tdee = metabolic::tdee(bmr, metrics.activity_level);
    let calories = policy::adjust_calories(tdee, metrics.goal, metrics.body_fat_percent);
    let alloc = allocation::allocate(calories, metrics.goal, metrics.weight_kg);

    debug!(
        age,
        bmr,
        tdee,
        calories,
        goal = metrics.goal.as_str(),
        "recalculated nutrition targets"
    );

    TargetSet {
        daily_calories: calories,
        macros: alloc.macros,
        carbs_clamped: alloc.carbs_clamped,
    }
}
