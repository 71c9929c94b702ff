//! Goal adjustment policy
//!
//! Pure mapping from TDEE and goal to the adjusted daily calorie target.
//! Goal dispatch is a closed enum match so that "no other goal is valid"
//! is compiler-checked.

use crate::types::GoalType;

/// Hard calorie floor for fat loss. The deficit never pushes the target
/// below this, however low TDEE is.
pub const FAT_LOSS_FLOOR_KCAL: u32 = 1200;

/// Daily deficit applied for fat loss (kcal).
pub const FAT_LOSS_DEFICIT_KCAL: u32 = 500;

/// Default daily surplus for muscle gain (kcal).
pub const MUSCLE_GAIN_SURPLUS_KCAL: u32 = 300;

/// Reduced "lean bulk" surplus when body fat is above the guard threshold.
pub const LEAN_BULK_SURPLUS_KCAL: u32 = 100;

/// Body fat percentage above which the lean-bulk surplus applies.
pub const LEAN_BULK_BODY_FAT_THRESHOLD: f64 = 25.0;

/// Adjusted daily calorie target for a goal.
///
/// The lean-bulk guard fires only for body fat strictly above 25%; a
/// reading of exactly 25 still receives the full surplus.
pub fn adjust_calories(tdee: u32, goal: GoalType, body_fat_percent: Option<f64>) -> u32 {
    match goal {
        GoalType::FatLoss => tdee
            .saturating_sub(FAT_LOSS_DEFICIT_KCAL)
            .max(FAT_LOSS_FLOOR_KCAL),
        GoalType::MuscleGain => {
            let surplus = match body_fat_percent {
                Some(bf) if bf > LEAN_BULK_BODY_FAT_THRESHOLD => LEAN_BULK_SURPLUS_KCAL,
                _ => MUSCLE_GAIN_SURPLUS_KCAL,
            };
            tdee + surplus
        }
        GoalType::Maintain => tdee,
    }
}
