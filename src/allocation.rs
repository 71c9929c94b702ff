//! Macro allocation
//!
//! Splits an adjusted calorie target into protein/carb/fat grams using
//! per-goal energy ratios, with a bodyweight-based protein floor. Carbs
//! absorb whatever calories remain after protein and fat are fixed.

use tracing::warn;

use crate::types::{GoalType, MacroTargets};

/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Minimum protein per kg of bodyweight (g/kg)
pub const PROTEIN_FLOOR_G_PER_KG: f64 = 1.6;

/// Macro energy split for a goal (fractions of total calories)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl MacroSplit {
    /// Energy ratios for a goal (protein/fat/carb percent of calories)
    pub fn for_goal(goal: GoalType) -> Self {
        match goal {
            GoalType::FatLoss => Self {
                protein: 0.35,
                fat: 0.25,
                carbs: 0.40,
            },
            GoalType::MuscleGain => Self {
                protein: 0.30,
                fat: 0.25,
                carbs: 0.45,
            },
            GoalType::Maintain => Self {
                protein: 0.25,
                fat: 0.30,
                carbs: 0.45,
            },
        }
    }
}

/// Result of a macro allocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub macros: MacroTargets,
    /// True when remaining carb calories went negative and were clamped
    /// to zero (protein floor can push protein energy past the ratio)
    pub carbs_clamped: bool,
}

/// Allocate a calorie target into macro grams.
///
/// Protein is the larger of the ratio-implied grams and the bodyweight
/// floor `weight_kg * 1.6`; the floor can only raise protein. Fat follows
/// its ratio. Carbs take the remaining calories and are clamped to zero
/// if the remainder is negative.
pub fn allocate(calories: u32, goal: GoalType, weight_kg: f64) -> Allocation {
    let split = MacroSplit::for_goal(goal);
    let calories_f = f64::from(calories);

    let ratio_protein = (calories_f * split.protein / KCAL_PER_G_PROTEIN).round();
    let floor_protein = (weight_kg * PROTEIN_FLOOR_G_PER_KG).round();
    let protein_g = ratio_protein.max(floor_protein);

    let fat_g = (calories_f * split.fat / KCAL_PER_G_FAT).round();

    let remaining =
        calories_f - protein_g * KCAL_PER_G_PROTEIN - fat_g * KCAL_PER_G_FAT;
    let carbs_raw = (remaining / KCAL_PER_G_CARBS).round();

    let carbs_clamped = carbs_raw < 0.0;
    if carbs_clamped {
        warn!(
            calories,
            goal = goal.as_str(),
            weight_kg,
            carbs_raw,
            "macro allocation produced negative carbs; clamping to zero"
        );
    }
    let carbs_g = carbs_raw.max(0.0);

    Allocation {
        macros: MacroTargets {
            protein_g: protein_g as u32,
            carbs_g: carbs_g as u32,
            fat_g: fat_g as u32,
        },
        carbs_clamped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fat_loss_split() {
        let alloc = allocate(2000, GoalType::FatLoss, 75.0);
        // protein: max(round(2000*0.35/4)=175, round(75*1.6)=120) = 175
        assert_eq!(alloc.macros.protein_g, 175);
        // fat: round(2000*0.25/9) = 56
        assert_eq!(alloc.macros.fat_g, 56);
        // carbs: round((2000 - 700 - 504)/4) = round(199) = 199
        assert_eq!(alloc.macros.carbs_g, 199);
        assert!(!alloc.carbs_clamped);
    }

    #[test]
    fn test_protein_floor_raises_ratio_value() {
        // Maintain at low calories: ratio protein round(1400*0.25/4) = 88,
        // floor round(90*1.6) = 144 wins
        let alloc = allocate(1400, GoalType::Maintain, 90.0);
        assert_eq!(alloc.macros.protein_g, 144);
    }

    #[test]
    fn test_protein_floor_never_lowers() {
        // Heavy surplus: ratio protein well above a light user's floor
        let alloc = allocate(3600, GoalType::MuscleGain, 60.0);
        let ratio = (3600.0_f64 * 0.30 / 4.0).round() as u32;
        assert_eq!(alloc.macros.protein_g, ratio);
        assert!(alloc.macros.protein_g >= (60.0_f64 * 1.6).round() as u32);
    }

    #[test]
    fn test_protein_floor_property() {
        for &(cal, w) in &[(1200_u32, 40.0), (1800, 75.0), (2600, 120.0), (3400, 200.0)] {
            for &goal in &[GoalType::FatLoss, GoalType::Maintain, GoalType::MuscleGain] {
                let alloc = allocate(cal, goal, w);
                let floor = (w * PROTEIN_FLOOR_G_PER_KG).round() as u32;
                assert!(
                    alloc.macros.protein_g >= floor,
                    "protein {} below floor {} for cal={cal} w={w}",
                    alloc.macros.protein_g,
                    floor
                );
            }
        }
    }

    #[test]
    fn test_negative_carbs_clamped_and_flagged() {
        // Very low calories + very heavy user: floor protein energy alone
        // exceeds the budget
        let alloc = allocate(1200, GoalType::FatLoss, 200.0);
        // floor = 320g protein = 1280 kcal > 1200 total
        assert_eq!(alloc.macros.carbs_g, 0);
        assert!(alloc.carbs_clamped);
    }

    #[test]
    fn test_carbs_absorb_remainder() {
        let alloc = allocate(2400, GoalType::Maintain, 70.0);
        let energy = alloc.macros.protein_g * 4 + alloc.macros.carbs_g * 4 + alloc.macros.fat_g * 9;
        // Remainder rounding keeps total energy within 4 kcal of the target
        assert!((i64::from(energy) - 2400).abs() <= 4);
    }
}
