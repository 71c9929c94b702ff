//! Dashboard strategy composition
//!
//! Maps the user's goal and today's logged intake onto the hero component's
//! primary/secondary metric pairing. Exactly two branches are defined:
//! muscle gain leads with protein, everything else leads with calories.
//! No further goal-specific hero behavior is specified.

use serde::{Deserialize, Serialize};

use crate::types::{DailyIntake, GoalType, TargetSet};

/// Which metric a hero slot shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroMetric {
    Calories,
    Protein,
}

/// One hero slot: a metric with its current and target values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub metric: HeroMetric,
    pub current: f64,
    pub target: f64,
}

/// The hero component's UI intent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeroStrategy {
    pub primary: MetricReading,
    pub secondary: MetricReading,
}

/// Compose the hero strategy for a goal from today's intake and targets
pub fn compose(goal: GoalType, intake: &DailyIntake, targets: &TargetSet) -> HeroStrategy {
    let calories = MetricReading {
        metric: HeroMetric::Calories,
        current: intake.calories,
        target: f64::from(targets.daily_calories),
    };
    let protein = MetricReading {
        metric: HeroMetric::Protein,
        current: intake.protein_g,
        target: f64::from(targets.macros.protein_g),
    };

    match goal {
        GoalType::MuscleGain => HeroStrategy {
            primary: protein,
            secondary: calories,
        },
        GoalType::FatLoss | GoalType::Maintain => HeroStrategy {
            primary: calories,
            secondary: protein,
        },
    }
}
