//! Core types for the Nutrikit engine
//!
//! This module defines the data structures that flow through the pipeline:
//! user profiles, health samples, diary entries, computed targets, and the
//! static recipe/achievement catalogs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Biological sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Nutrition goal driving calorie adjustment, macro split, and dashboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    FatLoss,
    Maintain,
    MuscleGain,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::FatLoss => "FAT_LOSS",
            GoalType::Maintain => "MAINTAIN",
            GoalType::MuscleGain => "MUSCLE_GAIN",
        }
    }
}

/// Activity level with its fixed TDEE multiplier
///
/// The multiplier set is closed; no other values are accepted anywhere in
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Kind of synced health sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SampleKind {
    Steps,
    Weight,
    BodyFat,
    Sleep,
    ActiveCalories,
}

/// A single synced health measurement. Append-only; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSample {
    pub kind: SampleKind,
    pub value: f64,
    /// When the measurement was taken (UTC)
    pub recorded_at: DateTime<Utc>,
    /// Originating device or platform tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Meal slot for a diary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// A logged food diary entry
///
/// Nutrition values are already computed upstream (food recognition is an
/// external service); the engine never re-derives them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Calendar day the entry belongs to (no time component)
    pub date: NaiveDate,
    pub meal: MealType,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Summed nutrition for one calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyIntake {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl DailyIntake {
    /// Sum a day's diary entries
    pub fn from_entries(entries: &[DiaryEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, e| {
            acc.calories += e.calories;
            acc.protein_g += e.protein_g;
            acc.carbs_g += e.carbs_g;
            acc.fat_g += e.fat_g;
            acc
        })
    }
}

/// Daily macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

/// Remaining nutrient gap for a day: target minus consumed
///
/// Negative values mean the target has already been exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientGap {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl NutrientGap {
    pub fn between(targets: &TargetSet, intake: &DailyIntake) -> Self {
        Self {
            calories: f64::from(targets.daily_calories) - intake.calories,
            protein_g: f64::from(targets.macros.protein_g) - intake.protein_g,
            carbs_g: f64::from(targets.macros.carbs_g) - intake.carbs_g,
            fat_g: f64::from(targets.macros.fat_g) - intake.fat_g,
        }
    }
}

/// Full recalculated target set, committed to the store as one unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSet {
    pub daily_calories: u32,
    pub macros: MacroTargets,
    /// True when the allocator had to clamp negative carbs to zero
    pub carbs_clamped: bool,
}

/// A user's stored profile, owned by the target recalculation path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    pub activity_level: ActivityLevel,
    pub goal: GoalType,
    pub daily_calorie_target: u32,
    pub protein_target_g: u32,
    pub carbs_target_g: u32,
    pub fat_target_g: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    pub onboarding_completed: bool,
}

impl UserProfile {
    /// Current targets as a single value
    pub fn targets(&self) -> TargetSet {
        TargetSet {
            daily_calories: self.daily_calorie_target,
            macros: MacroTargets {
                protein_g: self.protein_target_g,
                carbs_g: self.carbs_target_g,
                fat_g: self.fat_target_g,
            },
            carbs_clamped: false,
        }
    }

    /// Overwrite all target fields from one recalculated set
    pub fn apply_targets(&mut self, targets: &TargetSet) {
        self.daily_calorie_target = targets.daily_calories;
        self.protein_target_g = targets.macros.protein_g;
        self.carbs_target_g = targets.macros.carbs_g;
        self.fat_target_g = targets.macros.fat_g;
    }
}

/// An entry in the static recipe catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeCatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// An achievement definition from the immutable catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon: String,
    /// Progress value at which the achievement unlocks
    pub target: u32,
}

/// Per-user progress toward one achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub achievement_id: String,
    /// Monotonically non-decreasing counter
    pub progress: u32,
    pub unlocked: bool,
    /// Set exactly once, on the false-to-true unlock transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}
