//! Boundary request and response shapes
//!
//! The wire types the surrounding application exchanges with the engine,
//! with their exact casing, plus the input validation that runs before any
//! computation. Onboarding, health sync, and strategy switch speak
//! camelCase; the dashboard, recommendation, and achievement reads speak
//! snake_case.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dashboard::HeroStrategy;
use crate::error::EngineError;
use crate::types::{ActivityLevel, Gender, GoalType, MacroTargets, SampleKind};

/// Accepted height range (cm)
pub const HEIGHT_RANGE_CM: (f64, f64) = (100.0, 250.0);
/// Accepted weight range (kg)
pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 200.0);
/// Accepted body fat range (percent)
pub const BODY_FAT_RANGE_PCT: (f64, f64) = (3.0, 50.0);

fn check_range(name: &str, value: f64, range: (f64, f64)) -> Result<(), EngineError> {
    if !value.is_finite() || value < range.0 || value > range.1 {
        return Err(EngineError::Validation(format!(
            "{name} must be between {} and {}, got {value}",
            range.0, range.1
        )));
    }
    Ok(())
}

/// Onboarding submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    pub activity_level: ActivityLevel,
    pub goal_type: GoalType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
}

impl OnboardingRequest {
    /// Range-check all body metrics before any computation runs
    pub fn validate(&self) -> Result<(), EngineError> {
        check_range("heightCm", self.height_cm, HEIGHT_RANGE_CM)?;
        check_range("weightKg", self.weight_kg, WEIGHT_RANGE_KG)?;
        if let Some(bf) = self.body_fat_percent {
            check_range("bodyFatPercent", bf, BODY_FAT_RANGE_PCT)?;
        }
        if let Some(tw) = self.target_weight_kg {
            check_range("targetWeightKg", tw, WEIGHT_RANGE_KG)?;
        }
        Ok(())
    }
}

/// The active strategy returned by onboarding and strategy switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    pub mode: GoalType,
    pub daily_calories: u32,
    pub macros: MacroSummary,
}

/// Macro targets on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSummary {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl From<MacroTargets> for MacroSummary {
    fn from(m: MacroTargets) -> Self {
        Self {
            protein: m.protein_g,
            carbs: m.carbs_g,
            fat: m.fat_g,
        }
    }
}

/// Onboarding result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub user_id: Uuid,
    pub strategy_config: StrategyConfig,
}

/// One synced metric inside a health-sync batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetric {
    #[serde(rename = "type")]
    pub kind: SampleKind,
    pub value: f64,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Health-sync submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSyncRequest {
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_model: Option<String>,
    pub metrics: Vec<HealthMetric>,
}

impl HealthSyncRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.metrics.is_empty() {
            return Err(EngineError::Validation(
                "metrics must contain at least one entry".to_string(),
            ));
        }
        for metric in &self.metrics {
            if !metric.value.is_finite() || metric.value < 0.0 {
                return Err(EngineError::Validation(format!(
                    "metric value must be a non-negative number, got {}",
                    metric.value
                )));
            }
            // Body metrics feed the calculator, so they get the same range
            // checks as onboarding.
            match metric.kind {
                SampleKind::Weight => check_range("weight", metric.value, WEIGHT_RANGE_KG)?,
                SampleKind::BodyFat => check_range("bodyFat", metric.value, BODY_FAT_RANGE_PCT)?,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Health-sync result. The new budget is present only when a WEIGHT sample
/// triggered recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSyncResponse {
    pub status: String,
    pub tdee_updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_daily_budget: Option<u32>,
}

/// Strategy switch submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySwitchRequest {
    pub new_strategy: GoalType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
}

impl StrategySwitchRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some(tw) = self.target_weight_kg {
            check_range("targetWeightKg", tw, WEIGHT_RANGE_KG)?;
        }
        Ok(())
    }
}

/// The hero component of the dashboard summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: HeroStrategy,
}

/// Dashboard summary for one day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub ui_strategy: String,
    pub date: NaiveDate,
    pub hero_component: HeroComponent,
    /// Widget payloads belong to the surrounding application
    pub widgets: serde_json::Value,
}

/// One badge in the achievements read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub icon: String,
    pub target: u32,
    pub unlocked: bool,
    pub progress: u32,
    #[serde(rename = "unlockedAt", skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Achievements read result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementsResponse {
    pub streak_days: u32,
    pub level: u32,
    pub badges: Vec<Badge>,
}
