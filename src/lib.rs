//! Nutrikit - Deterministic nutrition target and recommendation engine
//!
//! Nutrikit turns raw body metrics and a stated goal into calorie and
//! macro targets through a deterministic pipeline: metabolic calculation
//! (Mifflin-St Jeor) → goal adjustment → macro allocation. Around that
//! core it keeps targets current as health samples arrive, composes the
//! dashboard's hero strategy, ranks recipes against the day's remaining
//! nutrient gap, and tracks logging streaks and achievement progress.
//!
//! ## Modules
//!
//! - **metabolic / policy / allocation / targets**: the pure computation
//!   pipeline from body metrics to a `TargetSet`
//! - **engine**: the stateful facade over a `RecordStore`
//! - **dashboard / recommend / achievements**: the read-side consumers

pub mod achievements;
pub mod allocation;
pub mod api;
pub mod catalog;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod expiry;
pub mod metabolic;
pub mod policy;
pub mod recommend;
pub mod store;
pub mod targets;
pub mod types;

pub use api::{
    AchievementsResponse, DashboardSummary, HealthSyncRequest, HealthSyncResponse,
    OnboardingRequest, OnboardingResponse, StrategyConfig, StrategySwitchRequest,
};
pub use engine::NutritionEngine;
pub use error::EngineError;
pub use expiry::ExpiringStore;
pub use recommend::Recommendation;
pub use store::{MemoryStore, RecordStore};
pub use targets::{recalculate, ProfileMetrics};
pub use types::{
    ActivityLevel, DailyIntake, DiaryEntry, Gender, GoalType, HealthSample, MacroTargets,
    NutrientGap, SampleKind, TargetSet, UserProfile,
};

/// Engine version embedded in diagnostics
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
