//! Engine orchestration
//!
//! `NutritionEngine` is the stateful facade the surrounding application
//! calls into. It owns the record store and the static catalogs, and wires
//! the pure pipeline stages to the boundary operations: onboarding,
//! strategy switch, health sync, diary logging, and the dashboard,
//! recommendation, and achievement reads.
//!
//! All operations are synchronous. Concurrent health syncs for the same
//! user are a last-writer-wins race; callers serialize per user.

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::achievements;
use crate::api::{
    AchievementsResponse, Badge, DashboardSummary, HealthSyncRequest, HealthSyncResponse,
    HeroComponent, MacroSummary, OnboardingRequest, OnboardingResponse, StrategyConfig,
    StrategySwitchRequest,
};
use crate::catalog;
use crate::dashboard;
use crate::error::EngineError;
use crate::recommend::{self, Recommendation};
use crate::store::RecordStore;
use crate::targets::{self, ProfileMetrics};
use crate::types::{
    Achievement, DailyIntake, DiaryEntry, HealthSample, NutrientGap, RecipeCatalogEntry,
    SampleKind, TargetSet, UserProfile,
};

/// Hero component type tag on the dashboard wire
const HERO_COMPONENT_TYPE: &str = "nutrition_hero";

/// The nutrition engine, generic over its record store
pub struct NutritionEngine<S: RecordStore> {
    store: S,
    recipes: Vec<RecipeCatalogEntry>,
    achievements: Vec<Achievement>,
}

impl<S: RecordStore> NutritionEngine<S> {
    /// Create an engine over a store with the built-in catalogs
    pub fn new(store: S) -> Self {
        Self::with_catalogs(store, catalog::default_recipes(), catalog::default_achievements())
    }

    /// Create an engine with custom recipe and achievement catalogs
    pub fn with_catalogs(
        store: S,
        recipes: Vec<RecipeCatalogEntry>,
        achievements: Vec<Achievement>,
    ) -> Self {
        Self {
            store,
            recipes,
            achievements,
        }
    }

    /// Consume the engine and return its store (for persistence by the caller)
    pub fn into_store(self) -> S {
        self.store
    }

    fn profile(&self, user_id: Uuid) -> Result<UserProfile, EngineError> {
        self.store
            .profile(user_id)
            .ok_or(EngineError::UserNotFound(user_id))
    }

    fn metrics_of(profile: &UserProfile) -> ProfileMetrics {
        ProfileMetrics {
            gender: profile.gender,
            date_of_birth: profile.date_of_birth,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            body_fat_percent: profile.body_fat_percent,
            activity_level: profile.activity_level,
            goal: profile.goal,
        }
    }

    fn strategy_config(profile: &UserProfile, targets: &TargetSet) -> StrategyConfig {
        StrategyConfig {
            mode: profile.goal,
            daily_calories: targets.daily_calories,
            macros: MacroSummary::from(targets.macros),
        }
    }

    /// Run onboarding: validate, compute initial targets, persist the
    /// profile, and return the new user's strategy.
    pub fn onboard(&mut self, request: &OnboardingRequest) -> Result<OnboardingResponse, EngineError> {
        request.validate()?;

        let user_id = Uuid::new_v4();
        let today = Utc::now().date_naive();
        let metrics = ProfileMetrics {
            gender: request.gender,
            date_of_birth: request.date_of_birth,
            height_cm: request.height_cm,
            weight_kg: request.weight_kg,
            body_fat_percent: request.body_fat_percent,
            activity_level: request.activity_level,
            goal: request.goal_type,
        };
        let targets = targets::recalculate(&metrics, today);

        let mut profile = UserProfile {
            user_id,
            gender: request.gender,
            date_of_birth: request.date_of_birth,
            height_cm: request.height_cm,
            weight_kg: request.weight_kg,
            body_fat_percent: request.body_fat_percent,
            activity_level: request.activity_level,
            goal: request.goal_type,
            daily_calorie_target: 0,
            protein_target_g: 0,
            carbs_target_g: 0,
            fat_target_g: 0,
            target_weight_kg: request.target_weight_kg,
            onboarding_completed: true,
        };
        profile.apply_targets(&targets);

        let config = Self::strategy_config(&profile, &targets);
        self.store.put_profile(profile);

        info!(%user_id, goal = request.goal_type.as_str(), "user onboarded");

        Ok(OnboardingResponse {
            user_id,
            strategy_config: config,
        })
    }

    /// Switch goal strategy using the stored profile; no new body metrics
    /// are required.
    pub fn switch_strategy(
        &mut self,
        user_id: Uuid,
        request: &StrategySwitchRequest,
    ) -> Result<StrategyConfig, EngineError> {
        request.validate()?;

        let mut profile = self.profile(user_id)?;
        profile.goal = request.new_strategy;
        if let Some(target_weight) = request.target_weight_kg {
            profile.target_weight_kg = Some(target_weight);
        }

        let targets = targets::recalculate(&Self::metrics_of(&profile), Utc::now().date_naive());
        profile.apply_targets(&targets);

        let config = Self::strategy_config(&profile, &targets);
        self.store.put_profile(profile);

        info!(%user_id, goal = request.new_strategy.as_str(), "strategy switched");

        Ok(config)
    }

    /// Ingest a batch of health samples and recalculate targets when the
    /// batch carried body-composition data.
    ///
    /// Recalculation requires a stored WEIGHT sample; a BODY_FAT sample
    /// alone never triggers it. Running the same sync twice yields the
    /// same targets.
    pub fn sync_health(
        &mut self,
        user_id: Uuid,
        request: &HealthSyncRequest,
    ) -> Result<HealthSyncResponse, EngineError> {
        request.validate()?;
        let mut profile = self.profile(user_id)?;

        let samples: Vec<HealthSample> = request
            .metrics
            .iter()
            .map(|m| HealthSample {
                kind: m.kind,
                value: m.value,
                recorded_at: m.recorded_at,
                source: m.source.clone().or_else(|| Some(request.platform.clone())),
            })
            .collect();
        self.store.append_samples(user_id, &samples);

        let body_composition_changed = request
            .metrics
            .iter()
            .any(|m| matches!(m.kind, SampleKind::Weight | SampleKind::BodyFat));
        if !body_composition_changed {
            return Ok(HealthSyncResponse {
                status: "ok".to_string(),
                tdee_updated: false,
                new_daily_budget: None,
            });
        }

        let latest_weight = self.store.latest_sample(user_id, SampleKind::Weight);
        let latest_body_fat = self.store.latest_sample(user_id, SampleKind::BodyFat);

        let Some(weight) = latest_weight else {
            // Body fat alone never drives a recalculation
            return Ok(HealthSyncResponse {
                status: "ok".to_string(),
                tdee_updated: false,
                new_daily_budget: None,
            });
        };

        profile.weight_kg = weight.value;
        if let Some(body_fat) = latest_body_fat {
            profile.body_fat_percent = Some(body_fat.value);
        }

        let targets = targets::recalculate(&Self::metrics_of(&profile), Utc::now().date_naive());
        profile.apply_targets(&targets);
        let budget = targets.daily_calories;
        self.store.put_profile(profile);

        info!(%user_id, budget, "targets recalculated from health sync");

        Ok(HealthSyncResponse {
            status: "ok".to_string(),
            tdee_updated: true,
            new_daily_budget: Some(budget),
        })
    }

    /// Append a diary entry for a user
    pub fn log_diary(&mut self, user_id: Uuid, entry: DiaryEntry) -> Result<(), EngineError> {
        self.profile(user_id)?;
        self.store.append_diary(user_id, entry);
        Ok(())
    }

    /// Apply a progress increment toward one achievement
    pub fn record_progress(
        &mut self,
        user_id: Uuid,
        achievement_id: &str,
        increment: u32,
    ) -> Result<(), EngineError> {
        self.profile(user_id)?;
        let achievement = self
            .achievements
            .iter()
            .find(|a| a.id == achievement_id)
            .ok_or_else(|| EngineError::AchievementNotFound(achievement_id.to_string()))?;

        let existing = self.store.progress(user_id, achievement_id);
        let updated = achievements::apply_progress(existing, achievement, increment, Utc::now());
        self.store.put_progress(user_id, updated);
        Ok(())
    }

    /// Dashboard summary for a day (defaults to today)
    pub fn dashboard_summary(
        &self,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<DashboardSummary, EngineError> {
        let profile = self.profile(user_id)?;
        let date = date.unwrap_or_else(|| Utc::now().date_naive());

        let entries = self.store.entries_on(user_id, date);
        let intake = DailyIntake::from_entries(&entries);
        let targets = profile.targets();
        let hero = dashboard::compose(profile.goal, &intake, &targets);

        Ok(DashboardSummary {
            ui_strategy: profile.goal.as_str().to_string(),
            date,
            hero_component: HeroComponent {
                kind: HERO_COMPONENT_TYPE.to_string(),
                data: hero,
            },
            widgets: serde_json::json!({}),
        })
    }

    /// Rank the recipe catalog against a day's remaining gap (defaults to
    /// today)
    pub fn recommend_recipes(
        &self,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Recommendation, EngineError> {
        let profile = self.profile(user_id)?;
        let date = date.unwrap_or_else(|| Utc::now().date_naive());

        let entries = self.store.entries_on(user_id, date);
        let intake = DailyIntake::from_entries(&entries);
        let gap = NutrientGap::between(&profile.targets(), &intake);

        Ok(recommend::recommend(&gap, &self.recipes))
    }

    /// Streak, level, and badge progress for a user
    pub fn achievements(&self, user_id: Uuid) -> Result<AchievementsResponse, EngineError> {
        self.achievements_on(user_id, Utc::now().date_naive())
    }

    /// Achievements read anchored to an explicit "today"
    pub fn achievements_on(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<AchievementsResponse, EngineError> {
        self.profile(user_id)?;

        let dates = self.store.logged_dates_desc(user_id);
        let streak_days = achievements::streak(&dates, today);

        let mut badges = Vec::with_capacity(self.achievements.len());
        let mut unlocked_count = 0;
        for achievement in &self.achievements {
            let progress = self.store.progress(user_id, &achievement.id);
            let (current, unlocked, unlocked_at) = match progress {
                Some(p) => (p.progress, p.unlocked, p.unlocked_at),
                None => (0, false, None),
            };
            if unlocked {
                unlocked_count += 1;
            }
            badges.push(Badge {
                id: achievement.id.clone(),
                name: achievement.name.clone(),
                description: achievement.description.clone(),
                category: achievement.category.clone(),
                icon: achievement.icon.clone(),
                target: achievement.target,
                unlocked,
                progress: current,
                unlocked_at,
            });
        }

        Ok(AchievementsResponse {
            streak_days,
            level: achievements::level(unlocked_count),
            badges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HealthMetric;
    use crate::store::MemoryStore;
    use crate::types::{ActivityLevel, Gender, GoalType, MealType};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn make_engine() -> NutritionEngine<MemoryStore> {
        NutritionEngine::new(MemoryStore::new())
    }

    fn make_onboarding() -> OnboardingRequest {
        OnboardingRequest {
            gender: Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(1994, 1, 10).unwrap(),
            height_cm: 178.0,
            weight_kg: 75.0,
            body_fat_percent: Some(18.0),
            activity_level: ActivityLevel::Moderate,
            goal_type: GoalType::FatLoss,
            target_weight_kg: Some(70.0),
        }
    }

    fn make_sync(metrics: Vec<HealthMetric>) -> HealthSyncRequest {
        HealthSyncRequest {
            platform: "healthkit".to_string(),
            device_model: Some("iPhone".to_string()),
            metrics,
        }
    }

    fn weight_metric(value: f64, hour: u32) -> HealthMetric {
        HealthMetric {
            kind: SampleKind::Weight,
            value,
            recorded_at: Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap(),
            source: None,
        }
    }

    fn body_fat_metric(value: f64, hour: u32) -> HealthMetric {
        HealthMetric {
            kind: SampleKind::BodyFat,
            value,
            recorded_at: Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap(),
            source: None,
        }
    }

    fn make_entry(date: NaiveDate, calories: f64, protein: f64) -> DiaryEntry {
        DiaryEntry {
            date,
            meal: MealType::Lunch,
            calories,
            protein_g: protein,
            carbs_g: 40.0,
            fat_g: 15.0,
        }
    }

    #[test]
    fn test_onboarding_persists_targets() {
        let mut engine = make_engine();
        let response = engine.onboard(&make_onboarding()).unwrap();

        assert_eq!(response.strategy_config.mode, GoalType::FatLoss);
        assert!(response.strategy_config.daily_calories >= 1200);

        let summary = engine.dashboard_summary(response.user_id, None).unwrap();
        assert_eq!(summary.ui_strategy, "FAT_LOSS");
        assert_eq!(
            summary.hero_component.data.primary.target,
            f64::from(response.strategy_config.daily_calories)
        );
    }

    #[test]
    fn test_onboarding_rejects_bad_metrics() {
        let mut engine = make_engine();
        let mut request = make_onboarding();
        request.weight_kg = 20.0;
        assert!(matches!(
            engine.onboard(&request),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_user_not_found() {
        let engine = make_engine();
        let ghost = Uuid::new_v4();
        assert!(matches!(
            engine.dashboard_summary(ghost, None),
            Err(EngineError::UserNotFound(_))
        ));
    }

    #[test]
    fn test_sync_same_values_is_idempotent() {
        let mut engine = make_engine();
        let request = make_onboarding();
        let onboarded = engine.onboard(&request).unwrap();
        let user = onboarded.user_id;

        // Sync the exact weight and body fat submitted at onboarding
        let sync = make_sync(vec![weight_metric(75.0, 8), body_fat_metric(18.0, 8)]);
        let response = engine.sync_health(user, &sync).unwrap();

        assert!(response.tdee_updated);
        assert_eq!(
            response.new_daily_budget,
            Some(onboarded.strategy_config.daily_calories)
        );

        // A second identical sync changes nothing either
        let response = engine.sync_health(user, &sync).unwrap();
        assert_eq!(
            response.new_daily_budget,
            Some(onboarded.strategy_config.daily_calories)
        );
    }

    #[test]
    fn test_sync_new_weight_changes_budget() {
        let mut engine = make_engine();
        let onboarded = engine.onboard(&make_onboarding()).unwrap();
        let user = onboarded.user_id;

        let response = engine
            .sync_health(user, &make_sync(vec![weight_metric(85.0, 9)]))
            .unwrap();

        assert!(response.tdee_updated);
        // Heavier body raises BMR, so the budget rises
        assert!(
            response.new_daily_budget.unwrap() > onboarded.strategy_config.daily_calories
        );
    }

    #[test]
    fn test_sync_rejects_out_of_range_weight() {
        let mut engine = make_engine();
        let onboarded = engine.onboard(&make_onboarding()).unwrap();
        let user = onboarded.user_id;

        // 500 kg is outside the accepted weight range; the batch is rejected
        // before any sample is stored or targets recalculated
        assert!(matches!(
            engine.sync_health(user, &make_sync(vec![weight_metric(500.0, 9)])),
            Err(EngineError::Validation(_))
        ));

        let summary = engine.dashboard_summary(user, None).unwrap();
        assert_eq!(
            summary.hero_component.data.primary.target,
            f64::from(onboarded.strategy_config.daily_calories)
        );
    }

    #[test]
    fn test_body_fat_alone_never_recalculates() {
        let mut engine = make_engine();
        let user = engine.onboard(&make_onboarding()).unwrap().user_id;

        let response = engine
            .sync_health(user, &make_sync(vec![body_fat_metric(24.0, 9)]))
            .unwrap();

        assert!(!response.tdee_updated);
        assert_eq!(response.new_daily_budget, None);
    }

    #[test]
    fn test_steps_only_sync_is_a_noop_for_targets() {
        let mut engine = make_engine();
        let user = engine.onboard(&make_onboarding()).unwrap().user_id;

        let steps = HealthMetric {
            kind: SampleKind::Steps,
            value: 9200.0,
            recorded_at: Utc.with_ymd_and_hms(2024, 3, 10, 21, 0, 0).unwrap(),
            source: None,
        };
        let response = engine.sync_health(user, &make_sync(vec![steps])).unwrap();

        assert!(!response.tdee_updated);
        assert_eq!(response.new_daily_budget, None);
    }

    #[test]
    fn test_strategy_switch_reuses_stored_profile() {
        let mut engine = make_engine();
        let onboarded = engine.onboard(&make_onboarding()).unwrap();
        let user = onboarded.user_id;

        let config = engine
            .switch_strategy(
                user,
                &StrategySwitchRequest {
                    new_strategy: GoalType::MuscleGain,
                    target_weight_kg: Some(80.0),
                },
            )
            .unwrap();

        assert_eq!(config.mode, GoalType::MuscleGain);
        // Surplus target sits well above the fat-loss target
        assert!(config.daily_calories > onboarded.strategy_config.daily_calories);

        // Dashboard now leads with protein
        let summary = engine.dashboard_summary(user, None).unwrap();
        assert_eq!(summary.ui_strategy, "MUSCLE_GAIN");
    }

    #[test]
    fn test_recommendations_respect_logged_intake() {
        let mut engine = make_engine();
        let onboarded = engine.onboard(&make_onboarding()).unwrap();
        let user = onboarded.user_id;
        let today = Utc::now().date_naive();

        // Nothing logged: plenty of budget, recipes offered
        let rec = engine.recommend_recipes(user, Some(today)).unwrap();
        assert!(!rec.recipes.is_empty());
        assert!(rec.recipes.len() <= 3);

        // Eat almost the whole budget: gap under 100 kcal, list empties
        let budget = f64::from(onboarded.strategy_config.daily_calories);
        engine
            .log_diary(user, make_entry(today, budget - 50.0, 150.0))
            .unwrap();
        let rec = engine.recommend_recipes(user, Some(today)).unwrap();
        assert!(rec.recipes.is_empty());
    }

    #[test]
    fn test_streak_and_badges_read() {
        let mut engine = make_engine();
        let user = engine.onboard(&make_onboarding()).unwrap().user_id;
        let today = Utc::now().date_naive();

        for offset in 0..3 {
            engine
                .log_diary(user, make_entry(today - Duration::days(offset), 600.0, 35.0))
                .unwrap();
        }
        engine.record_progress(user, "first-log", 1).unwrap();

        let response = engine.achievements_on(user, today).unwrap();
        assert_eq!(response.streak_days, 3);
        assert_eq!(response.level, 1);

        let first_log = response.badges.iter().find(|b| b.id == "first-log").unwrap();
        assert!(first_log.unlocked);
        assert!(first_log.unlocked_at.is_some());

        let week = response.badges.iter().find(|b| b.id == "log-7-days").unwrap();
        assert!(!week.unlocked);
        assert_eq!(week.progress, 0);
    }

    #[test]
    fn test_progress_unknown_achievement() {
        let mut engine = make_engine();
        let user = engine.onboard(&make_onboarding()).unwrap().user_id;

        assert!(matches!(
            engine.record_progress(user, "no-such-badge", 1),
            Err(EngineError::AchievementNotFound(_))
        ));
    }
}
