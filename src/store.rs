//! Record store seam
//!
//! The engine persists nothing itself; it reads and writes through the
//! `RecordStore` trait and treats each call as atomic. `MemoryStore` is
//! the in-process implementation backing tests and the CLI, with JSON
//! round-tripping so state survives between invocations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::types::{AchievementProgress, DiaryEntry, HealthSample, SampleKind, UserProfile};

/// Storage operations the engine depends on.
///
/// Implementations must treat `put_profile` as a single atomic commit:
/// the orchestrator hands over a fully recalculated profile rather than
/// issuing per-field writes.
pub trait RecordStore {
    /// Fetch a user's profile, if onboarded
    fn profile(&self, user_id: Uuid) -> Option<UserProfile>;

    /// Insert or overwrite a user's profile in one commit
    fn put_profile(&mut self, profile: UserProfile);

    /// Append health samples, skipping duplicates. A duplicate is a sample
    /// whose `(kind, recorded_at)` pair is already stored for the user.
    /// Returns the number of samples actually inserted.
    fn append_samples(&mut self, user_id: Uuid, samples: &[HealthSample]) -> usize;

    /// Latest sample of a kind by `recorded_at`, descending
    fn latest_sample(&self, user_id: Uuid, kind: SampleKind) -> Option<HealthSample>;

    /// Append a diary entry
    fn append_diary(&mut self, user_id: Uuid, entry: DiaryEntry);

    /// All diary entries for one calendar day
    fn entries_on(&self, user_id: Uuid, date: NaiveDate) -> Vec<DiaryEntry>;

    /// Distinct dates with at least one diary entry, newest first
    fn logged_dates_desc(&self, user_id: Uuid) -> Vec<NaiveDate>;

    /// Progress record for one achievement, if any
    fn progress(&self, user_id: Uuid, achievement_id: &str) -> Option<AchievementProgress>;

    /// Insert or overwrite a progress record
    fn put_progress(&mut self, user_id: Uuid, progress: AchievementProgress);

    /// All progress records for a user
    fn all_progress(&self, user_id: Uuid) -> Vec<AchievementProgress>;
}

/// Everything stored for one user
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserRecords {
    profile: Option<UserProfile>,
    samples: Vec<HealthSample>,
    diary: Vec<DiaryEntry>,
    progress: HashMap<String, AchievementProgress>,
}

/// In-memory record store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    users: HashMap<Uuid, UserRecords>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load store state from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize store state to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn records(&self, user_id: Uuid) -> Option<&UserRecords> {
        self.users.get(&user_id)
    }

    fn records_mut(&mut self, user_id: Uuid) -> &mut UserRecords {
        self.users.entry(user_id).or_default()
    }
}

impl RecordStore for MemoryStore {
    fn profile(&self, user_id: Uuid) -> Option<UserProfile> {
        self.records(user_id).and_then(|r| r.profile.clone())
    }

    fn put_profile(&mut self, profile: UserProfile) {
        let user_id = profile.user_id;
        self.records_mut(user_id).profile = Some(profile);
    }

    fn append_samples(&mut self, user_id: Uuid, samples: &[HealthSample]) -> usize {
        let records = self.records_mut(user_id);
        let mut inserted = 0;
        for sample in samples {
            let duplicate = records
                .samples
                .iter()
                .any(|s| s.kind == sample.kind && s.recorded_at == sample.recorded_at);
            if !duplicate {
                records.samples.push(sample.clone());
                inserted += 1;
            }
        }
        inserted
    }

    fn latest_sample(&self, user_id: Uuid, kind: SampleKind) -> Option<HealthSample> {
        self.records(user_id)?
            .samples
            .iter()
            .filter(|s| s.kind == kind)
            .max_by_key(|s| s.recorded_at)
            .cloned()
    }

    fn append_diary(&mut self, user_id: Uuid, entry: DiaryEntry) {
        self.records_mut(user_id).diary.push(entry);
    }

    fn entries_on(&self, user_id: Uuid, date: NaiveDate) -> Vec<DiaryEntry> {
        self.records(user_id)
            .map(|r| r.diary.iter().filter(|e| e.date == date).cloned().collect())
            .unwrap_or_default()
    }

    fn logged_dates_desc(&self, user_id: Uuid) -> Vec<NaiveDate> {
        let Some(records) = self.records(user_id) else {
            return Vec::new();
        };
        let mut dates: Vec<NaiveDate> = records.diary.iter().map(|e| e.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates.reverse();
        dates
    }

    fn progress(&self, user_id: Uuid, achievement_id: &str) -> Option<AchievementProgress> {
        self.records(user_id)?.progress.get(achievement_id).cloned()
    }

    fn put_progress(&mut self, user_id: Uuid, progress: AchievementProgress) {
        self.records_mut(user_id)
            .progress
            .insert(progress.achievement_id.clone(), progress);
    }

    fn all_progress(&self, user_id: Uuid) -> Vec<AchievementProgress> {
        self.records(user_id)
            .map(|r| {
                let mut all: Vec<AchievementProgress> = r.progress.values().cloned().collect();
                all.sort_by(|a, b| a.achievement_id.cmp(&b.achievement_id));
                all
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MealType;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn make_sample(kind: SampleKind, value: f64, hour: u32) -> HealthSample {
        HealthSample {
            kind,
            value,
            recorded_at: Utc.with_ymd_and_hms(2024, 3, 10, hour, 0, 0).unwrap(),
            source: Some("scale".to_string()),
        }
    }

    fn make_profile(user_id: Uuid, weight_kg: f64) -> UserProfile {
        UserProfile {
            user_id,
            gender: crate::types::Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(1994, 1, 10).unwrap(),
            height_cm: 178.0,
            weight_kg,
            body_fat_percent: None,
            activity_level: crate::types::ActivityLevel::Moderate,
            goal: crate::types::GoalType::Maintain,
            daily_calorie_target: 2600,
            protein_target_g: 160,
            carbs_target_g: 290,
            fat_target_g: 85,
            target_weight_kg: None,
            onboarding_completed: true,
        }
    }

    fn make_entry(date: NaiveDate) -> DiaryEntry {
        DiaryEntry {
            date,
            meal: MealType::Lunch,
            calories: 500.0,
            protein_g: 30.0,
            carbs_g: 55.0,
            fat_g: 15.0,
        }
    }

    #[test]
    fn test_put_profile_stores_and_overwrites() {
        let mut store = MemoryStore::new();
        let user = Uuid::new_v4();

        store.put_profile(make_profile(user, 75.0));
        assert_eq!(store.profile(user).unwrap().weight_kg, 75.0);

        store.put_profile(make_profile(user, 74.2));
        assert_eq!(store.profile(user).unwrap().weight_kg, 74.2);
    }

    #[test]
    fn test_duplicate_samples_skipped() {
        let mut store = MemoryStore::new();
        let user = Uuid::new_v4();
        let batch = vec![
            make_sample(SampleKind::Weight, 80.0, 8),
            make_sample(SampleKind::Weight, 80.0, 8),
        ];

        assert_eq!(store.append_samples(user, &batch), 1);
        // Re-appending the same batch inserts nothing
        assert_eq!(store.append_samples(user, &batch), 0);
    }

    #[test]
    fn test_latest_sample_by_recorded_at() {
        let mut store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.append_samples(
            user,
            &[
                make_sample(SampleKind::Weight, 81.0, 7),
                make_sample(SampleKind::Weight, 80.2, 20),
                make_sample(SampleKind::BodyFat, 22.0, 7),
            ],
        );

        let latest = store.latest_sample(user, SampleKind::Weight).unwrap();
        assert_eq!(latest.value, 80.2);
        assert!(store.latest_sample(user, SampleKind::Steps).is_none());
    }

    #[test]
    fn test_logged_dates_distinct_descending() {
        let mut store = MemoryStore::new();
        let user = Uuid::new_v4();
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        store.append_diary(user, make_entry(d1));
        store.append_diary(user, make_entry(d2));
        store.append_diary(user, make_entry(d2));

        assert_eq!(store.logged_dates_desc(user), vec![d2, d1]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.append_samples(user, &[make_sample(SampleKind::Weight, 79.5, 9)]);
        store.append_diary(user, make_entry(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));

        let json = store.to_json().unwrap();
        let loaded = MemoryStore::from_json(&json).unwrap();

        assert_eq!(
            loaded.latest_sample(user, SampleKind::Weight).unwrap().value,
            79.5
        );
        assert_eq!(loaded.logged_dates_desc(user).len(), 1);
    }
}
