//! Achievement and streak tracking
//!
//! Derives consecutive-day logging streaks from diary history, accumulates
//! achievement progress with a one-way unlock latch, and computes the
//! user's level from the unlocked count.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::info;

use crate::types::{Achievement, AchievementProgress};

/// Unlocked achievements per level tier
pub const ACHIEVEMENTS_PER_LEVEL: u32 = 3;

/// Consecutive-day logging streak ending today.
///
/// Walks the distinct logged dates newest-first with a cursor starting at
/// today; each match counts one day and moves the cursor back. The walk
/// stops at the first gap. A history whose most recent entry is yesterday
/// therefore reports 0; that is the deliberate, literal behavior.
pub fn streak(logged_dates_desc: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut cursor = today;
    for &date in logged_dates_desc {
        if date == cursor {
            streak += 1;
            cursor = cursor - Duration::days(1);
        } else {
            break;
        }
    }
    streak
}

/// Apply a non-negative progress increment toward an achievement.
///
/// Creates the record on first touch. The unlock flag latches: once true
/// it never reverts, and `unlocked_at` is written exactly once, on the
/// increment that crosses the target.
pub fn apply_progress(
    existing: Option<AchievementProgress>,
    achievement: &Achievement,
    increment: u32,
    now: DateTime<Utc>,
) -> AchievementProgress {
    let mut record = existing.unwrap_or(AchievementProgress {
        achievement_id: achievement.id.clone(),
        progress: 0,
        unlocked: false,
        unlocked_at: None,
    });

    record.progress += increment;

    if !record.unlocked && record.progress >= achievement.target {
        record.unlocked = true;
        record.unlocked_at = Some(now);
        info!(
            achievement = %achievement.id,
            progress = record.progress,
            "achievement unlocked"
        );
    }

    record
}

/// Level tier derived from the unlocked count, recomputed on every read
pub fn level(unlocked_count: u32) -> u32 {
    unlocked_count / ACHIEVEMENTS_PER_LEVEL + 1
}
