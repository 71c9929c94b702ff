//! Error types for the Nutrikit engine

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during engine operations
///
/// Every failure is deterministic and reproducible from the same inputs;
/// transient failure modes belong to the persistence and API layers that
/// wrap this engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown user: {0}")]
    UserNotFound(Uuid),

    #[error("Unknown achievement: {0}")]
    AchievementNotFound(String),

    #[error("User has not completed onboarding: {0}")]
    OnboardingIncomplete(Uuid),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),
}
