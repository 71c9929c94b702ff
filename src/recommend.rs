//! Recipe recommendation
//!
//! Scores a static recipe catalog against the day's remaining nutrient gap
//! and returns the top three, with a human-readable reason string built
//! from the largest gaps.

use serde::{Deserialize, Serialize};

use crate::types::{NutrientGap, RecipeCatalogEntry};

/// Calorie gap below which nothing is worth suggesting
pub const MIN_CALORIE_GAP_KCAL: f64 = 100.0;

/// Protein gap (g) above which protein drives scoring and the reason text
pub const PROTEIN_GAP_THRESHOLD_G: f64 = 20.0;
/// Carb gap (g) above which carbs contribute to scoring
pub const CARBS_GAP_THRESHOLD_G: f64 = 30.0;
/// Fat gap (g) above which fat contributes to scoring
pub const FAT_GAP_THRESHOLD_G: f64 = 10.0;
/// Calorie gap (kcal) above which the reason text mentions calories
pub const CALORIE_REASON_THRESHOLD_KCAL: f64 = 300.0;
/// Carb gap (g) above which the reason text mentions carbs
pub const CARBS_REASON_THRESHOLD_G: f64 = 40.0;

/// Slack allowed over the calorie gap for the budget-fit bonus
pub const FIT_SLACK_KCAL: f64 = 100.0;
/// Flat bonus for recipes that fit the remaining calorie budget
pub const FIT_BONUS: f64 = 10.0;

/// Maximum recipes returned
pub const MAX_RECOMMENDATIONS: usize = 3;

/// A ranked recommendation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub reason_text: String,
    pub recipes: Vec<RecipeCatalogEntry>,
}

/// Score one recipe against the remaining gap
fn score(recipe: &RecipeCatalogEntry, gap: &NutrientGap) -> f64 {
    let mut score = 0.0;
    if gap.protein_g > PROTEIN_GAP_THRESHOLD_G {
        score += recipe.protein_g * 3.0;
    }
    if gap.carbs_g > CARBS_GAP_THRESHOLD_G {
        score += recipe.carbs_g * 1.5;
    }
    if gap.fat_g > FAT_GAP_THRESHOLD_G {
        score += recipe.fat_g;
    }
    if recipe.calories <= gap.calories + FIT_SLACK_KCAL {
        score += FIT_BONUS;
    }
    score
}

/// Reason clauses in fixed order: protein, then calories, then carbs.
/// When no gap qualifies, a single balanced message is emitted.
fn reason_text(gap: &NutrientGap) -> String {
    let mut clauses = Vec::new();
    if gap.protein_g > PROTEIN_GAP_THRESHOLD_G {
        clauses.push(format!(
            "You still need {:.0}g of protein today",
            gap.protein_g
        ));
    }
    if gap.calories > CALORIE_REASON_THRESHOLD_KCAL {
        clauses.push(format!("you have {:.0} kcal left in your budget", gap.calories));
    }
    if gap.carbs_g > CARBS_REASON_THRESHOLD_G {
        clauses.push(format!("there is room for {:.0}g of carbs", gap.carbs_g));
    }

    if clauses.is_empty() {
        "Your intake looks balanced today. Keep it up!".to_string()
    } else {
        format!("{}.", clauses.join(", and "))
    }
}

/// Rank the catalog against the gap and return the top recipes.
///
/// A calorie gap under 100 kcal short-circuits to an empty list; the
/// reason text is still assembled from whatever gaps remain. The sort is
/// stable, so tied scores keep catalog order.
pub fn recommend(gap: &NutrientGap, catalog: &[RecipeCatalogEntry]) -> Recommendation {
    let reason = reason_text(gap);

    if gap.calories < MIN_CALORIE_GAP_KCAL {
        return Recommendation {
            reason_text: reason,
            recipes: Vec::new(),
        };
    }

    let mut scored: Vec<(f64, &RecipeCatalogEntry)> =
        catalog.iter().map(|r| (score(r, gap), r)).collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    Recommendation {
        reason_text: reason,
        recipes: scored
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|(_, r)| r.clone())
            .collect(),
    }
}
