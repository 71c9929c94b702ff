//! Built-in catalogs
//!
//! Default recipe and achievement catalogs seeded into the engine, plus
//! JSON loading so deployments can ship their own. Both catalogs are
//! read-only inputs; the engine never mutates them.

use crate::types::{Achievement, RecipeCatalogEntry};

fn recipe(
    id: &str,
    name: &str,
    tags: &[&str],
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> RecipeCatalogEntry {
    RecipeCatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        calories,
        protein_g: protein,
        carbs_g: carbs,
        fat_g: fat,
    }
}

/// The built-in recipe catalog
pub fn default_recipes() -> Vec<RecipeCatalogEntry> {
    vec![
        recipe(
            "grilled-chicken-bowl",
            "Grilled Chicken Bowl",
            &["high_protein", "lunch"],
            520.0,
            45.0,
            48.0,
            14.0,
        ),
        recipe(
            "salmon-quinoa",
            "Salmon with Quinoa",
            &["high_protein", "omega3", "dinner"],
            610.0,
            38.0,
            42.0,
            28.0,
        ),
        recipe(
            "greek-yogurt-parfait",
            "Greek Yogurt Parfait",
            &["snack", "high_protein"],
            280.0,
            22.0,
            34.0,
            6.0,
        ),
        recipe(
            "veggie-stir-fry",
            "Tofu Veggie Stir-Fry",
            &["vegetarian", "dinner"],
            430.0,
            21.0,
            52.0,
            16.0,
        ),
        recipe(
            "overnight-oats",
            "Overnight Oats",
            &["breakfast", "fiber"],
            390.0,
            16.0,
            58.0,
            11.0,
        ),
        recipe(
            "beef-sweet-potato",
            "Lean Beef and Sweet Potato",
            &["high_protein", "dinner"],
            640.0,
            48.0,
            55.0,
            22.0,
        ),
        recipe(
            "lentil-soup",
            "Hearty Lentil Soup",
            &["vegetarian", "fiber", "lunch"],
            340.0,
            18.0,
            50.0,
            8.0,
        ),
        recipe(
            "protein-smoothie",
            "Berry Protein Smoothie",
            &["snack", "high_protein"],
            250.0,
            28.0,
            26.0,
            4.0,
        ),
    ]
}

fn achievement(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    icon: &str,
    target: u32,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        icon: icon.to_string(),
        target,
    }
}

/// The built-in achievement catalog
pub fn default_achievements() -> Vec<Achievement> {
    vec![
        achievement(
            "first-log",
            "First Bite",
            "Log your first meal",
            "logging",
            "fork",
            1,
        ),
        achievement(
            "log-7-days",
            "One Week Strong",
            "Log meals on 7 different days",
            "logging",
            "calendar",
            7,
        ),
        achievement(
            "log-30-days",
            "Habit Formed",
            "Log meals on 30 different days",
            "logging",
            "medal",
            30,
        ),
        achievement(
            "streak-3",
            "Warming Up",
            "Keep a 3-day logging streak",
            "streak",
            "flame",
            3,
        ),
        achievement(
            "streak-14",
            "On Fire",
            "Keep a 14-day logging streak",
            "streak",
            "fire",
            14,
        ),
        achievement(
            "first-sync",
            "Connected",
            "Sync health data for the first time",
            "health",
            "link",
            1,
        ),
        achievement(
            "protein-100",
            "Protein Pro",
            "Hit your protein target 100 times",
            "nutrition",
            "egg",
            100,
        ),
    ]
}

/// Load a recipe catalog from JSON (an array of catalog entries)
pub fn recipes_from_json(json: &str) -> Result<Vec<RecipeCatalogEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load an achievement catalog from JSON
pub fn achievements_from_json(json: &str) -> Result<Vec<Achievement>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_catalogs_not_empty() {
        assert!(!default_recipes().is_empty());
        assert!(!default_achievements().is_empty());
    }

    #[test]
    fn test_catalog_ids_unique() {
        let recipes = default_recipes();
        let mut ids: Vec<_> = recipes.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), recipes.len());

        let achievements = default_achievements();
        let mut ids: Vec<_> = achievements.iter().map(|a| a.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), achievements.len());
    }

    #[test]
    fn test_recipes_round_trip_json() {
        let json = serde_json::to_string(&default_recipes()).unwrap();
        let loaded = recipes_from_json(&json).unwrap();
        assert_eq!(loaded, default_recipes());
    }
}
