//! Metabolic calculations
//!
//! Pure functions turning body metrics into energy expenditure:
//! - Mifflin-St Jeor BMR
//! - TDEE from BMR and activity multiplier
//! - Age derivation from date of birth
//!
//! Input range validation is the boundary's responsibility (see `api`);
//! these functions compute on whatever they are given.

use chrono::{Datelike, NaiveDate};

use crate::types::{ActivityLevel, Gender};

/// Basal Metabolic Rate (kcal/day) via Mifflin-St Jeor, rounded to the
/// nearest integer.
pub fn bmr(gender: Gender, weight_kg: f64, height_cm: f64, age_years: u32) -> u32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    let value = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    value.round().max(0.0) as u32
}

/// Total Daily Energy Expenditure: BMR scaled by the activity multiplier,
/// rounded to the nearest integer.
pub fn tdee(bmr: u32, activity: ActivityLevel) -> u32 {
    (f64::from(bmr) * activity.multiplier()).round() as u32
}

/// Age in completed years on a given date.
///
/// One year is subtracted when the birthday has not yet occurred in the
/// current year, compared as a (month, day) pair.
pub fn age_on(date_of_birth: NaiveDate, on: NaiveDate) -> u32 {
    let mut age = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}
