use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Nutrient fields pulled from the first USDA search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub food: Option<String>,
    pub calories: f64,
    pub carbs: f64,
    pub sugar: f64,
    pub fat: f64,
    pub protein: f64,
    pub fiber: f64,
}

impl std::fmt::Display for NutritionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        write!(f, "{}", json)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NutritionLookup {
    Found(NutritionRecord),
    NotFound(String),
}

impl std::fmt::Display for NutritionLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutritionLookup::Found(record) => write!(f, "{}", record),
            NutritionLookup::NotFound(name) => write!(f, "No USDA data found for '{}'.", name),
        }
    }
}

/// Result of one food-analysis request. The three lists share length and order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodAnalysis {
    pub ingredients: Vec<String>,
    pub nutrition: Vec<String>,
    pub diabetic_impact: Vec<String>,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealPreference {
    Keto,
    Vegan,
    Vegetarian,
    LowCarb,
}

impl std::fmt::Display for MealPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MealPreference::Keto => "keto",
            MealPreference::Vegan => "vegan",
            MealPreference::Vegetarian => "vegetarian",
            MealPreference::LowCarb => "low-carb",
        };
        write!(f, "{}", s)
    }
}

impl MealPreference {
    /// Unknown preferences fall back to low-carb.
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "keto" => MealPreference::Keto,
            "vegan" => MealPreference::Vegan,
            "vegetarian" => MealPreference::Vegetarian,
            _ => MealPreference::LowCarb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitnessLevel {
    Light,
    Moderate,
}

impl std::fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FitnessLevel::Light => "light",
            FitnessLevel::Moderate => "moderate",
        };
        write!(f, "{}", s)
    }
}

impl FitnessLevel {
    /// Missing input means moderate; anything other than "moderate" means light.
    pub fn from_option(s: Option<&str>) -> Self {
        match s {
            None => FitnessLevel::Moderate,
            Some(level) if level.trim() == "moderate" => FitnessLevel::Moderate,
            Some(_) => FitnessLevel::Light,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitLog {
    #[serde(default)]
    pub meals: f64,
    #[serde(default)]
    pub steps: f64,
    #[serde(default)]
    pub sleep_hours: f64,
}
