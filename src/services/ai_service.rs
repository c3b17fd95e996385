use anyhow::Result;

use super::image_loader::LoadedImage;
use crate::models::NutritionLookup;

/// Hosted models used by the food-analysis chain (WatsonX in production).
#[async_trait::async_trait]
pub trait AIService: Send + Sync {
    /// Raw model text listing what it sees in the image.
    async fn extract_ingredients(&self, image: &LoadedImage) -> Result<String>;
    /// Free-text glycemic assessment of a nutrition summary.
    async fn diabetic_impact(&self, nutrition_summary: &str) -> Result<String>;
}

/// Keyword search against a nutrition database (USDA FoodData Central in production).
#[async_trait::async_trait]
pub trait NutritionService: Send + Sync {
    async fn lookup(&self, food_name: &str) -> Result<NutritionLookup>;
}
