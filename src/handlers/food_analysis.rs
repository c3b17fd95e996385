use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;

use crate::models::{FoodAnalysis, NutritionLookup};
use crate::services::{AIService, ImageLoader, ImageSource, LoadedImage, NutritionService};

/// Splits the vision model's free text into one ingredient per line.
///
/// Blank lines are dropped, a leading `* `/`- ` bullet or `<digit>.`/`<digit>)` marker is
/// stripped, and the order of the model's list is kept.
pub fn parse_ingredients(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            let stripped = strip_marker(line).trim();
            (!stripped.is_empty()).then(|| stripped.to_string())
        })
        .collect()
}

fn strip_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
        return rest;
    }

    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(d), Some('.' | ')')) if d.is_ascii_digit() => &line[2..],
        _ => line,
    }
}

/// Runs image → ingredients → nutrition → diabetic impact for one request.
pub struct FoodAnalyzer {
    loader: ImageLoader,
    ai: Arc<dyn AIService>,
    nutrition: Arc<dyn NutritionService>,
}

impl FoodAnalyzer {
    pub fn new(
        loader: ImageLoader,
        ai: Arc<dyn AIService>,
        nutrition: Arc<dyn NutritionService>,
    ) -> Self {
        Self {
            loader,
            ai,
            nutrition,
        }
    }

    /// Fails only if the image cannot be loaded or the ingredient extraction fails.
    pub async fn analyze_source(&self, source: &ImageSource) -> Result<FoodAnalysis> {
        log::info!("🍽️ Food analysis requested for {:?}", source);
        let image = self.loader.load(source).await?;
        self.analyze_image(&image).await
    }

    pub async fn analyze_image(&self, image: &LoadedImage) -> Result<FoodAnalysis> {
        let raw = self.ai.extract_ingredients(image).await?;
        let ingredients = parse_ingredients(&raw);
        log::info!("🥗 Extracted {} ingredients", ingredients.len());

        let mut nutrition = Vec::with_capacity(ingredients.len());
        let mut diabetic_impact = Vec::with_capacity(ingredients.len());

        for item in &ingredients {
            let (summary, impact) = self.analyze_ingredient(item).await;
            nutrition.push(summary);
            diabetic_impact.push(impact);
        }

        Ok(FoodAnalysis {
            ingredients,
            nutrition,
            diabetic_impact,
            analyzed_at: Utc::now(),
        })
    }

    /// Per-ingredient failures become inline messages instead of aborting the request.
    /// Every nutrition string, including not-found and error text, goes to the impact model.
    async fn analyze_ingredient(&self, item: &str) -> (String, String) {
        let summary = match self.nutrition.lookup(item).await {
            Ok(lookup) => {
                if matches!(lookup, NutritionLookup::NotFound(_)) {
                    log::warn!("⚠️ No nutrition data for '{}'", item);
                }
                lookup.to_string()
            }
            Err(e) => {
                log::warn!("⚠️ Nutrition lookup failed for '{}': {}", item, e);
                format!("USDA API error for '{}': {}", item, e)
            }
        };

        let impact = match self.ai.diabetic_impact(&summary).await {
            Ok(text) => text,
            Err(e) => {
                log::warn!("⚠️ Impact analysis failed for '{}': {}", item, e);
                format!("Error analyzing impact for '{}': {}", item, e)
            }
        };

        (summary, impact)
    }
}
