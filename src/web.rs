use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::handlers::FoodAnalyzer;

/// Upper bound for uploaded meal photos.
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

pub const MISSING_IMAGE_MESSAGE: &str = "Please upload a file or provide a URL.";

#[derive(Debug, Deserialize)]
pub struct MealPlanRequest {
    pub preference: String,
}

#[derive(Debug, Deserialize)]
pub struct GlucoseRequest {
    pub carbs: f64,
    pub previous_glucose: Option<f64>,
    pub hours_since_last_meal: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct GroceryRequest {
    pub items: String,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseRequest {
    pub current_glucose: f64,
    pub fitness_level: Option<String>,
}

/// Text answer shown in a tab's output box.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToolResponse {
    pub result: String,
}

impl ToolResponse {
    fn new(result: String) -> Self {
        Self { result }
    }
}

pub struct AppState {
    pub analyzer: Arc<FoodAnalyzer>,
}

pub mod server {
    use super::*;
    use axum::{
        extract::{DefaultBodyLimit, Multipart, State},
        http::StatusCode,
        response::Html,
        routing::{get, post},
        Json, Router,
    };

    use crate::handlers::{
        analyze_habits, generate_meal_plan, glucose, predict_glucose, recommend_exercise,
        recommend_groceries,
    };
    use crate::models::{FitnessLevel, FoodAnalysis, HabitLog};
    use crate::services::image_loader::mime_from_name;
    use crate::services::{ImageError, ImageSource, LoadedImage};

    type ApiError = (StatusCode, String);

    pub fn create_router(analyzer: Arc<FoodAnalyzer>) -> Router {
        let state = Arc::new(AppState { analyzer });

        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health_check))
            .route("/api/food-analysis", post(food_analysis_handler))
            .route("/api/meal-plan", post(meal_plan_handler))
            .route("/api/glucose", post(glucose_handler))
            .route("/api/grocery", post(grocery_handler))
            .route("/api/exercise", post(exercise_handler))
            .route("/api/habits", post(habits_handler))
            .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE))
            .with_state(state)
    }

    async fn index_handler() -> Html<&'static str> {
        Html(include_str!("../static/index.html"))
    }

    async fn health_check() -> &'static str {
        "OK"
    }

    /// Multipart form with an `image` file and/or a `url` text field; the upload wins.
    async fn food_analysis_handler(
        State(state): State<Arc<AppState>>,
        mut multipart: Multipart,
    ) -> Result<Json<FoodAnalysis>, ApiError> {
        let mut upload: Option<LoadedImage> = None;
        let mut url: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart field: {}", e),
            )
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "image" => {
                    let mime_type = field
                        .content_type()
                        .filter(|ct| ct.starts_with("image/"))
                        .map(str::to_string)
                        .or_else(|| field.file_name().map(|f| mime_from_name(f).to_string()))
                        .unwrap_or_else(|| "image/jpeg".to_string());
                    let bytes = field.bytes().await.map_err(|e| {
                        (
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read image: {}", e),
                        )
                    })?;
                    if !bytes.is_empty() {
                        log::info!("📸 Uploaded image: {} bytes ({})", bytes.len(), mime_type);
                        upload = Some(LoadedImage::new(bytes.to_vec(), mime_type));
                    }
                }
                "url" => {
                    let text = field.text().await.map_err(|e| {
                        (StatusCode::BAD_REQUEST, format!("Failed to read url: {}", e))
                    })?;
                    if !text.trim().is_empty() {
                        url = Some(text);
                    }
                }
                other => {
                    log::debug!("Ignoring multipart field: {}", other);
                }
            }
        }

        let result = match (upload, url) {
            (Some(image), _) => state.analyzer.analyze_image(&image).await,
            (None, Some(url)) => {
                let source = ImageSource::parse(&url)
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                state.analyzer.analyze_source(&source).await
            }
            (None, None) => {
                return Err((StatusCode::BAD_REQUEST, MISSING_IMAGE_MESSAGE.to_string()));
            }
        };

        result.map(Json).map_err(|e| {
            let status = match e.downcast_ref::<ImageError>() {
                Some(ImageError::NotFound(_)) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            };
            log::error!("❌ Food analysis failed ({}): {:#}", status, e);
            (status, e.to_string())
        })
    }

    async fn meal_plan_handler(Json(request): Json<MealPlanRequest>) -> Json<ToolResponse> {
        Json(ToolResponse::new(generate_meal_plan(&request.preference)))
    }

    async fn glucose_handler(Json(request): Json<GlucoseRequest>) -> Json<ToolResponse> {
        let prediction = predict_glucose(
            request.carbs,
            request
                .previous_glucose
                .unwrap_or(glucose::DEFAULT_PREVIOUS_GLUCOSE),
            request
                .hours_since_last_meal
                .unwrap_or(glucose::DEFAULT_HOURS_SINCE_LAST_MEAL),
        );
        Json(ToolResponse::new(prediction.to_string()))
    }

    async fn grocery_handler(Json(request): Json<GroceryRequest>) -> Json<ToolResponse> {
        Json(ToolResponse::new(recommend_groceries(&request.items)))
    }

    async fn exercise_handler(Json(request): Json<ExerciseRequest>) -> Json<ToolResponse> {
        let level = FitnessLevel::from_option(request.fitness_level.as_deref());
        Json(ToolResponse::new(recommend_exercise(
            request.current_glucose,
            level,
        )))
    }

    async fn habits_handler(Json(habits): Json<HabitLog>) -> Json<ToolResponse> {
        Json(ToolResponse::new(analyze_habits(&habits)))
    }
}
