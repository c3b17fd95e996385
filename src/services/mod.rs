pub mod ai_service;
pub mod image_loader;
pub mod usda; // USDA FoodData Central
pub mod watsonx; // IBM WatsonX chat models

pub use ai_service::{AIService, NutritionService};
pub use image_loader::{ImageError, ImageLoader, ImageSource, LoadedImage};
pub use usda::UsdaClient;
pub use watsonx::WatsonxService;
