pub mod exercise;
pub mod food_analysis;
pub mod glucose;
pub mod grocery;
pub mod habits;
pub mod meal_plan;

pub use exercise::recommend_exercise;
pub use food_analysis::FoodAnalyzer;
pub use glucose::predict_glucose;
pub use grocery::recommend_groceries;
pub use habits::analyze_habits;
pub use meal_plan::generate_meal_plan;
