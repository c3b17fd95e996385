use crate::models::MealPreference;

fn meals_for(preference: MealPreference) -> [&'static str; 4] {
    match preference {
        MealPreference::Keto => [
            "Egg & spinach scramble",
            "Grilled chicken salad",
            "Zucchini noodles with pesto",
            "Almonds & cheese snack",
        ],
        MealPreference::Vegan => [
            "Oatmeal with berries",
            "Chickpea salad",
            "Tofu stir-fry",
            "Hummus & veggies",
        ],
        MealPreference::Vegetarian => [
            "Greek yogurt with fruits",
            "Veggie wrap",
            "Paneer curry with salad",
            "Nuts & seeds",
        ],
        MealPreference::LowCarb => [
            "Avocado egg salad",
            "Grilled salmon with broccoli",
            "Cauliflower rice stir-fry",
            "Cheese & cucumber slices",
        ],
    }
}

/// Weekly diabetic-friendly plan. The header echoes the preference as typed.
pub fn generate_meal_plan(preference: &str) -> String {
    let resolved = MealPreference::from_string(preference);
    log::debug!("🥑 Meal plan for '{}' resolved to {}", preference, resolved);

    let [breakfast, lunch, dinner, snack] = meals_for(resolved);
    format!(
        "Weekly Meal Plan ({}):\n\
         - Breakfast: {}\n\
         - Lunch: {}\n\
         - Dinner: {}\n\
         - Snack: {}",
        preference, breakfast, lunch, dinner, snack
    )
}
