use rand::seq::SliceRandom;

use crate::models::FitnessLevel;

pub const LOW_GLUCOSE_MESSAGE: &str =
    "Glucose is low! Recommend light activity: 10-15 min walking and have a small snack first.";
pub const HIGH_GLUCOSE_MESSAGE: &str =
    "Glucose is high! Avoid intense exercise. Recommend gentle stretching or short walk.";

const LOW_THRESHOLD: f64 = 70.0;
const HIGH_THRESHOLD: f64 = 180.0;
const DURATIONS_MINUTES: [u32; 3] = [20, 25, 30];

pub fn recommend_exercise(current_glucose: f64, fitness_level: FitnessLevel) -> String {
    if current_glucose < LOW_THRESHOLD {
        return LOW_GLUCOSE_MESSAGE.to_string();
    }
    if current_glucose > HIGH_THRESHOLD {
        return HIGH_GLUCOSE_MESSAGE.to_string();
    }

    let duration = DURATIONS_MINUTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DURATIONS_MINUTES[0]);

    format!(
        "Glucose safe. Recommend {} exercise for {} minutes.",
        fitness_level, duration
    )
}
