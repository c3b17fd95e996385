pub const DEFAULT_PREVIOUS_GLUCOSE: f64 = 100.0;
pub const DEFAULT_HOURS_SINCE_LAST_MEAL: f64 = 3.0;

const RISE_PER_GRAM_CARB: f64 = 1.5;
const DROP_PER_HOUR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlucosePrediction {
    pub predicted: f64,
    pub rise: f64,
}

impl std::fmt::Display for GlucosePrediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Estimated glucose level after meal: {:.1} mg/dL (rise of {:.1} mg/dL)",
            self.predicted, self.rise
        )
    }
}

/// Linear post-meal estimate in mg/dL.
pub fn predict_glucose(carbs: f64, previous_glucose: f64, hours_since_last_meal: f64) -> GlucosePrediction {
    let rise = carbs * RISE_PER_GRAM_CARB;
    GlucosePrediction {
        predicted: previous_glucose + rise - hours_since_last_meal * DROP_PER_HOUR,
        rise,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_prediction() {
        let prediction = predict_glucose(40.0, 100.0, 3.0);
        assert_eq!(prediction.predicted, 154.0);
        assert_eq!(prediction.rise, 60.0);
        assert_eq!(
            prediction.to_string(),
            "Estimated glucose level after meal: 154.0 mg/dL (rise of 60.0 mg/dL)"
        );
    }

    #[test]
    fn test_defaults_and_rounding() {
        let prediction = predict_glucose(
            7.0,
            DEFAULT_PREVIOUS_GLUCOSE,
            DEFAULT_HOURS_SINCE_LAST_MEAL,
        );
        assert_eq!(
            prediction.to_string(),
            "Estimated glucose level after meal: 104.5 mg/dL (rise of 10.5 mg/dL)"
        );
    }
}
