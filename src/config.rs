use anyhow::{bail, Result};

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-3-2-90b-vision-instruct";
pub const DEFAULT_TEXT_MODEL: &str = "ibm/granite-3-3-8b-instruct";
pub const DEFAULT_USDA_API_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:7860";

/// Credentials and endpoints, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub watsonx_api_key: String,
    pub watsonx_url: String,
    pub watsonx_project_id: String,
    pub watsonx_iam_url: String,
    pub vision_model: String,
    pub text_model: String,
    pub usda_api_key: String,
    pub usda_api_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => bail!("{} must be set in .env file", key),
            }
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            watsonx_api_key: required("WATSONX_API_KEY")?,
            watsonx_url: required("WATSONX_URL")?.trim_end_matches('/').to_string(),
            watsonx_project_id: required("WATSONX_PROJECT_ID")?,
            usda_api_key: required("USDA_API_KEY")?,
            watsonx_iam_url: optional("WATSONX_IAM_URL", DEFAULT_IAM_URL)
                .trim_end_matches('/')
                .to_string(),
            vision_model: optional("WATSONX_VISION_MODEL", DEFAULT_VISION_MODEL),
            text_model: optional("WATSONX_TEXT_MODEL", DEFAULT_TEXT_MODEL),
            usda_api_url: optional("USDA_API_URL", DEFAULT_USDA_API_URL)
                .trim_end_matches('/')
                .to_string(),
            bind_addr: optional("BIND_ADDR", DEFAULT_BIND_ADDR),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("WATSONX_API_KEY", "wx-key"),
        ("WATSONX_URL", "https://us-south.ml.cloud.ibm.com/"),
        ("WATSONX_PROJECT_ID", "proj-1"),
        ("USDA_API_KEY", "usda-key"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.watsonx_url, "https://us-south.ml.cloud.ibm.com");
        assert_eq!(config.watsonx_iam_url, DEFAULT_IAM_URL);
        assert_eq!(config.vision_model, DEFAULT_VISION_MODEL);
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.usda_api_url, DEFAULT_USDA_API_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_missing_required_key_fails() {
        let err = Config::from_lookup(lookup_from(&REQUIRED[..3])).unwrap_err();
        assert!(err.to_string().contains("USDA_API_KEY"));
    }

    #[test]
    fn test_blank_required_key_fails() {
        let mut pairs = REQUIRED.to_vec();
        pairs[2] = ("WATSONX_PROJECT_ID", "   ");
        let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(err.to_string().contains("WATSONX_PROJECT_ID"));
    }

    #[test]
    fn test_optional_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("BIND_ADDR", "127.0.0.1:9000"));
        pairs.push(("WATSONX_TEXT_MODEL", "ibm/granite-13b"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.text_model, "ibm/granite-13b");
    }

    #[test]
    fn test_log_filter_read_from_env_file() {
        // main loads .env before building the logger, so a filter set there applies.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "DIABETES_ASSISTANT_TEST_LOG=debug\n").unwrap();

        dotenv::from_path(&path).unwrap();
        let logger = env_logger::Builder::from_env(
            env_logger::Env::default().filter("DIABETES_ASSISTANT_TEST_LOG"),
        )
        .build();

        assert_eq!(logger.filter(), log::LevelFilter::Debug);
    }
}
