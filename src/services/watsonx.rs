use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::ai_service::AIService;
use super::image_loader::LoadedImage;
use crate::config::Config;

const CHAT_API_VERSION: &str = "2024-10-08";
const INGREDIENT_PROMPT: &str = "List all ingredients you see in this food image.";

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        #[serde(rename = "type")]
        content_type: String,
        text: String,
    },
    ImageUrl {
        #[serde(rename = "type")]
        content_type: String,
        image_url: ImageData,
    },
}

impl ContentPart {
    fn text(text: impl Into<String>) -> Self {
        ContentPart::Text {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }

    fn image(url: String) -> Self {
        ContentPart::ImageUrl {
            content_type: "image_url".to_string(),
            image_url: ImageData { url },
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageData {
    url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model_id: &'a str,
    project_id: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Prompt sent to the text model for one nutrition summary.
pub fn impact_prompt(nutrition_summary: &str) -> String {
    format!(
        "Analyze the following nutrition data and estimate diabetic impact.\n\
         \n\
         Nutrition Data:\n\
         {}\n\
         \n\
         Provide:\n\
         - Summary (carbs & sugar impact)\n\
         - Estimated glycemic load category (low/medium/high)\n\
         - Blood sugar impact\n\
         - Safe serving size\n\
         - Advice for diabetic individuals\n",
        nutrition_summary
    )
}

pub struct WatsonxService {
    api_key: String,
    url: String,
    project_id: String,
    iam_url: String,
    vision_model: String,
    text_model: String,
    client: reqwest::Client,
}

impl WatsonxService {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        Self {
            api_key: config.watsonx_api_key.clone(),
            url: config.watsonx_url.clone(),
            project_id: config.watsonx_project_id.clone(),
            iam_url: config.watsonx_iam_url.clone(),
            vision_model: config.vision_model.clone(),
            text_model: config.text_model.clone(),
            client,
        }
    }

    /// Exchanges the API key for a short-lived IAM bearer token.
    async fn access_token(&self) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/identity/token", self.iam_url))
            .form(&[
                ("grant_type", "urn:ibm:params:oauth:grant-type:apikey"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("IAM token request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ IAM token error ({}): {}", status, error_text);
            anyhow::bail!("IAM token error ({}): {}", status, error_text);
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    async fn chat(&self, model_id: &str, messages: Vec<ChatMessage>, max_tokens: u32) -> Result<String> {
        let token = self.access_token().await?;

        let request = ChatRequest {
            model_id,
            project_id: &self.project_id,
            messages,
            max_tokens,
        };

        log::info!("🤖 Sending chat request to WatsonX with model: {}", model_id);
        log::debug!("📤 Request payload size: {} bytes", serde_json::to_string(&request)?.len());

        let response = self
            .client
            .post(format!("{}/ml/v1/text/chat", self.url))
            .query(&[("version", CHAT_API_VERSION)])
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .context("WatsonX chat request failed")?;

        let status = response.status();
        log::info!("📥 WatsonX response status: {}", status);

        if !status.is_success() {
            let error_text = response.text().await?;
            log::error!("❌ WatsonX API error ({}): {}", status, error_text);
            anyhow::bail!("WatsonX API error ({}): {}", status, error_text);
        }

        let chat_response: ChatResponse = response.json().await?;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow::anyhow!("WatsonX returned no choices"))?;

        log::debug!("💬 WatsonX response content: {}", content);
        Ok(content)
    }
}

#[async_trait::async_trait]
impl AIService for WatsonxService {
    async fn extract_ingredients(&self, image: &LoadedImage) -> Result<String> {
        log::debug!("📸 Extracting ingredients from {} byte image", image.bytes.len());

        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: vec![
                ContentPart::text(INGREDIENT_PROMPT),
                ContentPart::image(image.to_data_url()),
            ],
        }];

        self.chat(&self.vision_model, messages, 400).await
    }

    async fn diabetic_impact(&self, nutrition_summary: &str) -> Result<String> {
        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: vec![ContentPart::text(impact_prompt(nutrition_summary))],
        }];

        self.chat(&self.text_model, messages, 300).await
    }
}
