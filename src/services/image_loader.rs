use anyhow::Result;
use base64::{engine::general_purpose, Engine};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("No file found at: {0}")]
    NotFound(String),

    #[error("Failed to download image from {url}: HTTP {status}")]
    Download { url: String, status: reqwest::StatusCode },

    #[error("Empty image source")]
    EmptySource,
}

/// Where the image for a food analysis comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    Path(String),
}

impl ImageSource {
    /// Anything starting with "http" is treated as a URL, everything else as a local path.
    pub fn parse(input: &str) -> Result<Self, ImageError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ImageError::EmptySource);
        }
        if input.starts_with("http") {
            Ok(ImageSource::Url(input.to_string()))
        } else {
            Ok(ImageSource::Path(input.to_string()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl LoadedImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn to_data_url(&self) -> String {
        let encoded = general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.mime_type, encoded)
    }
}

/// Guesses the MIME type from a file name or URL path.
pub fn mime_from_name(name: &str) -> &'static str {
    let lower = name
        .split(['?', '#'])
        .next()
        .unwrap_or(name)
        .to_lowercase();

    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

pub struct ImageLoader {
    client: reqwest::Client,
}

impl ImageLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub async fn load(&self, source: &ImageSource) -> Result<LoadedImage> {
        match source {
            ImageSource::Url(url) => self.download(url).await,
            ImageSource::Path(path) => self.read_file(path).await,
        }
    }

    async fn download(&self, url: &str) -> Result<LoadedImage> {
        log::info!("🌐 Downloading image: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Download {
                url: url.to_string(),
                status,
            }
            .into());
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| v.starts_with("image/"))
            .unwrap_or_else(|| mime_from_name(url).to_string());

        let bytes = response.bytes().await?.to_vec();
        log::debug!("📊 Downloaded {} bytes ({})", bytes.len(), mime_type);

        Ok(LoadedImage::new(bytes, mime_type))
    }

    async fn read_file(&self, path: &str) -> Result<LoadedImage> {
        if !Path::new(path).is_file() {
            return Err(ImageError::NotFound(path.to_string()).into());
        }

        let bytes = tokio::fs::read(path).await?;
        log::debug!("📊 Image file size: {} bytes", bytes.len());

        Ok(LoadedImage::new(bytes, mime_from_name(path)))
    }
}
