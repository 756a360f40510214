use crate::error::{Result, StudioError};
use serde::{Deserialize, Serialize};

/// Body of `POST /v1/images/generations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub negative_prompt: String,
    /// Comma-joined LoRA ids, empty when none are selected.
    pub lora_ids: String,
    pub lora_weight: f32,
    #[serde(rename = "n")]
    pub count: u32,
    pub size: String,
    pub sampler: String,
    pub steps: u32,
    pub guidance: f32,
    pub seed: i64,
    pub is_nsfw: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub data: Option<Vec<ImageData>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedImage {
    pub url: String,
}

impl GenerationResponse {
    /// Images in response order; entries without a url are skipped.
    pub fn into_images(self) -> Result<Vec<GeneratedImage>> {
        let images: Vec<GeneratedImage> = self
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| item.url)
            .filter(|url| !url.is_empty())
            .map(|url| GeneratedImage { url })
            .collect();

        if images.is_empty() {
            return Err(StudioError::EmptyResult);
        }
        Ok(images)
    }
}
