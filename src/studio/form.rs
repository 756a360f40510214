use crate::{
    config::ParameterLimits,
    error::{Result, StudioError},
    models::{parse_size, GenerationRequest, ModelCatalog, SizePreset, DEFAULT_SAMPLER},
};
use std::ops::RangeInclusive;

pub const MISSING_INPUT_MESSAGE: &str = "Please enter both an API key and a prompt.";

/// Raw control values, as the form holds them before submission.
///
/// Numeric controls are kept as the strings a slider or text input yields;
/// they are parsed and range-checked only when a request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub model: Option<String>,
    pub prompt: String,
    pub negative_prompt: String,
    pub lora_ids: Vec<String>,
    pub lora_weight: String,
    pub count: String,
    pub size: String,
    pub sampler: String,
    pub steps: String,
    pub guidance: String,
    pub seed: String,
    pub is_nsfw: bool,
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            model: None,
            prompt: String::new(),
            negative_prompt: String::new(),
            lora_ids: Vec::new(),
            lora_weight: "0.7".to_string(),
            count: "1".to_string(),
            size: SizePreset::default().size().to_string(),
            sampler: DEFAULT_SAMPLER.to_string(),
            steps: "25".to_string(),
            guidance: "7".to_string(),
            seed: "-1".to_string(),
            is_nsfw: false,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = negative_prompt.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_loras<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lora_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_lora_weight(mut self, weight: impl Into<String>) -> Self {
        self.lora_weight = weight.into();
        self
    }

    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = count.into();
        self
    }

    pub fn with_size_preset(mut self, preset: SizePreset) -> Self {
        self.size = preset.size().to_string();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_sampler(mut self, sampler: impl Into<String>) -> Self {
        self.sampler = sampler.into();
        self
    }

    pub fn with_steps(mut self, steps: impl Into<String>) -> Self {
        self.steps = steps.into();
        self
    }

    pub fn with_guidance(mut self, guidance: impl Into<String>) -> Self {
        self.guidance = guidance.into();
        self
    }

    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn with_nsfw(mut self, is_nsfw: bool) -> Self {
        self.is_nsfw = is_nsfw;
        self
    }

    /// Keeps the selection consistent with a freshly loaded catalog: an
    /// unknown model falls back to the first one, unknown LoRAs are dropped.
    pub fn reconcile_with(&mut self, catalog: &ModelCatalog) {
        let keep_model = self
            .model
            .as_deref()
            .map_or(false, |id| catalog.has_base_model(id));
        if !keep_model {
            self.model = catalog.first_base_model().map(|model| model.id.clone());
        }
        self.lora_ids.retain(|id| catalog.has_lora(id));
    }

    pub fn to_request(
        &self,
        catalog: &ModelCatalog,
        limits: &ParameterLimits,
    ) -> Result<GenerationRequest> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(StudioError::validation(MISSING_INPUT_MESSAGE));
        }

        let model = match self.model.as_deref() {
            Some(id) if catalog.has_base_model(id) => id.to_string(),
            Some(id) => {
                return Err(StudioError::validation(format!(
                    "Model '{}' is not in the loaded catalog.",
                    id
                )))
            }
            None => return Err(StudioError::validation("Please select a base model.")),
        };

        if let Some(unknown) = self.lora_ids.iter().find(|id| !catalog.has_lora(id)) {
            return Err(StudioError::validation(format!(
                "LoRA model '{}' is not in the loaded catalog.",
                unknown
            )));
        }

        let size = self.size.trim();
        if parse_size(size).is_none() {
            return Err(StudioError::validation(format!(
                "Size must look like WIDTHxHEIGHT, got '{}'.",
                self.size
            )));
        }

        let sampler = self.sampler.trim();
        if sampler.is_empty() {
            return Err(StudioError::validation("Please select a sampler."));
        }

        Ok(GenerationRequest {
            model,
            prompt: prompt.to_string(),
            negative_prompt: self.negative_prompt.trim().to_string(),
            lora_ids: self.lora_ids.join(","),
            lora_weight: parse_float("LoRA weight", &self.lora_weight, &limits.lora_weight)?,
            count: parse_whole("Image count", &self.count, &limits.count)?,
            size: size.to_string(),
            sampler: sampler.to_string(),
            steps: parse_whole("Steps", &self.steps, &limits.steps)?,
            guidance: parse_float("Guidance", &self.guidance, &limits.guidance)?,
            seed: parse_seed(&self.seed, limits.min_seed)?,
            is_nsfw: self.is_nsfw,
        })
    }
}

fn parse_whole(label: &str, raw: &str, range: &RangeInclusive<u32>) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| range.contains(value))
        .ok_or_else(|| {
            StudioError::validation(format!(
                "{} must be a whole number between {} and {}.",
                label,
                range.start(),
                range.end()
            ))
        })
}

fn parse_float(label: &str, raw: &str, range: &RangeInclusive<f32>) -> Result<f32> {
    raw.trim()
        .parse::<f32>()
        .ok()
        .filter(|value| range.contains(value))
        .ok_or_else(|| {
            StudioError::validation(format!(
                "{} must be a number between {} and {}.",
                label,
                range.start(),
                range.end()
            ))
        })
}

fn parse_seed(raw: &str, min_seed: i64) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|seed| *seed == -1 || *seed >= min_seed)
        .ok_or_else(|| {
            StudioError::validation(format!(
                "Seed must be -1 (random) or a whole number of at least {}.",
                min_seed
            ))
        })
}
