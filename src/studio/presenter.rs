//! Pure mapping from controller state to what a front end draws.
//!
//! `UiState` is the single source for the output panel: spinner, error
//! banner, placeholder and result grid are all derived from one variant, so
//! an error and a set of images can never be shown together.

use crate::models::{GeneratedImage, ModelCatalog, SelectOption, SizePreset, SAMPLERS};
use crate::studio::form::FormState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "data")]
pub enum UiState {
    #[default]
    Idle,
    LoadingCatalog,
    CatalogFailed(String),
    LoadingGeneration,
    GenerationSucceeded(Vec<GeneratedImage>),
    GenerationFailed(String),
}

impl UiState {
    /// State once a catalog fetch starts. A running generation or rendered
    /// results stay; a stale error is hidden.
    pub fn on_catalog_requested(&self) -> UiState {
        match self {
            UiState::LoadingGeneration | UiState::GenerationSucceeded(_) => self.clone(),
            _ => UiState::LoadingCatalog,
        }
    }

    /// State when the catalog is cleared for lack of a credential.
    pub fn on_catalog_cleared(&self) -> UiState {
        match self {
            UiState::LoadingGeneration | UiState::GenerationSucceeded(_) => self.clone(),
            _ => UiState::Idle,
        }
    }

    pub fn on_catalog_loaded(&self) -> UiState {
        match self {
            UiState::LoadingCatalog => UiState::Idle,
            _ => self.clone(),
        }
    }

    pub fn is_loading_generation(&self) -> bool {
        matches!(self, UiState::LoadingGeneration)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::CatalogFailed(message) | UiState::GenerationFailed(message) => {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    pub fn images(&self) -> &[GeneratedImage] {
        match self {
            UiState::GenerationSucceeded(images) => images,
            _ => &[],
        }
    }
}

/// State of the model and LoRA selects, driven by the catalog loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CatalogControls {
    #[default]
    AwaitingCredential,
    Loading,
    Failed,
    Ready,
}

impl CatalogControls {
    pub fn is_ready(self) -> bool {
        self == CatalogControls::Ready
    }

    /// Text the model select shows in place of options.
    pub fn status_label(self) -> Option<&'static str> {
        match self {
            CatalogControls::AwaitingCredential => Some("Enter an API key"),
            CatalogControls::Loading => Some("Loading models..."),
            CatalogControls::Failed => Some("Failed to load"),
            CatalogControls::Ready => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectView {
    pub enabled: bool,
    pub status: Option<String>,
    pub options: Vec<SelectOption>,
    pub selected: Vec<String>,
}

/// Slider read-outs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterLabels {
    pub steps: String,
    pub count: String,
    pub guidance: String,
    pub lora_weight: String,
}

impl ParameterLabels {
    pub fn from_form(form: &FormState) -> Self {
        Self {
            steps: form.steps.trim().to_string(),
            count: form.count.trim().to_string(),
            guidance: fixed(&form.guidance, 1),
            lora_weight: fixed(&form.lora_weight, 2),
        }
    }
}

fn sampler_select(form: &FormState) -> SelectView {
    let sampler = form.sampler.trim();
    SelectView {
        enabled: true,
        status: None,
        options: SAMPLERS
            .iter()
            .map(|name| SelectOption {
                value: name.to_string(),
                label: name.to_string(),
            })
            .collect(),
        selected: if sampler.is_empty() {
            Vec::new()
        } else {
            vec![sampler.to_string()]
        },
    }
}

fn ratio_select(form: &FormState) -> SelectView {
    SelectView {
        enabled: true,
        status: None,
        options: SizePreset::ALL
            .iter()
            .map(|preset| SelectOption {
                value: preset.size().to_string(),
                label: preset.ratio().to_string(),
            })
            .collect(),
        selected: SizePreset::from_size(&form.size)
            .map(|preset| preset.size().to_string())
            .into_iter()
            .collect(),
    }
}

fn fixed(raw: &str, decimals: usize) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{:.*}", decimals, value),
        _ => raw.trim().to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudioView {
    pub model_select: SelectView,
    pub lora_select: SelectView,
    pub sampler_select: SelectView,
    /// Aspect-ratio group; nothing is selected for a custom size.
    pub ratio_select: SelectView,
    pub generate_enabled: bool,
    pub spinner_visible: bool,
    pub placeholder_visible: bool,
    pub error_message: Option<String>,
    pub images: Vec<String>,
    pub labels: ParameterLabels,
}

pub fn present(
    ui: &UiState,
    controls: CatalogControls,
    catalog: Option<&ModelCatalog>,
    form: &FormState,
) -> StudioView {
    let ready_catalog = catalog.filter(|_| controls.is_ready());

    let model_select = match ready_catalog {
        Some(catalog) => SelectView {
            enabled: true,
            status: None,
            options: catalog.base_model_options(),
            selected: form.model.iter().cloned().collect(),
        },
        None => SelectView {
            enabled: false,
            status: controls.status_label().map(String::from),
            options: Vec::new(),
            selected: Vec::new(),
        },
    };

    let lora_select = match ready_catalog {
        Some(catalog) => SelectView {
            enabled: true,
            status: None,
            options: catalog.lora_options(),
            selected: form.lora_ids.clone(),
        },
        None => SelectView {
            enabled: false,
            status: None,
            options: Vec::new(),
            selected: Vec::new(),
        },
    };

    let spinner_visible = ui.is_loading_generation();
    let error_message = ui.error_message().map(String::from);
    let images: Vec<String> = ui.images().iter().map(|image| image.url.clone()).collect();
    let placeholder_visible = !spinner_visible && images.is_empty() && error_message.is_none();

    StudioView {
        model_select,
        lora_select,
        sampler_select: sampler_select(form),
        ratio_select: ratio_select(form),
        generate_enabled: ready_catalog.is_some() && !spinner_visible,
        spinner_visible,
        placeholder_visible,
        error_message,
        images,
        labels: ParameterLabels::from_form(form),
    }
}
