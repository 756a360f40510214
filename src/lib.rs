//! Headless controller for an image-generation API.
//!
//! A [`Studio`] holds the API key, the model catalog fetched for it, the
//! generation form and a single [`UiState`]. Front ends forward user events
//! (`set_credential`, `update_form`, `generate`) and draw [`Studio::view`].

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod studio;

pub use client::{HttpImageApi, ImageApi};
pub use config::{ParameterLimits, StudioConfig};
pub use error::{Result, StudioError};
pub use models::{
    BaseModel, GeneratedImage, GenerationRequest, ModelCatalog, SelectOption, SizePreset,
};
pub use studio::{
    CatalogControls, CatalogOutcome, FormState, GenerateOutcome, Studio, StudioView, UiState,
};
