pub mod credential;
pub mod form;
mod loader;
mod orchestrator;
pub mod presenter;
pub mod sequence;

pub use credential::CredentialHolder;
pub use form::FormState;
pub use loader::CatalogOutcome;
pub use orchestrator::GenerateOutcome;
pub use presenter::{present, CatalogControls, ParameterLabels, SelectView, StudioView, UiState};
pub use sequence::SequenceCounter;

use crate::{
    client::{HttpImageApi, ImageApi},
    config::StudioConfig,
    error::{Result, StudioError},
    models::ModelCatalog,
};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct StudioState {
    credential: CredentialHolder,
    catalog: Option<ModelCatalog>,
    controls: CatalogControls,
    form: FormState,
    ui: UiState,
}

/// Headless image-generation front end.
///
/// Owns the credential, the loaded catalog, the form and the UI state.
/// `load_catalog` and `generate` may overlap freely; each takes a sequence
/// token at dispatch and only the newest one's outcome is applied.
pub struct Studio {
    api: Arc<dyn ImageApi>,
    config: StudioConfig,
    state: Mutex<StudioState>,
    catalog_seq: SequenceCounter,
    generation_seq: SequenceCounter,
}

impl Studio {
    pub fn new(config: StudioConfig) -> Result<Self> {
        let api = HttpImageApi::new(config.clone())?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    pub fn with_api(config: StudioConfig, api: Arc<dyn ImageApi>) -> Self {
        Self {
            api,
            config,
            state: Mutex::new(StudioState::default()),
            catalog_seq: SequenceCounter::new(),
            generation_seq: SequenceCounter::new(),
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    // The guard must never be held across an `.await`.
    fn state(&self) -> MutexGuard<'_, StudioState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn credential(&self) -> String {
        self.state().credential.current().to_string()
    }

    /// Stores the edited API key and reloads the catalog if it changed.
    pub async fn set_credential(&self, raw: &str) -> Result<CatalogOutcome> {
        let changed = self.state().credential.set(raw);
        if !changed {
            return Ok(CatalogOutcome::Unchanged);
        }
        self.load_catalog().await
    }

    pub fn catalog(&self) -> Option<ModelCatalog> {
        self.state().catalog.clone()
    }

    pub fn form(&self) -> FormState {
        self.state().form.clone()
    }

    pub fn update_form<F>(&self, edit: F)
    where
        F: FnOnce(&mut FormState),
    {
        edit(&mut self.state().form);
    }

    pub fn ui_state(&self) -> UiState {
        self.state().ui.clone()
    }

    pub fn view(&self) -> StudioView {
        let state = self.state();
        present(
            &state.ui,
            state.controls,
            state.catalog.as_ref(),
            &state.form,
        )
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let limit = self.config.request_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(StudioError::transport(None, timeout_message(limit))),
        }
    }
}

fn timeout_message(limit: Duration) -> String {
    if limit.subsec_millis() == 0 {
        format!("Request timed out after {} seconds.", limit.as_secs())
    } else {
        format!("Request timed out after {} ms.", limit.as_millis())
    }
}
