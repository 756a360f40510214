use super::{form::MISSING_INPUT_MESSAGE, FormState, Studio, UiState};
use crate::{
    error::{Result, StudioError},
    logger,
    models::GeneratedImage,
};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Images now shown in the result grid, in response order.
    Rendered(Vec<GeneratedImage>),
    /// A newer generation was dispatched; this response was dropped.
    Superseded,
}

impl Studio {
    /// Replaces the held form with `form`, then generates from it.
    pub async fn generate_with(&self, form: FormState) -> Result<GenerateOutcome> {
        self.state().form = form;
        self.generate().await
    }

    /// Validates the current form, submits it and updates the UI state.
    ///
    /// Validation failures never reach the network, but they do supersede a
    /// request still in flight. A call that is overtaken by a later one
    /// returns `Superseded` whatever its result.
    pub async fn generate(&self) -> Result<GenerateOutcome> {
        let (token, credential, request) = {
            let mut state = self.state();

            let prepared = if !state.credential.is_present() || state.form.prompt.trim().is_empty()
            {
                Err(StudioError::validation(MISSING_INPUT_MESSAGE))
            } else {
                match state.catalog.as_ref() {
                    Some(catalog) => state.form.to_request(catalog, &self.config.limits),
                    None => Err(StudioError::validation(
                        "Models are not loaded yet. Enter a valid API key first.",
                    )),
                }
            };

            let request = match prepared {
                Ok(request) => request,
                Err(err) => {
                    // A rejected click still counts as the latest one.
                    self.generation_seq.issue();
                    log::warn!("Generation rejected before dispatch: {}", err);
                    state.ui = UiState::GenerationFailed(err.user_message());
                    return Err(err);
                }
            };

            let token = self.generation_seq.issue();
            state.ui = UiState::LoadingGeneration;
            (token, state.credential.current().to_string(), request)
        };

        let request_id = Uuid::new_v4();
        log::info!(
            "Dispatching generation {} (model: {}, n: {}, size: {})",
            request_id,
            request.model,
            request.count,
            request.size
        );
        let result = {
            let _timer = logger::timer(format!("generation request {}", request_id));
            self.bounded(self.api.generate_images(&credential, &request))
                .await
        };

        let mut state = self.state();
        if !self.generation_seq.is_latest(token) {
            log::debug!("Discarding stale generation response {}", request_id);
            return Ok(GenerateOutcome::Superseded);
        }

        match result {
            Ok(images) => {
                log::info!("Generation {} returned {} image(s)", request_id, images.len());
                state.ui = UiState::GenerationSucceeded(images.clone());
                Ok(GenerateOutcome::Rendered(images))
            }
            Err(err) => {
                log::error!("Generation {} failed: {}", request_id, err);
                state.ui = UiState::GenerationFailed(err.user_message());
                Err(err)
            }
        }
    }
}
