use super::{CatalogControls, Studio, UiState};
use crate::{error::Result, logger};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOutcome {
    Loaded {
        base_models: usize,
        lora_models: usize,
    },
    /// No credential; controls prompt for one and nothing was fetched.
    AwaitingCredential,
    /// The credential did not change, so no reload was triggered.
    Unchanged,
    /// A newer load was dispatched before this one finished.
    Superseded,
}

impl Studio {
    pub async fn load_catalog(&self) -> Result<CatalogOutcome> {
        let (token, credential) = {
            let mut state = self.state();
            let token = self.catalog_seq.issue();
            state.catalog = None;

            if !state.credential.is_present() {
                state.controls = CatalogControls::AwaitingCredential;
                state.ui = state.ui.on_catalog_cleared();
                log::info!("No API key entered, model selection disabled");
                return Ok(CatalogOutcome::AwaitingCredential);
            }

            state.controls = CatalogControls::Loading;
            state.ui = state.ui.on_catalog_requested();
            log::info!(
                "Loading model catalog for key {}",
                state.credential.masked()
            );
            (token, state.credential.current().to_string())
        };

        let request_id = Uuid::new_v4();
        let result = {
            let _timer = logger::timer(format!("catalog request {}", request_id));
            self.bounded(self.api.list_models(&credential)).await
        };

        let mut state = self.state();
        if !self.catalog_seq.is_latest(token) {
            log::debug!("Discarding stale catalog response {}", request_id);
            return Ok(CatalogOutcome::Superseded);
        }

        match result {
            Ok(catalog) => {
                let outcome = CatalogOutcome::Loaded {
                    base_models: catalog.base_models.len(),
                    lora_models: catalog.lora_models.len(),
                };
                state.form.reconcile_with(&catalog);
                state.catalog = Some(catalog);
                state.controls = CatalogControls::Ready;
                state.ui = state.ui.on_catalog_loaded();
                log::info!("Model catalog loaded: {:?}", outcome);
                Ok(outcome)
            }
            Err(err) => {
                if state.ui.is_loading_generation() {
                    self.generation_seq.issue();
                    log::debug!("Catalog failure supersedes the in-flight generation");
                }
                state.controls = CatalogControls::Failed;
                state.ui = UiState::CatalogFailed(format!(
                    "Failed to load models: {}. Please check your API key.",
                    err.user_message()
                ));
                log::error!("Model catalog request {} failed: {}", request_id, err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{images, sample_catalog, Reply, ScriptedApi};
    use crate::config::StudioConfig;
    use crate::studio::GenerateOutcome;
    use crate::error::StudioError;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn studio_with(api: &Arc<ScriptedApi>) -> Studio {
        Studio::with_api(StudioConfig::default(), api.clone())
    }

    #[tokio::test]
    async fn test_blank_credential_makes_no_call() {
        let api = Arc::new(ScriptedApi::new());
        let studio = studio_with(&api);

        for raw in ["", "   ", "\t\n"] {
            let outcome = match studio.set_credential(raw).await.unwrap() {
                CatalogOutcome::Unchanged => studio.load_catalog().await.unwrap(),
                other => other,
            };
            assert_eq!(outcome, CatalogOutcome::AwaitingCredential);

            let view = studio.view();
            assert!(!view.model_select.enabled);
            assert!(!view.lora_select.enabled);
            assert!(!view.generate_enabled);
            assert_eq!(view.model_select.status.as_deref(), Some("Enter an API key"));
        }
        assert_eq!(api.catalog_calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_load_populates_exactly_the_catalog() {
        let api = Arc::new(ScriptedApi::new());
        api.push_catalog(Reply::Now(Ok(sample_catalog())));
        let studio = studio_with(&api);

        let outcome = studio.set_credential("  sk-test ").await.unwrap();
        assert_eq!(
            outcome,
            CatalogOutcome::Loaded {
                base_models: 2,
                lora_models: 2
            }
        );
        assert_eq!(api.credentials(), vec!["sk-test"]);

        let view = studio.view();
        let base_ids: Vec<&str> = view
            .model_select
            .options
            .iter()
            .map(|option| option.value.as_str())
            .collect();
        assert_eq!(base_ids, vec!["oneFORALLAnime", "oneFORALLReality_vPony"]);

        let mut lora_ids: Vec<&str> = view
            .lora_select
            .options
            .iter()
            .map(|option| option.value.as_str())
            .collect();
        lora_ids.sort();
        assert_eq!(lora_ids, vec!["COMMIX", "add_detail"]);

        assert!(view.model_select.enabled);
        assert!(view.generate_enabled);
        assert_eq!(studio.form().model.as_deref(), Some("oneFORALLAnime"));
        assert_eq!(studio.ui_state(), UiState::Idle);
    }

    #[tokio::test]
    async fn test_same_credential_does_not_reload() {
        let api = Arc::new(ScriptedApi::new());
        api.push_catalog(Reply::Now(Ok(sample_catalog())));
        let studio = studio_with(&api);

        studio.set_credential("sk-test").await.unwrap();
        let again = studio.set_credential(" sk-test ").await.unwrap();
        assert_eq!(again, CatalogOutcome::Unchanged);
        assert_eq!(api.catalog_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_shows_detail_and_keeps_controls_disabled() {
        let api = Arc::new(ScriptedApi::new());
        api.push_catalog(Reply::Now(Ok(sample_catalog())));
        api.push_catalog(Reply::Now(Err(StudioError::transport(
            Some(403),
            "Invalid API key",
        ))));
        let studio = studio_with(&api);

        studio.set_credential("sk-good").await.unwrap();
        let err = studio.set_credential("sk-bad").await.unwrap_err();
        assert_eq!(err.status(), Some(403));

        assert!(studio.catalog().is_none());
        let view = studio.view();
        assert_eq!(
            view.error_message.as_deref(),
            Some("Failed to load models: Invalid API key. Please check your API key.")
        );
        assert!(!view.model_select.enabled);
        assert_eq!(view.model_select.status.as_deref(), Some("Failed to load"));
        assert!(view.model_select.options.is_empty());
        assert!(!view.generate_enabled);
    }

    #[tokio::test]
    async fn test_stale_catalog_response_is_discarded() {
        let api = Arc::new(ScriptedApi::new());
        let (slow_tx, slow_rx) = oneshot::channel();
        let mut newer = sample_catalog();
        newer.base_models.truncate(1);
        newer.lora_models.clear();
        api.push_catalog(Reply::Gated(slow_rx));
        api.push_catalog(Reply::Now(Ok(newer.clone())));
        let studio = studio_with(&api);

        let (first, second, _) = tokio::join!(
            studio.set_credential("sk-old"),
            studio.set_credential("sk-new"),
            async move {
                tokio::task::yield_now().await;
                let _ = slow_tx.send(Ok(sample_catalog()));
            }
        );

        assert_eq!(first.unwrap(), CatalogOutcome::Superseded);
        assert_eq!(
            second.unwrap(),
            CatalogOutcome::Loaded {
                base_models: 1,
                lora_models: 0
            }
        );
        assert_eq!(studio.catalog(), Some(newer));
    }

    #[tokio::test]
    async fn test_clearing_credential_invalidates_in_flight_load() {
        let api = Arc::new(ScriptedApi::new());
        let (tx, rx) = oneshot::channel();
        api.push_catalog(Reply::Gated(rx));
        let studio = studio_with(&api);

        let (loading, cleared, _) = tokio::join!(
            studio.set_credential("sk-test"),
            studio.set_credential(""),
            async move {
                tokio::task::yield_now().await;
                let _ = tx.send(Ok(sample_catalog()));
            }
        );

        assert_eq!(loading.unwrap(), CatalogOutcome::Superseded);
        assert_eq!(cleared.unwrap(), CatalogOutcome::AwaitingCredential);
        assert!(studio.catalog().is_none());
        assert!(!studio.view().model_select.enabled);
    }

    #[tokio::test]
    async fn test_catalog_failure_supersedes_in_flight_generation() {
        let api = Arc::new(ScriptedApi::new());
        api.push_catalog(Reply::Now(Ok(sample_catalog())));
        api.push_catalog(Reply::Now(Err(StudioError::transport(
            Some(403),
            "Invalid API key",
        ))));
        let (tx, rx) = oneshot::channel();
        api.push_generation(Reply::Gated(rx));
        let studio = studio_with(&api);
        studio.set_credential("sk-good").await.unwrap();
        studio.update_form(|form| form.prompt = "a castle".into());

        let studio_ref = &studio;
        let (generated, _) = tokio::join!(studio.generate(), async move {
            tokio::task::yield_now().await;
            studio_ref.set_credential("sk-bad").await.unwrap_err();
            let _ = tx.send(Ok(images(&["https://img/1.png"])));
        });

        assert_eq!(generated.unwrap(), GenerateOutcome::Superseded);
        let view = studio.view();
        assert_eq!(
            view.error_message.as_deref(),
            Some("Failed to load models: Invalid API key. Please check your API key.")
        );
        assert!(view.images.is_empty());
        assert!(!view.spinner_visible);
        assert!(!view.generate_enabled);
    }

    #[tokio::test]
    async fn test_catalog_success_keeps_in_flight_generation() {
        let api = Arc::new(ScriptedApi::new());
        api.push_catalog(Reply::Now(Ok(sample_catalog())));
        api.push_catalog(Reply::Now(Ok(sample_catalog())));
        let (tx, rx) = oneshot::channel();
        api.push_generation(Reply::Gated(rx));
        let studio = studio_with(&api);
        studio.set_credential("sk-one").await.unwrap();
        studio.update_form(|form| form.prompt = "a castle".into());

        let studio_ref = &studio;
        let (generated, during) = tokio::join!(studio.generate(), async move {
            tokio::task::yield_now().await;
            studio_ref.set_credential("sk-two").await.unwrap();
            let view = studio_ref.view();
            let _ = tx.send(Ok(images(&["https://img/1.png"])));
            view
        });

        assert!(during.spinner_visible);
        assert!(!during.generate_enabled);
        assert!(matches!(generated.unwrap(), GenerateOutcome::Rendered(_)));
        assert_eq!(studio.view().images, vec!["https://img/1.png"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_catalog_request_times_out() {
        let api = Arc::new(ScriptedApi::new());
        api.push_catalog(Reply::Hang);
        let studio = Studio::with_api(
            StudioConfig::new().with_request_timeout(Duration::from_secs(5)),
            api.clone(),
        );

        let err = studio.set_credential("sk-test").await.unwrap_err();
        assert!(matches!(err, StudioError::Transport { status: None, .. }));
        assert_eq!(studio.view().model_select.status.as_deref(), Some("Failed to load"));
    }
}
