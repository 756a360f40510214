use crate::{
    client::{traits::ImageApi, GENERATIONS_PATH, MODELS_PATH},
    config::StudioConfig,
    error::{Result, StudioError, GENERIC_CATALOG_FAILURE, GENERIC_GENERATION_FAILURE},
    models::{ErrorBody, GeneratedImage, GenerationRequest, GenerationResponse, ModelCatalog},
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Response,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Added to the reqwest timeout so the controller's own deadline fires first.
pub const CLIENT_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// reqwest-backed [`ImageApi`] speaking the `/v1/models` and
/// `/v1/images/generations` endpoints.
#[derive(Clone)]
pub struct HttpImageApi {
    client: Client,
    config: StudioConfig,
}

impl HttpImageApi {
    pub fn new(config: StudioConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout + CLIENT_TIMEOUT_SLACK)
            .build()
            .map_err(|e| StudioError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    fn build_headers(&self, credential: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", credential)).map_err(|_| {
            StudioError::validation("The API key contains characters that cannot be sent.")
        })?;
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    fn send_error(err: reqwest::Error) -> StudioError {
        if err.is_timeout() {
            StudioError::transport(None, "The request timed out.")
        } else {
            StudioError::transport(None, format!("Request failed: {}", err))
        }
    }

    /// Non-2xx responses become `Transport` errors carrying the server's
    /// `detail` (or `fallback`); 2xx bodies must parse as `T`.
    async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            StudioError::transport(
                Some(status.as_u16()),
                format!("Failed to read response body: {}", e),
            )
        })?;

        if !status.is_success() {
            let message = ErrorBody::detail_from(&body).unwrap_or_else(|| fallback.to_string());
            log::warn!("API answered {}: {}", status, message);
            return Err(StudioError::transport(Some(status.as_u16()), message));
        }

        serde_json::from_str(&body).map_err(|e| StudioError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl ImageApi for HttpImageApi {
    async fn list_models(&self, credential: &str) -> Result<ModelCatalog> {
        let url = self.config.endpoint(MODELS_PATH);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(credential)?)
            .send()
            .await
            .map_err(Self::send_error)?;

        Self::read_json(response, GENERIC_CATALOG_FAILURE).await
    }

    async fn generate_images(
        &self,
        credential: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>> {
        let url = self.config.endpoint(GENERATIONS_PATH);
        log::debug!("POST {} (model: {}, n: {})", url, request.model, request.count);

        let mut headers = self.build_headers(credential)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = serde_json::to_vec(request)
            .map_err(|e| StudioError::validation(format!("Failed to encode request: {}", e)))?;

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(Self::send_error)?;

        let parsed: GenerationResponse =
            Self::read_json(response, GENERIC_GENERATION_FAILURE).await?;
        parsed.into_images()
    }
}
