use crate::{
    error::Result,
    models::{GeneratedImage, GenerationRequest, ModelCatalog},
};
use async_trait::async_trait;

/// The two calls the studio makes against an image-generation service.
///
/// The credential is passed per call so a session can switch keys without
/// rebuilding the client.
#[async_trait]
pub trait ImageApi: Send + Sync {
    async fn list_models(&self, credential: &str) -> Result<ModelCatalog>;

    async fn generate_images(
        &self,
        credential: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>>;
}
