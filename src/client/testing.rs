use crate::{
    client::traits::ImageApi,
    error::{Result, StudioError},
    models::{BaseModel, GeneratedImage, GenerationRequest, ModelCatalog},
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub(crate) enum Reply<T> {
    Now(Result<T>),
    /// Resolves when the test sends on the paired channel.
    Gated(oneshot::Receiver<Result<T>>),
    /// Never resolves.
    Hang,
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T> {
        match self {
            Reply::Now(result) => result,
            Reply::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(StudioError::transport(None, "gate dropped"))),
            Reply::Hang => std::future::pending().await,
        }
    }
}

/// In-memory [`ImageApi`] that replays queued replies and records calls.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    catalog_replies: Mutex<VecDeque<Reply<ModelCatalog>>>,
    generation_replies: Mutex<VecDeque<Reply<Vec<GeneratedImage>>>>,
    catalog_calls: AtomicUsize,
    generation_calls: AtomicUsize,
    credentials: Mutex<Vec<String>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_catalog(&self, reply: Reply<ModelCatalog>) -> &Self {
        self.catalog_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn push_generation(&self, reply: Reply<Vec<GeneratedImage>>) -> &Self {
        self.generation_replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    pub fn generation_calls(&self) -> usize {
        self.generation_calls.load(Ordering::SeqCst)
    }

    pub fn credentials(&self) -> Vec<String> {
        self.credentials.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageApi for ScriptedApi {
    async fn list_models(&self, credential: &str) -> Result<ModelCatalog> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        self.credentials.lock().unwrap().push(credential.to_string());
        let reply = self.catalog_replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(StudioError::transport(None, "no scripted catalog reply")),
        }
    }

    async fn generate_images(
        &self,
        credential: &str,
        request: &GenerationRequest,
    ) -> Result<Vec<GeneratedImage>> {
        self.generation_calls.fetch_add(1, Ordering::SeqCst);
        self.credentials.lock().unwrap().push(credential.to_string());
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.generation_replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(StudioError::transport(None, "no scripted generation reply")),
        }
    }
}

pub(crate) fn sample_catalog() -> ModelCatalog {
    ModelCatalog {
        base_models: vec![
            BaseModel {
                id: "oneFORALLAnime".into(),
                name: "One For All Anime".into(),
            },
            BaseModel {
                id: "oneFORALLReality_vPony".into(),
                name: "One For All Reality (Pony)".into(),
            },
        ],
        lora_models: HashMap::from([
            ("add_detail".to_string(), "Detail Tweaker".to_string()),
            ("COMMIX".to_string(), "COMMIX".to_string()),
        ]),
    }
}

pub(crate) fn images(urls: &[&str]) -> Vec<GeneratedImage> {
    urls.iter()
        .map(|url| GeneratedImage {
            url: url.to_string(),
        })
        .collect()
}
