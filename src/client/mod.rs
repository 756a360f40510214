pub mod http;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;

pub use http::HttpImageApi;
pub use traits::ImageApi;

pub const MODELS_PATH: &str = "/v1/models";
pub const GENERATIONS_PATH: &str = "/v1/images/generations";
