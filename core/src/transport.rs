//! Executes `HttpRequest` values for callers that let Rust own the network.

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::http::{HttpRequest, HttpResponse};

/// Anything that can turn an `HttpRequest` into an `HttpResponse`.
///
/// Implementations return non-2xx responses as data. Only failures that
/// produce no response at all map to `CatalogError::Network`.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, CatalogError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use async_trait::async_trait;

    use super::Transport;
    use crate::error::CatalogError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// `Transport` backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// # Errors
        ///
        /// - `CatalogError::Network` - If the TLS backend fails to initialise
        pub fn new(user_agent: &str) -> Result<Self, CatalogError> {
            let client = reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .map_err(CatalogError::network)?;
            Ok(Self { client })
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, CatalogError> {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
            };
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }

            let response = builder.send().await.map_err(CatalogError::network)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
                .collect();
            let body = response.text().await.map_err(CatalogError::network)?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
