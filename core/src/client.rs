//! Request builder and response parser for the film catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state
//! between calls. Fetching the catalog is split into `build_fetch_catalog`,
//! which produces an `HttpRequest`, and `parse_fetch_catalog`, which consumes
//! an `HttpResponse`. `fetch_catalog` glues the two around a `Transport` for
//! callers that let Rust do the I/O. Nothing here retries; retry policy
//! belongs to the caller.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::Film;

/// Stateless client for the `/films` endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_fetch_catalog(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/films", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Decode a `/films` response into films, in server order.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Status` - If the status is not 200
    /// - `CatalogError::Decode` - If the body is not an array of films, or a
    ///   film has an empty id
    pub fn parse_fetch_catalog(&self, response: HttpResponse) -> Result<Vec<Film>, CatalogError> {
        check_status(&response, 200)?;
        let films: Vec<Film> = serde_json::from_str(&response.body).map_err(CatalogError::decode)?;

        if let Some(index) = films.iter().position(|f| f.id.is_empty()) {
            return Err(CatalogError::Decode {
                reason: format!("film at index {index} has an empty id"),
            });
        }

        let mut seen = HashSet::with_capacity(films.len());
        for film in &films {
            if !seen.insert(film.id.as_str()) {
                warn!(id = %film.id, "duplicate film id in catalog");
            }
        }

        Ok(films)
    }

    /// Build, execute and parse in one go.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Network` - If the transport produced no response
    /// - `CatalogError::Status` / `CatalogError::Decode` - See `parse_fetch_catalog`
    pub async fn fetch_catalog<T: Transport + ?Sized>(
        &self,
        transport: &T,
    ) -> Result<Vec<Film>, CatalogError> {
        let request = self.build_fetch_catalog();
        debug!(url = %request.url, "fetching catalog");
        let response = transport.execute(request).await?;
        self.parse_fetch_catalog(response)
    }
}

/// Map non-success status codes to `CatalogError::Status`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), CatalogError> {
    if response.status == expected {
        return Ok(());
    }
    Err(CatalogError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use async_trait::async_trait;

    fn client() -> CatalogClient {
        CatalogClient::new("http://localhost:3000")
    }

    fn film_json(id: &str, title: &str) -> String {
        format!(
            r#"{{"id":"{id}","title":"{title}","description":"d","director":"Hayao Miyazaki","producer":"Toshio Suzuki","running_time":"100","release_date":"1990","image":"https://example.com/{id}.jpg"}}"#
        )
    }

    #[derive(Debug)]
    struct CannedTransport(HttpResponse);

    #[async_trait]
    impl Transport for CannedTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, CatalogError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct OfflineTransport;

    #[async_trait]
    impl Transport for OfflineTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, CatalogError> {
            Err(CatalogError::network("connection refused"))
        }
    }

    #[test]
    fn build_fetch_catalog_produces_correct_request() {
        let req = client().build_fetch_catalog();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/films");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CatalogClient::new("http://localhost:3000/");
        assert_eq!(client.build_fetch_catalog().url, "http://localhost:3000/films");
    }

    #[test]
    fn parse_preserves_server_order() {
        let body = format!("[{},{},{}]", film_json("3", "C"), film_json("1", "A"), film_json("2", "B"));
        let films = client().parse_fetch_catalog(HttpResponse::new(200, body)).unwrap();
        let ids: Vec<_> = films.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn parse_keeps_duplicates() {
        let body = format!("[{},{}]", film_json("1", "A"), film_json("1", "A again"));
        let films = client().parse_fetch_catalog(HttpResponse::new(200, body)).unwrap();
        assert_eq!(films.len(), 2);
        assert_eq!(films[1].title, "A again");
    }

    #[test]
    fn parse_empty_array() {
        let films = client().parse_fetch_catalog(HttpResponse::new(200, "[]")).unwrap();
        assert!(films.is_empty());
    }

    #[test]
    fn parse_missing_id_is_decode_error() {
        let body = r#"[{"title":"A","description":"d","director":"x","producer":"y","running_time":"1","release_date":"2","image":"https://example.com/a.jpg"}]"#;
        let err = client().parse_fetch_catalog(HttpResponse::new(200, body)).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }));
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn parse_empty_id_is_decode_error() {
        let body = format!("[{}]", film_json("", "Nameless"));
        let err = client().parse_fetch_catalog(HttpResponse::new(200, body)).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { ref reason } if reason.contains("index 0")));
    }

    #[test]
    fn parse_object_instead_of_array_is_decode_error() {
        let body = film_json("1", "A");
        let err = client().parse_fetch_catalog(HttpResponse::new(200, body)).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_fetch_catalog(HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }));
    }

    #[test]
    fn parse_wrong_status() {
        let err = client()
            .parse_fetch_catalog(HttpResponse::new(503, "unavailable"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 503, .. }));
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[tokio::test]
    async fn fetch_catalog_through_transport() {
        let body = format!("[{}]", film_json("1", "A"));
        let transport = CannedTransport(HttpResponse::new(200, body));
        let films = client().fetch_catalog(&transport).await.unwrap();
        assert_eq!(films.len(), 1);
        assert_eq!(films[0].title, "A");
    }

    #[tokio::test]
    async fn fetch_catalog_propagates_transport_error() {
        let err = client().fetch_catalog(&OfflineTransport).await.unwrap_err();
        assert!(matches!(err, CatalogError::Network { .. }));
    }
}
