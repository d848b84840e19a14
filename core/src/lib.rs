//! Film catalog client core.
//!
//! # Overview
//! Fetches the film catalog, decodes it into `Film` records, and keeps the
//! user's favorites alongside the last catalog a `CatalogSession` loaded.
//! Display settings live next to it as plain, independent state.
//!
//! # Design
//! - `CatalogClient` is stateless: `build_fetch_catalog` produces a request,
//!   `parse_fetch_catalog` consumes a response, so the I/O boundary is
//!   explicit (host-does-IO). `fetch_catalog` runs both around a `Transport`.
//! - `CatalogSession` owns the film list and favorites behind one lock and is
//!   shared by reference between presentation components.
//! - Types use owned `String` / `Vec` fields to keep the C ABI simple.
//! - The `reqwest` feature (default) ships `ReqwestTransport`. The FFI crate
//!   builds without it because the host app performs the request.

pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod http;
pub mod session;
pub mod settings;
pub mod transport;
pub mod types;

pub use client::CatalogClient;
pub use config::{ClientConfig, FavoritesPolicy};
pub use error::{CatalogError, ErrorKind};
pub use favorites::{favorites_of, Favorites};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::{CatalogSession, SessionState};
pub use settings::{Appearance, DisplaySettings, Language};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use types::Film;

pub use tokio_util::sync::CancellationToken;
