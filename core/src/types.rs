//! Domain records for the film catalog API.
//!
//! # Design
//! `Film` mirrors one element of the `/films` array. Only the fields the
//! client presents are decoded; extra fields in the public feed
//! (`original_title`, `rt_score`, `people`, ...) are ignored. The mock-server
//! crate defines its own copy of the wire shape and integration tests catch
//! any drift between the two.

use serde::{Deserialize, Serialize};
use url::Url;

/// A single film returned by the catalog endpoint.
///
/// Field names match the wire keys exactly (`running_time`, `release_date`).
/// Every field stays as the text the feed sent, so a decoded film encodes
/// back to the same values. Use the accessor methods for typed views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Film {
    pub id: String,
    pub title: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub running_time: String,
    pub release_date: String,
    pub image: String,
}

impl Film {
    /// Running time in minutes, if the feed value is a plain integer.
    pub fn running_time_minutes(&self) -> Option<u32> {
        self.running_time.trim().parse().ok()
    }

    /// Release year, if the feed value is a plain integer.
    pub fn release_year(&self) -> Option<u16> {
        self.release_date.trim().parse().ok()
    }

    /// Detail-view label, e.g. `"124 min"`.
    pub fn running_time_label(&self) -> String {
        format!("{} min", self.running_time.trim())
    }

    /// `image` as an absolute URL. `None` for relative or malformed references,
    /// which the host resolves or skips itself.
    pub fn image_url(&self) -> Option<Url> {
        Url::parse(&self.image).ok()
    }
}
