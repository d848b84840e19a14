//! Local stand-in for the public film API.
//!
//! Serves `/films` in the same wire shape as the real feed, including fields
//! the client ignores. Tests hold the `Db` handle and can swap the feed for a
//! raw status/body to simulate outages or malformed payloads.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Film {
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub running_time: String,
    pub rt_score: String,
    pub image: String,
}

/// What `GET /films` currently returns.
#[derive(Clone, Debug)]
pub enum Feed {
    Films(Vec<Film>),
    Raw { status: u16, body: String },
}

pub type Db = Arc<RwLock<Feed>>;

/// The catalog the server starts with.
pub fn seed() -> Vec<Film> {
    vec![
        Film {
            id: "2baf70d1-42bb-4437-b551-e5fed5a87abe".to_string(),
            title: "Castle in the Sky".to_string(),
            original_title: "天空の城ラピュタ".to_string(),
            description: "The orphan Sheeta inherited a mysterious crystal that links her to the mythical sky-kingdom of Laputa.".to_string(),
            director: "Hayao Miyazaki".to_string(),
            producer: "Isao Takahata".to_string(),
            release_date: "1986".to_string(),
            running_time: "124".to_string(),
            rt_score: "95".to_string(),
            image: "https://image.tmdb.org/t/p/w600_and_h900_bestv2/castle-in-the-sky.jpg".to_string(),
        },
        Film {
            id: "12cfb892-aac0-4c5b-94af-521852e46d6a".to_string(),
            title: "Grave of the Fireflies".to_string(),
            original_title: "火垂るの墓".to_string(),
            description: "In the latter part of World War II, a boy and his sister struggle to survive in Japan.".to_string(),
            director: "Isao Takahata".to_string(),
            producer: "Toru Hara".to_string(),
            release_date: "1988".to_string(),
            running_time: "89".to_string(),
            rt_score: "97".to_string(),
            image: "https://image.tmdb.org/t/p/w600_and_h900_bestv2/grave-of-the-fireflies.jpg".to_string(),
        },
        Film {
            id: "58611129-2dbc-4a81-a72f-77ddfc1b1b49".to_string(),
            title: "My Neighbor Totoro".to_string(),
            original_title: "となりのトトロ".to_string(),
            description: "Two sisters move to the country with their father and befriend the forest spirits.".to_string(),
            director: "Hayao Miyazaki".to_string(),
            producer: "Hayao Miyazaki".to_string(),
            release_date: "1988".to_string(),
            running_time: "86".to_string(),
            rt_score: "93".to_string(),
            image: "https://image.tmdb.org/t/p/w600_and_h900_bestv2/my-neighbor-totoro.jpg".to_string(),
        },
    ]
}

pub fn seeded_db() -> Db {
    Arc::new(RwLock::new(Feed::Films(seed())))
}

pub fn app() -> Router {
    app_with(seeded_db())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/films", get(list_films))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, seeded_db()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn list_films(State(db): State<Db>) -> Response {
    let feed = db.read().await;
    match &*feed {
        Feed::Films(films) => {
            tracing::debug!(count = films.len(), "serving catalog");
            Json(films.clone()).into_response()
        }
        Feed::Raw { status, body } => {
            tracing::debug!(status, "serving raw feed");
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, [(header::CONTENT_TYPE, "application/json")], body.clone()).into_response()
        }
    }
}
