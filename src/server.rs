// src/server.rs
//! JSON endpoints serving page view models to the rendering layer.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::feed::{FeedView, Page};
use crate::model::Report;
use crate::newsroom::{Newsroom, ReportLookup};
use crate::pipeline::PipelineStage;
use crate::themes::{ThemeId, ThemeOption, THEMES};

#[derive(Clone)]
pub struct AppState {
    pub newsroom: Arc<Newsroom>,
}

impl AppState {
    pub fn new(newsroom: Newsroom) -> Self {
        Self {
            newsroom: Arc::new(newsroom),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/themes", get(themes))
        .route("/feeds/{page}", get(feed))
        .route("/reports/{id}", get(report))
        .route("/pipeline", get(pipeline))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct FeedQuery {
    #[serde(default)]
    theme: Option<String>,
}

async fn themes() -> Json<Vec<ThemeOption>> {
    Json(THEMES.to_vec())
}

async fn feed(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Query(q): Query<FeedQuery>,
) -> ApiResult<FeedView> {
    let page: Page = page.parse().map_err(|e| (StatusCode::NOT_FOUND, e))?;
    let theme = match q.theme.as_deref() {
        None | Some("") => ThemeId::All,
        Some(raw) => raw
            .parse::<ThemeId>()
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
    };
    Ok(Json(state.newsroom.page(page, theme).await))
}

async fn report(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Report> {
    match state.newsroom.report(&id).await {
        ReportLookup::Found(r) => Ok(Json(*r)),
        ReportLookup::NotFound => Err((StatusCode::NOT_FOUND, format!("report '{id}' not found"))),
        ReportLookup::Failed(e) => {
            tracing::warn!(target: "feeds", report = %id, error = %e, "report lookup failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Page::Reports.error_notice(),
            ))
        }
    }
}

async fn pipeline(State(state): State<AppState>) -> Json<Vec<PipelineStage>> {
    Json(state.newsroom.pipeline().await)
}
