use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

use crate::config::AppConfig;
use crate::contact::{ContactError, ContactForm};
use crate::highlight;
use crate::location::{self, Coordinates, LocationError};
use crate::pages;
use crate::repos::{RepoError, Repository, RepositorySource};
use crate::search::{ContentIndex, QueryMatcher, SearchResult};

/// Longest query accepted by the search API, in characters.
pub const MAX_QUERY_CHARS: usize = 200;

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<ContentIndex>,
    pub config: Arc<AppConfig>,
    pub repos: Arc<dyn RepositorySource>,
}

impl AppState {
    pub fn new(index: ContentIndex, config: AppConfig, repos: Arc<dyn RepositorySource>) -> Self {
        Self {
            index: Arc::new(index),
            config: Arc::new(config),
            repos,
        }
    }
}

/// Error wrapper for API handlers
#[derive(Debug)]
pub enum ApiError {
    QueryTooLong(usize),
    Validation(ContactError),
    Coordinates(LocationError),
    MissingCoordinate,
    Upstream(RepoError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl From<ContactError> for ApiError {
    fn from(e: ContactError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        ApiError::Coordinates(e)
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Upstream(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::QueryTooLong(len) => (
                StatusCode::BAD_REQUEST,
                "query_too_long",
                format!(
                    "Query is {} characters long, the limit is {}",
                    len, MAX_QUERY_CHARS
                ),
            ),
            ApiError::Validation(e) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", e.to_string())
            }
            ApiError::Coordinates(e) => {
                (StatusCode::BAD_REQUEST, "invalid_coordinates", e.to_string())
            }
            ApiError::MissingCoordinate => (
                StatusCode::BAD_REQUEST,
                "invalid_coordinates",
                "Both lat and lon are required".to_string(),
            ),
            ApiError::Upstream(e) => {
                tracing::warn!("Repository listing unavailable: {}", e);
                (StatusCode::BAD_GATEWAY, "upstream_error", e.to_string())
            }
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Serialize)]
struct SearchHit<'a> {
    #[serde(flatten)]
    result: SearchResult<'a>,
    snippet_html: String,
}

#[derive(Debug, Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    results: Vec<SearchHit<'a>>,
    total: usize,
    time_ms: u128,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct ReposResponse {
    user: String,
    repositories: Vec<Repository>,
}

#[derive(Debug, Serialize)]
struct ContactResponse {
    mailto: String,
}

#[derive(Debug, Default, Deserialize)]
struct MapQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

impl MapQuery {
    fn coordinates(&self) -> Result<Option<Coordinates>, ApiError> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon)?)),
            (None, None) => Ok(None),
            _ => Err(ApiError::MissingCoordinate),
        }
    }
}

#[derive(Debug, Serialize)]
struct MapResponse {
    url: String,
    label: Option<String>,
}

/// Malformed `lat`/`lon` are ignored rather than rejected.
#[derive(Debug, Deserialize)]
struct HomeQuery {
    #[serde(default)]
    q: String,
    lat: Option<String>,
    lon: Option<String>,
}

impl HomeQuery {
    fn position(&self) -> Option<Coordinates> {
        let parse = |value: &Option<String>| value.as_deref().and_then(|v| v.trim().parse::<f64>().ok());

        MapQuery {
            lat: parse(&self.lat),
            lon: parse(&self.lon),
        }
        .coordinates()
        .unwrap_or_else(|_| {
            tracing::debug!("Ignoring invalid coordinates on home page");
            None
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(home_page))
        .route("/about", get(about_page))
        .route("/resume", get(resume_page))
        .route("/resume.pdf", get(resume_pdf))
        .route("/resume/download", get(resume_download))
        .route("/portfolio", get(portfolio_page))
        // API routes
        .route("/api/health", get(health_handler))
        .route("/api/search", get(search_handler))
        .route("/api/repos", get(repos_handler))
        .route("/api/contact", post(contact_handler))
        .route("/api/map", get(map_handler))
        // Compiled-in assets
        .route("/assets/main.css", get(stylesheet))
        .route("/assets/app.js", get(script))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server listening on http://{}", addr);
    tracing::info!("🔍 Search API available at http://{}/api/search?q=<query>", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Response, ApiError> {
    let start = std::time::Instant::now();

    let len = params.q.chars().count();
    if len > MAX_QUERY_CHARS {
        return Err(ApiError::QueryTooLong(len));
    }

    let matcher = QueryMatcher::new(&params.q);
    let results: Vec<SearchHit<'_>> = state
        .index
        .search(&params.q)
        .into_iter()
        .map(|result| SearchHit {
            snippet_html: highlight::to_html(&highlight::highlight_with(
                matcher.as_ref(),
                &result.snippet,
            )),
            result,
        })
        .collect();

    let total = results.len();
    let time_ms = start.elapsed().as_millis();

    tracing::info!(
        "Search query='{}' returned {} results in {}ms",
        params.q,
        total,
        time_ms
    );

    // Serialize here, while the results still borrow from the index
    Ok(Json(SearchResponse {
        query: &params.q,
        results,
        total,
        time_ms,
    })
    .into_response())
}

async fn repos_handler(State(state): State<AppState>) -> Result<Json<ReposResponse>, ApiError> {
    let user = state.config.github_user.clone();
    let repositories = state.repos.list(&user).await?;

    Ok(Json(ReposResponse { user, repositories }))
}

async fn contact_handler(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactResponse>, ApiError> {
    let mailto = form.mailto_url(&state.config.contact_email).map_err(|e| {
        tracing::info!("Contact form rejected: {}", e);
        e
    })?;

    Ok(Json(ContactResponse { mailto }))
}

async fn map_handler(Query(params): Query<MapQuery>) -> Result<Json<MapResponse>, ApiError> {
    let position = params.coordinates()?;

    Ok(Json(MapResponse {
        url: location::embed_url(position),
        label: position.map(|c| c.label()),
    }))
}

async fn home_page(
    State(state): State<AppState>,
    Query(params): Query<HomeQuery>,
) -> Result<Html<String>, StatusCode> {
    pages::render_home(&state.index, &state.config.contact_email, &params.q, params.position())
        .map(Html)
        .map_err(|e| {
            tracing::error!("Failed to render home page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

async fn about_page() -> Result<Html<String>, StatusCode> {
    pages::render_about().map(Html).map_err(|e| {
        tracing::error!("Failed to render about page: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn resume_page() -> Result<Html<String>, StatusCode> {
    pages::render_resume().map(Html).map_err(|e| {
        tracing::error!("Failed to render resume page: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn portfolio_page(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let user = &state.config.github_user;

    let (repositories, notice) = match state.repos.list(user).await {
        Ok(repos) => (repos, None),
        Err(e) => {
            tracing::warn!("Error fetching GitHub repos: {}", e);
            (
                Vec::new(),
                Some("GitHub projects could not be loaded right now.".to_string()),
            )
        }
    };

    pages::render_portfolio(user, &repositories, notice)
        .map(Html)
        .map_err(|e| {
            tracing::error!("Failed to render portfolio page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

async fn read_resume(state: &AppState) -> Result<Vec<u8>, StatusCode> {
    let path = state.config.resume_path();
    tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            tracing::warn!("Resume not found at {}", path.display());
            StatusCode::NOT_FOUND
        } else {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })
}

async fn resume_pdf(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let bytes = read_resume(&state).await?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], bytes).into_response())
}

async fn resume_download(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let bytes = read_resume(&state).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"Resume.pdf\""),
        ],
        bytes,
    )
        .into_response())
}

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        include_str!("../static/main.css"),
    )
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        include_str!("../static/app.js"),
    )
}
