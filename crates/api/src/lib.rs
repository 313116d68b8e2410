//! Local stand-in for the travel social backend. Serves the routes the
//! `voyage-social` client calls, backed by an in-memory social graph.

mod backend;

use std::env;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Json, State};
use axum::http::{header, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use voyage_observability::{AppMetrics, MetricsSnapshot};
use voyage_social::types::{
    CreatePostRequest, FeedRequest, FeedResponse, FollowRequest, FollowResponse, LikeRequest,
    LikeResponse, PingResponse, SaveResponse, SavedLocation, SavedLocationsRequest, SavedPost,
    SavedPostsRequest, TravelPost, UserLookupRequest,
};
use voyage_social::{DEFAULT_COLLECTION, FEED_PAGE_SIZE};

pub use backend::Backend;

const MAX_FEED_LIMIT: u32 = 100;

#[derive(Clone)]
pub struct ApiState {
    pub backend: Arc<RwLock<Backend>>,
    pub metrics: Arc<AppMetrics>,
    pub delay: Duration,
}

impl ApiState {
    pub fn new(delay: Duration) -> Self {
        Self {
            backend: Arc::new(RwLock::new(Backend::seeded())),
            metrics: AppMetrics::shared(),
            delay,
        }
    }
}

/// Failures rendered the way the real backend does: `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unprocessable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (
            status,
            Json(serde_json::json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct SaveBody {
    user_id: String,
    post_id: String,
    #[serde(default)]
    collection_name: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

pub fn build_app() -> Router {
    let delay = Duration::from_millis(
        env::var("VOYAGE_MOCK_DELAY_MILLIS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(0),
    );
    build_router(ApiState::new(delay))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/ping", get(ping))
        .route("/api/user_services/get_or_create_user_uuid", post(get_or_create_user))
        .route("/api/social_services/get_social_feed", post(social_feed))
        .route("/api/social_services/like_post", post(like_post))
        .route("/api/social_services/save_post_to_wishlist", post(save_post))
        .route("/api/social_services/get_user_saved_posts", post(saved_posts))
        .route("/api/social_services/get_saved_locations", post(saved_locations))
        .route("/api/social_services/follow_user", post(follow_user))
        .route("/api/social_services/create_travel_post", post(create_post))
        .layer(build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            latency_middleware,
        ))
        .with_state(state)
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Simulates a slow or sleeping host.
async fn latency_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.delay.is_zero() && request.method() != Method::OPTIONS {
        tokio::time::sleep(state.delay).await;
    }
    state.metrics.inc_backend_request();
    next.run(request).await
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn get_or_create_user(
    State(state): State<ApiState>,
    Json(request): Json<UserLookupRequest>,
) -> Result<Json<String>, ApiError> {
    let user_id = state.backend.write().get_or_create_user(&request)?;
    info!(user_id = %user_id, "user resolved");
    Ok(Json(user_id))
}

async fn social_feed(
    State(state): State<ApiState>,
    Json(request): Json<FeedRequest>,
) -> Json<FeedResponse> {
    let limit = match request.limit {
        0 => FEED_PAGE_SIZE,
        limit => limit.min(MAX_FEED_LIMIT),
    };
    let posts = state
        .backend
        .read()
        .feed(&request.user_id, request.page, limit);
    Json(FeedResponse { posts })
}

async fn like_post(
    State(state): State<ApiState>,
    Json(request): Json<LikeRequest>,
) -> Result<Json<LikeResponse>, ApiError> {
    let response = state
        .backend
        .write()
        .toggle_like(&request.user_id, &request.post_id)?;
    Ok(Json(response))
}

async fn save_post(
    State(state): State<ApiState>,
    Json(body): Json<SaveBody>,
) -> Result<Json<SaveResponse>, ApiError> {
    let collection = body
        .collection_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_COLLECTION);
    let notes = body
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty());
    let response = state.backend.write().toggle_save(
        &body.user_id,
        &body.post_id,
        collection,
        notes,
    )?;
    info!(post_id = %body.post_id, collection, action = ?response.action, "save toggled");
    Ok(Json(response))
}

async fn saved_posts(
    State(state): State<ApiState>,
    Json(request): Json<SavedPostsRequest>,
) -> Json<Vec<SavedPost>> {
    let saved = state.backend.read().saved_posts(
        &request.user_id,
        request.location_filter.as_deref(),
        request.collection_filter.as_deref(),
    );
    Json(saved)
}

async fn saved_locations(
    State(state): State<ApiState>,
    Json(request): Json<SavedLocationsRequest>,
) -> Json<Vec<SavedLocation>> {
    Json(state.backend.read().saved_locations(&request.user_id))
}

async fn follow_user(
    State(state): State<ApiState>,
    Json(request): Json<FollowRequest>,
) -> Result<Json<FollowResponse>, ApiError> {
    let response = state
        .backend
        .write()
        .toggle_follow(&request.follower_id, &request.following_id)?;
    Ok(Json(response))
}

async fn create_post(
    State(state): State<ApiState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<Json<TravelPost>, ApiError> {
    let post = state
        .backend
        .write()
        .create_post(&request.user_id, request.post)?;
    info!(post_id = %post.id, user_id = %request.user_id, "travel post created");
    Ok(Json(post))
}
