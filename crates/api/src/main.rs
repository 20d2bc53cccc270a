//! Hebo health-assistant HTTP API.
//!
//! Thin axum layer over the services crate: every mutating route
//! resolves the caller through the identity collaborator, then delegates
//! to one of the injected services.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use assistant_core::Turn;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use groq_llm::GroqCompletion;
use database::Database;
use serde::{Deserialize, Serialize};
use services::{
    ConversationService, HealthProfileService, ServiceError, UserProfile, UserProfileService,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

mod identity;

use identity::{HttpIdentity, Identity, ResolvedUser, StaticIdentity};

#[derive(Clone)]
struct AppState {
    identity: Arc<dyn Identity>,
    profiles: Arc<UserProfileService>,
    health: Arc<HealthProfileService>,
    conversations: Arc<ConversationService>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodHistoryRequest {
    food_history: String,
}

#[derive(Debug, Serialize)]
struct FoodHistoryResponse {
    score: i64,
    message: String,
    suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    message: String,
    kind: String,
}

#[derive(Debug, Deserialize)]
struct DeleteRequest {
    content: String,
}

#[derive(Debug, Serialize)]
struct ReplyResponse {
    reply: String,
    transcript: Vec<Turn>,
}

#[derive(Debug, Serialize)]
struct Health {
    status: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let addr = env::var("HEBO_API_ADDR").unwrap_or_else(|_| "127.0.0.1:8790".to_string());
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:hebo.db?mode=rwc".to_string());

    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run migrations");

    let completion = Arc::new(
        GroqCompletion::from_env().expect("Failed to configure Groq completion backend"),
    );

    let identity: Arc<dyn Identity> = match env::var("HEBO_AUTH_URL") {
        Ok(url) if !url.trim().is_empty() => {
            info!("Using HTTP identity verification at {}", url);
            Arc::new(HttpIdentity::new(url))
        }
        _ => {
            let spec = env::var("HEBO_API_TOKENS").unwrap_or_default();
            if spec.trim().is_empty() {
                warn!("No HEBO_AUTH_URL or HEBO_API_TOKENS set; all requests will be unauthorized");
            }
            Arc::new(StaticIdentity::from_spec(&spec))
        }
    };

    let state = AppState {
        identity,
        profiles: Arc::new(UserProfileService::new(db.clone())),
        health: Arc::new(HealthProfileService::new(db.clone(), completion.clone())),
        conversations: Arc::new(ConversationService::new(db, completion)),
    };

    let app = router(state);

    let addr: SocketAddr = addr.parse().expect("Invalid HEBO_API_ADDR");
    info!(%addr, "Hebo API listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Build the application router.
///
/// CORS is wide open; the browser client is served from a different
/// origin and auth rides in the Authorization header, not cookies.
fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/profile", post(get_profile))
        .route("/food-history", post(submit_food_history))
        .route("/ask", post(ask))
        .route("/chat-history/delete", post(delete_chat_history))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserProfile>, ApiError> {
    let user = authenticate(&state, &headers).await?;

    let profile = state
        .profiles
        .get_or_create(&user.user_id, user.email.as_deref())
        .await?;

    Ok(Json(profile))
}

async fn submit_food_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<FoodHistoryRequest>,
) -> Result<Json<FoodHistoryResponse>, ApiError> {
    let user = authenticate(&state, &headers).await?;

    let record = state
        .health
        .submit_food_history(&user.user_id, &payload.food_history)
        .await?;

    Ok(Json(FoodHistoryResponse {
        score: record.score,
        message: record.message,
        suggestions: record.suggestions,
    }))
}

async fn ask(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AskRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let user = authenticate(&state, &headers).await?;

    let (reply, transcript) = state
        .conversations
        .ask(&user.user_id, &payload.message, &payload.kind)
        .await?;

    Ok(Json(ReplyResponse { reply, transcript }))
}

async fn delete_chat_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<ReplyResponse>, ApiError> {
    let user = authenticate(&state, &headers).await?;

    let (reply, transcript) = state
        .conversations
        .delete(&user.user_id, &payload.content)
        .await?;

    Ok(Json(ReplyResponse { reply, transcript }))
}

/// Resolve the caller from the Authorization header.
async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<ResolvedUser, ApiError> {
    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(ApiError::Unauthorized);
    };

    let Ok(value) = value.to_str() else {
        return Err(ApiError::Unauthorized);
    };

    let token = value.strip_prefix("Bearer ").unwrap_or(value);

    state
        .identity
        .resolve(token)
        .await
        .map_err(|_| ApiError::Unauthorized)
}

#[derive(Debug)]
enum ApiError {
    Unauthorized,
    NotFound(String),
    Validation(String),
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(user) => ApiError::NotFound(format!("user not found: {}", user)),
            ServiceError::Validation(msg) => ApiError::Validation(msg),
            ServiceError::Completion(err) => ApiError::Internal(err.to_string()),
            ServiceError::Database(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Unauthorized => {
                warn!("Unauthorized request");
                (
                    StatusCode::UNAUTHORIZED,
                    "auth_error",
                    "Unauthorized".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg),
            ApiError::Internal(msg) => {
                warn!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = serde_json::json!({
            "error": {
                "message": message,
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}
