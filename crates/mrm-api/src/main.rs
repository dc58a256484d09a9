//! mrm-api - HTTP API server for the model registry.

mod handlers;

use std::net::SocketAddr;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use mrm_db::Database;

use handlers::models::{
    get_enum_values, get_model, list_models, register_model, update_model,
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database context with all repositories.
    pub db: Database,
}

// =============================================================================
// OPENAPI DOCUMENT
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Model Registry API",
        description = "Registration and inventory of governed models",
    ),
    paths(
        handlers::models::register_model,
        handlers::models::list_models,
        handlers::models::get_model,
        handlers::models::update_model,
        handlers::models::get_enum_values,
    ),
    components(schemas(
        mrm_core::ModelRequest,
        mrm_core::ModelRecord,
        mrm_core::ChoiceOption,
        mrm_core::EnumValuesResponse,
    )),
    tags(
        (name = "models", description = "Model registration and inventory management"),
    )
)]
struct ApiDoc;

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// HTTP-facing error, mapped from the core error taxonomy.
#[derive(Debug)]
pub enum ApiError {
    Database(mrm_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<mrm_core::Error> for ApiError {
    fn from(err: mrm_core::Error) -> Self {
        match &err {
            mrm_core::Error::ModelNotFound(_) => ApiError::NotFound(err.to_string()),
            mrm_core::Error::UnknownClassification { .. } => ApiError::BadRequest(err.to_string()),
            mrm_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            _ => ApiError::Database(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// MISC HANDLERS
// =============================================================================

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// =============================================================================
// SETUP
// =============================================================================

fn cors_layer() -> CorsLayer {
    let origins_str = std::env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    if origins_str.trim() == "*" {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,sqlx=warn"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .route("/api/models", get(list_models).post(register_model))
        .route("/api/models/enums", get(get_enum_values))
        .route("/api/models/:id", get(get_model).put(update_model))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    init_tracing();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/mrm".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let db = Database::connect(&database_url).await?;
    db.migrate().await?;
    db.catalogs.seed_reference_data().await?;

    let state = AppState { db };
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(
        subsystem = "api",
        component = "server",
        op = "start",
        %addr,
        "Starting model registry server"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_not_found_maps_to_404() {
        let err: ApiError = mrm_core::Error::ModelNotFound(9).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_classification_maps_to_400() {
        let err: ApiError = mrm_core::Error::UnknownClassification {
            catalog: mrm_core::Catalog::BusinessLine,
            code: "NOT_A_CODE".to_string(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let err: ApiError = mrm_core::Error::InvalidInput("Model name is required".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg == "Model name is required"));
    }

    #[test]
    fn test_database_error_maps_to_500() {
        let err: ApiError = mrm_core::Error::Database(sqlx::Error::PoolClosed).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
