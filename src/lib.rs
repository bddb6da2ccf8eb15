pub mod clients;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod rules;
pub mod validation;

use std::sync::Arc;

use axum::{extract::State, response::Json, routing::get, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use clients::{ClientService, ClientStore, InMemoryClientStore};
use config::AppConfig;
use error::ErrorResponse;
use metrics::{EvaluationMetrics, MetricsSnapshot};
use models::{
    ClientRecord, ClientResponse, CreateClientRequest, CreatePurchaseRequest, HealthResponse,
    PurchaseInfo, PurchaseResponse,
};
use rules::CardTier;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_metrics,
        clients::handlers::register_client,
        clients::handlers::get_client,
        clients::handlers::register_purchase,
    ),
    components(
        schemas(
            CardTier,
            ClientRecord,
            ClientResponse,
            CreateClientRequest,
            CreatePurchaseRequest,
            PurchaseInfo,
            PurchaseResponse,
            HealthResponse,
            MetricsSnapshot,
            ErrorResponse,
        )
    ),
    tags(
        (name = "clients", description = "Card client registration"),
        (name = "purchases", description = "Purchase evaluation and benefits"),
        (name = "service", description = "Liveness and metrics")
    ),
    info(
        title = "VISE API",
        version = "1.0.0",
        description = "Card client registration and purchase benefit evaluation"
    )
)]
pub struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub client_service: ClientService,
}

impl AppState {
    /// Build state over the given store with fresh metrics
    pub fn new(store: Arc<dyn ClientStore>) -> Self {
        Self {
            client_service: ClientService::new(store, EvaluationMetrics::new()),
        }
    }

    /// Build state over an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryClientStore::new()))
    }
}

/// Handler for GET /
/// Static liveness payload
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "service"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: "VISE API".to_string(),
    })
}

/// Handler for GET /metrics
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Evaluation counters", body = MetricsSnapshot)
    ),
    tag = "service"
)]
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.client_service.metrics().snapshot())
}

/// Creates and configures the application router
/// Maps all endpoints to their handlers and adds tracing and CORS middleware
pub fn create_router(state: AppState) -> Router {
    // Allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(health))
        .route("/metrics", get(get_metrics))
        .route("/client", post(clients::register_client))
        .route("/client/:id", get(clients::get_client))
        .route("/purchase", post(clients::register_purchase))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Initialize the tracing subscriber from the configured filter
pub fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .init();
}

/// Start the server and block until it stops
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    let app = create_router(AppState::in_memory());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("VISE API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await
}
