use axum::{
    middleware::from_fn,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use jobboard_api::database::pool;
use jobboard_api::handlers::{auth, companies, jobs};
use jobboard_api::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobboard_api=info,tower_http=info".into()),
        )
        .init();

    let config = jobboard_api::config::config();
    tracing::info!("Starting job board API in {:?} mode", config.environment);

    let app = app();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Job board API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/auth/token", post(auth::token))
        .merge(company_routes())
        .merge(job_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn company_routes() -> Router {
    // Mutations require a bearer token; reads are public.
    // route_layer only applies to routes added before it.
    Router::new()
        .route("/companies", post(companies::create))
        .route(
            "/companies/:handle",
            patch(companies::update).delete(companies::remove),
        )
        .route_layer(from_fn(jwt_auth_middleware))
        .route("/companies", get(companies::list))
        .route("/companies/:handle", get(companies::show))
}

fn job_routes() -> Router {
    Router::new()
        .route("/jobs", post(jobs::create))
        .route("/jobs/:id", patch(jobs::update).delete(jobs::remove))
        .route_layer(from_fn(jwt_auth_middleware))
        .route("/jobs", get(jobs::list))
        .route("/jobs/:id", get(jobs::show))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Job Board API",
            "version": version,
            "endpoints": {
                "auth": "POST /auth/token (public - token acquisition)",
                "companies": "/companies[/:handle] (reads public, mutations require token)",
                "jobs": "/jobs[/:id] (reads public, mutations require token)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match pool::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
