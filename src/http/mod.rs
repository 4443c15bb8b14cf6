//! Inbound JSON API for the presentation layer.
//!
//! - `GET /api/market-rates`: full fallback chain, always `200`.
//! - `GET /api/market-rates/live`: live page only, `500` on failure.
//! - `GET /health`: liveness check.

use crate::domain::entities::market_rate::PredictedRate;
use crate::KrushiPravah;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub fn router(app: Arc<KrushiPravah>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/market-rates", get(market_rates))
        .route("/api/market-rates/live", get(live_market_rates))
        .route("/health", get(health))
        .with_state(app)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve the API on `addr` until the process is stopped.
pub async fn serve(app: Arc<KrushiPravah>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(app)).await
}

async fn market_rates(State(app): State<Arc<KrushiPravah>>) -> Json<Vec<PredictedRate>> {
    Json(app.current_rates().await)
}

async fn live_market_rates(State(app): State<Arc<KrushiPravah>>) -> Response {
    match app.live_rates().await {
        Ok(rates) => Json(rates).into_response(),
        Err(e) => {
            error!(error = %e, "live market rates failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Failed to fetch market rates".into(),
                }),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
