//! HTTP surface for the itinerary pipeline.
//!
//! Exposes `POST /api/travel-planning/generate` and a `GET /health` probe.

mod handlers;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    core::TravelPlanner,
    error::{PlannerError, Result},
};

pub use handlers::{generate_plan, health};

pub const GENERATE_ROUTE: &str = "/api/travel-planning/generate";

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    planner: Arc<TravelPlanner>,
}

impl AppState {
    pub fn new(planner: TravelPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }

    pub fn planner(&self) -> &TravelPlanner {
        &self.planner
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GENERATE_ROUTE, post(generate_plan))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(planner: TravelPlanner, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| PlannerError::Config(format!("Failed to bind {addr}: {err}")))?;

    info!(
        target: "travel_planner::api",
        addr = %addr,
        model = planner.model(),
        "travel planner listening"
    );

    axum::serve(listener, router(AppState::new(planner)))
        .await
        .map_err(|err| PlannerError::Config(format!("Server error: {err}")))
}
