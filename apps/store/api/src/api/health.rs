//! Liveness and readiness endpoints

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, health_router, run_health_checks};
use database::mongodb::check_health_detailed;

use crate::state::AppState;

/// Readiness check: pings MongoDB, `503` when it does not answer.
async fn ready(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            let status = check_health_detailed(&state.db).await;
            tracing::debug!(response_time_ms = status.response_time_ms, "MongoDB ping");
            if status.healthy {
                Ok(())
            } else {
                Err(format!(
                    "MongoDB ping failed: {}",
                    status.message.unwrap_or_default()
                ))
            }
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

/// `/health` from axum-helpers plus a MongoDB-backed `/ready`
pub fn router(state: AppState) -> Router {
    let ready_routes = Router::new()
        .route("/ready", get(ready))
        .with_state(state.clone());

    health_router(state.config.app).merge(ready_routes)
}
