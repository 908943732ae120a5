use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use notification_cell::router::notification_routes;
use provider_cell::router::{provider_routes, schedule_routes};
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Agenda API is running!" }))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/providers", provider_routes(state.clone()))
        .nest("/schedules", schedule_routes(state.clone()))
        .nest("/notifications", notification_routes(state))
}
