pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::accounts::handlers as accounts;
use crate::assistant::diagnosis::MAX_IMAGE_BYTES;
use crate::assistant::handlers as assistant;
use crate::scheduler::handlers as scheduler;
use crate::state::AppState;
use crate::{catalog, dashboard};

/// Headroom for multipart boundaries and headers around the image itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session
        .route("/api/v1/session", get(accounts::handle_get_session))
        .route("/api/v1/session/login", post(accounts::handle_login))
        .route("/api/v1/session/register", post(accounts::handle_register))
        .route("/api/v1/session/logout", post(accounts::handle_logout))
        // Scheduler
        .route(
            "/api/v1/alarms",
            get(scheduler::handle_list_alarms).post(scheduler::handle_create_alarm),
        )
        .route("/api/v1/alarms/calendar", get(scheduler::handle_calendar))
        .route(
            "/api/v1/alarms/:id/toggle",
            post(scheduler::handle_toggle_alarm),
        )
        .route("/api/v1/alarms/:id", delete(scheduler::handle_delete_alarm))
        // Assistant
        .route(
            "/api/v1/diagnose",
            post(assistant::handle_diagnose)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + MULTIPART_OVERHEAD_BYTES)),
        )
        .route("/api/v1/chat/sessions", post(assistant::handle_open_chat))
        .route(
            "/api/v1/chat/sessions/:id",
            get(assistant::handle_get_chat).delete(assistant::handle_close_chat),
        )
        .route(
            "/api/v1/chat/sessions/:id/messages",
            post(assistant::handle_send_message),
        )
        // Static views
        .route("/api/v1/dashboard", get(dashboard::handle_dashboard))
        .route("/api/v1/recommendations", get(catalog::handle_recommendations))
        .with_state(state)
}
