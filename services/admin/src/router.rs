use axum::{
    Router,
    routing::{get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use essence_core::health::healthz;
use essence_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    dashboard::get_dashboard,
    directory::{get_directory, get_recent_actions},
    group::{create_group, delete_group, update_group},
    health::readyz,
    me::{change_own_password, get_me},
    user::{create_user, delete_user, reset_password, restore_user, suspend_user, update_user},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Directory
        .route("/admin/directory", get(get_directory))
        .route("/admin/actions", get(get_recent_actions))
        // Users
        .route("/admin/users", post(create_user))
        .route("/admin/users/{id}", patch(update_user).delete(delete_user))
        .route(
            "/admin/users/{id}/suspension",
            post(suspend_user).delete(restore_user),
        )
        .route("/admin/users/{id}/password", put(reset_password))
        // Groups
        .route("/admin/groups", post(create_group))
        .route("/admin/groups/{id}", patch(update_group).delete(delete_group))
        // Self service
        .route("/users/@me", get(get_me))
        .route("/users/@me/password", put(change_own_password))
        .route("/dashboard", get(get_dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
