use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(handlers::submit_contact))
        .route("/admin/contacts", get(handlers::list_contacts))
        .route(
            "/admin/contacts/:id",
            patch(handlers::update_contact).delete(handlers::delete_contact),
        )
        .route("/admin/stats", get(handlers::get_stats))
}
