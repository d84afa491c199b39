use axum::{routing::post, Router};

use crate::state::AppState;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(handlers::login))
        .route("/admin/logout", post(handlers::logout))
}
