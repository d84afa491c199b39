use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use time::OffsetDateTime;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/studio-info", get(studio_info))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub service: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: OffsetDateTime::now_utc(),
        service: "Kairos Studio API",
    })
}

async fn studio_info() -> Json<Value> {
    Json(json!({
        "name": "Kairos Studio",
        "tagline": "Where Time Meets Creativity",
        "description": "Professional creative studio specializing in innovative design solutions",
        "services": [
            "Creative Direction",
            "Brand Design",
            "Digital Experiences",
            "Visual Identity",
            "Motion Graphics"
        ],
        "contact": {
            "email": "hello@kairostudio.in",
            "phone": "+91 XXX XXX XXXX"
        }
    }))
}
