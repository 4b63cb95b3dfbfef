// src/web/handlers/system_handlers.rs
use crate::web::types::HealthResponse;

use rocket::serde::json::Json;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
