//! Demo application views.

use axum::{extract::Path, Json};
use serde_json::{json, Value};

pub async fn index() -> &'static str {
    "Welcome"
}

pub async fn terms_of_service() -> &'static str {
    "Terms of service"
}

pub async fn search(Path(query): Path<String>) -> Json<Value> {
    Json(json!({ "query": query, "results": [] }))
}

pub async fn update_lead(Path(lead): Path<String>, body: String) -> Json<Value> {
    Json(json!({ "lead": lead, "received": body.len() }))
}

pub async fn status() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
    }))
}
