//! Liveness endpoints.

use axum::Json;
use serde_json::{Value, json};

/// `GET /`
pub async fn ping() -> Json<Value> { Json(json!({ "message": "pong" })) }

/// `GET /status`
pub async fn status() -> Json<Value> {
  Json(json!({
    "Status":  "Ok",
    "msg":     "ready",
    "version": env!("CARGO_PKG_VERSION"),
  }))
}
