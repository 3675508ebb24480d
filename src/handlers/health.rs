use axum::{response::Html, Json};
use serde_json::{json, Value};

/// Static liveness payload.
///
/// GET /api/health
///
/// Reports healthy unconditionally: the service holds no connections worth
/// probing, and provider reachability is only discovered per analysis call.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "Water Quality AI Analyzer",
        "sdg": "SDG 6 - Clean Water and Sanitation"
    }))
}

/// Landing page.
///
/// GET /
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
