use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct PingResponse {
    #[schema(example = true)]
    pub ok: bool,
}

/// Connectivity check
#[utoipa::path(
    get,
    path = "/ping",
    tag = "Ping",
    responses(
        (status = 200, description = "Server is reachable", body = PingResponse)
    )
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { ok: true })
}

pub fn router() -> Router {
    Router::new().route("/ping", get(ping))
}
