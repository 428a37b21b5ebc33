use crate::store::Store;
use actix_web::{HttpResponse, Responder, web};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::error;

/// Storage reachability check
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Storage reachable", body = Object, example = json!({
            "ok": true,
            "time": "2026-01-05T08:00:00.000Z"
        })),
        (status = 500, description = "Storage unreachable", body = Object, example = json!({
            "ok": false,
            "error": "pool timed out while waiting for an open connection"
        }))
    ),
    tag = "Health"
)]
pub async fn health(store: web::Data<dyn Store>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "ok": true,
            "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        })),
        Err(e) => {
            error!(error = %e, "Health check failed");
            HttpResponse::InternalServerError().json(json!({
                "ok": false,
                "error": e.to_string()
            }))
        }
    }
}
