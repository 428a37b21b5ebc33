use crate::{auth::admin::is_admin_secret, config::Config, models::LoginRequest};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use tracing::{info, instrument};

/// Checks the admin password. Nothing is issued: the client keeps the secret and
/// sends it as `x-admin-key` on every protected call.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Password accepted", body = Object, example = json!({
            "ok": true
        })),
        (status = 401, description = "Wrong or missing password", body = Object, example = json!({
            "ok": false,
            "message": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(config, body))]
pub async fn login(
    body: Option<web::Json<LoginRequest>>,
    config: web::Data<Config>,
) -> impl Responder {
    // An unreadable body is just a failed login
    let password = body.and_then(|b| b.into_inner().password);

    if is_admin_secret(password.as_deref(), &config.admin_key) {
        info!("Login successful");
        return HttpResponse::Ok().json(json!({ "ok": true }));
    }

    info!("Invalid credentials");
    HttpResponse::Unauthorized().json(json!({
        "ok": false,
        "message": "Invalid credentials"
    }))
}
