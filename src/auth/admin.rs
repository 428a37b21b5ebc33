use crate::{config::Config, error::AppError};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Proof that the request carried the shared admin secret.
///
/// Declared as the first argument of every mutating handler, so a request without a
/// valid `x-admin-key` header is rejected before its body is read or any state changes.
#[derive(Debug)]
pub struct AdminKey;

impl FromRequest for AdminKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(AppError::internal("App config missing").into()));
            }
        };

        let provided = req
            .headers()
            .get(ADMIN_KEY_HEADER)
            .and_then(|h| h.to_str().ok());

        if is_admin_secret(provided, &config.admin_key) {
            ready(Ok(AdminKey))
        } else {
            tracing::info!(path = %req.path(), "Rejected admin request");
            ready(Err(AppError::Unauthorized.into()))
        }
    }
}

/// Exact comparison against the configured secret. Absent or empty never matches.
pub fn is_admin_secret(provided: Option<&str>, secret: &str) -> bool {
    match provided {
        Some(key) if !key.is_empty() => key == secret,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_secret() {
        assert!(is_admin_secret(Some("s3cret"), "s3cret"));
        assert!(!is_admin_secret(Some("S3CRET"), "s3cret"));
        assert!(!is_admin_secret(Some("s3cret "), "s3cret"));
        assert!(!is_admin_secret(Some(""), "s3cret"));
        assert!(!is_admin_secret(None, "s3cret"));
    }
}
