use crate::{
    auth::admin::AdminKey,
    config::Config,
    error::AppError,
    model::student::{self, NewStudent},
    store::Store,
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateStudent {
    #[schema(example = "Ayesha Rahman")]
    pub name: Option<String>,
    #[schema(example = "MIT-07")]
    pub roll: Option<String>,
    #[schema(example = "ayesha@example.com", format = "email")]
    pub email: Option<String>,
    #[schema(example = "JNU MIT 1st Year")]
    pub batch: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = true)]
    pub deleted: bool,
}

/// Trimmed value, or `None` when nothing but whitespace is left.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateStudent {
    fn validate(self, default_batch: &str) -> Result<NewStudent, AppError> {
        let name = non_blank(self.name).ok_or_else(|| AppError::bad_request("Name is required"))?;
        if !student::name_fits(&name) {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                student::MAX_NAME_LEN
            )));
        }

        Ok(NewStudent {
            name,
            roll: non_blank(self.roll),
            email: non_blank(self.email),
            batch: non_blank(self.batch).unwrap_or_else(|| default_batch.to_string()),
        })
    }
}

/// List students, sorted by name
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students, ascending by name", body = [crate::model::student::Student]),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Students"
)]
pub async fn list_students(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let students = store.list_students().await?;
    Ok(HttpResponse::Ok().json(students))
}

/// Create Student
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudent,
    responses(
        (status = 200, description = "Student created", body = crate::model::student::Student),
        (status = 400, description = "Name is missing or too long", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or wrong admin key", body = crate::error::ErrorBody),
        (status = 409, description = "Name already taken", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("admin_key" = [])
    ),
    tag = "Students"
)]
#[instrument(name = "create_student", skip_all)]
pub async fn create_student(
    _admin: AdminKey,
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    payload: web::Json<CreateStudent>,
) -> Result<HttpResponse, AppError> {
    let student = payload.into_inner().validate(&config.default_batch)?;
    let created = store.create_student(student).await?;

    info!(name = %created.name, "Student created");
    Ok(HttpResponse::Ok().json(created))
}

/// Delete Student by name
#[utoipa::path(
    delete,
    path = "/api/students/{name}",
    params(
        ("name" = String, Path, description = "Exact student name")
    ),
    responses(
        (status = 200, description = "Whether a student was removed", body = DeleteResponse),
        (status = 401, description = "Missing or wrong admin key", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("admin_key" = [])
    ),
    tag = "Students"
)]
#[instrument(name = "delete_student", skip_all, fields(name = %path.as_str()))]
pub async fn delete_student(
    _admin: AdminKey,
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    let deleted = store.delete_student(&name).await?;

    info!(deleted, "Student delete handled");
    Ok(HttpResponse::Ok().json(DeleteResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, batch: Option<&str>) -> CreateStudent {
        CreateStudent {
            name: name.map(String::from),
            roll: Some("  ".into()),
            email: Some(" a@b.c ".into()),
            batch: batch.map(String::from),
        }
    }

    #[test]
    fn test_validate_trims_and_defaults() {
        let student = payload(Some("  Adil "), None).validate("Cohort").unwrap();

        assert_eq!(student.name, "Adil");
        assert_eq!(student.roll, None);
        assert_eq!(student.email.as_deref(), Some("a@b.c"));
        assert_eq!(student.batch, "Cohort");
    }

    #[test]
    fn test_validate_keeps_given_batch() {
        let student = payload(Some("Adil"), Some("Evening")).validate("Cohort").unwrap();
        assert_eq!(student.batch, "Evening");
    }

    #[test]
    fn test_validate_requires_name() {
        for name in [None, Some(""), Some("   ")] {
            let err = payload(name, None).validate("Cohort").unwrap_err();
            assert_eq!(err, AppError::bad_request("Name is required"));
        }
    }

    #[test]
    fn test_validate_limits_name_length() {
        let longest = "a".repeat(student::MAX_NAME_LEN);
        let accepted = payload(Some(&longest), None).validate("Cohort").unwrap();
        assert_eq!(accepted.name, longest);

        let too_long = "a".repeat(student::MAX_NAME_LEN + 1);
        let err = payload(Some(&too_long), None).validate("Cohort").unwrap_err();
        assert_eq!(
            err,
            AppError::bad_request("Name must be at most 191 characters")
        );
    }

    #[test]
    fn test_validate_keeps_long_optional_fields() {
        let mut long = payload(Some("Adil"), Some(&"B".repeat(300)));
        long.roll = Some("R".repeat(100));
        long.email = Some(format!("{}@example.com", "e".repeat(300)));

        let accepted = long.validate("Cohort").unwrap();
        assert_eq!(accepted.roll.map(|r| r.len()), Some(100));
        assert_eq!(accepted.batch.len(), 300);
    }
}
