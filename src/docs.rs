use crate::api::attendance::MarkAttendance;
use crate::api::student::{CreateStudent, DeleteResponse};
use crate::auth::admin::ADMIN_KEY_HEADER;
use crate::error::ErrorBody;
use crate::model::attendance::{
    AttendanceDay, AttendanceEntry, AttendanceStatus, AttendanceSummary, HistoryEntry,
};
use crate::model::student::Student;
use crate::models::LoginRequest;
use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "1.0.0",
        description = r#"
## Cohort Attendance

Keeps the roster of a single cohort and its daily attendance sheets.

- **Students**: list the roster, add a student, remove a student by name
- **Attendance**: submit the sheet for a date (replaces any earlier sheet for
  that date), read a date's sheet, read one student's history and percentage

### Security
Mutating endpoints require the shared admin secret in the `x-admin-key` header.
`POST /api/login` only checks the secret; it issues nothing.
"#,
    ),
    paths(
        crate::api::health::health,
        crate::auth::handlers::login,

        crate::api::student::list_students,
        crate::api::student::create_student,
        crate::api::student::delete_student,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::student_attendance,
        crate::api::attendance::attendance_by_date
    ),
    components(
        schemas(
            LoginRequest,
            Student,
            CreateStudent,
            DeleteResponse,
            AttendanceStatus,
            AttendanceEntry,
            AttendanceDay,
            MarkAttendance,
            HistoryEntry,
            AttendanceSummary,
            ErrorBody
        )
    ),
    modifiers(&AdminKeyScheme),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Auth", description = "Admin secret check"),
        (name = "Students", description = "Roster management APIs"),
        (name = "Attendance", description = "Attendance marking and reporting APIs"),
    )
)]
pub struct ApiDoc;

pub struct AdminKeyScheme;

impl Modify for AdminKeyScheme {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "admin_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ADMIN_KEY_HEADER))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes_and_scheme() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        for path in [
            "/api/health",
            "/api/login",
            "/api/students",
            "/api/students/{name}",
            "/api/attendance",
            "/api/attendance/{name}",
            "/api/attendance/date/{date}",
        ] {
            assert!(doc["paths"].get(path).is_some(), "missing {path}");
        }
        assert_eq!(
            doc["components"]["securitySchemes"]["admin_key"]["name"],
            "x-admin-key"
        );
    }

    #[test]
    fn test_response_bodies_reference_named_schemas() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schema_of = |path: &str, method: &str, status: &str| {
            doc["paths"][path][method]["responses"][status]["content"]["application/json"]
                ["schema"]
                .clone()
        };

        assert_eq!(
            schema_of("/api/attendance", "post", "400")["$ref"],
            "#/components/schemas/ErrorBody"
        );
        assert_eq!(
            schema_of("/api/attendance/{name}", "get", "200")["$ref"],
            "#/components/schemas/AttendanceSummary"
        );
        assert_eq!(
            schema_of("/api/students", "post", "200")["$ref"],
            "#/components/schemas/Student"
        );
        assert_eq!(
            schema_of("/api/students", "get", "200")["items"]["$ref"],
            "#/components/schemas/Student"
        );
    }
}
