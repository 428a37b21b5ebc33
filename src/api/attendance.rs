use crate::{
    auth::admin::AdminKey,
    error::AppError,
    model::{
        attendance::{AttendanceDay, AttendanceEntry},
        student,
    },
    stats,
    store::Store,
};
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: Option<String>,
    pub records: Option<Vec<AttendanceEntry>>,
}

/// Exactly `YYYY-MM-DD`: four-digit year, two-digit month and day, no padding or sign.
fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let bad = || AppError::bad_request("date must be in YYYY-MM-DD format");

    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(bad());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| bad())
}

impl MarkAttendance {
    fn validate(self) -> Result<(NaiveDate, Vec<AttendanceEntry>), AppError> {
        let (Some(date), Some(records)) = (self.date, self.records) else {
            return Err(AppError::bad_request("date and records[] required"));
        };
        let date = parse_date(&date)?;

        if records.iter().any(|entry| entry.name.trim().is_empty()) {
            return Err(AppError::bad_request("every record needs a name"));
        }
        if records.iter().any(|entry| !student::name_fits(&entry.name)) {
            return Err(AppError::bad_request(format!(
                "record names must be at most {} characters",
                student::MAX_NAME_LEN
            )));
        }

        Ok((date, records))
    }
}

/// Mark attendance for a date, replacing whatever was stored for it
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Stored day", body = AttendanceDay),
        (status = 400, description = "date or records missing or malformed, or a name too long", body = crate::error::ErrorBody),
        (status = 401, description = "Missing or wrong admin key", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    security(
        ("admin_key" = [])
    ),
    tag = "Attendance"
)]
#[instrument(name = "mark_attendance", skip_all)]
pub async fn mark_attendance(
    _admin: AdminKey,
    store: web::Data<dyn Store>,
    payload: web::Json<MarkAttendance>,
) -> Result<HttpResponse, AppError> {
    let (date, records) = payload.into_inner().validate()?;

    let mut seen = std::collections::HashSet::new();
    if let Some(dup) = records.iter().find(|entry| !seen.insert(entry.name.as_str())) {
        warn!(%date, name = %dup.name, "Day lists a student more than once; the first entry counts");
    }

    let day = store.upsert_day(date, records).await?;

    info!(%date, records = day.records.len(), "Attendance marked");
    Ok(HttpResponse::Ok().json(day))
}

/// Attendance history and percentage for one student
#[utoipa::path(
    get,
    path = "/api/attendance/{name}",
    params(
        ("name" = String, Path, description = "Exact student name")
    ),
    responses(
        (status = 200, description = "Attendance summary", body = crate::model::attendance::AttendanceSummary),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn student_attendance(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let name = path.into_inner();
    let days = store.days_for_student(&name).await?;

    Ok(HttpResponse::Ok().json(stats::summarize(&name, days)))
}

/// Attendance sheet for a date; an unrecorded date yields an empty sheet
#[utoipa::path(
    get,
    path = "/api/attendance/date/{date}",
    params(
        ("date" = String, Path, description = "Day in YYYY-MM-DD form")
    ),
    responses(
        (status = 200, description = "Stored day or an empty one", body = AttendanceDay),
        (status = 400, description = "Malformed date", body = crate::error::ErrorBody),
        (status = 500, description = "Internal server error", body = crate::error::ErrorBody)
    ),
    tag = "Attendance"
)]
pub async fn attendance_by_date(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let date = parse_date(&path.into_inner())?;
    let day = store
        .find_day(date)
        .await?
        .unwrap_or_else(|| AttendanceDay::empty(date));

    Ok(HttpResponse::Ok().json(day))
}
