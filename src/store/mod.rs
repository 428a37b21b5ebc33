//! Student directory and attendance ledger storage.

pub mod memory;
pub mod mysql;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    error::AppError,
    model::{
        attendance::{AttendanceDay, AttendanceEntry},
        student::{NewStudent, Student},
    },
};

pub const DUPLICATE_STUDENT: &str = "Student with this name already exists";

#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies the backend is reachable. For MySQL this opens the first connection.
    async fn ping(&self) -> Result<(), AppError>;

    /// All students, ascending by name.
    async fn list_students(&self) -> Result<Vec<Student>, AppError>;

    /// Fails with `Conflict` when the name is taken; the existing record is left as is.
    async fn create_student(&self, student: NewStudent) -> Result<Student, AppError>;

    /// Returns whether a record was removed. Attendance history is not touched.
    async fn delete_student(&self, name: &str) -> Result<bool, AppError>;

    /// Replaces the day's records wholesale, creating the day if needed.
    async fn upsert_day(
        &self,
        date: NaiveDate,
        records: Vec<AttendanceEntry>,
    ) -> Result<AttendanceDay, AppError>;

    async fn find_day(&self, date: NaiveDate) -> Result<Option<AttendanceDay>, AppError>;

    /// Days that hold at least one entry for `name`, ascending by date.
    /// Entries for other students may be left out.
    async fn days_for_student(&self, name: &str) -> Result<Vec<AttendanceDay>, AppError>;
}
