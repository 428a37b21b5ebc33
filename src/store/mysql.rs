use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::TryStreamExt;
use sqlx::{FromRow, MySql, MySqlPool, QueryBuilder};
use tokio::sync::OnceCell;
use tracing::debug;

use super::{DUPLICATE_STUDENT, Store};
use crate::{
    db,
    error::AppError,
    model::{
        attendance::{AttendanceDay, AttendanceEntry, AttendanceStatus},
        student::{NewStudent, Student},
    },
};

pub struct MySqlStore {
    pool: MySqlPool,
    schema: OnceCell<()>,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            schema: OnceCell::new(),
        }
    }

    /// Pool with the schema in place. A failed bootstrap leaves the cell empty,
    /// so the next call tries again.
    async fn ready(&self) -> Result<&MySqlPool, AppError> {
        self.schema
            .get_or_try_init(|| db::ensure_schema(&self.pool))
            .await?;
        Ok(&self.pool)
    }
}

#[derive(FromRow)]
struct RecordRow {
    date: NaiveDate,
    name: String,
    status: String,
}

impl TryFrom<RecordRow> for AttendanceEntry {
    type Error = AppError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let status = AttendanceStatus::from_str(&row.status).map_err(|_| {
            AppError::internal(format!(
                "stored status {:?} for {} on {} is not Present/Absent",
                row.status, row.name, row.date
            ))
        })?;
        Ok(AttendanceEntry {
            name: row.name,
            status,
        })
    }
}

/// Folds rows ordered by (date, position) into days.
fn group_by_day(rows: Vec<RecordRow>) -> Result<Vec<AttendanceDay>, AppError> {
    let mut days: Vec<AttendanceDay> = Vec::new();
    for row in rows {
        let date = row.date;
        let entry = AttendanceEntry::try_from(row)?;
        match days.last_mut() {
            Some(day) if day.date == date => day.records.push(entry),
            _ => days.push(AttendanceDay {
                date,
                records: vec![entry],
            }),
        }
    }
    Ok(days)
}

#[async_trait]
impl Store for MySqlStore {
    async fn ping(&self) -> Result<(), AppError> {
        let pool = self.ready().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        let pool = self.ready().await?;
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT name, roll, email, batch, created_at
            FROM students
            ORDER BY name ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(students)
    }

    async fn create_student(&self, student: NewStudent) -> Result<Student, AppError> {
        let pool = self.ready().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO students (name, roll, email, batch)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&student.name)
        .bind(&student.roll)
        .bind(&student.email)
        .bind(&student.batch)
        .execute(pool)
        .await;

        if let Err(e) = result {
            // Duplicate primary key
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Err(AppError::conflict(DUPLICATE_STUDENT));
                }
            }
            return Err(e.into());
        }

        let created = sqlx::query_as::<_, Student>(
            r#"
            SELECT name, roll, email, batch, created_at
            FROM students
            WHERE name = ?
            "#,
        )
        .bind(&student.name)
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    async fn delete_student(&self, name: &str) -> Result<bool, AppError> {
        let pool = self.ready().await?;
        let result = sqlx::query("DELETE FROM students WHERE name = ?")
            .bind(name)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn upsert_day(
        &self,
        date: NaiveDate,
        records: Vec<AttendanceEntry>,
    ) -> Result<AttendanceDay, AppError> {
        let mut tx = self.ready().await?.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO attendance_days (date)
            VALUES (?)
            ON DUPLICATE KEY UPDATE date = date
            "#,
        )
        .bind(date)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM attendance_records WHERE date = ?")
            .bind(date)
            .execute(&mut *tx)
            .await?;

        if !records.is_empty() {
            let mut insert: QueryBuilder<MySql> =
                QueryBuilder::new("INSERT INTO attendance_records (date, position, name, status) ");
            insert.push_values(records.iter().enumerate(), |mut row, (position, entry)| {
                row.push_bind(date)
                    .push_bind(position as u32)
                    .push_bind(entry.name.clone())
                    .push_bind(entry.status.to_string());
            });
            insert.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        debug!(%date, records = records.len(), "Attendance day replaced");

        Ok(AttendanceDay { date, records })
    }

    async fn find_day(&self, date: NaiveDate) -> Result<Option<AttendanceDay>, AppError> {
        let pool = self.ready().await?;
        let stored = sqlx::query_scalar::<_, NaiveDate>(
            "SELECT date FROM attendance_days WHERE date = ?",
        )
        .bind(date)
        .fetch_optional(pool)
        .await?;

        if stored.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT date, name, status
            FROM attendance_records
            WHERE date = ?
            ORDER BY position ASC
            "#,
        )
        .bind(date)
        .fetch_all(pool)
        .await?;

        let records = rows
            .into_iter()
            .map(AttendanceEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(AttendanceDay { date, records }))
    }

    async fn days_for_student(&self, name: &str) -> Result<Vec<AttendanceDay>, AppError> {
        let pool = self.ready().await?;
        let rows: Vec<RecordRow> = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT date, name, status
            FROM attendance_records
            WHERE name = ?
            ORDER BY date ASC, position ASC
            "#,
        )
        .bind(name)
        .fetch(pool)
        .try_collect()
        .await?;

        group_by_day(rows)
    }
}
