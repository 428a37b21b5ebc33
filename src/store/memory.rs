use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use super::{DUPLICATE_STUDENT, Store};
use crate::{
    error::AppError,
    model::{
        attendance::{AttendanceDay, AttendanceEntry},
        student::{NewStudent, Student},
    },
};

/// Process-local store. Used when no database is configured, and by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    students: RwLock<BTreeMap<String, Student>>,
    days: RwLock<BTreeMap<NaiveDate, Vec<AttendanceEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> AppError {
    AppError::internal("memory store lock poisoned")
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        let students = self.students.read().map_err(poisoned)?;
        Ok(students.values().cloned().collect())
    }

    async fn create_student(&self, student: NewStudent) -> Result<Student, AppError> {
        let mut students = self.students.write().map_err(poisoned)?;
        match students.entry(student.name.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(DUPLICATE_STUDENT)),
            Entry::Vacant(slot) => {
                let stored = slot.insert(Student {
                    name: student.name,
                    roll: student.roll,
                    email: student.email,
                    batch: student.batch,
                    created_at: Utc::now(),
                });
                Ok(stored.clone())
            }
        }
    }

    async fn delete_student(&self, name: &str) -> Result<bool, AppError> {
        let mut students = self.students.write().map_err(poisoned)?;
        Ok(students.remove(name).is_some())
    }

    async fn upsert_day(
        &self,
        date: NaiveDate,
        records: Vec<AttendanceEntry>,
    ) -> Result<AttendanceDay, AppError> {
        let mut days = self.days.write().map_err(poisoned)?;
        days.insert(date, records.clone());
        Ok(AttendanceDay { date, records })
    }

    async fn find_day(&self, date: NaiveDate) -> Result<Option<AttendanceDay>, AppError> {
        let days = self.days.read().map_err(poisoned)?;
        Ok(days.get(&date).map(|records| AttendanceDay {
            date,
            records: records.clone(),
        }))
    }

    async fn days_for_student(&self, name: &str) -> Result<Vec<AttendanceDay>, AppError> {
        let days = self.days.read().map_err(poisoned)?;
        Ok(days
            .iter()
            .filter(|(_, records)| records.iter().any(|entry| entry.name == name))
            .map(|(date, records)| AttendanceDay {
                date: *date,
                records: records.clone(),
            })
            .collect())
    }
}
