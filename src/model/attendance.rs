use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString, AsRefStr,
)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEntry {
    #[schema(example = "Ayesha Rahman")]
    pub name: String,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

/// One calendar day of the ledger. `records` keeps the order it was submitted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "date": "2026-01-05",
    "records": [
        { "name": "Ayesha Rahman", "status": "Present" },
        { "name": "Tanvir Hasan", "status": "Absent" }
    ]
}))]
pub struct AttendanceDay {
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    pub records: Vec<AttendanceEntry>,
}

impl AttendanceDay {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            records: Vec::new(),
        }
    }

    /// First entry for `name`, if the day has one.
    pub fn status_of(&self, name: &str) -> Option<AttendanceStatus> {
        self.records
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Present")]
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "name": "Ayesha Rahman",
    "present": 2,
    "total": 3,
    "percentage": 66.67,
    "history": [
        { "date": "2026-01-05", "status": "Present" },
        { "date": "2026-01-06", "status": "Present" },
        { "date": "2026-01-07", "status": "Absent" }
    ]
}))]
pub struct AttendanceSummary {
    pub name: String,
    pub present: u32,
    pub total: u32,
    pub percentage: f64,
    pub history: Vec<HistoryEntry>,
}
