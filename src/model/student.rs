use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest student name, in characters, that the name-keyed columns hold.
pub const MAX_NAME_LEN: usize = 191;

/// True when `name` fits the name-keyed columns.
pub fn name_fits(name: &str) -> bool {
    name.chars().count() <= MAX_NAME_LEN
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "name": "Ayesha Rahman",
        "roll": "MIT-07",
        "email": "ayesha@example.com",
        "batch": "JNU MIT 1st Year",
        "created_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct Student {
    #[schema(example = "Ayesha Rahman")]
    pub name: String,

    #[schema(example = "MIT-07", nullable = true)]
    pub roll: Option<String>,

    #[schema(example = "ayesha@example.com", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "JNU MIT 1st Year")]
    pub batch: String,

    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// A validated roster entry, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub roll: Option<String>,
    pub email: Option<String>,
    pub batch: String,
}
