use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

// Name columns are VARCHAR(191) so the utf8mb4 keys stay within InnoDB's index
// limit; handlers cap names at `model::student::MAX_NAME_LEN` to match.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS students (
        name VARCHAR(191) NOT NULL,
        roll TEXT NULL,
        email TEXT NULL,
        batch TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        PRIMARY KEY (name)
    ) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance_days (
        date DATE NOT NULL,
        PRIMARY KEY (date)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance_records (
        date DATE NOT NULL,
        position INT UNSIGNED NOT NULL,
        name VARCHAR(191) NOT NULL,
        status VARCHAR(16) NOT NULL,
        PRIMARY KEY (date, position),
        KEY idx_attendance_records_name (name),
        CONSTRAINT fk_attendance_records_day FOREIGN KEY (date)
            REFERENCES attendance_days (date) ON DELETE CASCADE
    ) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin
    "#,
];

/// Builds the process-wide pool. No connection is opened until the first query,
/// after which connections are reused across requests.
pub fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new().connect_lazy(database_url)
}

/// Creates any missing tables. Run once per store, on the first operation that
/// reaches the database, so a database outage at boot does not stop the server.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}
