//! Scan log repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_entity::scan::{CreateScanLog, ScanLog};

/// Append-only access to the door scan log.
#[async_trait]
pub trait ScanLogStore: Send + Sync + 'static {
    /// Append a scan record.
    async fn append(&self, data: &CreateScanLog) -> AppResult<ScanLog>;

    /// List the most recent scans for a cafe, newest first.
    async fn list_recent(&self, cafe_id: Uuid, limit: u32) -> AppResult<Vec<ScanLog>>;
}

/// PostgreSQL-backed scan log store.
#[derive(Debug, Clone)]
pub struct PgScanLogRepository {
    pool: PgPool,
}

impl PgScanLogRepository {
    /// Create a new scan log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScanLogStore for PgScanLogRepository {
    async fn append(&self, data: &CreateScanLog) -> AppResult<ScanLog> {
        sqlx::query_as::<_, ScanLog>(
            "INSERT INTO scan_logs (cafe_id, scanned_code, booking_id, outcome, scanned_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.cafe_id)
        .bind(&data.scanned_code)
        .bind(data.booking_id)
        .bind(data.outcome)
        .bind(data.scanned_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append scan log", e))
    }

    async fn list_recent(&self, cafe_id: Uuid, limit: u32) -> AppResult<Vec<ScanLog>> {
        sqlx::query_as::<_, ScanLog>(
            "SELECT * FROM scan_logs WHERE cafe_id = $1 ORDER BY scanned_at DESC LIMIT $2",
        )
        .bind(cafe_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list scans", e))
    }
}
