use crate::error::HrmError;
use crate::model::work_break::Break;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

#[async_trait]
pub trait BreakRepository: Send + Sync {
    async fn create(
        &self,
        attendance_id: u64,
        start_time: DateTime<Utc>,
        reason: &str,
    ) -> Result<Break, HrmError>;
    async fn get_by_id(&self, id: u64) -> Result<Break, HrmError>;
    async fn get_by_attendance(&self, attendance_id: u64) -> Result<Vec<Break>, HrmError>;
    /// The open break (end time NULL) for an attendance, if one exists.
    async fn get_active_by_attendance(&self, attendance_id: u64)
        -> Result<Option<Break>, HrmError>;
    async fn get_all(&self) -> Result<Vec<Break>, HrmError>;
    async fn update(&self, break_item: &Break) -> Result<(), HrmError>;
    async fn delete(&self, id: u64) -> Result<(), HrmError>;
}

pub struct MySqlBreakRepository {
    pool: MySqlPool,
}

impl MySqlBreakRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BreakRepository for MySqlBreakRepository {
    async fn create(
        &self,
        attendance_id: u64,
        start_time: DateTime<Utc>,
        reason: &str,
    ) -> Result<Break, HrmError> {
        let result = sqlx::query(
            "INSERT INTO breaks (attendance_id, start_time, reason) VALUES (?, ?, ?)",
        )
        .bind(attendance_id)
        .bind(start_time)
        .bind(reason)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_id()).await
    }

    async fn get_by_id(&self, id: u64) -> Result<Break, HrmError> {
        sqlx::query_as::<_, Break>("SELECT * FROM breaks WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(HrmError::BreakNotFound)
    }

    async fn get_by_attendance(&self, attendance_id: u64) -> Result<Vec<Break>, HrmError> {
        let breaks = sqlx::query_as::<_, Break>(
            "SELECT * FROM breaks WHERE attendance_id = ? ORDER BY start_time",
        )
        .bind(attendance_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(breaks)
    }

    async fn get_active_by_attendance(
        &self,
        attendance_id: u64,
    ) -> Result<Option<Break>, HrmError> {
        let active = sqlx::query_as::<_, Break>(
            "SELECT * FROM breaks WHERE attendance_id = ? AND end_time IS NULL LIMIT 1",
        )
        .bind(attendance_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(active)
    }

    async fn get_all(&self) -> Result<Vec<Break>, HrmError> {
        let breaks = sqlx::query_as::<_, Break>("SELECT * FROM breaks ORDER BY start_time DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(breaks)
    }

    async fn update(&self, break_item: &Break) -> Result<(), HrmError> {
        let result = sqlx::query(
            "UPDATE breaks SET start_time = ?, end_time = ?, duration_minutes = ?, reason = ? \
             WHERE id = ?",
        )
        .bind(break_item.start_time)
        .bind(break_item.end_time)
        .bind(break_item.duration_minutes)
        .bind(&break_item.reason)
        .bind(break_item.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::BreakNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let result = sqlx::query("DELETE FROM breaks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::BreakNotFound);
        }
        Ok(())
    }
}
