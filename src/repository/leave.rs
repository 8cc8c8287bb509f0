use crate::error::HrmError;
use crate::model::leave::{Leave, LeaveStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

#[async_trait]
pub trait LeaveRepository: Send + Sync {
    /// Persists a pending draft and returns the stored row.
    async fn create(&self, leave: &Leave) -> Result<Leave, HrmError>;
    async fn get_by_id(&self, id: u64) -> Result<Leave, HrmError>;
    async fn get_by_user(&self, user_id: u64) -> Result<Vec<Leave>, HrmError>;
    /// Leaves of a user whose [start_date, end_date] intersects the given
    /// inclusive range, regardless of status.
    async fn get_overlapping(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Leave>, HrmError>;
    async fn get_by_status(&self, status: LeaveStatus) -> Result<Vec<Leave>, HrmError>;
    async fn get_all(&self) -> Result<Vec<Leave>, HrmError>;
    /// Approved leaves of a user whose start date falls in the given year.
    async fn get_approved_in_year(&self, user_id: u64, year: i32)
        -> Result<Vec<Leave>, HrmError>;
    async fn update(&self, leave: &Leave) -> Result<(), HrmError>;
    async fn delete(&self, id: u64) -> Result<(), HrmError>;
}

pub struct MySqlLeaveRepository {
    pool: MySqlPool,
}

impl MySqlLeaveRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveRepository for MySqlLeaveRepository {
    async fn create(&self, leave: &Leave) -> Result<Leave, HrmError> {
        let result = sqlx::query(
            "INSERT INTO leaves \
             (user_id, leave_type, status, start_date, end_date, days, reason, description) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(leave.user_id)
        .bind(leave.leave_type)
        .bind(leave.status)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(leave.days)
        .bind(&leave.reason)
        .bind(&leave.description)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_id()).await
    }

    async fn get_by_id(&self, id: u64) -> Result<Leave, HrmError> {
        sqlx::query_as::<_, Leave>("SELECT * FROM leaves WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(HrmError::LeaveNotFound)
    }

    async fn get_by_user(&self, user_id: u64) -> Result<Vec<Leave>, HrmError> {
        let leaves = sqlx::query_as::<_, Leave>(
            "SELECT * FROM leaves WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(leaves)
    }

    async fn get_overlapping(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Leave>, HrmError> {
        // Two closed ranges intersect iff each starts before the other ends.
        let leaves = sqlx::query_as::<_, Leave>(
            "SELECT * FROM leaves WHERE user_id = ? AND start_date <= ? AND end_date >= ? \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(end)
        .bind(start)
        .fetch_all(&self.pool)
        .await?;
        Ok(leaves)
    }

    async fn get_by_status(&self, status: LeaveStatus) -> Result<Vec<Leave>, HrmError> {
        let leaves = sqlx::query_as::<_, Leave>(
            "SELECT * FROM leaves WHERE status = ? ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(leaves)
    }

    async fn get_all(&self) -> Result<Vec<Leave>, HrmError> {
        let leaves =
            sqlx::query_as::<_, Leave>("SELECT * FROM leaves ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(leaves)
    }

    async fn get_approved_in_year(
        &self,
        user_id: u64,
        year: i32,
    ) -> Result<Vec<Leave>, HrmError> {
        let leaves = sqlx::query_as::<_, Leave>(
            "SELECT * FROM leaves WHERE user_id = ? AND status = 'approved' \
             AND start_date BETWEEN ? AND ?",
        )
        .bind(user_id)
        .bind(NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default())
        .bind(NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or_default())
        .fetch_all(&self.pool)
        .await?;
        Ok(leaves)
    }

    async fn update(&self, leave: &Leave) -> Result<(), HrmError> {
        let result = sqlx::query(
            "UPDATE leaves SET leave_type = ?, status = ?, start_date = ?, end_date = ?, \
             days = ?, reason = ?, description = ?, approved_by = ?, approved_at = ?, \
             rejected_by = ?, rejected_at = ?, reject_reason = ? WHERE id = ?",
        )
        .bind(leave.leave_type)
        .bind(leave.status)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(leave.days)
        .bind(&leave.reason)
        .bind(&leave.description)
        .bind(leave.approved_by)
        .bind(leave.approved_at)
        .bind(leave.rejected_by)
        .bind(leave.rejected_at)
        .bind(&leave.reject_reason)
        .bind(leave.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::LeaveNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let result = sqlx::query("DELETE FROM leaves WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::LeaveNotFound);
        }
        Ok(())
    }
}
