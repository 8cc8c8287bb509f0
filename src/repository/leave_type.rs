use crate::error::HrmError;
use crate::model::leave::LeaveTypeName;
use crate::model::leave_type::{LeaveType, NewLeaveType};
use async_trait::async_trait;
use sqlx::MySqlPool;

#[async_trait]
pub trait LeaveTypeRepository: Send + Sync {
    async fn create(&self, new: &NewLeaveType) -> Result<LeaveType, HrmError>;
    async fn get_by_id(&self, id: u64) -> Result<LeaveType, HrmError>;
    async fn get_by_code(&self, code: LeaveTypeName) -> Result<Option<LeaveType>, HrmError>;
    async fn get_all(&self) -> Result<Vec<LeaveType>, HrmError>;
    async fn get_active(&self) -> Result<Vec<LeaveType>, HrmError>;
    async fn update(&self, leave_type: &LeaveType) -> Result<(), HrmError>;
    async fn delete(&self, id: u64) -> Result<(), HrmError>;
    /// Number of leave rows referencing the given catalog code.
    async fn count_leaves_for(&self, code: LeaveTypeName) -> Result<i64, HrmError>;
}

pub struct MySqlLeaveTypeRepository {
    pool: MySqlPool,
}

impl MySqlLeaveTypeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaveTypeRepository for MySqlLeaveTypeRepository {
    async fn create(&self, new: &NewLeaveType) -> Result<LeaveType, HrmError> {
        let result = sqlx::query(
            "INSERT INTO leave_types \
             (code, name, description, default_days_per_year, is_active, requires_approval, \
              color, icon) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new.code)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.default_days_per_year)
        .bind(new.is_active)
        .bind(new.requires_approval)
        .bind(&new.color)
        .bind(&new.icon)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_id()).await
    }

    async fn get_by_id(&self, id: u64) -> Result<LeaveType, HrmError> {
        sqlx::query_as::<_, LeaveType>("SELECT * FROM leave_types WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(HrmError::LeaveTypeNotFound)
    }

    async fn get_by_code(&self, code: LeaveTypeName) -> Result<Option<LeaveType>, HrmError> {
        let leave_type =
            sqlx::query_as::<_, LeaveType>("SELECT * FROM leave_types WHERE code = ?")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(leave_type)
    }

    async fn get_all(&self) -> Result<Vec<LeaveType>, HrmError> {
        let rows = sqlx::query_as::<_, LeaveType>("SELECT * FROM leave_types ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_active(&self) -> Result<Vec<LeaveType>, HrmError> {
        let rows = sqlx::query_as::<_, LeaveType>(
            "SELECT * FROM leave_types WHERE is_active = TRUE ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, leave_type: &LeaveType) -> Result<(), HrmError> {
        let result = sqlx::query(
            "UPDATE leave_types SET name = ?, description = ?, default_days_per_year = ?, \
             is_active = ?, requires_approval = ?, color = ?, icon = ? WHERE id = ?",
        )
        .bind(&leave_type.name)
        .bind(&leave_type.description)
        .bind(leave_type.default_days_per_year)
        .bind(leave_type.is_active)
        .bind(leave_type.requires_approval)
        .bind(&leave_type.color)
        .bind(&leave_type.icon)
        .bind(leave_type.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::LeaveTypeNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let result = sqlx::query("DELETE FROM leave_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::LeaveTypeNotFound);
        }
        Ok(())
    }

    async fn count_leaves_for(&self, code: LeaveTypeName) -> Result<i64, HrmError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leaves WHERE leave_type = ?")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
