use crate::error::HrmError;
use crate::model::attendance::Attendance;
use crate::model::work_break::Break;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;

/// Persistence contract for attendance rows. Single-row reads come back
/// with their breaks loaded so work-hour recomputation always sees them.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, user_id: u64, date: NaiveDate) -> Result<Attendance, HrmError>;
    async fn get_by_id(&self, id: u64) -> Result<Attendance, HrmError>;
    async fn get_by_user_and_date(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, HrmError>;
    async fn get_by_user_range(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Attendance>, HrmError>;
    async fn get_all(&self) -> Result<Vec<Attendance>, HrmError>;
    async fn get_last_n_by_user(&self, user_id: u64, limit: u32)
        -> Result<Vec<Attendance>, HrmError>;
    async fn update(&self, attendance: &Attendance) -> Result<(), HrmError>;
    async fn delete(&self, id: u64) -> Result<(), HrmError>;
}

pub struct MySqlAttendanceRepository {
    pool: MySqlPool,
}

impl MySqlAttendanceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn load_breaks(&self, attendance: &mut Attendance) -> Result<(), HrmError> {
        attendance.breaks = sqlx::query_as::<_, Break>(
            "SELECT * FROM breaks WHERE attendance_id = ? ORDER BY start_time",
        )
        .bind(attendance.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AttendanceRepository for MySqlAttendanceRepository {
    async fn create(&self, user_id: u64, date: NaiveDate) -> Result<Attendance, HrmError> {
        let result = sqlx::query("INSERT INTO attendances (user_id, date) VALUES (?, ?)")
            .bind(user_id)
            .bind(date)
            .execute(&self.pool)
            .await?;

        self.get_by_id(result.last_insert_id()).await
    }

    async fn get_by_id(&self, id: u64) -> Result<Attendance, HrmError> {
        let mut attendance =
            sqlx::query_as::<_, Attendance>("SELECT * FROM attendances WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(HrmError::AttendanceNotFound)?;

        self.load_breaks(&mut attendance).await?;
        Ok(attendance)
    }

    async fn get_by_user_and_date(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, HrmError> {
        let attendance = sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances WHERE user_id = ? AND date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        match attendance {
            Some(mut attendance) => {
                self.load_breaks(&mut attendance).await?;
                Ok(Some(attendance))
            }
            None => Ok(None),
        }
    }

    async fn get_by_user_range(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Attendance>, HrmError> {
        let rows = sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances WHERE user_id = ? AND date BETWEEN ? AND ? ORDER BY date",
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_all(&self) -> Result<Vec<Attendance>, HrmError> {
        let rows = sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances ORDER BY date DESC, user_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_last_n_by_user(
        &self,
        user_id: u64,
        limit: u32,
    ) -> Result<Vec<Attendance>, HrmError> {
        let rows = sqlx::query_as::<_, Attendance>(
            "SELECT * FROM attendances WHERE user_id = ? ORDER BY date DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), HrmError> {
        let result = sqlx::query(
            "UPDATE attendances SET check_in_time = ?, check_out_time = ?, total_work_hours = ? \
             WHERE id = ?",
        )
        .bind(attendance.check_in_time)
        .bind(attendance.check_out_time)
        .bind(attendance.total_work_hours)
        .bind(attendance.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::AttendanceNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let result = sqlx::query("DELETE FROM attendances WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HrmError::AttendanceNotFound);
        }
        Ok(())
    }
}
