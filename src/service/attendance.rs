use crate::error::HrmError;
use crate::model::attendance::Attendance;
use crate::repository::{AttendanceRepository, UserRepository};
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

/// Owns the check-in/check-out state machine and work-hour bookkeeping
/// for a single user-day.
pub struct AttendanceService {
    attendance_repo: Arc<dyn AttendanceRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AttendanceService {
    pub fn new(
        attendance_repo: Arc<dyn AttendanceRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            attendance_repo,
            user_repo,
        }
    }

    /// Idempotent: an existing row for (user, date) is returned as-is.
    pub async fn create_attendance(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<Attendance, HrmError> {
        self.user_repo.get_by_id(user_id).await?;

        if let Some(existing) = self
            .attendance_repo
            .get_by_user_and_date(user_id, date)
            .await?
        {
            return Ok(existing);
        }

        self.attendance_repo.create(user_id, date).await
    }

    pub async fn check_in(&self, user_id: u64, date: NaiveDate) -> Result<Attendance, HrmError> {
        self.user_repo.get_by_id(user_id).await?;

        let mut attendance = match self
            .attendance_repo
            .get_by_user_and_date(user_id, date)
            .await?
        {
            Some(attendance) => attendance,
            None => self.attendance_repo.create(user_id, date).await?,
        };

        if attendance.is_checked_in() {
            return Err(HrmError::AlreadyCheckedIn);
        }

        attendance.check_in_time = Some(Utc::now());
        self.attendance_repo.update(&attendance).await?;

        info!(user_id, %date, "checked in");
        Ok(attendance)
    }

    /// Check-out never creates the day's row; the user must have one.
    pub async fn check_out(&self, user_id: u64, date: NaiveDate) -> Result<Attendance, HrmError> {
        self.user_repo.get_by_id(user_id).await?;

        let mut attendance = self
            .attendance_repo
            .get_by_user_and_date(user_id, date)
            .await?
            .ok_or(HrmError::AttendanceNotFound)?;

        if attendance.is_checked_out() {
            return Err(HrmError::AlreadyCheckedOut);
        }
        if !attendance.is_checked_in() {
            return Err(HrmError::NotCheckedIn);
        }

        attendance.check_out_time = Some(Utc::now());
        attendance.calculate_work_hours();
        self.attendance_repo.update(&attendance).await?;

        info!(user_id, %date, hours = attendance.total_work_hours, "checked out");
        Ok(attendance)
    }

    pub async fn get_attendance_by_id(&self, id: u64) -> Result<Attendance, HrmError> {
        self.attendance_repo.get_by_id(id).await
    }

    pub async fn get_user_attendance(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<Attendance, HrmError> {
        self.user_repo.get_by_id(user_id).await?;
        self.attendance_repo
            .get_by_user_and_date(user_id, date)
            .await?
            .ok_or(HrmError::AttendanceNotFound)
    }

    pub async fn get_user_attendance_range(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Attendance>, HrmError> {
        self.user_repo.get_by_id(user_id).await?;
        self.attendance_repo
            .get_by_user_range(user_id, start, end)
            .await
    }

    pub async fn get_all_attendance(&self) -> Result<Vec<Attendance>, HrmError> {
        self.attendance_repo.get_all().await
    }

    pub async fn get_last_n_by_user(
        &self,
        user_id: u64,
        limit: u32,
    ) -> Result<Vec<Attendance>, HrmError> {
        self.user_repo.get_by_id(user_id).await?;
        self.attendance_repo.get_last_n_by_user(user_id, limit).await
    }

    /// Applies a manual correction. Omitted timestamps keep their stored
    /// values; work hours are recomputed either way.
    pub async fn update_attendance(
        &self,
        id: u64,
        check_in_time: Option<DateTime<Utc>>,
        check_out_time: Option<DateTime<Utc>>,
    ) -> Result<Attendance, HrmError> {
        let mut attendance = self.attendance_repo.get_by_id(id).await?;

        if check_in_time.is_some() {
            attendance.check_in_time = check_in_time;
        }
        if check_out_time.is_some() {
            attendance.check_out_time = check_out_time;
        }

        attendance.calculate_work_hours();
        self.attendance_repo.update(&attendance).await?;
        Ok(attendance)
    }

    pub async fn delete_attendance(&self, id: u64) -> Result<(), HrmError> {
        self.attendance_repo.delete(id).await
    }
}
