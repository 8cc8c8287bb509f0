use crate::error::HrmError;
use crate::model::work_break::Break;
use crate::repository::{AttendanceRepository, BreakRepository};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Owns break start/end transitions inside an attendance day. Every
/// mutation ends with the parent attendance's work hours recomputed so
/// the derived field never goes stale.
pub struct BreakService {
    break_repo: Arc<dyn BreakRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,
}

impl BreakService {
    pub fn new(
        break_repo: Arc<dyn BreakRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
    ) -> Self {
        Self {
            break_repo,
            attendance_repo,
        }
    }

    pub async fn create_break(
        &self,
        attendance_id: u64,
        start_time: DateTime<Utc>,
        reason: &str,
    ) -> Result<Break, HrmError> {
        self.attendance_repo.get_by_id(attendance_id).await?;

        if self
            .break_repo
            .get_active_by_attendance(attendance_id)
            .await?
            .is_some()
        {
            return Err(HrmError::BreakInProgress);
        }

        let break_item = self
            .break_repo
            .create(attendance_id, start_time, reason)
            .await?;

        self.recompute_parent_hours(attendance_id).await?;

        info!(attendance_id, break_id = break_item.id, "break started");
        Ok(break_item)
    }

    pub async fn end_break(
        &self,
        break_id: u64,
        end_time: DateTime<Utc>,
    ) -> Result<Break, HrmError> {
        let mut break_item = self.break_repo.get_by_id(break_id).await?;

        if break_item.is_ended() {
            return Err(HrmError::BreakAlreadyEnded);
        }
        if end_time < break_item.start_time {
            return Err(HrmError::InvalidBreakTime);
        }

        break_item.end_time = Some(end_time);
        break_item.calculate_duration();
        self.break_repo.update(&break_item).await?;

        self.recompute_parent_hours(break_item.attendance_id).await?;

        info!(
            break_id,
            minutes = break_item.duration_minutes,
            "break ended"
        );
        Ok(break_item)
    }

    pub async fn get_break_by_id(&self, id: u64) -> Result<Break, HrmError> {
        self.break_repo.get_by_id(id).await
    }

    pub async fn get_breaks_by_attendance_id(
        &self,
        attendance_id: u64,
    ) -> Result<Vec<Break>, HrmError> {
        self.attendance_repo.get_by_id(attendance_id).await?;
        self.break_repo.get_by_attendance(attendance_id).await
    }

    pub async fn get_all_breaks(&self) -> Result<Vec<Break>, HrmError> {
        self.break_repo.get_all().await
    }

    /// Edits a break. Omitted fields keep their stored values; duration
    /// and the parent's hours are recomputed afterwards.
    pub async fn update_break(
        &self,
        id: u64,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        reason: Option<String>,
    ) -> Result<Break, HrmError> {
        let mut break_item = self.break_repo.get_by_id(id).await?;

        if let Some(start) = start_time {
            break_item.start_time = start;
        }
        if end_time.is_some() {
            break_item.end_time = end_time;
        }
        if let Some(reason) = reason {
            break_item.reason = reason;
        }
        if let Some(end) = break_item.end_time {
            if end < break_item.start_time {
                return Err(HrmError::InvalidBreakTime);
            }
        }

        break_item.calculate_duration();
        self.break_repo.update(&break_item).await?;

        self.recompute_parent_hours(break_item.attendance_id).await?;
        Ok(break_item)
    }

    pub async fn delete_break(&self, id: u64) -> Result<(), HrmError> {
        let break_item = self.break_repo.get_by_id(id).await?;
        let attendance_id = break_item.attendance_id;

        self.break_repo.delete(id).await?;
        self.recompute_parent_hours(attendance_id).await
    }

    /// Re-reads the attendance (with its current breaks) and persists
    /// the freshly computed total.
    async fn recompute_parent_hours(&self, attendance_id: u64) -> Result<(), HrmError> {
        let mut attendance = self.attendance_repo.get_by_id(attendance_id).await?;
        attendance.calculate_work_hours();
        self.attendance_repo.update(&attendance).await
    }
}
