//! In-memory repository doubles backing the engine tests. One shared
//! store mimics the database so cross-entity effects (break mutations
//! recomputing attendance hours) are observable.

use crate::error::HrmError;
use crate::model::attendance::Attendance;
use crate::model::leave::{Leave, LeaveStatus, LeaveTypeName};
use crate::model::leave_type::{LeaveType, NewLeaveType};
use crate::model::user::User;
use crate::model::work_break::Break;
use crate::repository::{
    AttendanceRepository, BreakRepository, LeaveRepository, LeaveTypeRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MemStore {
    pub users: Mutex<Vec<User>>,
    pub attendances: Mutex<Vec<Attendance>>,
    pub breaks: Mutex<Vec<Break>>,
    pub leaves: Mutex<Vec<Leave>>,
    pub leave_types: Mutex<Vec<LeaveType>>,
    next_id: AtomicU64,
}

impl MemStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn add_user(&self, name: &str, email: &str) -> User {
        let user = User {
            id: self.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: "hashed".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    /// Inserts a leave row directly, bypassing engine validation.
    pub fn add_leave(
        &self,
        user_id: u64,
        leave_type: LeaveTypeName,
        status: LeaveStatus,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Leave {
        let leave = Leave {
            id: self.next_id(),
            user_id,
            leave_type,
            status,
            start_date: start,
            end_date: end,
            days: ((end - start).num_days() + 1) as f64,
            reason: "seeded".to_string(),
            description: None,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            reject_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.leaves.lock().unwrap().push(leave.clone());
        leave
    }

    fn attendance_with_breaks(&self, mut attendance: Attendance) -> Attendance {
        attendance.breaks = self
            .breaks
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.attendance_id == attendance.id)
            .cloned()
            .collect();
        attendance
    }
}

pub struct MemUserRepo(pub Arc<MemStore>);

#[async_trait]
impl UserRepository for MemUserRepo {
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, HrmError> {
        let user = User {
            id: self.0.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.0.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: u64) -> Result<User, HrmError> {
        self.0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(HrmError::UserNotFound)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, HrmError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<(), HrmError> {
        let mut users = self.0.users.lock().unwrap();
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(HrmError::UserNotFound)?;
        *existing = user.clone();
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let mut users = self.0.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(HrmError::UserNotFound);
        }
        Ok(())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<User>, HrmError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

pub struct MemAttendanceRepo(pub Arc<MemStore>);

#[async_trait]
impl AttendanceRepository for MemAttendanceRepo {
    async fn create(&self, user_id: u64, date: NaiveDate) -> Result<Attendance, HrmError> {
        let attendance = Attendance {
            id: self.0.next_id(),
            user_id,
            date,
            check_in_time: None,
            check_out_time: None,
            total_work_hours: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            breaks: Vec::new(),
        };
        self.0.attendances.lock().unwrap().push(attendance.clone());
        Ok(attendance)
    }

    async fn get_by_id(&self, id: u64) -> Result<Attendance, HrmError> {
        let attendance = self
            .0
            .attendances
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(HrmError::AttendanceNotFound)?;
        Ok(self.0.attendance_with_breaks(attendance))
    }

    async fn get_by_user_and_date(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, HrmError> {
        let attendance = self
            .0
            .attendances
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user_id == user_id && a.date == date)
            .cloned();
        Ok(attendance.map(|a| self.0.attendance_with_breaks(a)))
    }

    async fn get_by_user_range(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Attendance>, HrmError> {
        Ok(self
            .0
            .attendances
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id && a.date >= start && a.date <= end)
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<Attendance>, HrmError> {
        Ok(self.0.attendances.lock().unwrap().clone())
    }

    async fn get_last_n_by_user(
        &self,
        user_id: u64,
        limit: u32,
    ) -> Result<Vec<Attendance>, HrmError> {
        let mut rows: Vec<Attendance> = self
            .0
            .attendances
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), HrmError> {
        let mut attendances = self.0.attendances.lock().unwrap();
        let existing = attendances
            .iter_mut()
            .find(|a| a.id == attendance.id)
            .ok_or(HrmError::AttendanceNotFound)?;
        existing.check_in_time = attendance.check_in_time;
        existing.check_out_time = attendance.check_out_time;
        existing.total_work_hours = attendance.total_work_hours;
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let mut attendances = self.0.attendances.lock().unwrap();
        let before = attendances.len();
        attendances.retain(|a| a.id != id);
        if attendances.len() == before {
            return Err(HrmError::AttendanceNotFound);
        }
        Ok(())
    }
}

pub struct MemBreakRepo(pub Arc<MemStore>);

#[async_trait]
impl BreakRepository for MemBreakRepo {
    async fn create(
        &self,
        attendance_id: u64,
        start_time: DateTime<Utc>,
        reason: &str,
    ) -> Result<Break, HrmError> {
        let break_item = Break {
            id: self.0.next_id(),
            attendance_id,
            start_time,
            end_time: None,
            duration_minutes: 0.0,
            reason: reason.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.0.breaks.lock().unwrap().push(break_item.clone());
        Ok(break_item)
    }

    async fn get_by_id(&self, id: u64) -> Result<Break, HrmError> {
        self.0
            .breaks
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(HrmError::BreakNotFound)
    }

    async fn get_by_attendance(&self, attendance_id: u64) -> Result<Vec<Break>, HrmError> {
        Ok(self
            .0
            .breaks
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.attendance_id == attendance_id)
            .cloned()
            .collect())
    }

    async fn get_active_by_attendance(
        &self,
        attendance_id: u64,
    ) -> Result<Option<Break>, HrmError> {
        Ok(self
            .0
            .breaks
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.attendance_id == attendance_id && b.end_time.is_none())
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<Break>, HrmError> {
        Ok(self.0.breaks.lock().unwrap().clone())
    }

    async fn update(&self, break_item: &Break) -> Result<(), HrmError> {
        let mut breaks = self.0.breaks.lock().unwrap();
        let existing = breaks
            .iter_mut()
            .find(|b| b.id == break_item.id)
            .ok_or(HrmError::BreakNotFound)?;
        *existing = break_item.clone();
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let mut breaks = self.0.breaks.lock().unwrap();
        let before = breaks.len();
        breaks.retain(|b| b.id != id);
        if breaks.len() == before {
            return Err(HrmError::BreakNotFound);
        }
        Ok(())
    }
}

pub struct MemLeaveRepo(pub Arc<MemStore>);

#[async_trait]
impl LeaveRepository for MemLeaveRepo {
    async fn create(&self, leave: &Leave) -> Result<Leave, HrmError> {
        let mut stored = leave.clone();
        stored.id = self.0.next_id();
        self.0.leaves.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn get_by_id(&self, id: u64) -> Result<Leave, HrmError> {
        self.0
            .leaves
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(HrmError::LeaveNotFound)
    }

    async fn get_by_user(&self, user_id: u64) -> Result<Vec<Leave>, HrmError> {
        Ok(self
            .0
            .leaves
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_overlapping(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Leave>, HrmError> {
        Ok(self
            .0
            .leaves
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id && l.start_date <= end && l.end_date >= start)
            .cloned()
            .collect())
    }

    async fn get_by_status(&self, status: LeaveStatus) -> Result<Vec<Leave>, HrmError> {
        Ok(self
            .0
            .leaves
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.status == status)
            .cloned()
            .collect())
    }

    async fn get_all(&self) -> Result<Vec<Leave>, HrmError> {
        Ok(self.0.leaves.lock().unwrap().clone())
    }

    async fn get_approved_in_year(
        &self,
        user_id: u64,
        year: i32,
    ) -> Result<Vec<Leave>, HrmError> {
        Ok(self
            .0
            .leaves
            .lock()
            .unwrap()
            .iter()
            .filter(|l| {
                l.user_id == user_id
                    && l.status == LeaveStatus::Approved
                    && l.start_date.year() == year
            })
            .cloned()
            .collect())
    }

    async fn update(&self, leave: &Leave) -> Result<(), HrmError> {
        let mut leaves = self.0.leaves.lock().unwrap();
        let existing = leaves
            .iter_mut()
            .find(|l| l.id == leave.id)
            .ok_or(HrmError::LeaveNotFound)?;
        *existing = leave.clone();
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let mut leaves = self.0.leaves.lock().unwrap();
        let before = leaves.len();
        leaves.retain(|l| l.id != id);
        if leaves.len() == before {
            return Err(HrmError::LeaveNotFound);
        }
        Ok(())
    }
}

pub struct MemLeaveTypeRepo(pub Arc<MemStore>);

#[async_trait]
impl LeaveTypeRepository for MemLeaveTypeRepo {
    async fn create(&self, new: &NewLeaveType) -> Result<LeaveType, HrmError> {
        let leave_type = LeaveType {
            id: self.0.next_id(),
            code: new.code,
            name: new.name.clone(),
            description: new.description.clone(),
            default_days_per_year: new.default_days_per_year,
            is_active: new.is_active,
            requires_approval: new.requires_approval,
            color: new.color.clone(),
            icon: new.icon.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.0.leave_types.lock().unwrap().push(leave_type.clone());
        Ok(leave_type)
    }

    async fn get_by_id(&self, id: u64) -> Result<LeaveType, HrmError> {
        self.0
            .leave_types
            .lock()
            .unwrap()
            .iter()
            .find(|lt| lt.id == id)
            .cloned()
            .ok_or(HrmError::LeaveTypeNotFound)
    }

    async fn get_by_code(&self, code: LeaveTypeName) -> Result<Option<LeaveType>, HrmError> {
        Ok(self
            .0
            .leave_types
            .lock()
            .unwrap()
            .iter()
            .find(|lt| lt.code == code)
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<LeaveType>, HrmError> {
        Ok(self.0.leave_types.lock().unwrap().clone())
    }

    async fn get_active(&self) -> Result<Vec<LeaveType>, HrmError> {
        Ok(self
            .0
            .leave_types
            .lock()
            .unwrap()
            .iter()
            .filter(|lt| lt.is_active)
            .cloned()
            .collect())
    }

    async fn update(&self, leave_type: &LeaveType) -> Result<(), HrmError> {
        let mut leave_types = self.0.leave_types.lock().unwrap();
        let existing = leave_types
            .iter_mut()
            .find(|lt| lt.id == leave_type.id)
            .ok_or(HrmError::LeaveTypeNotFound)?;
        *existing = leave_type.clone();
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), HrmError> {
        let mut leave_types = self.0.leave_types.lock().unwrap();
        let before = leave_types.len();
        leave_types.retain(|lt| lt.id != id);
        if leave_types.len() == before {
            return Err(HrmError::LeaveTypeNotFound);
        }
        Ok(())
    }

    async fn count_leaves_for(&self, code: LeaveTypeName) -> Result<i64, HrmError> {
        Ok(self
            .0
            .leaves
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.leave_type == code)
            .count() as i64)
    }
}
