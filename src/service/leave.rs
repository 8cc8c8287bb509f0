use crate::error::HrmError;
use crate::model::leave::{calculate_leave_days, Leave, LeaveStatus, LeaveTypeName};
use crate::repository::{LeaveRepository, UserRepository};
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::info;

/// Draft fields for a new or updated leave request.
#[derive(Debug, Clone)]
pub struct LeaveDraft {
    pub leave_type: LeaveTypeName,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub description: Option<String>,
}

/// Owns the leave lifecycle: pending → approved/rejected, with
/// cancellation allowed from pending or approved by the owner only.
pub struct LeaveService {
    leave_repo: Arc<dyn LeaveRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl LeaveService {
    pub fn new(leave_repo: Arc<dyn LeaveRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            leave_repo,
            user_repo,
        }
    }

    pub async fn create_leave(
        &self,
        user_id: u64,
        draft: LeaveDraft,
    ) -> Result<Leave, HrmError> {
        let now = Utc::now();
        let leave = Leave {
            id: 0,
            user_id,
            leave_type: draft.leave_type,
            status: LeaveStatus::Pending,
            start_date: draft.start_date,
            end_date: draft.end_date,
            days: calculate_leave_days(draft.start_date, draft.end_date),
            reason: draft.reason,
            description: draft.description,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            reject_reason: None,
            created_at: now,
            updated_at: now,
        };

        leave.validate(now.date_naive())?;

        let overlapping = self
            .leave_repo
            .get_overlapping(user_id, leave.start_date, leave.end_date)
            .await?;
        if overlapping.iter().any(Leave::blocks_overlap) {
            return Err(HrmError::LeaveOverlap);
        }

        let stored = self.leave_repo.create(&leave).await?;
        info!(user_id, leave_id = stored.id, days = stored.days, "leave requested");
        Ok(stored)
    }

    pub async fn get_leave_by_id(&self, id: u64) -> Result<Leave, HrmError> {
        self.leave_repo.get_by_id(id).await
    }

    pub async fn get_user_leaves(&self, user_id: u64) -> Result<Vec<Leave>, HrmError> {
        self.leave_repo.get_by_user(user_id).await
    }

    pub async fn get_user_leaves_by_date_range(
        &self,
        user_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Leave>, HrmError> {
        self.leave_repo.get_overlapping(user_id, start, end).await
    }

    pub async fn get_all_leaves(&self) -> Result<Vec<Leave>, HrmError> {
        self.leave_repo.get_all().await
    }

    pub async fn get_pending_leaves(&self) -> Result<Vec<Leave>, HrmError> {
        self.leave_repo.get_by_status(LeaveStatus::Pending).await
    }

    /// Rewrites the request fields of an existing leave. Validation and
    /// day count run again; lifecycle fields are untouched.
    pub async fn update_leave(&self, id: u64, draft: LeaveDraft) -> Result<Leave, HrmError> {
        let mut leave = self.leave_repo.get_by_id(id).await?;

        leave.leave_type = draft.leave_type;
        leave.start_date = draft.start_date;
        leave.end_date = draft.end_date;
        leave.reason = draft.reason;
        leave.description = draft.description;
        leave.days = calculate_leave_days(leave.start_date, leave.end_date);

        leave.validate(Utc::now().date_naive())?;
        self.leave_repo.update(&leave).await?;
        Ok(leave)
    }

    pub async fn delete_leave(&self, id: u64) -> Result<(), HrmError> {
        self.leave_repo.delete(id).await
    }

    /// Only a pending leave can be approved; any other status yields the
    /// same conflict regardless of what that status is.
    pub async fn approve_leave(&self, leave_id: u64, approver_id: u64) -> Result<Leave, HrmError> {
        let mut leave = self.leave_repo.get_by_id(leave_id).await?;

        if !leave.can_approve() {
            return Err(HrmError::LeaveAlreadyApproved);
        }
        self.user_repo.get_by_id(approver_id).await?;

        leave.status = LeaveStatus::Approved;
        leave.approved_by = Some(approver_id);
        leave.approved_at = Some(Utc::now());
        self.leave_repo.update(&leave).await?;

        info!(leave_id, approver_id, "leave approved");
        Ok(leave)
    }

    pub async fn reject_leave(
        &self,
        leave_id: u64,
        rejecter_id: u64,
        reason: String,
    ) -> Result<Leave, HrmError> {
        let mut leave = self.leave_repo.get_by_id(leave_id).await?;

        if !leave.can_reject() {
            return Err(HrmError::LeaveAlreadyRejected);
        }
        self.user_repo.get_by_id(rejecter_id).await?;

        leave.status = LeaveStatus::Rejected;
        leave.rejected_by = Some(rejecter_id);
        leave.rejected_at = Some(Utc::now());
        leave.reject_reason = Some(reason);
        self.leave_repo.update(&leave).await?;

        info!(leave_id, rejecter_id, "leave rejected");
        Ok(leave)
    }

    /// Only the owner may cancel, and only from pending or approved.
    pub async fn cancel_leave(&self, leave_id: u64, user_id: u64) -> Result<Leave, HrmError> {
        let mut leave = self.leave_repo.get_by_id(leave_id).await?;

        if leave.user_id != user_id {
            return Err(HrmError::Unauthorized);
        }
        if !leave.can_cancel() {
            return Err(HrmError::CannotCancelLeave);
        }

        leave.status = LeaveStatus::Cancelled;
        self.leave_repo.update(&leave).await?;

        info!(leave_id, user_id, "leave cancelled");
        Ok(leave)
    }

    /// Days of approved leave per type for the calendar year of the
    /// start date. Every known type is present, zero-filled.
    pub async fn get_user_leave_balance(
        &self,
        user_id: u64,
        year: i32,
    ) -> Result<HashMap<LeaveTypeName, f64>, HrmError> {
        let leaves = self.leave_repo.get_approved_in_year(user_id, year).await?;

        let mut balance: HashMap<LeaveTypeName, f64> =
            LeaveTypeName::iter().map(|t| (t, 0.0)).collect();
        for leave in leaves {
            *balance.entry(leave.leave_type).or_insert(0.0) += leave.days;
        }
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_support::{MemLeaveRepo, MemStore, MemUserRepo};

    fn service(store: &Arc<MemStore>) -> LeaveService {
        LeaveService::new(
            Arc::new(MemLeaveRepo(store.clone())),
            Arc::new(MemUserRepo(store.clone())),
        )
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    // Validation compares against the real clock, so drafts live far in
    // the future.
    fn vacation(start: &str, end: &str) -> LeaveDraft {
        LeaveDraft {
            leave_type: LeaveTypeName::Vacation,
            start_date: d(start),
            end_date: d(end),
            reason: "trip".to_string(),
            description: None,
        }
    }

    #[actix_web::test]
    async fn create_leave_starts_pending_with_inclusive_days() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let svc = service(&store);

        let leave = svc
            .create_leave(user.id, vacation("2099-06-10", "2099-06-12"))
            .await
            .unwrap();
        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.days, 3.0);
        assert_eq!(leave.user_id, user.id);
    }

    #[actix_web::test]
    async fn create_leave_surfaces_validation_rule() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let svc = service(&store);

        assert!(matches!(
            svc.create_leave(user.id, vacation("2099-06-12", "2099-06-10")).await,
            Err(HrmError::InvalidDateRange)
        ));
        assert!(matches!(
            svc.create_leave(user.id, vacation("2001-01-01", "2001-01-02")).await,
            Err(HrmError::LeaveDateInPast)
        ));

        let mut no_reason = vacation("2099-06-10", "2099-06-12");
        no_reason.reason = String::new();
        assert!(matches!(
            svc.create_leave(user.id, no_reason).await,
            Err(HrmError::ReasonRequired)
        ));
    }

    #[actix_web::test]
    async fn overlap_blocked_unless_cancelled_or_rejected() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let other = store.add_user("Jane", "jane@company.com");
        let svc = service(&store);

        store.add_leave(
            user.id,
            LeaveTypeName::Sick,
            LeaveStatus::Pending,
            d("2099-06-11"),
            d("2099-06-15"),
        );

        // Shares 2099-06-11..12 with the pending leave.
        assert!(matches!(
            svc.create_leave(user.id, vacation("2099-06-10", "2099-06-12")).await,
            Err(HrmError::LeaveOverlap)
        ));

        // Another user is unaffected.
        assert!(svc
            .create_leave(other.id, vacation("2099-06-10", "2099-06-12"))
            .await
            .is_ok());

        // Cancelled and rejected leaves do not block.
        store.add_leave(
            user.id,
            LeaveTypeName::Sick,
            LeaveStatus::Cancelled,
            d("2099-07-01"),
            d("2099-07-05"),
        );
        store.add_leave(
            user.id,
            LeaveTypeName::Sick,
            LeaveStatus::Rejected,
            d("2099-07-03"),
            d("2099-07-08"),
        );
        assert!(svc
            .create_leave(user.id, vacation("2099-07-02", "2099-07-04"))
            .await
            .is_ok());
    }

    #[actix_web::test]
    async fn approve_records_approver_and_rejects_non_pending() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let approver = store.add_user("Boss", "boss@company.com");
        let svc = service(&store);

        let leave = svc
            .create_leave(user.id, vacation("2099-06-10", "2099-06-12"))
            .await
            .unwrap();

        assert!(matches!(
            svc.approve_leave(leave.id, 999).await,
            Err(HrmError::UserNotFound)
        ));

        let approved = svc.approve_leave(leave.id, approver.id).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.approved_by, Some(approver.id));
        assert!(approved.approved_at.is_some());

        // Approving again, or any non-pending leave, is one conflict.
        assert!(matches!(
            svc.approve_leave(leave.id, approver.id).await,
            Err(HrmError::LeaveAlreadyApproved)
        ));
    }

    #[actix_web::test]
    async fn reject_records_reason_and_rejects_non_pending() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let rejecter = store.add_user("Boss", "boss@company.com");
        let svc = service(&store);

        let leave = svc
            .create_leave(user.id, vacation("2099-06-10", "2099-06-12"))
            .await
            .unwrap();

        let rejected = svc
            .reject_leave(leave.id, rejecter.id, "short staffed".to_string())
            .await
            .unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        assert_eq!(rejected.rejected_by, Some(rejecter.id));
        assert_eq!(rejected.reject_reason.as_deref(), Some("short staffed"));

        assert!(matches!(
            svc.reject_leave(leave.id, rejecter.id, "again".to_string()).await,
            Err(HrmError::LeaveAlreadyRejected)
        ));
    }

    #[actix_web::test]
    async fn cancel_is_owner_only_and_status_bound() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let approver = store.add_user("Boss", "boss@company.com");
        let svc = service(&store);

        let leave = svc
            .create_leave(user.id, vacation("2099-06-10", "2099-06-12"))
            .await
            .unwrap();

        assert!(matches!(
            svc.cancel_leave(leave.id, approver.id).await,
            Err(HrmError::Unauthorized)
        ));

        // Cancel from approved is allowed for the owner.
        svc.approve_leave(leave.id, approver.id).await.unwrap();
        let cancelled = svc.cancel_leave(leave.id, user.id).await.unwrap();
        assert_eq!(cancelled.status, LeaveStatus::Cancelled);

        // Terminal states cannot be cancelled again.
        assert!(matches!(
            svc.cancel_leave(leave.id, user.id).await,
            Err(HrmError::CannotCancelLeave)
        ));
    }

    #[actix_web::test]
    async fn rejected_and_cancelled_leaves_block_every_decision() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let approver = store.add_user("Boss", "boss@company.com");
        let svc = service(&store);

        let rejected = store.add_leave(
            user.id,
            LeaveTypeName::Vacation,
            LeaveStatus::Rejected,
            d("2099-08-01"),
            d("2099-08-02"),
        );
        assert!(matches!(
            svc.approve_leave(rejected.id, approver.id).await,
            Err(HrmError::LeaveAlreadyApproved)
        ));
        assert!(matches!(
            svc.reject_leave(rejected.id, approver.id, "again".to_string()).await,
            Err(HrmError::LeaveAlreadyRejected)
        ));
        assert!(matches!(
            svc.cancel_leave(rejected.id, user.id).await,
            Err(HrmError::CannotCancelLeave)
        ));

        let cancelled = store.add_leave(
            user.id,
            LeaveTypeName::Vacation,
            LeaveStatus::Cancelled,
            d("2099-09-01"),
            d("2099-09-02"),
        );
        assert!(matches!(
            svc.approve_leave(cancelled.id, approver.id).await,
            Err(HrmError::LeaveAlreadyApproved)
        ));
        assert!(matches!(
            svc.reject_leave(cancelled.id, approver.id, "again".to_string()).await,
            Err(HrmError::LeaveAlreadyRejected)
        ));

        // An approved leave cannot be rejected either.
        let approved = store.add_leave(
            user.id,
            LeaveTypeName::Sick,
            LeaveStatus::Approved,
            d("2099-10-01"),
            d("2099-10-02"),
        );
        assert!(matches!(
            svc.reject_leave(approved.id, approver.id, "late".to_string()).await,
            Err(HrmError::LeaveAlreadyRejected)
        ));
    }

    #[actix_web::test]
    async fn balance_has_all_six_keys_and_sums_approved_only() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let svc = service(&store);

        store.add_leave(
            user.id,
            LeaveTypeName::Vacation,
            LeaveStatus::Approved,
            d("2024-03-04"),
            d("2024-03-08"),
        );
        store.add_leave(
            user.id,
            LeaveTypeName::Vacation,
            LeaveStatus::Approved,
            d("2024-09-02"),
            d("2024-09-03"),
        );
        store.add_leave(
            user.id,
            LeaveTypeName::Sick,
            LeaveStatus::Pending,
            d("2024-05-01"),
            d("2024-05-02"),
        );
        // Wrong year
        store.add_leave(
            user.id,
            LeaveTypeName::Vacation,
            LeaveStatus::Approved,
            d("2023-03-04"),
            d("2023-03-08"),
        );

        let balance = svc.get_user_leave_balance(user.id, 2024).await.unwrap();
        assert_eq!(balance.len(), 6);
        assert_eq!(balance[&LeaveTypeName::Vacation], 7.0);
        assert_eq!(balance[&LeaveTypeName::Sick], 0.0);
        assert_eq!(balance[&LeaveTypeName::Maternity], 0.0);
    }

    #[actix_web::test]
    async fn end_to_end_request_and_approval() {
        let store = MemStore::new();
        let user = store.add_user("John", "john@company.com");
        let approver = store.add_user("Boss", "boss@company.com");
        let svc = service(&store);

        let leave = svc
            .create_leave(user.id, vacation("2099-06-10", "2099-06-12"))
            .await
            .unwrap();
        assert_eq!(leave.status, LeaveStatus::Pending);
        assert_eq!(leave.days, 3.0);

        let approved = svc.approve_leave(leave.id, approver.id).await.unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.approved_by, Some(approver.id));
        assert!(approved.approved_at.is_some());
    }
}
