use crate::error::HrmError;
use crate::model::leave::LeaveTypeName;
use crate::model::leave_type::{LeaveType, NewLeaveType};
use crate::repository::LeaveTypeRepository;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

/// How many leave rows reference a given catalog entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveTypeUsage {
    #[schema(example = "vacation")]
    pub leave_type: LeaveTypeName,
    #[schema(example = 12)]
    pub leave_count: i64,
}

/// Manages the leave type catalog. Codes are unique and referenced by
/// leave rows, so a type in use cannot be removed.
pub struct LeaveTypeService {
    leave_type_repo: Arc<dyn LeaveTypeRepository>,
}

impl LeaveTypeService {
    pub fn new(leave_type_repo: Arc<dyn LeaveTypeRepository>) -> Self {
        Self { leave_type_repo }
    }

    pub async fn create_leave_type(&self, new: NewLeaveType) -> Result<LeaveType, HrmError> {
        if self.leave_type_repo.get_by_code(new.code).await?.is_some() {
            return Err(HrmError::LeaveTypeExists);
        }

        let leave_type = self.leave_type_repo.create(&new).await?;
        info!(code = %leave_type.code, "leave type created");
        Ok(leave_type)
    }

    pub async fn get_leave_type_by_id(&self, id: u64) -> Result<LeaveType, HrmError> {
        self.leave_type_repo.get_by_id(id).await
    }

    pub async fn get_leave_type_by_code(
        &self,
        code: LeaveTypeName,
    ) -> Result<LeaveType, HrmError> {
        self.leave_type_repo
            .get_by_code(code)
            .await?
            .ok_or(HrmError::LeaveTypeNotFound)
    }

    pub async fn get_all_leave_types(&self) -> Result<Vec<LeaveType>, HrmError> {
        self.leave_type_repo.get_all().await
    }

    pub async fn get_active_leave_types(&self) -> Result<Vec<LeaveType>, HrmError> {
        self.leave_type_repo.get_active().await
    }

    /// Replaces the descriptive fields of a catalog row. The code is the
    /// stable identity leaves reference and never changes.
    pub async fn update_leave_type(
        &self,
        id: u64,
        new: NewLeaveType,
    ) -> Result<LeaveType, HrmError> {
        let mut leave_type = self.leave_type_repo.get_by_id(id).await?;

        leave_type.name = new.name;
        leave_type.description = new.description;
        leave_type.default_days_per_year = new.default_days_per_year;
        leave_type.is_active = new.is_active;
        leave_type.requires_approval = new.requires_approval;
        leave_type.color = new.color;
        leave_type.icon = new.icon;

        self.leave_type_repo.update(&leave_type).await?;
        Ok(leave_type)
    }

    pub async fn delete_leave_type(&self, id: u64) -> Result<(), HrmError> {
        let leave_type = self.leave_type_repo.get_by_id(id).await?;

        if self.leave_type_repo.count_leaves_for(leave_type.code).await? > 0 {
            return Err(HrmError::LeaveTypeInUse);
        }

        self.leave_type_repo.delete(id).await?;
        info!(code = %leave_type.code, "leave type deleted");
        Ok(())
    }

    pub async fn get_usage_stats(&self) -> Result<Vec<LeaveTypeUsage>, HrmError> {
        let mut stats = Vec::new();
        for leave_type in self.leave_type_repo.get_all().await? {
            stats.push(LeaveTypeUsage {
                leave_type: leave_type.code,
                leave_count: self.leave_type_repo.count_leaves_for(leave_type.code).await?,
            });
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::leave::LeaveStatus;
    use crate::service::test_support::{MemLeaveTypeRepo, MemStore};
    use chrono::NaiveDate;

    fn service(store: &Arc<MemStore>) -> LeaveTypeService {
        LeaveTypeService::new(Arc::new(MemLeaveTypeRepo(store.clone())))
    }

    fn sick_type() -> NewLeaveType {
        NewLeaveType {
            code: LeaveTypeName::Sick,
            name: "Sick Leave".to_string(),
            description: "Medical leave".to_string(),
            default_days_per_year: 10,
            is_active: true,
            requires_approval: true,
            color: "#dc3545".to_string(),
            icon: "medical".to_string(),
        }
    }

    #[actix_web::test]
    async fn duplicate_code_is_rejected() {
        let store = MemStore::new();
        let svc = service(&store);

        svc.create_leave_type(sick_type()).await.unwrap();
        assert!(matches!(
            svc.create_leave_type(sick_type()).await,
            Err(HrmError::LeaveTypeExists)
        ));
    }

    #[actix_web::test]
    async fn lookup_by_code_reports_missing_type() {
        let store = MemStore::new();
        let svc = service(&store);

        assert!(matches!(
            svc.get_leave_type_by_code(LeaveTypeName::Vacation).await,
            Err(HrmError::LeaveTypeNotFound)
        ));

        svc.create_leave_type(sick_type()).await.unwrap();
        let found = svc.get_leave_type_by_code(LeaveTypeName::Sick).await.unwrap();
        assert_eq!(found.default_days_per_year, 10);
    }

    #[actix_web::test]
    async fn update_keeps_code_stable() {
        let store = MemStore::new();
        let svc = service(&store);
        let created = svc.create_leave_type(sick_type()).await.unwrap();

        let mut changed = sick_type();
        changed.code = LeaveTypeName::Vacation;
        changed.default_days_per_year = 15;
        let updated = svc.update_leave_type(created.id, changed).await.unwrap();

        assert_eq!(updated.code, LeaveTypeName::Sick);
        assert_eq!(updated.default_days_per_year, 15);
    }

    #[actix_web::test]
    async fn delete_refuses_types_in_use() {
        let store = MemStore::new();
        let svc = service(&store);
        let created = svc.create_leave_type(sick_type()).await.unwrap();

        let start: NaiveDate = "2099-02-01".parse().unwrap();
        let end: NaiveDate = "2099-02-03".parse().unwrap();
        store.add_leave(1, LeaveTypeName::Sick, LeaveStatus::Pending, start, end);

        assert!(matches!(
            svc.delete_leave_type(created.id).await,
            Err(HrmError::LeaveTypeInUse)
        ));

        store.leaves.lock().unwrap().clear();
        assert!(svc.delete_leave_type(created.id).await.is_ok());
    }

    #[actix_web::test]
    async fn usage_stats_count_per_type() {
        let store = MemStore::new();
        let svc = service(&store);
        svc.create_leave_type(sick_type()).await.unwrap();

        let start: NaiveDate = "2099-02-01".parse().unwrap();
        let end: NaiveDate = "2099-02-03".parse().unwrap();
        store.add_leave(1, LeaveTypeName::Sick, LeaveStatus::Pending, start, end);
        store.add_leave(1, LeaveTypeName::Sick, LeaveStatus::Approved, start, end);

        let stats = svc.get_usage_stats().await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].leave_type, LeaveTypeName::Sick);
        assert_eq!(stats[0].leave_count, 2);
    }
}
