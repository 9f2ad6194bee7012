use async_trait::async_trait;
use lifecycle::{InMemoryStore, StatusGuard};

use crate::error::DepartmentResult;
use crate::models::{Department, DepartmentChanges};

/// Persistence for departments.
///
/// Updates and soft deletes only ever touch live departments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn insert(&self, department: Department) -> DepartmentResult<()>;

    /// Departments whose status is not `inactive`
    async fn list_live(&self) -> DepartmentResult<Vec<Department>>;

    /// Whether a live department already uses this normalized display name
    async fn display_name_taken(&self, display_name: &str) -> DepartmentResult<bool>;

    /// Same as [`display_name_taken`](Self::display_name_taken), ignoring department `id`
    async fn display_name_taken_by_other(
        &self,
        display_name: &str,
        id: &str,
    ) -> DepartmentResult<bool>;

    /// Returns false when no live department has this id
    async fn apply_changes(&self, id: &str, changes: DepartmentChanges) -> DepartmentResult<bool>;

    /// Returns false when no live department has this id
    async fn soft_delete(&self, id: &str) -> DepartmentResult<bool>;
}

/// In-memory department repository for development and tests
#[derive(Clone, Default)]
pub struct InMemoryDepartmentRepository {
    store: InMemoryStore<Department>,
}

impl InMemoryDepartmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a department regardless of status
    pub async fn get(&self, id: &str) -> Option<Department> {
        self.store.find_by_id(id).await
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn insert(&self, department: Department) -> DepartmentResult<()> {
        tracing::info!(department_id = %department.id, "Created department");
        self.store.insert(department).await;
        Ok(())
    }

    async fn list_live(&self) -> DepartmentResult<Vec<Department>> {
        Ok(self.store.list_live().await)
    }

    async fn display_name_taken(&self, display_name: &str) -> DepartmentResult<bool> {
        Ok(self
            .store
            .exists_live(|d| d.display_name == display_name, None)
            .await)
    }

    async fn display_name_taken_by_other(
        &self,
        display_name: &str,
        id: &str,
    ) -> DepartmentResult<bool> {
        Ok(self
            .store
            .exists_live(|d| d.display_name == display_name, Some(id))
            .await)
    }

    async fn apply_changes(&self, id: &str, changes: DepartmentChanges) -> DepartmentResult<bool> {
        Ok(self
            .store
            .update(id, StatusGuard::LiveOnly, |d| changes.apply(d))
            .await)
    }

    async fn soft_delete(&self, id: &str) -> DepartmentResult<bool> {
        Ok(self.store.soft_delete(id, StatusGuard::LiveOnly).await)
    }
}
