use async_trait::async_trait;
use lifecycle::{InMemoryStore, StatusGuard};

use crate::error::RoleResult;
use crate::models::{Role, RoleChanges, RoleKeys};

/// Persistence for roles.
///
/// Role updates and soft deletes match on id alone, whatever the status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn insert(&self, role: Role) -> RoleResult<()>;

    async fn list_live(&self) -> RoleResult<Vec<Role>>;

    /// A live role sharing any of `keys`, other than `exclude_id`
    async fn find_live_conflict(
        &self,
        keys: RoleKeys,
        exclude_id: Option<String>,
    ) -> RoleResult<Option<Role>>;

    /// Returns false when no role has this id
    async fn apply_changes(&self, id: &str, changes: RoleChanges) -> RoleResult<bool>;

    /// Returns false when no role has this id
    async fn soft_delete(&self, id: &str) -> RoleResult<bool>;
}

/// In-memory role repository for development and tests
#[derive(Clone, Default)]
pub struct InMemoryRoleRepository {
    store: InMemoryStore<Role>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a role regardless of status
    pub async fn get(&self, id: &str) -> Option<Role> {
        self.store.find_by_id(id).await
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn insert(&self, role: Role) -> RoleResult<()> {
        tracing::info!(role_id = %role.id, "Created role");
        self.store.insert(role).await;
        Ok(())
    }

    async fn list_live(&self) -> RoleResult<Vec<Role>> {
        Ok(self.store.list_live().await)
    }

    async fn find_live_conflict(
        &self,
        keys: RoleKeys,
        exclude_id: Option<String>,
    ) -> RoleResult<Option<Role>> {
        if keys.is_empty() {
            return Ok(None);
        }
        Ok(self
            .store
            .find(|r| r.is_live_conflict(&keys, exclude_id.as_deref()))
            .await)
    }

    async fn apply_changes(&self, id: &str, changes: RoleChanges) -> RoleResult<bool> {
        Ok(self
            .store
            .update(id, StatusGuard::Any, |r| changes.apply(r))
            .await)
    }

    async fn soft_delete(&self, id: &str) -> RoleResult<bool> {
        Ok(self.store.soft_delete(id, StatusGuard::Any).await)
    }
}

impl Role {
    fn is_live_conflict(&self, keys: &RoleKeys, exclude_id: Option<&str>) -> bool {
        use lifecycle::Resource;

        Some(self.id.as_str()) != exclude_id && self.is_live() && keys.matches(self)
    }
}
