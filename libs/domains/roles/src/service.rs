//! Role Service - natural key checks and read-side rendering

use chrono::{FixedOffset, Offset, Utc};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{RoleError, RoleResult};
use crate::models::{CreateRole, Role, RoleKeys, RoleView, UpdateRole};
use crate::repository::RoleRepository;

/// +05:30, the offset role timestamps are shown in unless configured otherwise
pub const DEFAULT_DISPLAY_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub fn default_display_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_DISPLAY_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

pub struct RoleService<R: RoleRepository> {
    repository: Arc<R>,
    display_offset: FixedOffset,
}

impl<R: RoleRepository> Clone for RoleService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            display_offset: self.display_offset,
        }
    }
}

impl<R: RoleRepository> RoleService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            display_offset: default_display_offset(),
        }
    }

    pub fn with_display_offset(mut self, display_offset: FixedOffset) -> Self {
        self.display_offset = display_offset;
        self
    }

    async fn ensure_unique(&self, keys: RoleKeys, exclude_id: Option<String>) -> RoleResult<()> {
        if let Some(existing) = self
            .repository
            .find_live_conflict(keys.clone(), exclude_id)
            .await?
        {
            let value = keys
                .colliding_value(&existing)
                .unwrap_or_else(|| existing.role_display_name.clone());
            return Err(RoleError::Duplicate(value));
        }
        Ok(())
    }

    /// Create a role unless a live role has the same display name or role name
    #[instrument(skip(self, input))]
    pub async fn create_role(&self, input: CreateRole) -> RoleResult<Role> {
        let input = input.into_new()?;
        self.ensure_unique(RoleKeys::from(&input), None).await?;

        let role = Role::new(input);
        self.repository.insert(role.clone()).await?;

        tracing::info!(
            role_id = %role.id,
            role_display_name = %role.role_display_name,
            "Role created"
        );
        Ok(role)
    }

    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> RoleResult<Vec<RoleView>> {
        let roles = self.repository.list_live().await?;
        Ok(roles
            .into_iter()
            .map(|role| RoleView::render(role, self.display_offset))
            .collect())
    }

    /// Partially update a role, whatever its status
    #[instrument(skip(self, input))]
    pub async fn update_role(&self, id: &str, input: UpdateRole) -> RoleResult<()> {
        let changes = input.into_changes()?;

        let keys = changes.keys();
        if !keys.is_empty() {
            self.ensure_unique(keys, Some(id.to_string())).await?;
        }

        if !self.repository.apply_changes(id, changes).await? {
            return Err(RoleError::NotFound);
        }
        Ok(())
    }

    /// Mark a role inactive; repeating this on an inactive role succeeds
    #[instrument(skip(self))]
    pub async fn delete_role(&self, id: &str) -> RoleResult<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(RoleError::NotFound);
        }
        tracing::info!(role_id = %id, "Role marked as inactive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRoleRepository;
    use mockall::predicate::{always, eq};
    use serde_json::json;

    fn create_input(role_name: &str, display: &str) -> CreateRole {
        CreateRole {
            role_name: Some(role_name.into()),
            role_display_name: Some(display.into()),
            permissions: Some(json!([])),
            created_by: Some("root".into()),
            updated_by: Some("root".into()),
        }
    }

    fn existing(role_name: &str, display: &str) -> Role {
        Role::new(create_input(role_name, display).into_new().unwrap())
    }

    #[test]
    fn test_default_offset_is_ist() {
        assert_eq!(default_display_offset().local_minus_utc(), 19_800);
    }

    #[tokio::test]
    async fn test_create_conflict_on_role_name_names_it() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo
            .expect_find_live_conflict()
            .with(
                eq(RoleKeys {
                    role_display_name: Some("MANAGER".into()),
                    role_name: Some("admin".into()),
                }),
                eq(None::<String>),
            )
            .returning(|_, _| Ok(Some(existing("admin", "Administrator"))));
        mock_repo.expect_insert().never();

        let service = RoleService::new(mock_repo);
        let err = service
            .create_role(create_input("admin", "manager"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Role 'admin' already exists");
    }

    #[tokio::test]
    async fn test_create_conflict_on_display_name_names_normalized_value() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo
            .expect_find_live_conflict()
            .returning(|_, _| Ok(Some(existing("root", "Super Admin"))));

        let service = RoleService::new(mock_repo);
        let err = service
            .create_role(create_input("admin", " super admin"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Role 'SUPER_ADMIN' already exists");
    }

    #[tokio::test]
    async fn test_update_excludes_self_from_conflict_check() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo
            .expect_find_live_conflict()
            .with(always(), eq(Some("r1".to_string())))
            .times(1)
            .returning(|_, _| Ok(None));
        mock_repo
            .expect_apply_changes()
            .withf(|id, changes| id == "r1" && changes.role_display_name.as_deref() == Some("OPS"))
            .returning(|_, _| Ok(true));

        let service = RoleService::new(mock_repo);
        service
            .update_role(
                "r1",
                UpdateRole {
                    role_display_name: Some("ops".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_without_keys_skips_conflict_check() {
        let mut mock_repo = MockRoleRepository::new();
        mock_repo.expect_find_live_conflict().never();
        mock_repo.expect_apply_changes().returning(|_, _| Ok(false));

        let service = RoleService::new(mock_repo);
        let err = service
            .update_role(
                "missing",
                UpdateRole {
                    updated_by: Some("x".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RoleError::NotFound));
    }

    #[tokio::test]
    async fn test_list_renders_with_configured_offset() {
        use chrono::TimeZone;

        let mut mock_repo = MockRoleRepository::new();
        mock_repo.expect_list_live().returning(|| {
            let mut role = existing("admin", "admin");
            role.created_on = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
            Ok(vec![role])
        });

        let offset = FixedOffset::west_opt(3600).unwrap();
        let service = RoleService::new(mock_repo).with_display_offset(offset);
        let roles = service.list_roles().await.unwrap();
        assert_eq!(roles[0].created_on, "2024-06-01 11:00:00");
    }
}
