//! MongoDB implementation of RoleRepository

use async_trait::async_trait;
use lifecycle::{LifecycleResult, MongoCollection, StatusGuard};
use mongodb::{
    Database,
    bson::{Document, doc, to_bson},
};
use tracing::instrument;

use crate::error::RoleResult;
use crate::models::{Role, RoleChanges, RoleKeys};
use crate::repository::RoleRepository;

pub struct MongoRoleRepository {
    roles: MongoCollection<Role>,
}

impl MongoRoleRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            roles: MongoCollection::new(db),
        }
    }

    /// Non-unique indexes backing both natural key lookups
    pub async fn init_indexes(&self) -> LifecycleResult<()> {
        self.roles
            .create_index(doc! { "role_display_name": 1, "status": 1 })
            .await?;
        self.roles
            .create_index(doc! { "role_name": 1, "status": 1 })
            .await
    }

    /// `{$or: [...]}` over the keys that are set; `None` when no key is set
    fn keys_filter(keys: &RoleKeys) -> Option<Document> {
        let mut branches = Vec::new();
        if let Some(display) = &keys.role_display_name {
            branches.push(doc! { "role_display_name": display });
        }
        if let Some(name) = &keys.role_name {
            branches.push(doc! { "role_name": name });
        }
        (!branches.is_empty()).then(|| doc! { "$or": branches })
    }

    fn changes_document(changes: RoleChanges) -> RoleResult<Document> {
        let mut fields = Document::new();
        if let Some(role_name) = changes.role_name {
            fields.insert("role_name", role_name);
        }
        if let Some(role_display_name) = changes.role_display_name {
            fields.insert("role_display_name", role_display_name);
        }
        if let Some(permissions) = changes.permissions {
            fields.insert(
                "permissions",
                to_bson(&permissions).map_err(lifecycle::LifecycleError::from)?,
            );
        }
        if let Some(updated_by) = changes.updated_by {
            fields.insert("updated_by", updated_by);
        }
        Ok(fields)
    }
}

#[async_trait]
impl RoleRepository for MongoRoleRepository {
    #[instrument(skip(self, role), fields(role_id = %role.id))]
    async fn insert(&self, role: Role) -> RoleResult<()> {
        self.roles.insert(&role).await?;
        Ok(())
    }

    async fn list_live(&self) -> RoleResult<Vec<Role>> {
        Ok(self.roles.list_live().await?)
    }

    #[instrument(skip(self))]
    async fn find_live_conflict(
        &self,
        keys: RoleKeys,
        exclude_id: Option<String>,
    ) -> RoleResult<Option<Role>> {
        let Some(filter) = Self::keys_filter(&keys) else {
            return Ok(None);
        };
        let filter = lifecycle::exclude_id(lifecycle::with_live(filter), exclude_id.as_deref());
        Ok(self.roles.find_one(filter).await?)
    }

    #[instrument(skip(self, changes))]
    async fn apply_changes(&self, id: &str, changes: RoleChanges) -> RoleResult<bool> {
        let fields = Self::changes_document(changes)?;
        Ok(self.roles.set_fields(id, StatusGuard::Any, fields).await?)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: &str) -> RoleResult<bool> {
        Ok(self.roles.soft_delete(id, StatusGuard::Any).await?)
    }
}
