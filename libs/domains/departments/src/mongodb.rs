//! MongoDB implementation of DepartmentRepository

use async_trait::async_trait;
use lifecycle::{LifecycleResult, MongoCollection, StatusGuard};
use mongodb::{
    Database,
    bson::{Document, doc},
};
use tracing::instrument;

use crate::error::DepartmentResult;
use crate::models::{Department, DepartmentChanges};
use crate::repository::DepartmentRepository;

pub struct MongoDepartmentRepository {
    departments: MongoCollection<Department>,
}

impl MongoDepartmentRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            departments: MongoCollection::new(db),
        }
    }

    /// Non-unique index backing the display name lookups
    pub async fn init_indexes(&self) -> LifecycleResult<()> {
        self.departments
            .create_index(doc! { "display_name": 1, "status": 1 })
            .await
    }

    fn changes_document(changes: DepartmentChanges) -> Document {
        let mut fields = Document::new();
        if let Some(department_name) = changes.department_name {
            fields.insert("department_name", department_name);
        }
        if let Some(display_name) = changes.display_name {
            fields.insert("display_name", display_name);
        }
        if let Some(updated_by) = changes.updated_by {
            fields.insert("updated_by", updated_by);
        }
        fields
    }
}

#[async_trait]
impl DepartmentRepository for MongoDepartmentRepository {
    #[instrument(skip(self, department), fields(department_id = %department.id))]
    async fn insert(&self, department: Department) -> DepartmentResult<()> {
        self.departments.insert(&department).await?;
        Ok(())
    }

    async fn list_live(&self) -> DepartmentResult<Vec<Department>> {
        Ok(self.departments.list_live().await?)
    }

    #[instrument(skip(self))]
    async fn display_name_taken(&self, display_name: &str) -> DepartmentResult<bool> {
        Ok(self
            .departments
            .exists_live(doc! { "display_name": display_name }, None)
            .await?)
    }

    #[instrument(skip(self))]
    async fn display_name_taken_by_other(
        &self,
        display_name: &str,
        id: &str,
    ) -> DepartmentResult<bool> {
        Ok(self
            .departments
            .exists_live(doc! { "display_name": display_name }, Some(id))
            .await?)
    }

    #[instrument(skip(self, changes))]
    async fn apply_changes(&self, id: &str, changes: DepartmentChanges) -> DepartmentResult<bool> {
        Ok(self
            .departments
            .set_fields(id, StatusGuard::LiveOnly, Self::changes_document(changes))
            .await?)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: &str) -> DepartmentResult<bool> {
        Ok(self
            .departments
            .soft_delete(id, StatusGuard::LiveOnly)
            .await?)
    }
}
