//! Department Service - uniqueness checks and the update policy

use std::sync::Arc;
use tracing::instrument;

use crate::error::{DepartmentError, DepartmentResult};
use crate::models::{
    CreateDepartment, Department, DepartmentUpdateMode, DepartmentView, UpdateDepartment,
};
use crate::repository::DepartmentRepository;

/// Result of an update request, which depends on [`DepartmentUpdateMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Deactivated,
}

pub struct DepartmentService<R: DepartmentRepository> {
    repository: Arc<R>,
    update_mode: DepartmentUpdateMode,
}

impl<R: DepartmentRepository> Clone for DepartmentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            update_mode: self.update_mode,
        }
    }
}

impl<R: DepartmentRepository> DepartmentService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            update_mode: DepartmentUpdateMode::default(),
        }
    }

    pub fn with_update_mode(mut self, update_mode: DepartmentUpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    pub fn update_mode(&self) -> DepartmentUpdateMode {
        self.update_mode
    }

    /// Create a department unless a live one already has the normalized display name
    #[instrument(skip(self, input))]
    pub async fn create_department(&self, input: CreateDepartment) -> DepartmentResult<Department> {
        let input = input.into_new()?;

        if self.repository.display_name_taken(&input.display_name).await? {
            return Err(DepartmentError::Duplicate(input.display_name));
        }

        let department = Department::new(input);
        self.repository.insert(department.clone()).await?;

        tracing::info!(
            department_id = %department.id,
            display_name = %department.display_name,
            "Department created"
        );
        Ok(department)
    }

    #[instrument(skip(self))]
    pub async fn list_departments(&self) -> DepartmentResult<Vec<DepartmentView>> {
        let departments = self.repository.list_live().await?;
        Ok(departments.into_iter().map(DepartmentView::from).collect())
    }

    /// Update a live department according to the configured mode.
    ///
    /// In [`DepartmentUpdateMode::SoftDelete`] the body is ignored and the
    /// department is marked inactive.
    #[instrument(skip(self, input), fields(mode = %self.update_mode))]
    pub async fn update_department(
        &self,
        id: &str,
        input: UpdateDepartment,
    ) -> DepartmentResult<UpdateOutcome> {
        match self.update_mode {
            DepartmentUpdateMode::SoftDelete => {
                self.delete_department(id).await?;
                Ok(UpdateOutcome::Deactivated)
            }
            DepartmentUpdateMode::ApplyChanges => {
                let changes = input.into_changes()?;

                if let Some(display_name) = &changes.display_name {
                    if self
                        .repository
                        .display_name_taken_by_other(display_name, id)
                        .await?
                    {
                        return Err(DepartmentError::Duplicate(display_name.clone()));
                    }
                }

                if !self.repository.apply_changes(id, changes).await? {
                    return Err(DepartmentError::NotFound);
                }
                Ok(UpdateOutcome::Updated)
            }
        }
    }

    /// Mark a live department inactive
    #[instrument(skip(self))]
    pub async fn delete_department(&self, id: &str) -> DepartmentResult<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(DepartmentError::NotFound);
        }
        tracing::info!(department_id = %id, "Department marked as inactive");
        Ok(())
    }
}
