use chrono::{DateTime, Utc};
use lifecycle::{
    KeyCase, RecordStatus, Resource, SoftDeletable, new_record_id, normalize_key, render_timestamp,
    require,
};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::DepartmentResult;

/// Departments normalize their natural key to lowercase
pub const DISPLAY_NAME_CASE: KeyCase = KeyCase::Lower;

/// What `PUT /update/department/{id}` does.
///
/// `soft_delete` reproduces the long-standing behavior where an update
/// only marks the department inactive. `apply_changes` performs the
/// partial update the endpoint is named for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DepartmentUpdateMode {
    #[default]
    SoftDelete,
    ApplyChanges,
}

/// Department document stored in the `departments` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "_id")]
    pub id: String,
    pub department_name: String,
    /// Normalized natural key
    pub display_name: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_on: DateTime<Utc>,
    pub created_by: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_on: DateTime<Utc>,
    pub updated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl Department {
    pub fn new(input: NewDepartment) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            department_name: input.department_name,
            display_name: input.display_name,
            created_on: now,
            created_by: input.created_by,
            updated_on: now,
            updated_by: input.updated_by,
            status: Some(RecordStatus::Active),
        }
    }
}

impl Resource for Department {
    const KIND: &'static str = "Department";
    const COLLECTION: &'static str = "departments";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_updated_on(&mut self, at: DateTime<Utc>) {
        self.updated_on = at;
    }

    fn status(&self) -> Option<&RecordStatus> {
        self.status.as_ref()
    }
}

impl SoftDeletable for Department {
    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

/// Body of `POST /create/department`.
///
/// Fields are optional here so the first missing one can be reported by name.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateDepartment {
    #[schema(example = "Engineering")]
    pub department_name: Option<String>,
    #[schema(example = "Engineering Team")]
    pub display_name: Option<String>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

/// A create request that passed the required-field check
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewDepartment {
    pub department_name: String,
    #[validate(length(min = 1))]
    pub display_name: String,
    pub created_by: String,
    pub updated_by: String,
}

impl CreateDepartment {
    /// Check required fields in order and normalize the display name.
    pub fn into_new(self) -> DepartmentResult<NewDepartment> {
        let department_name = require("department_name", self.department_name)?;
        let display_name = require("display_name", self.display_name)?;
        let created_by = require("created_by", self.created_by)?;
        let updated_by = require("updated_by", self.updated_by)?;

        let input = NewDepartment {
            department_name,
            display_name: normalize_key(&display_name, DISPLAY_NAME_CASE),
            created_by,
            updated_by,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Body of `PUT /update/department/{id}`; unknown fields are ignored
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDepartment {
    pub department_name: Option<String>,
    pub display_name: Option<String>,
    pub updated_by: Option<String>,
}

/// Normalized partial update
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct DepartmentChanges {
    pub department_name: Option<String>,
    #[validate(length(min = 1))]
    pub display_name: Option<String>,
    pub updated_by: Option<String>,
}

impl UpdateDepartment {
    pub fn into_changes(self) -> DepartmentResult<DepartmentChanges> {
        let changes = DepartmentChanges {
            department_name: self.department_name,
            display_name: self
                .display_name
                .map(|name| normalize_key(&name, DISPLAY_NAME_CASE)),
            updated_by: self.updated_by,
        };
        changes.validate()?;
        Ok(changes)
    }
}

impl DepartmentChanges {
    pub fn apply(self, department: &mut Department) {
        if let Some(department_name) = self.department_name {
            department.department_name = department_name;
        }
        if let Some(display_name) = self.display_name {
            department.display_name = display_name;
        }
        if let Some(updated_by) = self.updated_by {
            department.updated_by = updated_by;
        }
    }
}

/// Department as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentView {
    #[serde(rename = "_id")]
    pub id: String,
    pub department_name: String,
    pub display_name: String,
    #[schema(example = "2024-05-01 09:30:00")]
    pub created_on: String,
    pub created_by: String,
    pub updated_on: String,
    pub updated_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<Department> for DepartmentView {
    fn from(department: Department) -> Self {
        Self {
            created_on: render_timestamp(&department.created_on, None),
            updated_on: render_timestamp(&department.updated_on, None),
            status: department.status.map(String::from),
            id: department.id,
            department_name: department.department_name,
            display_name: department.display_name,
            created_by: department.created_by,
            updated_by: department.updated_by,
        }
    }
}

/// Body of `GET /get/department`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentList {
    pub departments: Vec<DepartmentView>,
}
