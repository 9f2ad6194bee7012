use chrono::{DateTime, FixedOffset, Utc};
use lifecycle::{
    KeyCase, RecordStatus, Resource, SoftDeletable, new_record_id, normalize_key, render_timestamp,
    require,
};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{RoleError, RoleResult};

/// Roles normalize their natural key to uppercase
pub const DISPLAY_NAME_CASE: KeyCase = KeyCase::Upper;

/// Role document stored in the `roles` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: String,
    pub role_name: String,
    /// Normalized natural key
    pub role_display_name: String,
    /// Opaque permission objects, stored as given
    pub permissions: Vec<Value>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_on: DateTime<Utc>,
    pub created_by: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_on: DateTime<Utc>,
    pub updated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl Role {
    pub fn new(input: NewRole) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            role_name: input.role_name,
            role_display_name: input.role_display_name,
            permissions: input.permissions,
            created_on: now,
            created_by: input.created_by,
            updated_on: now,
            updated_by: input.updated_by,
            status: Some(RecordStatus::Active),
        }
    }
}

impl Resource for Role {
    const KIND: &'static str = "Role";
    const COLLECTION: &'static str = "roles";

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

impl SoftDeletable for Role {
    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

fn permission_list(value: Value) -> RoleResult<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(RoleError::InvalidPermissions),
    }
}

/// Body of `POST /create/role`
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateRole {
    #[schema(example = "admin")]
    pub role_name: Option<String>,
    #[schema(example = "Super Admin")]
    pub role_display_name: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub permissions: Option<Value>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewRole {
    pub role_name: String,
    #[validate(length(min = 1))]
    pub role_display_name: String,
    pub permissions: Vec<Value>,
    pub created_by: String,
    pub updated_by: String,
}

impl CreateRole {
    /// Check required fields in order, then the permissions shape.
    pub fn into_new(self) -> RoleResult<NewRole> {
        let role_name = require("role_name", self.role_name)?;
        let role_display_name = require("role_display_name", self.role_display_name)?;
        let permissions = require("permissions", self.permissions)?;
        let created_by = require("created_by", self.created_by)?;
        let updated_by = require("updated_by", self.updated_by)?;

        let input = NewRole {
            role_name,
            role_display_name: normalize_key(&role_display_name, DISPLAY_NAME_CASE),
            permissions: permission_list(permissions)?,
            created_by,
            updated_by,
        };
        input.validate()?;
        Ok(input)
    }
}

/// Body of `PUT /update/role/{id}`; unknown fields are ignored
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRole {
    pub role_name: Option<String>,
    pub role_display_name: Option<String>,
    #[schema(value_type = Option<Vec<Object>>)]
    pub permissions: Option<Value>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct RoleChanges {
    pub role_name: Option<String>,
    #[validate(length(min = 1))]
    pub role_display_name: Option<String>,
    pub permissions: Option<Vec<Value>>,
    pub updated_by: Option<String>,
}

impl UpdateRole {
    pub fn into_changes(self) -> RoleResult<RoleChanges> {
        let changes = RoleChanges {
            role_name: self.role_name,
            role_display_name: self
                .role_display_name
                .map(|name| normalize_key(&name, DISPLAY_NAME_CASE)),
            permissions: self.permissions.map(permission_list).transpose()?,
            updated_by: self.updated_by,
        };
        changes.validate()?;
        Ok(changes)
    }
}

impl RoleChanges {
    /// The natural keys this update touches
    pub fn keys(&self) -> RoleKeys {
        RoleKeys {
            role_display_name: self.role_display_name.clone(),
            role_name: self.role_name.clone(),
        }
    }

    pub fn apply(self, role: &mut Role) {
        if let Some(role_name) = self.role_name {
            role.role_name = role_name;
        }
        if let Some(role_display_name) = self.role_display_name {
            role.role_display_name = role_display_name;
        }
        if let Some(permissions) = self.permissions {
            role.permissions = permissions;
        }
        if let Some(updated_by) = self.updated_by {
            role.updated_by = updated_by;
        }
    }
}

/// Natural keys a live role must not share with another live role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleKeys {
    /// Normalized display name
    pub role_display_name: Option<String>,
    /// Raw role name
    pub role_name: Option<String>,
}

impl RoleKeys {
    pub fn is_empty(&self) -> bool {
        self.role_display_name.is_none() && self.role_name.is_none()
    }

    pub fn matches(&self, role: &Role) -> bool {
        self.role_display_name.as_deref() == Some(role.role_display_name.as_str())
            || self.role_name.as_deref() == Some(role.role_name.as_str())
    }

    /// The value `existing` collides on, display name first
    pub fn colliding_value(&self, existing: &Role) -> Option<String> {
        match (&self.role_display_name, &self.role_name) {
            (Some(display), _) if *display == existing.role_display_name => Some(display.clone()),
            (_, Some(name)) if *name == existing.role_name => Some(name.clone()),
            _ => None,
        }
    }
}

impl From<&NewRole> for RoleKeys {
    fn from(input: &NewRole) -> Self {
        Self {
            role_display_name: Some(input.role_display_name.clone()),
            role_name: Some(input.role_name.clone()),
        }
    }
}

/// Role as returned by the API, timestamps shifted to the display offset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleView {
    #[serde(rename = "_id")]
    pub id: String,
    pub role_name: String,
    pub role_display_name: String,
    #[schema(value_type = Vec<Object>)]
    pub permissions: Vec<Value>,
    #[schema(example = "2024-05-01 15:00:00")]
    pub created_on: String,
    pub created_by: String,
    pub updated_on: String,
    pub updated_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RoleView {
    pub fn render(role: Role, offset: FixedOffset) -> Self {
        Self {
            created_on: render_timestamp(&role.created_on, Some(offset)),
            updated_on: render_timestamp(&role.updated_on, Some(offset)),
            status: role.status.map(String::from),
            id: role.id,
            role_name: role.role_name,
            role_display_name: role.role_display_name,
            permissions: role.permissions,
            created_by: role.created_by,
            updated_by: role.updated_by,
        }
    }
}

/// Body of `GET /get/roles`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleList {
    pub roles: Vec<RoleView>,
}
