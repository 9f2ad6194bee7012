use chrono::{DateTime, Utc};
use lifecycle::{Resource, new_record_id, render_timestamp, require};
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::UserResult;

/// User document stored in the `users` collection.
///
/// The password is stored as given and compared verbatim at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub role: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub bio: String,
    pub password: String,
    pub gender: String,
    pub country: String,
    pub agree: bool,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub registered_on: DateTime<Utc>,
    /// Absent on users registered before updates were tracked
    #[serde(default, with = "optional_bson_datetime")]
    pub updated_on: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(input: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            dob: input.dob,
            role: input.role,
            address: input.address,
            bio: input.bio,
            password: input.password,
            gender: input.gender,
            country: input.country,
            agree: input.agree,
            registered_on: now,
            updated_on: Some(now),
        }
    }
}

mod optional_bson_datetime {
    use chrono::{DateTime, Utc};
    use mongodb::bson;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.map(bson::DateTime::from_chrono).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(Option::<bson::DateTime>::deserialize(deserializer)?.map(|at| at.to_chrono()))
    }
}

impl Resource for User {
    const KIND: &'static str = "User";
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_updated_on(&mut self, at: DateTime<Utc>) {
        self.updated_on = Some(at);
    }
}

/// One entry of the `POST /create` array
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateUser {
    #[serde(rename = "fullName")]
    #[schema(example = "Ada Lovelace")]
    pub full_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "5550100")]
    pub phone: Option<String>,
    #[schema(example = "1815-12-10")]
    pub dob: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub agree: Option<bool>,
    pub role: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
}

/// A registration entry that passed the required-field check
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewUser {
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub dob: String,
    pub password: String,
    pub gender: String,
    pub country: String,
    pub agree: bool,
    pub role: Option<String>,
    pub address: String,
    pub bio: String,
}

impl CreateUser {
    /// Check required fields in order. `confirmPassword` must be present
    /// but is not kept.
    pub fn into_new(self) -> UserResult<NewUser> {
        let full_name = require("fullName", self.full_name)?;
        let email = require("email", self.email)?;
        let phone = require("phone", self.phone)?;
        let dob = require("dob", self.dob)?;
        let password = require("password", self.password)?;
        require("confirmPassword", self.confirm_password)?;
        let gender = require("gender", self.gender)?;
        let country = require("country", self.country)?;
        let agree = require("agree", self.agree)?;

        let input = NewUser {
            full_name,
            email,
            phone,
            dob,
            password,
            gender,
            country,
            agree,
            role: self.role,
            address: self.address.unwrap_or_default(),
            bio: self.bio.unwrap_or_default(),
        };
        input.validate()?;
        Ok(input)
    }
}

/// Body of `PUT /update`: the target id plus any allow-listed fields
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub role: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub agree: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct UserChanges {
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub role: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub password: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub agree: Option<bool>,
}

impl UpdateUser {
    /// Split into the target id and the validated changes
    pub fn into_parts(self) -> (Option<String>, UserChanges) {
        let changes = UserChanges {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            dob: self.dob,
            role: self.role,
            address: self.address,
            bio: self.bio,
            password: self.password,
            gender: self.gender,
            country: self.country,
            agree: self.agree,
        };
        (self.id, changes)
    }
}

impl UserChanges {
    pub fn apply(self, user: &mut User) {
        if let Some(v) = self.full_name {
            user.full_name = v;
        }
        if let Some(v) = self.email {
            user.email = v;
        }
        if let Some(v) = self.phone {
            user.phone = v;
        }
        if let Some(v) = self.dob {
            user.dob = v;
        }
        if let Some(v) = self.role {
            user.role = Some(v);
        }
        if let Some(v) = self.address {
            user.address = v;
        }
        if let Some(v) = self.bio {
            user.bio = v;
        }
        if let Some(v) = self.password {
            user.password = v;
        }
        if let Some(v) = self.gender {
            user.gender = v;
        }
        if let Some(v) = self.country {
            user.country = v;
        }
        if let Some(v) = self.agree {
            user.agree = v;
        }
    }
}

/// Body of `DELETE /delete`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DeleteUser {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// Id of the user to fetch
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

/// Body of `POST /login`
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User as returned by the API, without the password
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub dob: String,
    pub role: Option<String>,
    pub address: String,
    pub bio: String,
    pub gender: String,
    pub country: String,
    pub agree: bool,
    #[schema(example = "2024-05-01 09:30:00")]
    pub registered_on: String,
    pub updated_on: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            registered_on: render_timestamp(&user.registered_on, None),
            updated_on: render_timestamp(&user.updated_on.unwrap_or(user.registered_on), None),
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            dob: user.dob,
            role: user.role,
            address: user.address,
            bio: user.bio,
            gender: user.gender,
            country: user.country,
            agree: user.agree,
        }
    }
}

/// Body of `GET /get/all`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserList {
    pub users: Vec<UserView>,
}

/// Body of every `POST /login` response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<UserView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn success(user: UserView) -> Self {
        Self {
            success: true,
            data: Some(user),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;

    fn complete() -> CreateUser {
        CreateUser {
            full_name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("5550100".into()),
            dob: Some("1815-12-10".into()),
            password: Some("engine".into()),
            confirm_password: Some("engine".into()),
            gender: Some("female".into()),
            country: Some("UK".into()),
            agree: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_into_new_applies_defaults() {
        let input = complete().into_new().unwrap();
        assert_eq!(input.address, "");
        assert_eq!(input.bio, "");
        assert!(input.role.is_none());
    }

    #[test]
    fn test_confirm_password_is_required() {
        let input = CreateUser {
            confirm_password: None,
            gender: None,
            ..complete()
        };
        assert!(matches!(input.into_new(), Err(UserError::MissingField("confirmPassword"))));
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let input = CreateUser {
            email: Some("not-an-email".into()),
            ..complete()
        };
        assert!(matches!(input.into_new(), Err(UserError::Validation(_))));
    }

    #[test]
    fn test_view_omits_password() {
        let user = User::new(complete().into_new().unwrap());
        let json = serde_json::to_value(UserView::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert!(json["_id"].is_string());
    }

    #[test]
    fn test_document_without_updated_on_reads_and_renders() {
        use chrono::TimeZone;
        use mongodb::bson::{self, doc};

        let registered = Utc.with_ymd_and_hms(2023, 3, 1, 8, 0, 0).unwrap();
        let document = doc! {
            "_id": "legacy",
            "fullName": "Grace Hopper",
            "email": "grace@example.com",
            "phone": "5550199",
            "dob": "1906-12-09",
            "role": null,
            "address": "",
            "bio": "",
            "password": "cobol",
            "gender": "female",
            "country": "US",
            "agree": true,
            "registered_on": bson::DateTime::from_chrono(registered),
        };

        let user: User = bson::from_document(document).unwrap();
        assert!(user.updated_on.is_none());

        let view = UserView::from(user);
        assert_eq!(view.updated_on, "2023-03-01 08:00:00");
        assert_eq!(view.updated_on, view.registered_on);
    }

    #[test]
    fn test_updated_on_round_trips_as_bson_date() {
        use mongodb::bson;

        let user = User::new(complete().into_new().unwrap());
        let document = bson::to_document(&user).unwrap();
        assert!(document.get_datetime("updated_on").is_ok());

        let back: User = bson::from_document(document).unwrap();
        assert!(back.updated_on.is_some());
    }

    #[test]
    fn test_camel_case_fields_deserialize() {
        let input: CreateUser = serde_json::from_value(serde_json::json!({
            "fullName": "Ada",
            "confirmPassword": "x"
        }))
        .unwrap();
        assert_eq!(input.full_name.as_deref(), Some("Ada"));
        assert_eq!(input.confirm_password.as_deref(), Some("x"));
    }
}
