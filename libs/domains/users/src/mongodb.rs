//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use lifecycle::{LifecycleResult, MongoCollection, StatusGuard};
use mongodb::{
    Database,
    bson::{Document, doc},
};
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{User, UserChanges};
use crate::repository::UserRepository;

pub struct MongoUserRepository {
    users: MongoCollection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            users: MongoCollection::new(db),
        }
    }

    /// Indexes for the duplicate checks and the login lookup
    pub async fn init_indexes(&self) -> LifecycleResult<()> {
        self.users.create_index(doc! { "email": 1 }).await?;
        self.users.create_index(doc! { "phone": 1 }).await?;
        self.users
            .create_index(doc! { "email": 1, "password": 1 })
            .await
    }

    fn changes_document(changes: UserChanges) -> Document {
        let mut fields = Document::new();
        let strings = [
            ("fullName", changes.full_name),
            ("email", changes.email),
            ("phone", changes.phone),
            ("dob", changes.dob),
            ("role", changes.role),
            ("address", changes.address),
            ("bio", changes.bio),
            ("password", changes.password),
            ("gender", changes.gender),
            ("country", changes.country),
        ];
        for (key, value) in strings {
            if let Some(value) = value {
                fields.insert(key, value);
            }
        }
        if let Some(agree) = changes.agree {
            fields.insert("agree", agree);
        }
        fields
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert(&self, user: User) -> UserResult<()> {
        self.users.insert(&user).await?;
        Ok(())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.users.list(doc! {}).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> UserResult<Option<User>> {
        Ok(self.users.find_by_id(id).await?)
    }

    #[instrument(skip(self))]
    async fn email_taken(&self, email: &str, exclude_id: Option<String>) -> UserResult<bool> {
        Ok(self
            .users
            .exists(doc! { "email": email }, exclude_id.as_deref())
            .await?)
    }

    #[instrument(skip(self))]
    async fn phone_taken(&self, phone: &str, exclude_id: Option<String>) -> UserResult<bool> {
        Ok(self
            .users
            .exists(doc! { "phone": phone }, exclude_id.as_deref())
            .await?)
    }

    #[instrument(skip(self, password))]
    async fn find_by_credentials(&self, email: &str, password: &str) -> UserResult<Option<User>> {
        Ok(self
            .users
            .find_one(doc! { "email": email, "password": password })
            .await?)
    }

    #[instrument(skip(self, changes))]
    async fn apply_changes(&self, id: &str, changes: UserChanges) -> UserResult<bool> {
        let fields = Self::changes_document(changes);
        Ok(self.users.set_fields(id, StatusGuard::Any, fields).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> UserResult<bool> {
        Ok(self.users.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_document_uses_stored_field_names() {
        let fields = MongoUserRepository::changes_document(UserChanges {
            full_name: Some("Ada King".into()),
            agree: Some(false),
            ..Default::default()
        });
        assert_eq!(fields.get_str("fullName"), Ok("Ada King"));
        assert_eq!(fields.get_bool("agree"), Ok(false));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn test_empty_changes_produce_empty_document() {
        let fields = MongoUserRepository::changes_document(UserChanges::default());
        assert!(fields.is_empty());
    }
}
