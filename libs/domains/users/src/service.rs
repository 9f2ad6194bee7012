//! User Service - registration, lookups and credential checks

use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User, UserView};
use crate::repository::UserRepository;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    async fn ensure_contact_free(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
        exclude_id: Option<&str>,
    ) -> UserResult<()> {
        let exclude_id = exclude_id.map(str::to_string);
        if let Some(email) = email {
            if self.repository.email_taken(email, exclude_id.clone()).await? {
                return Err(UserError::EmailTaken(email.to_string()));
            }
        }
        if let Some(phone) = phone {
            if self.repository.phone_taken(phone, exclude_id).await? {
                return Err(UserError::PhoneTaken(phone.to_string()));
            }
        }
        Ok(())
    }

    /// Register a batch of users.
    ///
    /// Every entry is checked for required fields before anything is written.
    /// Entries are then inserted one at a time; a duplicate stops the batch
    /// and earlier inserts stay in place.
    #[instrument(skip(self, batch), fields(batch_size = batch.len()))]
    pub async fn register_users(&self, batch: Vec<CreateUser>) -> UserResult<usize> {
        let entries = batch
            .into_iter()
            .map(CreateUser::into_new)
            .collect::<UserResult<Vec<_>>>()?;

        let mut registered = 0;
        for input in entries {
            self.ensure_contact_free(Some(&input.email), Some(&input.phone), None)
                .await?;
            let user = User::new(input);
            self.repository.insert(user).await?;
            registered += 1;
        }

        tracing::info!(registered, "Users registered");
        Ok(registered)
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<UserView>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(UserView::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Option<&str>) -> UserResult<UserView> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or(UserError::MissingUserIdQuery)?;
        self.repository
            .find_by_id(id)
            .await?
            .map(UserView::from)
            .ok_or(UserError::NotFound)
    }

    /// Apply allow-listed field changes to the user named by `_id`
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, input: UpdateUser) -> UserResult<()> {
        let (id, changes) = input.into_parts();
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or(UserError::MissingUpdateId)?;
        validator::Validate::validate(&changes)?;

        self.ensure_contact_free(changes.email.as_deref(), changes.phone.as_deref(), Some(id.as_str()))
            .await?;

        if !self.repository.apply_changes(&id, changes).await? {
            return Err(UserError::NotFound);
        }
        tracing::info!(user_id = %id, "User updated");
        Ok(())
    }

    /// Physically remove a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Option<String>) -> UserResult<()> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or(UserError::MissingDeleteId)?;
        if !self.repository.delete(&id).await? {
            return Err(UserError::NotFound);
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    #[instrument(skip_all)]
    pub async fn login(&self, email: Option<String>, password: Option<String>) -> UserResult<UserView> {
        let (Some(email), Some(password)) = (
            email.filter(|e| !e.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            return Err(UserError::CredentialsRequired);
        };

        match self.repository.find_by_credentials(&email, &password).await? {
            Some(user) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(UserView::from(user))
            }
            None => {
                tracing::info!("Login rejected");
                Err(UserError::InvalidCredentials)
            }
        }
    }
}
