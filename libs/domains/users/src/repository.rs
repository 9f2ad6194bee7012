use async_trait::async_trait;
use lifecycle::{InMemoryStore, StatusGuard};

use crate::error::UserResult;
use crate::models::{User, UserChanges};

/// Persistence for users. Users have no status, so deletes are physical.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> UserResult<()>;

    async fn list(&self) -> UserResult<Vec<User>>;

    async fn find_by_id(&self, id: &str) -> UserResult<Option<User>>;

    /// Whether another user, other than `exclude_id`, has this email
    async fn email_taken(&self, email: &str, exclude_id: Option<String>) -> UserResult<bool>;

    /// Whether another user, other than `exclude_id`, has this phone
    async fn phone_taken(&self, phone: &str, exclude_id: Option<String>) -> UserResult<bool>;

    /// Exact match on email and stored password
    async fn find_by_credentials(&self, email: &str, password: &str) -> UserResult<Option<User>>;

    /// Returns false when no user has this id
    async fn apply_changes(&self, id: &str, changes: UserChanges) -> UserResult<bool>;

    /// Returns false when no user has this id
    async fn delete(&self, id: &str) -> UserResult<bool>;
}

/// In-memory user repository for development and tests
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    store: InMemoryStore<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> UserResult<()> {
        tracing::info!(user_id = %user.id, "Registered user");
        self.store.insert(user).await;
        Ok(())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.store.list_live().await)
    }

    async fn find_by_id(&self, id: &str) -> UserResult<Option<User>> {
        Ok(self.store.find_by_id(id).await)
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<String>) -> UserResult<bool> {
        Ok(self
            .store
            .exists(|u| u.email == email, exclude_id.as_deref())
            .await)
    }

    async fn phone_taken(&self, phone: &str, exclude_id: Option<String>) -> UserResult<bool> {
        Ok(self
            .store
            .exists(|u| u.phone == phone, exclude_id.as_deref())
            .await)
    }

    async fn find_by_credentials(&self, email: &str, password: &str) -> UserResult<Option<User>> {
        Ok(self
            .store
            .find(|u| u.email == email && u.password == password)
            .await)
    }

    async fn apply_changes(&self, id: &str, changes: UserChanges) -> UserResult<bool> {
        Ok(self
            .store
            .update(id, StatusGuard::Any, |u| changes.apply(u))
            .await)
    }

    async fn delete(&self, id: &str) -> UserResult<bool> {
        Ok(self.store.delete(id).await)
    }
}
