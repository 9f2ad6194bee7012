//! In-memory counterpart of [`MongoCollection`](crate::MongoCollection).
//!
//! Keeps insertion order like a collection scan would. Intended for
//! development and tests.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::record::{RecordStatus, Resource, SoftDeletable, StatusGuard};

pub struct InMemoryStore<T: Resource> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T: Resource> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Resource> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

fn guard_allows<T: Resource>(record: &T, guard: StatusGuard) -> bool {
    match guard {
        StatusGuard::Any => true,
        StatusGuard::LiveOnly => record.is_live(),
    }
}

impl<T: Resource> InMemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<T> {
        let records = self.records.read().await;
        records.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let records = self.records.read().await;
        records.iter().find(|r| predicate(r)).cloned()
    }

    pub async fn exists(&self, predicate: impl Fn(&T) -> bool, exclude: Option<&str>) -> bool {
        let records = self.records.read().await;
        records
            .iter()
            .any(|r| Some(r.id()) != exclude && predicate(r))
    }

    pub async fn exists_live(&self, predicate: impl Fn(&T) -> bool, exclude: Option<&str>) -> bool {
        self.exists(|r| r.is_live() && predicate(r), exclude).await
    }

    pub async fn insert(&self, record: T) {
        self.records.write().await.push(record);
    }

    pub async fn list_live(&self) -> Vec<T> {
        let records = self.records.read().await;
        records.iter().filter(|r| r.is_live()).cloned().collect()
    }

    /// Apply `change` to the matching record and refresh `updated_on`.
    pub async fn update(&self, id: &str, guard: StatusGuard, change: impl FnOnce(&mut T)) -> bool {
        let mut records = self.records.write().await;
        match records
            .iter_mut()
            .find(|r| r.id() == id && guard_allows(&**r, guard))
        {
            Some(record) => {
                change(record);
                record.set_updated_on(Utc::now());
                true
            }
            None => false,
        }
    }

    pub async fn delete(&self, id: &str) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        records.len() < before
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T: SoftDeletable> InMemoryStore<T> {
    pub async fn soft_delete(&self, id: &str, guard: StatusGuard) -> bool {
        self.update(id, guard, |r| r.set_status(RecordStatus::Inactive))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_record_id;
    use chrono::DateTime;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Widget {
        #[serde(rename = "_id")]
        id: String,
        name: String,
        status: Option<RecordStatus>,
        updated_on: Option<DateTime<Utc>>,
    }

    impl Widget {
        fn new(name: &str) -> Self {
            Self {
                id: new_record_id(),
                name: name.to_string(),
                status: Some(RecordStatus::Active),
                updated_on: None,
            }
        }
    }

    impl Resource for Widget {
        const KIND: &'static str = "Widget";
        const COLLECTION: &'static str = "widgets";

        fn id(&self) -> &str {
            &self.id
        }

        fn set_updated_on(&mut self, at: DateTime<Utc>) {
            self.updated_on = Some(at);
        }

        fn status(&self) -> Option<&RecordStatus> {
            self.status.as_ref()
        }
    }

    impl SoftDeletable for Widget {
        fn set_status(&mut self, status: RecordStatus) {
            self.status = Some(status);
        }
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_live_listing() {
        let store = InMemoryStore::new();
        let widget = Widget::new("a");
        let id = widget.id.clone();
        store.insert(widget).await;
        store.insert(Widget::new("b")).await;

        assert!(store.soft_delete(&id, StatusGuard::LiveOnly).await);
        let live = store.list_live().await;
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].name, "b");
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_guard_controls_repeat_soft_delete() {
        let store = InMemoryStore::new();
        let widget = Widget::new("a");
        let id = widget.id.clone();
        store.insert(widget).await;

        assert!(store.soft_delete(&id, StatusGuard::LiveOnly).await);
        assert!(!store.soft_delete(&id, StatusGuard::LiveOnly).await);
        assert!(store.soft_delete(&id, StatusGuard::Any).await);
    }

    #[tokio::test]
    async fn test_exists_live_ignores_inactive_and_excluded() {
        let store = InMemoryStore::new();
        let first = Widget::new("dup");
        let first_id = first.id.clone();
        store.insert(first).await;

        assert!(store.exists_live(|w| w.name == "dup", None).await);
        assert!(!store.exists_live(|w| w.name == "dup", Some(&first_id)).await);

        store.soft_delete(&first_id, StatusGuard::Any).await;
        assert!(!store.exists_live(|w| w.name == "dup", None).await);
        assert!(store.exists(|w| w.name == "dup", None).await);
    }

    #[tokio::test]
    async fn test_update_refreshes_timestamp() {
        let store = InMemoryStore::new();
        let widget = Widget::new("a");
        let id = widget.id.clone();
        store.insert(widget).await;

        assert!(store.update(&id, StatusGuard::Any, |w| w.name = "z".into()).await);
        let stored = store.find_by_id(&id).await.unwrap();
        assert_eq!(stored.name, "z");
        assert!(stored.updated_on.is_some());

        assert!(!store.update("missing", StatusGuard::Any, |_| {}).await);
    }

    #[tokio::test]
    async fn test_hard_delete() {
        let store = InMemoryStore::new();
        let widget = Widget::new("a");
        let id = widget.id.clone();
        store.insert(widget).await;

        assert!(store.delete(&id).await);
        assert!(!store.delete(&id).await);
        assert!(store.is_empty().await);
    }
}
