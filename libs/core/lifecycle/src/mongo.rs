//! Generic collection operations shared by every resource repository.

use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
};
use tracing::instrument;

use crate::error::LifecycleResult;
use crate::filter::{exclude_id, live_filter, with_live};
use crate::record::{RecordStatus, Resource, SoftDeletable, StatusGuard};

/// Typed handle to the collection backing a [`Resource`].
pub struct MongoCollection<T: Resource> {
    collection: Collection<T>,
}

impl<T: Resource> Clone for MongoCollection<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
        }
    }
}

impl<T: Resource> MongoCollection<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<T>(T::COLLECTION),
        }
    }

    /// Underlying collection for resource-specific queries
    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    fn id_filter(id: &str, guard: StatusGuard) -> Document {
        let filter = doc! { "_id": id };
        match guard {
            StatusGuard::Any => filter,
            StatusGuard::LiveOnly => with_live(filter),
        }
    }

    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn find_by_id(&self, id: &str) -> LifecycleResult<Option<T>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn find_one(&self, filter: Document) -> LifecycleResult<Option<T>> {
        Ok(self.collection.find_one(filter).await?)
    }

    /// Whether any record other than `exclude` matches `filter`.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn exists(&self, filter: Document, exclude: Option<&str>) -> LifecycleResult<bool> {
        let found = self
            .collection
            .find_one(exclude_id(filter, exclude))
            .await?;
        Ok(found.is_some())
    }

    /// Like [`exists`](Self::exists), restricted to live records.
    pub async fn exists_live(
        &self,
        filter: Document,
        exclude: Option<&str>,
    ) -> LifecycleResult<bool> {
        self.exists(with_live(filter), exclude).await
    }

    #[instrument(skip(self, record), fields(kind = T::KIND, id = %record.id()))]
    pub async fn insert(&self, record: &T) -> LifecycleResult<()> {
        self.collection.insert_one(record).await?;
        tracing::info!("{} created", T::KIND);
        Ok(())
    }

    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn list(&self, filter: Document) -> LifecycleResult<Vec<T>> {
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn list_live(&self) -> LifecycleResult<Vec<T>> {
        self.list(live_filter()).await
    }

    /// `$set` the given fields plus a fresh `updated_on`.
    ///
    /// Returns whether a record matched, even if nothing changed.
    #[instrument(skip(self, fields), fields(kind = T::KIND))]
    pub async fn set_fields(
        &self,
        id: &str,
        guard: StatusGuard,
        mut fields: Document,
    ) -> LifecycleResult<bool> {
        fields.insert("updated_on", bson::DateTime::now());
        let result = self
            .collection
            .update_one(Self::id_filter(id, guard), doc! { "$set": fields })
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Physically remove a record.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn delete(&self, id: &str) -> LifecycleResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    /// Create a non-unique index on `keys`.
    pub async fn create_index(&self, keys: Document) -> LifecycleResult<()> {
        let model = IndexModel::builder().keys(keys).build();
        let created = self.collection.create_index(model).await?;
        tracing::debug!(collection = T::COLLECTION, index = %created.index_name, "Index ready");
        Ok(())
    }
}

impl<T: SoftDeletable> MongoCollection<T> {
    /// Mark a record inactive. Returns whether a record matched.
    pub async fn soft_delete(&self, id: &str, guard: StatusGuard) -> LifecycleResult<bool> {
        self.set_fields(id, guard, doc! { "status": RecordStatus::INACTIVE })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_only_guard_wraps_id() {
        #[derive(Clone, serde::Serialize, serde::Deserialize)]
        struct Widget {
            #[serde(rename = "_id")]
            id: String,
        }

        impl Resource for Widget {
            const KIND: &'static str = "Widget";
            const COLLECTION: &'static str = "widgets";

            fn id(&self) -> &str {
                &self.id
            }

            fn set_updated_on(&mut self, _at: chrono::DateTime<chrono::Utc>) {}
        }

        let any = MongoCollection::<Widget>::id_filter("x", StatusGuard::Any);
        assert_eq!(any, doc! { "_id": "x" });

        let live = MongoCollection::<Widget>::id_filter("x", StatusGuard::LiveOnly);
        assert!(live.contains_key("$and"));
    }
}
