use mongodb::bson::{Document, doc};

use crate::RecordStatus;

/// Matches records whose status is absent or anything but `inactive`.
pub fn live_filter() -> Document {
    doc! {
        "$or": [
            { "status": { "$ne": RecordStatus::INACTIVE } },
            { "status": { "$exists": false } },
        ]
    }
}

/// Restrict `filter` to live records.
pub fn with_live(filter: Document) -> Document {
    doc! { "$and": [filter, live_filter()] }
}

/// Add `_id != id` to `filter` when an id is given.
pub fn exclude_id(mut filter: Document, id: Option<&str>) -> Document {
    if let Some(id) = id {
        filter.insert("_id", doc! { "$ne": id });
    }
    filter
}
