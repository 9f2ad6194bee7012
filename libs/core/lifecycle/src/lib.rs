//! Shared record lifecycle for the registration resources.
//!
//! Departments, roles and users are all created with a fresh opaque id,
//! guarded by a uniqueness check on a natural key, partially updated with
//! `$set`, and retired by flipping `status` to `inactive` (or removed
//! outright for users). This crate holds the parts of that lifecycle that
//! do not depend on the resource type:
//!
//! - [`new_record_id`] and [`RecordStatus`]
//! - [`normalize_key`] for natural keys
//! - [`render_timestamp`] for read-side formatting
//! - [`live_filter`] and friends for "not inactive" queries
//! - [`MongoCollection`] with the generic store operations
//! - [`InMemoryStore`], the same operations over a `Vec` for tests and local runs

pub mod error;
pub mod filter;
pub mod key;
pub mod memory;
pub mod mongo;
pub mod record;
pub mod schema;
pub mod time;

pub use error::{LifecycleError, LifecycleResult};
pub use filter::{exclude_id, live_filter, with_live};
pub use key::{KeyCase, normalize_key};
pub use memory::InMemoryStore;
pub use mongo::MongoCollection;
pub use record::{RecordStatus, Resource, SoftDeletable, StatusGuard, new_record_id};
pub use schema::{MissingField, require};
pub use time::{TIMESTAMP_FORMAT, render_timestamp};
