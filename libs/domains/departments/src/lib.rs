//! Departments Domain
//!
//! Department registration over the shared record lifecycle: create with a
//! unique lowercase display name, list live departments, update, and
//! soft-delete.
//!
//! ```text
//! Handlers → DepartmentService → DepartmentRepository → MongoDB / in-memory
//! ```
//!
//! ```rust,no_run
//! use domain_departments::{DepartmentService, MongoDepartmentRepository, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let repository = MongoDepartmentRepository::new(&client.database("userRegistration"));
//! let router = handlers::router(DepartmentService::new(repository));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{DepartmentError, DepartmentResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateDepartment, Department, DepartmentList, DepartmentUpdateMode, DepartmentView,
    UpdateDepartment,
};
pub use crate::mongodb::MongoDepartmentRepository;
pub use repository::{DepartmentRepository, InMemoryDepartmentRepository};
pub use service::{DepartmentService, UpdateOutcome};
