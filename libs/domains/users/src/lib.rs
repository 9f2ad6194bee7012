//! Users Domain
//!
//! Batch registration, lookups, updates, hard deletes and a plain
//! credential check. Email and phone must be unique across users.
//! Responses never carry the password.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateUser, DeleteUser, LoginRequest, LoginResponse, UpdateUser, User, UserList, UserView,
};
pub use crate::mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
