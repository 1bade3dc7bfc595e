//! Database module: document models, schema names and MongoDB access.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring stored documents
//! - `schema.rs`: collection and index definitions
//! - `mongo.rs`: client acquisition and the `user` collection wrapper

pub mod models;
pub mod mongo;
pub mod schema;

pub use models::{Role, User};
pub use mongo::{UserStorage, connect};
pub use schema::{USER_COLLECTION, USERNAME_INDEX};
