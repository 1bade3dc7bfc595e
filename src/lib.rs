pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;

pub use bootstrap::{BootstrapReport, BootstrapStep};
pub use config::Config;
pub use error::SeedError;
