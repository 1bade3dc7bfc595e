//! One-shot initialisation of the authentication database.
//!
//! Steps run strictly in order against a fresh server: select the database,
//! create the `user` collection, create the unique `username` index, insert
//! the seed administrator. The first failure aborts the run; nothing is
//! retried or rolled back.

use crate::config::Config;
use crate::db::models::User;
use crate::db::mongo::UserStorage;
use crate::db::schema::USER_COLLECTION;
use crate::error::SeedError;
use mongodb::Client;
use mongodb::error::Result as MongoResult;
use std::fmt;
use std::future::Future;
use tracing::{error, info, warn};

/// Fallible database steps of a bootstrap run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStep {
    CreateCollection,
    CreateUsernameIndex,
    InsertAdmin,
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BootstrapStep::CreateCollection => "create user collection",
            BootstrapStep::CreateUsernameIndex => "create username unique index",
            BootstrapStep::InsertAdmin => "insert admin user",
        };
        f.write_str(name)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub database: String,
    pub collection: String,
    pub index: String,
    pub user_id: String,
}

pub async fn run(client: &Client, cfg: &Config) -> Result<BootstrapReport, SeedError> {
    info!("############ Init script started ############");

    info!(database = %cfg.database.name, "----- selecting database -----");
    let storage = UserStorage::new(client, &cfg.database.name);
    info!(database = %cfg.database.name, "----- database selected -----");

    step(BootstrapStep::CreateCollection, storage.create_collection()).await?;

    let index = step(
        BootstrapStep::CreateUsernameIndex,
        storage.create_username_index(),
    )
    .await?;

    if cfg.admin.uses_default_hash() {
        warn!(
            username = %cfg.admin.username,
            "seeding the built-in development password hash; set ADMIN_PASSWORD_HASH outside local environments"
        );
    }
    info!("----- generating admin id -----");
    let admin = User::admin(cfg.admin.username.as_str(), cfg.admin.password_hash());
    info!(user_id = %admin.id, "----- admin id generated -----");
    step(BootstrapStep::InsertAdmin, storage.insert(&admin)).await?;

    info!(user_id = %admin.id, "############ Init script finished ############");

    Ok(BootstrapReport {
        database: cfg.database.name.clone(),
        collection: USER_COLLECTION.to_string(),
        index,
        user_id: admin.id,
    })
}

/// What an already-initialised database holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingSeed {
    pub users: u64,
    pub admin_id: Option<String>,
}

/// Look at the `user` collection after a run was refused, so the operator
/// can tell an initialised database from a broken one.
pub async fn existing_seed(client: &Client, cfg: &Config) -> Result<ExistingSeed, SeedError> {
    let storage = UserStorage::new(client, &cfg.database.name);
    let users = storage.count().await.map_err(SeedError::Query)?;
    let admin_id = storage
        .find_by_username(&cfg.admin.username)
        .await
        .map_err(SeedError::Query)?
        .map(|user| user.id);
    Ok(ExistingSeed { users, admin_id })
}

async fn step<T>(
    step: BootstrapStep,
    op: impl Future<Output = MongoResult<T>>,
) -> Result<T, SeedError> {
    info!(%step, "----- starting -----");
    match op.await {
        Ok(value) => {
            info!(%step, "----- done -----");
            Ok(value)
        }
        Err(source) => {
            error!(%step, error = %source, "bootstrap step failed");
            Err(SeedError::Step { step, source })
        }
    }
}
