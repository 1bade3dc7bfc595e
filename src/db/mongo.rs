use crate::config::DatabaseConfig;
use crate::db::models::User;
use crate::db::schema::{USER_COLLECTION, username_index};
use crate::error::SeedError;
use bson::{Document, doc};
use mongodb::error::Result as MongoResult;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

const APP_NAME: &str = "auth-seed";

/// Build a client for the configured server and confirm it answers a ping.
pub async fn connect(cfg: &DatabaseConfig) -> Result<Client, SeedError> {
    let uri = cfg.uri()?;
    let mut options = ClientOptions::parse(&uri)
        .await
        .map_err(SeedError::Connect)?;
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options
        .app_name
        .get_or_insert_with(|| APP_NAME.to_string());

    let client = Client::with_options(options).map_err(SeedError::Connect)?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(SeedError::Connect)?;

    info!(uri = %cfg.redacted_uri(), "connected to MongoDB");
    Ok(client)
}

/// Access to the `user` collection of one database.
#[derive(Clone)]
pub struct UserStorage {
    db: Database,
}

impl UserStorage {
    /// Select the database by name. The server creates it lazily on first write.
    pub fn new(client: &Client, database: &str) -> Self {
        Self {
            db: client.database(database),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection(USER_COLLECTION)
    }

    /// Explicit `create`; fails with NamespaceExists if the collection is present.
    pub async fn create_collection(&self) -> MongoResult<()> {
        self.db.create_collection(USER_COLLECTION).await
    }

    /// Create the unique `username` index. Returns the index name.
    pub async fn create_username_index(&self) -> MongoResult<String> {
        let result = self.users().create_index(username_index()).await?;
        debug!(index = %result.index_name, "index created");
        Ok(result.index_name)
    }

    pub async fn insert(&self, user: &User) -> MongoResult<()> {
        self.users().insert_one(user).await?;
        Ok(())
    }

    pub async fn count(&self) -> MongoResult<u64> {
        self.users().count_documents(Document::new()).await
    }

    pub async fn find_by_username(&self, username: &str) -> MongoResult<Option<User>> {
        self.users().find_one(doc! { "username": username }).await
    }
}
