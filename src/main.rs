use auth_seed::config::Config;
use mimalloc::MiMalloc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let loaded = Config::load();
    let loglevel = loaded
        .as_ref()
        .map(|cfg| cfg.loglevel.clone())
        .unwrap_or_else(|_| Config::default().loglevel);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(
        driver = %cfg.database.driver,
        uri = %cfg.database.redacted_uri(),
        database = %cfg.database.name,
        admin = %cfg.admin.username,
        loglevel = %cfg.loglevel
    );

    let client = match auth_seed::db::connect(&cfg.database).await {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to connect to MongoDB");
            std::process::exit(1);
        }
    };

    let succeeded = match auth_seed::bootstrap::run(&client, &cfg).await {
        Ok(report) => {
            info!(
                database = %report.database,
                collection = %report.collection,
                index = %report.index,
                user_id = %report.user_id,
                "bootstrap complete"
            );
            true
        }
        Err(e) => {
            error!(error = %e, "bootstrap aborted");
            if e.is_already_initialised() {
                match auth_seed::bootstrap::existing_seed(&client, &cfg).await {
                    Ok(existing) => warn!(
                        database = %cfg.database.name,
                        users = existing.users,
                        admin_id = existing.admin_id.as_deref().unwrap_or("<none>"),
                        "database already initialised; drop it to seed again"
                    ),
                    Err(inspect) => warn!(
                        error = %inspect,
                        "database looks initialised but could not be inspected"
                    ),
                }
            }
            false
        }
    };

    client.shutdown().await;

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
