use std::fs::File;

use breakeven_app::{AppConfig, Cli, impls::AnalyticsApp};
use breakeven_axum::{router, start_server};
use breakeven_sqlite::Db;
use jwt_simple::prelude::HS256Key;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI args and extract the JWT key
    let cli = Cli::import()?;
    let key = HS256Key::from_bytes(cli.secret.as_bytes());

    // Create config with proper layering of CLI args
    let AppConfig {
        server,
        database,
        auth,
    } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let app = AnalyticsApp {
        db,
        key,
        token_ttl: auth.token_ttl,
    };

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let (_, schema) = router(app, server);
        serde_json::to_writer_pretty(File::create(path)?, schema.as_ref())?;
        return Ok(());
    }

    if let Some(admin) = &auth.admin {
        app.seed_admin(admin).await?;
    }

    start_server(server, app).await?;
    Ok(())
}
