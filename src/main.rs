//! Vista Admin - session-authenticated record admin panel

use vista_admin::{api, auth, core, db};

use anyhow::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration (handles CLI args, env vars, and config file)
    let config = match core::config::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print error to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize logging system based on configuration
    let _logger = match core::Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!("Starting Vista Admin v{}", vista_admin::VERSION);
    info!(
        host = %config.server.host,
        port = config.server.port,
        "Server configuration"
    );
    info!(path = ?config.database.path, "Database configuration");

    // Initialize database (runs migrations as part of setup)
    info!("Initializing database...");
    let db = std::sync::Arc::new(db::DatabaseManager::new(
        &config.database.path,
        config.database.connection_pool_size as u32,
        std::time::Duration::from_millis(config.database.busy_timeout),
    )?);
    info!("Database initialized successfully");

    // Ensure a default admin account exists on first run
    ensure_admin_account(db.clone()).await?;

    let server_url = format!("http://{}:{}", config.server.host, config.server.port);
    let server = api::ApiServer::new(config, db);

    info!(url = %server_url, "Server ready - starting to serve requests");

    // Start serving (this will block until shutdown signal)
    server.serve().await?;

    Ok(())
}

async fn ensure_admin_account(db: std::sync::Arc<db::DatabaseManager>) -> Result<()> {
    use vista_admin::db::repository::AccountRepository;

    let accounts = AccountRepository::new(db);
    let count = accounts.count().await?;

    if count == 0 {
        info!("No accounts found, creating default admin account...");
        let password_hash = auth::hash_password("admin123")?;
        accounts.create("admin", &password_hash).await?;
        info!("Default admin account created: username='admin', password='admin123'");
    }

    Ok(())
}
