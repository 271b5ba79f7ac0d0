use std::net::TcpListener;
use std::sync::Arc;

use matchday_backend::run;
use matchday_backend::config::settings::{get_config, get_jwt_settings};
use matchday_backend::db::InMemoryStore;
use matchday_backend::services::AuthService;
use matchday_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "matchday-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // JWT
    let jwt_settings = get_jwt_settings(&config);
    // All records live here for the lifetime of the process
    let store = Arc::new(InMemoryStore::new());

    if let Some(admin) = &config.application.bootstrap_admin {
        let seeder = AuthService::new(
            store.clone(),
            Arc::new(get_jwt_settings(&config)),
            config.application.password_hash_cost,
        );
        match seeder.seed_admin(&admin.username, &admin.email, &admin.password).await {
            Ok(true) => tracing::info!("✅ Bootstrap admin {} created", admin.email),
            Ok(false) => tracing::info!("Bootstrap admin {} already present", admin.email),
            Err(e) => {
                tracing::error!("❌ Failed to create bootstrap admin: {:?}", e);
                std::process::exit(1);
            }
        }
    }

    let address = config.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        store,
        jwt_settings,
        &config.application,
    )?.await
}
