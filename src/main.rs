use kvstore::{web, Config, KvStore};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Optional .env file, real environment variables take precedence
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("kvstore starting...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Configuration: {:?}", config);

    let kv = Arc::new(KvStore::new());

    if let Err(e) = web::run_web_server(&config, kv).await {
        error!("Web server error: {:#}", e);
        std::process::exit(1);
    }
}
