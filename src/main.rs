use vise_api::config::AppConfig;

#[tokio::main]
async fn main() {
    // Load configuration from environment variables (and .env when present)
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    vise_api::init_tracing(&config);
    tracing::info!("VISE API - Starting...");

    if let Err(err) = vise_api::run(config).await {
        tracing::error!("Server error: {}", err);
        std::process::exit(1);
    }
}
