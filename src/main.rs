use env_logger::Env;
use log::{error, info};

use pantry_chef::api::{self, AppState};
use pantry_chef::{AppConfig, ChefError, Pantry, ProviderFactory, RecipeGenerator};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ChefError> {
    let config = AppConfig::load()?;

    let provider = ProviderFactory::build_from_config(&config)?;
    info!(
        "Using provider '{}' (up to {} attempts when rate limited)",
        provider.provider_name(),
        config.retry.max_attempts
    );
    let generator = RecipeGenerator::new(provider);
    let pantry = Pantry::from_config(&config.pantry);

    let app = api::router(AppState::new(generator, pantry));

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(ChefError::Server)?;
    info!("Starting Recipe Generator on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ChefError::Server)?;

    info!("Recipe Generator stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
