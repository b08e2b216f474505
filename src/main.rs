use dotenv::dotenv;
use tracing::{error, info, warn};

use elearning_backend::app::app::App;
use elearning_backend::util::logger::Logger;

#[tokio::main]
async fn main() {
    // Load before the logger so RUST_LOG from .env is honoured
    let env_loaded = dotenv();

    let _logger = match Logger::new("logs") {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialise logging: {}", e);
            std::process::exit(1);
        }
    };

    info!("🚀 Starting E-learning Backend Application");
    match env_loaded {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialise application: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = app.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
