use anyhow::Result;
use log::info;
use nimbus::backend::HttpBackend;
use nimbus::config::Config;
use nimbus::logger;
use nimbus::service::{Identity, InventoryService};
use nimbus::ui::{self, core::AppContext};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().skip(1).any(|arg| arg == "--init-config") {
        let path = Config::get_default_config_path()?;
        return Config::generate_default_config(path);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            eprintln!("\n💡 Run `nimbus --init-config` to write a default configuration file.");
            return Ok(());
        }
    };

    let log_sink = logger::init(&config.logging)?;
    info!("🚀 Nimbus starting against {}", config.api.base_url);

    let backend = HttpBackend::from_config(&config.api)?;
    let identity = Identity::new(config.api.user_email.clone());
    let service = InventoryService::new(Arc::new(backend), identity, config.fetch.page_size);

    // Run the TUI application
    let context = AppContext::new(service, log_sink, config);
    ui::run_app(context).await?;

    Ok(())
}
