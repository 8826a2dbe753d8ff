use crate::config::Config;
use crate::logger::Logger;
use crate::service::InventoryService;

/// Services and settings shared by the UI.
#[derive(Clone)]
pub struct AppContext {
    pub service: InventoryService,
    pub logger: Logger,
    pub config: Config,
}

impl AppContext {
    pub fn new(service: InventoryService, logger: Logger, config: Config) -> Self {
        Self {
            service,
            logger,
            config,
        }
    }
}
