//! Application state shared across handlers

use crate::config::Settings;
use crate::swapi::SwapiClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Catalog client
    pub archive: Arc<SwapiClient>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, archive: SwapiClient) -> anyhow::Result<Self> {
        Ok(Self {
            settings: Arc::new(settings),
            archive: Arc::new(archive),
            templates: Arc::new(super::Templates::new()?),
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
