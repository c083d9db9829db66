//! PlantRecog
//!
//! Terminal client that identifies plants from photos using a remote image
//! classification service. The binary wires configuration, logging and the
//! platform implementations together, then hands the engine to either the
//! TUI or the headless runner.

pub mod headless;

use std::path::PathBuf;

use plantrecog_app::config::{self, Settings};
use plantrecog_app::{Collaborators, Engine, ExitReason, SystemPlatform};
use plantrecog_core::prelude::*;

pub use headless::run_headless;
pub use plantrecog_tui::run as run_tui;

/// Everything the command line can override
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub service_url: Option<String>,
    pub gallery: Option<PathBuf>,
    pub image: Option<PathBuf>,
    pub headless: bool,
}

impl RunOptions {
    /// Load settings from the resolved config file and apply overrides
    pub fn settings(&self) -> Settings {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let path = config::resolve_config_path(self.config.as_deref(), &cwd);
        let mut settings = config::load_settings(path.as_deref());
        self.apply_overrides(&mut settings);
        settings
    }

    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = &self.service_url {
            settings.service.base_url = url.clone();
        }
        if let Some(dir) = &self.gallery {
            settings.gallery.directory = dir.clone();
        }
    }
}

/// Main application entry point
pub async fn run(options: RunOptions) -> Result<ExitReason> {
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Logs go to a file since the TUI and headless output own stdout
    plantrecog_core::logging::init()?;

    let settings = options.settings();
    info!("Service: {}", settings.service.base_url);

    let collaborators = Collaborators::<SystemPlatform>::from_settings(&settings)?;
    let engine = Engine::new(settings, collaborators);

    let result = if options.headless {
        run_headless(engine, options.image).await
    } else {
        run_tui(engine, options.image).await
    };

    match &result {
        Ok(reason) => info!("PlantRecog exiting ({:?})", reason),
        Err(e) => error!("Application error: {:?}", e),
    }
    result
}
