//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    llm::{GeneratorConfig, OpenAiGenerator, TextGenerator},
    store::{PlanStore, SqlitePlanStore},
};

/// Builder for creating and configuring Planner instances.
#[derive(Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    store: Option<Arc<dyn PlanStore>>,
    generator: Option<Arc<dyn TextGenerator>>,
    generator_config: Option<GeneratorConfig>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses the given store instead of opening the SQLite database.
    pub fn with_store(mut self, store: Arc<dyn PlanStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Uses the given text generator instead of the chat-completions client.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Configures the default chat-completions client. Ignored when a
    /// generator is supplied with [`PlannerBuilder::with_generator`].
    pub fn with_generator_config(mut self, config: GeneratorConfig) -> Self {
        self.generator_config = Some(config);
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::XdgDirectory` if no default database location
    /// can be determined, `PlannerError::FileSystem` if the database
    /// directory cannot be created, `PlannerError::Database` if database
    /// initialization fails and `PlannerError::Configuration` if the
    /// generator environment is invalid.
    pub async fn build(self) -> Result<Planner> {
        let store: Arc<dyn PlanStore> = match self.store {
            Some(store) => store,
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                info!("Using database at {}", db_path.display());
                Arc::new(SqlitePlanStore::open(db_path).await?)
            }
        };

        let generator: Arc<dyn TextGenerator> = match self.generator {
            Some(generator) => generator,
            None => {
                let config = match self.generator_config {
                    Some(config) => config,
                    None => GeneratorConfig::from_env()?,
                };
                Arc::new(OpenAiGenerator::from_config(&config)?)
            }
        };

        Ok(Planner::new(store, generator))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}
