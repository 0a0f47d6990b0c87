pub mod candidates;
pub mod init;
pub mod register;
pub mod report;
pub mod take;

use std::path::PathBuf;

use anyhow::Result;

use skillradar_api::{load_config_from, SkillRadarConfig};
use skillradar_core::LocalTestStore;

/// Global options shared by every command.
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl Context {
    pub fn config(&self) -> Result<SkillRadarConfig> {
        let mut config = load_config_from(self.config_path.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        tracing::debug!(
            api_url = %config.api_url,
            data_dir = %config.data_dir.display(),
            "config loaded"
        );
        Ok(config)
    }

    pub fn store(&self) -> Result<LocalTestStore> {
        Ok(self.config()?.local_store())
    }
}
