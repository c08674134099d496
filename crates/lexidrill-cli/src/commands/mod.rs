pub mod drill;
pub mod init;
pub mod profiles;
pub mod stats;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use lexidrill_core::config::{load_config_from, LexidrillConfig};
use lexidrill_core::store::ProfileStore;

/// Options shared by every subcommand.
pub struct Globals {
    pub config: Option<PathBuf>,
    pub profiles_dir: Option<PathBuf>,
}

impl Globals {
    /// Load the config, applying `--profiles-dir` on top of it.
    pub fn load(&self) -> Result<(LexidrillConfig, ProfileStore)> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.profiles_dir {
            config.profiles_dir = dir.clone();
        }
        let store = ProfileStore::new(config.profiles_dir.clone());
        Ok((config, store))
    }
}
