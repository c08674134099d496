//! Configuration file loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Direction;
use crate::sampler::SamplingStrategy;

/// Top-level lexidrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexidrillConfig {
    /// Directory holding one lexicon file per profile.
    #[serde(default = "default_profiles_dir")]
    pub profiles_dir: PathBuf,
    /// Seed lexicon used to create new profiles.
    #[serde(default = "default_seed_lexicon")]
    pub seed_lexicon: PathBuf,
    /// Words per session when none is given.
    #[serde(default = "default_count")]
    pub default_count: usize,
    /// Direction when none is given.
    #[serde(default)]
    pub default_direction: Direction,
    /// Sampling strategy for sessions.
    #[serde(default)]
    pub strategy: SamplingStrategy,
}

fn default_profiles_dir() -> PathBuf {
    PathBuf::from("./profiles")
}
fn default_seed_lexicon() -> PathBuf {
    PathBuf::from("./lexicon.toml")
}
fn default_count() -> usize {
    10
}

impl Default for LexidrillConfig {
    fn default() -> Self {
        Self {
            profiles_dir: default_profiles_dir(),
            seed_lexicon: default_seed_lexicon(),
            default_count: default_count(),
            default_direction: Direction::default(),
            strategy: SamplingStrategy::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `lexidrill.toml` in the current directory
/// 2. `~/.config/lexidrill/config.toml`
///
/// Environment variable override: `LEXIDRILL_PROFILES_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<LexidrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexidrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<LexidrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => LexidrillConfig::default(),
    };

    if let Ok(dir) = std::env::var("LEXIDRILL_PROFILES_DIR") {
        config.profiles_dir = PathBuf::from(dir);
    }

    config.profiles_dir = resolve_path(&config.profiles_dir);
    config.seed_lexicon = resolve_path(&config.seed_lexicon);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexidrill"))
}
