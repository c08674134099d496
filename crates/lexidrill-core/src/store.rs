//! Per-profile lexicon files.
//!
//! Each profile is one pretty-printed JSON file, `<profile>.json`, inside the
//! profiles directory. Saves go through a temporary file in the same
//! directory that is renamed over the target, so a failed write leaves the
//! previous file in place.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::error::DrillError;
use crate::model::Lexicon;

const PROFILE_EXTENSION: &str = "json";

/// A directory of profile lexicons.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the lexicon file for `profile`.
    pub fn path_for(&self, profile: &str) -> Result<PathBuf> {
        validate_profile_name(profile)?;
        Ok(self.dir.join(format!("{profile}.{PROFILE_EXTENSION}")))
    }

    pub fn exists(&self, profile: &str) -> Result<bool> {
        Ok(self.path_for(profile)?.is_file())
    }

    /// Profile names, least recently modified first.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut profiles: Vec<(SystemTime, String)> = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read profiles directory: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() || !path.extension().is_some_and(|ext| ext == PROFILE_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_profile_name(name).is_err() {
                continue;
            }
            let modified = std::fs::metadata(&path)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            profiles.push((modified, name.to_string()));
        }

        profiles.sort();
        Ok(profiles.into_iter().map(|(_, name)| name).collect())
    }

    /// Load the lexicon of `profile`, rejecting negative or non-finite weights.
    pub fn load(&self, profile: &str) -> Result<Lexicon> {
        let path = self.path_for(profile)?;
        if !path.is_file() {
            return Err(DrillError::ProfileNotFound(profile.to_string()).into());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read profile from {}", path.display()))?;
        let lexicon: Lexicon = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse profile JSON: {}", path.display()))?;

        if let Some((position, weight)) = lexicon.first_invalid_weight() {
            return Err(DrillError::InvalidWeight { position, weight })
                .with_context(|| format!("corrupt profile: {}", path.display()));
        }

        tracing::debug!(profile, rows = lexicon.len(), "loaded profile");
        Ok(lexicon)
    }

    /// Atomically overwrite the lexicon of `profile`.
    pub fn save(&self, profile: &str, lexicon: &Lexicon) -> Result<()> {
        let path = self.path_for(profile)?;
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create profiles directory: {}", self.dir.display())
        })?;

        let temp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("failed to create temporary file in {}", self.dir.display()))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer_pretty(&mut writer, lexicon)
                .context("failed to serialize profile")?;
            writer.flush().context("failed to flush profile")?;
        }
        temp.as_file()
            .sync_all()
            .context("failed to sync profile to disk")?;
        temp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("failed to write profile to {}", path.display()))?;

        tracing::info!(profile, rows = lexicon.len(), path = %path.display(), "saved profile");
        Ok(())
    }

    /// Save a brand-new profile; fails if one with that name exists.
    pub fn create(&self, profile: &str, lexicon: &Lexicon) -> Result<()> {
        if self.exists(profile)? {
            return Err(DrillError::ProfileExists(profile.to_string()).into());
        }
        self.save(profile, lexicon)
    }
}

/// Profile names become file names: letters, digits, `-` and `_` only.
pub fn validate_profile_name(name: &str) -> Result<(), DrillError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DrillError::InvalidProfileName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, LanguagePair, LexiconRow};

    fn lexicon() -> Lexicon {
        Lexicon::new(
            LanguagePair::default(),
            vec![
                LexiconRow::new(Category::Verb, "gehen", "aller"),
                LexiconRow::new(Category::General, "Haus", "maison"),
            ],
        )
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profiles"));
        store.save("anna", &lexicon()).unwrap();
        assert!(store.exists("anna").unwrap());
        assert_eq!(store.load("anna").unwrap(), lexicon());
    }

    #[test]
    fn missing_profile_is_classified() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        let err = store.load("ghost").unwrap_err();
        assert_eq!(
            err.downcast_ref::<DrillError>(),
            Some(&DrillError::ProfileNotFound("ghost".into()))
        );
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        store.create("anna", &lexicon()).unwrap();
        let err = store.create("anna", &Lexicon::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DrillError>(),
            Some(&DrillError::ProfileExists("anna".into()))
        );
        assert_eq!(store.load("anna").unwrap(), lexicon());
    }

    #[test]
    fn list_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        store.save("anna", &lexicon()).unwrap();
        store.save("ben", &lexicon()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::write(dir.path().join("bad name.json"), "{}").unwrap();

        let mut names = store.list().unwrap();
        names.sort();
        assert_eq!(names, vec!["anna", "ben"]);
        assert!(ProfileStore::new(dir.path().join("none")).list().unwrap().is_empty());
    }

    #[test]
    fn corrupt_weights_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        let mut lex = lexicon();
        lex.rows[1].weight = -1.0;
        store.save("anna", &lex).unwrap();
        let err = store.load("anna").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DrillError>(),
            Some(DrillError::InvalidWeight { position: 1, .. })
        ));
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        store.save("anna", &lexicon()).unwrap();

        // A directory squatting on the target path makes the rename fail.
        let blocked = ProfileStore::new(dir.path());
        std::fs::create_dir(dir.path().join("ben.json")).unwrap();
        assert!(blocked.save("ben", &lexicon()).is_err());
        assert_eq!(store.load("anna").unwrap(), lexicon());

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 2);
    }

    #[test]
    fn profile_names_are_checked() {
        assert!(validate_profile_name("anna_2").is_ok());
        assert!(validate_profile_name("").is_err());
        assert!(validate_profile_name("../etc").is_err());
        assert!(validate_profile_name("a b").is_err());
    }
}
