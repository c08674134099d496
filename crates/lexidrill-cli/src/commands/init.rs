//! The `lexidrill init` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use lexidrill_core::seed::parse_seed;
use lexidrill_core::store::ProfileStore;

use super::Globals;

pub fn execute(globals: &Globals, profile: String, seed_lexicon: Option<PathBuf>) -> Result<()> {
    let (config, store) = globals.load()?;
    let seed_path = seed_lexicon.unwrap_or(config.seed_lexicon);
    let words = create_profile(&store, &profile, &seed_path)?;
    println!(
        "Created profile '{profile}' with {words} words in {}",
        store.dir().display()
    );
    Ok(())
}

/// Build a fresh lexicon from `seed_path` and store it as `profile`.
///
/// Returns the number of words in the new profile.
pub fn create_profile(store: &ProfileStore, profile: &str, seed_path: &Path) -> Result<usize> {
    let seed = parse_seed(seed_path)?;
    let lexicon = seed.build();
    store.create(profile, &lexicon)?;
    Ok(lexicon.len())
}
