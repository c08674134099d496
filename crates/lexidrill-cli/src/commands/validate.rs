//! The `lexidrill validate` command.

use std::path::PathBuf;

use anyhow::Result;

use lexidrill_core::seed::{parse_seed, validate_seed};

pub fn execute(seed_lexicon: PathBuf) -> Result<()> {
    let seed = parse_seed(&seed_lexicon)?;
    let words: usize = seed.blocks.iter().map(|b| b.pairs.len()).sum();
    println!(
        "Seed lexicon: {} -> {} ({} blocks, {} pairs)",
        seed.languages.primary,
        seed.languages.secondary,
        seed.blocks.len(),
        words
    );

    let warnings = validate_seed(&seed);
    for w in &warnings {
        let prefix = w
            .category
            .map(|c| format!("  [{c}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Seed lexicon valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
