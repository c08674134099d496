//! The `lexidrill profiles` command.

use anyhow::Result;

use super::Globals;

pub fn execute(globals: &Globals) -> Result<()> {
    let (_, store) = globals.load()?;
    let profiles = store.list()?;

    if profiles.is_empty() {
        println!("No profiles in {}.", store.dir().display());
        println!("Create one with: lexidrill init --profile <name>");
        return Ok(());
    }

    println!("Profiles in {}:", store.dir().display());
    for name in &profiles {
        println!("  {name}");
    }
    Ok(())
}
