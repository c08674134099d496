//! The `lexidrill drill` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use lexidrill_core::config::LexidrillConfig;
use lexidrill_core::model::{CategorySelector, Direction, Lexicon};
use lexidrill_core::report::SessionReport;
use lexidrill_core::sampler::SamplingStrategy;
use lexidrill_core::store::{validate_profile_name, ProfileStore};
use lexidrill_core::view::PopulationView;
use lexidrill_core::{DrillConfig, DrillEngine, DrillError};

use super::init::create_profile;
use super::Globals;
use crate::console::ConsoleResponder;
use crate::prompt::Prompter;

/// Command-line values; anything left out is asked for.
pub struct DrillArgs {
    pub profile: Option<String>,
    pub direction: Option<String>,
    pub category: Option<String>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
    pub strategy: Option<String>,
    pub report: Option<PathBuf>,
}

pub fn execute(globals: &Globals, args: DrillArgs) -> Result<()> {
    let (config, store) = globals.load()?;
    let mut prompter = Prompter::new(std::io::stdin().lock(), std::io::stdout());

    let profile = match args.profile {
        Some(name) => name,
        None => choose_profile(&mut prompter, &store, &config)?,
    };
    let lexicon = store.load(&profile)?;

    let direction = match args.direction {
        Some(raw) => raw.parse::<Direction>().map_err(anyhow::Error::msg)?,
        None => ask_direction(&mut prompter, &lexicon, config.default_direction)?,
    };

    let selector = match args.category {
        Some(raw) => raw.parse::<CategorySelector>().map_err(anyhow::Error::msg)?,
        None => ask_category(&mut prompter, &lexicon)?,
    };

    let count = match args.count {
        Some(n) => n,
        None => {
            let eligible = PopulationView::build(&lexicon, selector)?.len();
            ask_count(&mut prompter, eligible, config.default_count)?
        }
    };

    let strategy = match args.strategy {
        Some(raw) => raw.parse::<SamplingStrategy>().map_err(anyhow::Error::msg)?,
        None => config.strategy,
    };

    let drill_config = DrillConfig {
        selector,
        direction,
        count,
        seed: args.seed,
        strategy,
    };
    tracing::debug!(profile = %profile, config = ?drill_config, "resolved session settings");

    let engine = DrillEngine::new(store);
    let mut responder = ConsoleResponder::new(prompter);
    let report = engine
        .run(&profile, &drill_config, &mut responder)
        .map_err(|e| {
            let request = e
                .downcast_ref::<DrillError>()
                .is_some_and(DrillError::is_request_error);
            if request {
                e.context("no session was started, choose fewer words or another category")
            } else {
                e
            }
        })?;

    print_summary(&report);

    if let Some(path) = &args.report {
        if path.extension().is_some_and(|ext| ext == "md") {
            std::fs::write(path, report.to_markdown())
                .with_context(|| format!("failed to write report to {}", path.display()))?;
        } else {
            report.save_json(path)?;
        }
        eprintln!("Session report saved to: {}", path.display());
    }

    Ok(())
}

/// Pick an existing profile or create a new one from the seed lexicon.
fn choose_profile<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    store: &ProfileStore,
    config: &LexidrillConfig,
) -> Result<String> {
    let existing = store.list()?;

    let question = if existing.is_empty() {
        "No profile yet. Name of the new profile:".to_string()
    } else {
        let listed: Vec<String> = existing
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{}: {name}", i + 1))
            .collect();
        format!(
            "Profiles: {}\nEnter a number or a name (a new name creates a profile):",
            listed.join(", ")
        )
    };

    let chosen = prompter.ask_until(
        &question,
        "Use letters, digits, '-' or '_'.",
        |answer| {
            if let Ok(i) = answer.parse::<usize>() {
                if let Some(name) = i.checked_sub(1).and_then(|i| existing.get(i)) {
                    return Some(name.clone());
                }
            }
            validate_profile_name(answer).ok().map(|_| answer.to_string())
        },
    )?;

    if !store.exists(&chosen)? {
        let words = create_profile(store, &chosen, &config.seed_lexicon)?;
        prompter.say_line(&format!("Created profile '{chosen}' with {words} words."))?;
    }
    Ok(chosen)
}

fn ask_direction<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    lexicon: &Lexicon,
    default: Direction,
) -> Result<Direction> {
    let languages = &lexicon.languages;
    let question = format!(
        "Direction? 0: {} -> {}, 1: {} -> {}",
        languages.primary, languages.secondary, languages.secondary, languages.primary
    );
    prompter.ask_parsed(&question, "Try again with 0 or 1", Some(default))
}

/// Ask for a category letter, accepting only categories the profile has.
fn ask_category<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    lexicon: &Lexicon,
) -> Result<CategorySelector> {
    let present = lexicon.categories();
    let mut menu: Vec<String> = present
        .iter()
        .map(|c| format!("{}: {}", c.letter(), c.label()))
        .collect();
    menu.push("W: whole lexicon".to_string());
    let letters: Vec<String> = present
        .iter()
        .map(|c| c.letter().to_string())
        .chain(std::iter::once("W".to_string()))
        .collect();

    prompter.ask_until(
        &format!("Which words? ({})", menu.join(", ")),
        &format!("Try again with {}", letters.join(", ")),
        |answer| match answer.parse::<CategorySelector>() {
            Ok(CategorySelector::All) => Some(CategorySelector::All),
            Ok(CategorySelector::Only(c)) if present.contains(&c) => {
                Some(CategorySelector::Only(c))
            }
            _ => None,
        },
    )
}

fn ask_count<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    eligible: usize,
    default: usize,
) -> Result<usize> {
    let default = default.min(eligible);
    prompter.ask_until(
        &format!("How many words? (0-{eligible}, default {default})"),
        &format!("Try again with a number from 0 to {eligible}"),
        |answer| {
            if answer.is_empty() {
                return Some(default);
            }
            answer.parse::<usize>().ok().filter(|&n| n <= eligible)
        },
    )
}

fn print_summary(report: &SessionReport) {
    println!();
    println!("===== End of session. Bis bald ! =====");

    if report.entries.is_empty() {
        println!("No words were asked.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Word", "Solution", "Score", "Weight"]);
    for e in &report.entries {
        table.add_row(vec![
            Cell::new(&e.prompt),
            Cell::new(&e.answer),
            Cell::new(e.rating),
            Cell::new(format!("{:.3} -> {:.3}", e.weight_before, e.weight_after)),
        ]);
    }
    println!("{table}");

    if let Some(mean) = report.mean_rating() {
        println!("Mean rating: {mean:.2}");
    }
    let missed: Vec<&str> = report.missed().map(|e| e.prompt.as_str()).collect();
    if !missed.is_empty() {
        println!("Missed: {}", missed.join(", "));
    }
}
