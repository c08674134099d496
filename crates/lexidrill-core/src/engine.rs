//! Drill engine orchestrator.
//!
//! Runs one session end to end: load the profile, build the population view,
//! draw the words, ask them, merge the new weights and save the profile.

use std::time::Instant;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::merge::{merge_view, MergeOutcome};
use crate::model::{CategorySelector, Direction, Lexicon};
use crate::report::SessionReport;
use crate::sampler::{sample_unique, SamplingStrategy};
use crate::session::{run_session, Responder, SessionRecord};
use crate::store::ProfileStore;
use crate::view::PopulationView;

/// Everything a session needs besides the lexicon and the responder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Which rows are eligible.
    pub selector: CategorySelector,
    /// Which column is prompted.
    pub direction: Direction,
    /// Number of distinct words to ask.
    pub count: usize,
    /// Seed for reproducible draws; entropy when `None`.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub strategy: SamplingStrategy,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            selector: CategorySelector::All,
            direction: Direction::default(),
            count: 10,
            seed: None,
            strategy: SamplingStrategy::default(),
        }
    }
}

impl DrillConfig {
    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Result of a drill run on an in-memory lexicon.
#[derive(Debug, Clone)]
pub struct DrillOutcome {
    pub record: SessionRecord,
    pub merge: MergeOutcome,
    /// Size of the eligible population.
    pub population: usize,
}

/// Run one session against `lexicon`.
///
/// The lexicon is only modified once every word has been rated; if the
/// responder fails halfway, it is left exactly as it was.
pub fn run_drill(
    lexicon: &mut Lexicon,
    config: &DrillConfig,
    responder: &mut dyn Responder,
) -> Result<DrillOutcome> {
    let mut view = PopulationView::build(lexicon, config.selector)?;

    let mut rng = config.rng();
    let positions = sample_unique(&view.weights(), config.count, config.strategy, &mut rng)?;
    tracing::info!(
        selector = %config.selector,
        population = view.len(),
        count = positions.len(),
        strategy = %config.strategy,
        "starting session"
    );

    let record = run_session(
        &mut view,
        &positions,
        config.direction,
        &lexicon.languages,
        responder,
    )?;
    let merge = merge_view(lexicon, &view)?;

    Ok(DrillOutcome {
        record,
        merge,
        population: view.len(),
    })
}

/// Drill engine bound to a profile store.
pub struct DrillEngine {
    store: ProfileStore,
}

impl DrillEngine {
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Load `profile`, run a session and persist the updated weights.
    ///
    /// The profile file is written once, after the last rating. A failed
    /// session or a failed save leaves the previous file in place.
    pub fn run(
        &self,
        profile: &str,
        config: &DrillConfig,
        responder: &mut dyn Responder,
    ) -> Result<SessionReport> {
        let start = Instant::now();
        let mut lexicon = self
            .store
            .load(profile)
            .with_context(|| format!("failed to load profile '{profile}'"))?;

        let outcome = run_drill(&mut lexicon, config, responder)?;

        self.store
            .save(profile, &lexicon)
            .with_context(|| format!("failed to save profile '{profile}'"))?;

        let elapsed = start.elapsed();
        tracing::info!(
            profile,
            asked = outcome.record.len(),
            changed = outcome.merge.weights_changed,
            "session complete"
        );

        Ok(SessionReport {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            profile: profile.to_string(),
            config: config.clone(),
            population: outcome.population,
            weights_changed: outcome.merge.weights_changed,
            entries: outcome.record.entries,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
