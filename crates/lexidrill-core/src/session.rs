//! Session runner: presents sampled words and applies the ratings.
//!
//! The runner never reads a terminal. Everything interactive goes through the
//! [`Responder`] trait, so a session can be driven by a console, a script or
//! a test.

use std::collections::VecDeque;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::model::{Category, Direction, LanguagePair};
use crate::scorer::{rescore, Rating};
use crate::view::PopulationView;

/// One word as presented to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// 1-based position in the session.
    pub ordinal: usize,
    /// Number of words in the session.
    pub total: usize,
    pub category: Category,
    pub prompt: String,
    pub answer: String,
    pub prompt_language: String,
    pub answer_language: String,
}

/// Source of guesses and ratings for a session.
pub trait Responder {
    /// Show the prompt word and return the user's free-text guess.
    fn guess(&mut self, card: &Card) -> Result<String>;

    /// Reveal the answer next to `guess` and return the raw rating text.
    fn rate(&mut self, card: &Card, guess: &str) -> Result<String>;

    /// Called when the raw rating text was not a valid rating.
    fn rating_rejected(&mut self, _card: &Card, _error: &DrillError) -> Result<()> {
        Ok(())
    }

    /// Called once a card has been rated and rescored.
    fn rated(&mut self, _entry: &SessionEntry) -> Result<()> {
        Ok(())
    }
}

/// What happened to one presented word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub prompt: String,
    pub answer: String,
    pub guess: String,
    pub rating: Rating,
    pub weight_before: f64,
    pub weight_after: f64,
    /// Row position in the full lexicon.
    pub store_position: usize,
}

/// Presentation-ordered log of a session. Repeated prompt texts each keep
/// their own entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub entries: Vec<SessionEntry>,
}

impl SessionRecord {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean rating over the session, `None` when nothing was asked.
    pub fn mean_rating(&self) -> Option<f64> {
        mean_rating(&self.entries)
    }
}

/// Mean rating of `entries`, `None` when empty.
pub fn mean_rating(entries: &[SessionEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let sum: u32 = entries.iter().map(|e| u32::from(e.rating.value())).sum();
    Some(f64::from(sum) / entries.len() as f64)
}

/// Ask every sampled position in order, rescoring the view as ratings come in.
pub fn run_session(
    view: &mut PopulationView,
    positions: &[usize],
    direction: Direction,
    languages: &LanguagePair,
    responder: &mut dyn Responder,
) -> Result<SessionRecord> {
    let (prompt_language, answer_language) = direction.languages(languages);
    let total = positions.len();
    let mut record = SessionRecord {
        entries: Vec::with_capacity(total),
    };

    for (i, &position) in positions.iter().enumerate() {
        let row = view
            .row(position)
            .ok_or_else(|| anyhow!("sampled position {position} is outside the population"))?;
        let store_position = view
            .store_position(position)
            .ok_or_else(|| anyhow!("sampled position {position} has no store row"))?;
        let (prompt, answer) = direction.split(row);
        let weight_before = row.weight;

        let card = Card {
            ordinal: i + 1,
            total,
            category: row.category,
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            prompt_language: prompt_language.to_string(),
            answer_language: answer_language.to_string(),
        };

        let guess = responder.guess(&card)?;
        let rating = loop {
            let raw = responder.rate(&card, &guess)?;
            match raw.parse::<Rating>() {
                Ok(rating) => break rating,
                Err(e) => responder.rating_rejected(&card, &e)?,
            }
        };

        let weight_after = rescore(weight_before, rating);
        view.set_weight(position, weight_after);

        let entry = SessionEntry {
            prompt: card.prompt,
            answer: card.answer,
            guess,
            rating,
            weight_before,
            weight_after,
            store_position,
        };
        responder.rated(&entry)?;
        record.entries.push(entry);
    }

    Ok(record)
}

/// A responder that replays canned input, for tests and scripted sessions.
///
/// Guesses and raw ratings are consumed in order; running out of input is an
/// error, like a closed terminal.
#[derive(Debug, Default)]
pub struct ScriptedResponder {
    guesses: VecDeque<String>,
    ratings: VecDeque<String>,
    rejected: usize,
    shown: Vec<Card>,
}

impl ScriptedResponder {
    pub fn new<G, R>(guesses: G, ratings: R) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            guesses: guesses.into_iter().map(Into::into).collect(),
            ratings: ratings.into_iter().map(Into::into).collect(),
            rejected: 0,
            shown: Vec::new(),
        }
    }

    /// Number of rating inputs that were rejected.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Cards presented so far.
    pub fn shown(&self) -> &[Card] {
        &self.shown
    }
}

impl Responder for ScriptedResponder {
    fn guess(&mut self, card: &Card) -> Result<String> {
        self.shown.push(card.clone());
        self.guesses
            .pop_front()
            .ok_or_else(|| anyhow!("input closed before guess #{}", card.ordinal))
    }

    fn rate(&mut self, card: &Card, _guess: &str) -> Result<String> {
        self.ratings
            .pop_front()
            .ok_or_else(|| anyhow!("input closed before rating #{}", card.ordinal))
    }

    fn rating_rejected(&mut self, _card: &Card, _error: &DrillError) -> Result<()> {
        self.rejected += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategorySelector, Lexicon, LexiconRow};

    fn view() -> PopulationView {
        let lexicon = Lexicon::new(
            LanguagePair::default(),
            vec![
                LexiconRow::new(Category::Verb, "gehen", "aller"),
                LexiconRow::new(Category::Adjective, "schnell", "rapide"),
                LexiconRow::new(Category::Verb, "machen", "faire"),
                LexiconRow::new(Category::Verb, "tun", "faire"),
            ],
        );
        PopulationView::build(&lexicon, CategorySelector::Only(Category::Verb)).unwrap()
    }

    #[test]
    fn rates_and_rescores_in_order() {
        let mut view = view();
        let mut responder = ScriptedResponder::new(["faire", "aler"], ["0", "3"]);
        let record = run_session(
            &mut view,
            &[2, 0],
            Direction::PrimaryToSecondary,
            &LanguagePair::default(),
            &mut responder,
        )
        .unwrap();

        assert_eq!(record.len(), 2);
        assert_eq!(record.entries[0].prompt, "tun");
        assert_eq!(record.entries[0].store_position, 3);
        assert_eq!(record.entries[0].weight_after, 0.75);
        assert_eq!(record.entries[1].prompt, "gehen");
        assert_eq!(record.entries[1].guess, "aler");
        assert_eq!(record.entries[1].weight_after, 2.25);
        assert_eq!(view.weights(), vec![2.25, 1.5, 0.75]);
        assert_eq!(record.mean_rating(), Some(1.5));

        let shown = responder.shown();
        assert_eq!(shown[0].ordinal, 1);
        assert_eq!(shown[1].total, 2);
        assert_eq!(shown[1].prompt_language, "German");
    }

    #[test]
    fn invalid_ratings_are_asked_again() {
        let mut view = view();
        let mut responder = ScriptedResponder::new(["?"], ["5", "hard", "", "2"]);
        let record = run_session(
            &mut view,
            &[1],
            Direction::SecondaryToPrimary,
            &LanguagePair::default(),
            &mut responder,
        )
        .unwrap();
        assert_eq!(responder.rejected(), 3);
        assert_eq!(record.entries[0].prompt, "faire");
        assert_eq!(record.entries[0].answer, "machen");
        assert_eq!(record.entries[0].rating.value(), 2);
        assert_eq!(record.entries[0].weight_after, 1.75);
    }

    #[test]
    fn duplicate_prompts_keep_separate_entries() {
        let mut view = view();
        let mut responder = ScriptedResponder::new(["tun", "machen"], ["1", "1"]);
        let record = run_session(
            &mut view,
            &[1, 2],
            Direction::SecondaryToPrimary,
            &LanguagePair::default(),
            &mut responder,
        )
        .unwrap();
        assert_eq!(record.entries[0].prompt, "faire");
        assert_eq!(record.entries[1].prompt, "faire");
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn empty_sample_asks_nothing() {
        let mut view = view();
        let before = view.clone();
        let mut responder = ScriptedResponder::new(Vec::<String>::new(), Vec::<String>::new());
        let record = run_session(
            &mut view,
            &[],
            Direction::PrimaryToSecondary,
            &LanguagePair::default(),
            &mut responder,
        )
        .unwrap();
        assert!(record.is_empty());
        assert!(record.mean_rating().is_none());
        assert!(responder.shown().is_empty());
        assert_eq!(view, before);
    }

    /// Fails when told about its `fail_at`-th rated card.
    struct BrokenOutput {
        inner: ScriptedResponder,
        rated: usize,
        fail_at: usize,
    }

    impl Responder for BrokenOutput {
        fn guess(&mut self, card: &Card) -> Result<String> {
            self.inner.guess(card)
        }

        fn rate(&mut self, card: &Card, guess: &str) -> Result<String> {
            self.inner.rate(card, guess)
        }

        fn rated(&mut self, _entry: &SessionEntry) -> Result<()> {
            self.rated += 1;
            if self.rated == self.fail_at {
                return Err(anyhow!("broken pipe"));
            }
            Ok(())
        }
    }

    #[test]
    fn failed_acknowledgement_aborts_the_session() {
        let mut view = view();
        let mut responder = BrokenOutput {
            inner: ScriptedResponder::new(["a", "b"], ["1", "1"]),
            rated: 0,
            fail_at: 1,
        };
        let err = run_session(
            &mut view,
            &[0, 1],
            Direction::PrimaryToSecondary,
            &LanguagePair::default(),
            &mut responder,
        )
        .unwrap_err();
        assert!(err.to_string().contains("broken pipe"));
        assert_eq!(responder.inner.shown().len(), 1);
    }

    #[test]
    fn closed_input_aborts_the_session() {
        let mut view = view();
        let mut responder = ScriptedResponder::new(["faire"], ["9"]);
        let err = run_session(
            &mut view,
            &[0],
            Direction::PrimaryToSecondary,
            &LanguagePair::default(),
            &mut responder,
        )
        .unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }
}
