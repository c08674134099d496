//! Core data model types for lexidrill.
//!
//! A lexicon is a flat table of translation pairs, each tagged with a
//! category and carrying the sampling weight that the drill engine adapts
//! after every answer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weight given to every row of a freshly initialized lexicon.
pub const DEFAULT_WEIGHT: f64 = 1.5;

/// Coarse part-of-speech tag partitioning the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Adjective,
    Verb,
    PronounAdverb,
    General,
}

impl Category {
    /// All categories, in the order the CLI menu lists them.
    pub const ALL: [Category; 4] = [
        Category::Adjective,
        Category::Verb,
        Category::PronounAdverb,
        Category::General,
    ];

    /// The single-letter menu key for this category.
    pub fn letter(self) -> char {
        match self {
            Category::Adjective => 'A',
            Category::Verb => 'V',
            Category::PronounAdverb => 'P',
            Category::General => 'G',
        }
    }

    /// Human-readable label used in menus and tables.
    pub fn label(self) -> &'static str {
        match self {
            Category::Adjective => "Adjectives",
            Category::Verb => "Verbs",
            Category::PronounAdverb => "Pronouns & adverbs",
            Category::General => "General vocabulary",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Adjective => write!(f, "adjective"),
            Category::Verb => write!(f, "verb"),
            Category::PronounAdverb => write!(f, "pronoun-adverb"),
            Category::General => write!(f, "general"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "adj" | "adjective" => Ok(Category::Adjective),
            "v" | "verb" => Ok(Category::Verb),
            "p" | "adv" | "pronoun-adverb" | "pronoun" | "adverb" => Ok(Category::PronounAdverb),
            "g" | "gen" | "general" => Ok(Category::General),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Which rows a session draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySelector {
    /// The whole lexicon.
    All,
    /// Only rows of one category.
    Only(Category),
}

impl CategorySelector {
    /// Whether `category` is eligible under this selector.
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Only(c) => *c == category,
        }
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelector::All => write!(f, "all"),
            CategorySelector::Only(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for CategorySelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "w" | "all" | "whole" => Ok(CategorySelector::All),
            other => other
                .parse::<Category>()
                .map(CategorySelector::Only)
                .map_err(|_| format!("unknown category selector: {}", s.trim())),
        }
    }
}

/// Which column is shown and which one must be recalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Show the primary word, answer with the secondary one.
    #[default]
    PrimaryToSecondary,
    /// Show the secondary word, answer with the primary one.
    SecondaryToPrimary,
}

impl Direction {
    /// Split a row into `(prompt, answer)` for this direction.
    pub fn split<'a>(&self, row: &'a LexiconRow) -> (&'a str, &'a str) {
        match self {
            Direction::PrimaryToSecondary => (row.primary.as_str(), row.secondary.as_str()),
            Direction::SecondaryToPrimary => (row.secondary.as_str(), row.primary.as_str()),
        }
    }

    /// Split the language names into `(prompt language, answer language)`.
    pub fn languages<'a>(&self, languages: &'a LanguagePair) -> (&'a str, &'a str) {
        match self {
            Direction::PrimaryToSecondary => (languages.primary.as_str(), languages.secondary.as_str()),
            Direction::SecondaryToPrimary => (languages.secondary.as_str(), languages.primary.as_str()),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Direction::PrimaryToSecondary),
            "1" => Ok(Direction::SecondaryToPrimary),
            other => Err(format!("unknown direction '{other}', expected 0 or 1")),
        }
    }
}

/// One translation pair with its sampling weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconRow {
    pub category: Category,
    pub primary: String,
    pub secondary: String,
    pub weight: f64,
}

impl LexiconRow {
    /// A new row at the default weight.
    pub fn new(category: Category, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            category,
            primary: primary.into(),
            secondary: secondary.into(),
            weight: DEFAULT_WEIGHT,
        }
    }
}

/// Display names of the two lexicon columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub primary: String,
    pub secondary: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            primary: "German".to_string(),
            secondary: "French".to_string(),
        }
    }
}

/// The full word store of one profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub languages: LanguagePair,
    #[serde(default)]
    pub rows: Vec<LexiconRow>,
}

impl Lexicon {
    pub fn new(languages: LanguagePair, rows: Vec<LexiconRow>) -> Self {
        Self { languages, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Categories that have at least one row, in menu order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.rows.iter().any(|r| r.category == *c))
            .collect()
    }

    /// Position of the first row whose weight is negative or not finite.
    pub fn first_invalid_weight(&self) -> Option<(usize, f64)> {
        self.rows
            .iter()
            .enumerate()
            .find(|(_, r)| !r.weight.is_finite() || r.weight < 0.0)
            .map(|(i, r)| (i, r.weight))
    }
}
