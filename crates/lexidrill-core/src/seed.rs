//! TOML seed lexicon parser.
//!
//! A seed lexicon lists translation pairs in category blocks. Building a
//! profile concatenates the blocks in file order, drops pairs with a blank
//! side and starts every row at [`DEFAULT_WEIGHT`](crate::model::DEFAULT_WEIGHT).

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Category, LanguagePair, Lexicon, LexiconRow};

/// Intermediate TOML structure for seed lexicon files.
#[derive(Debug, Deserialize)]
struct TomlSeedFile {
    #[serde(default)]
    lexicon: Option<TomlLexiconHeader>,
    #[serde(default)]
    blocks: Vec<TomlBlock>,
}

#[derive(Debug, Deserialize)]
struct TomlLexiconHeader {
    #[serde(default = "default_primary")]
    primary: String,
    #[serde(default = "default_secondary")]
    secondary: String,
}

fn default_primary() -> String {
    LanguagePair::default().primary
}

fn default_secondary() -> String {
    LanguagePair::default().secondary
}

#[derive(Debug, Deserialize)]
struct TomlBlock {
    category: String,
    #[serde(default)]
    pairs: Vec<Vec<String>>,
}

/// One category block of a seed lexicon, before row construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedBlock {
    pub category: Category,
    pub pairs: Vec<(String, String)>,
}

/// A parsed seed lexicon.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedLexicon {
    pub languages: LanguagePair,
    pub blocks: Vec<SeedBlock>,
}

impl SeedLexicon {
    /// Concatenate the blocks into a fresh lexicon at default weight.
    ///
    /// Pairs with a blank word on either side are skipped.
    pub fn build(&self) -> Lexicon {
        let mut rows = Vec::new();
        for block in &self.blocks {
            for (primary, secondary) in &block.pairs {
                let (primary, secondary) = (primary.trim(), secondary.trim());
                if primary.is_empty() || secondary.is_empty() {
                    tracing::warn!(
                        category = %block.category,
                        primary,
                        secondary,
                        "skipping incomplete pair"
                    );
                    continue;
                }
                rows.push(LexiconRow::new(block.category, primary, secondary));
            }
        }
        Lexicon::new(self.languages.clone(), rows)
    }
}

/// Parse a seed lexicon file.
pub fn parse_seed(path: &Path) -> Result<SeedLexicon> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed lexicon: {}", path.display()))?;

    parse_seed_str(&content, path)
}

/// Parse a seed lexicon from a TOML string (useful for testing).
pub fn parse_seed_str(content: &str, source_path: &Path) -> Result<SeedLexicon> {
    let parsed: TomlSeedFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let languages = parsed
        .lexicon
        .map(|h| LanguagePair {
            primary: h.primary,
            secondary: h.secondary,
        })
        .unwrap_or_default();

    let blocks = parsed
        .blocks
        .into_iter()
        .enumerate()
        .map(|(i, b)| {
            let category: Category = b
                .category
                .parse()
                .map_err(|e: String| anyhow::anyhow!("block {}: {}", i + 1, e))?;

            let pairs = b
                .pairs
                .into_iter()
                .map(|pair| match <[String; 2]>::try_from(pair) {
                    Ok([primary, secondary]) => Ok((primary, secondary)),
                    Err(pair) => Err(anyhow::anyhow!(
                        "block {} ({}): expected a [primary, secondary] pair, got {} entries",
                        i + 1,
                        category,
                        pair.len()
                    )),
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(SeedBlock { category, pairs })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid seed lexicon: {}", source_path.display()))?;

    Ok(SeedLexicon { languages, blocks })
}

/// A warning from seed lexicon validation.
#[derive(Debug, Clone)]
pub struct SeedWarning {
    /// The block category (if applicable).
    pub category: Option<Category>,
    /// Warning message.
    pub message: String,
}

/// Validate a seed lexicon for common issues.
pub fn validate_seed(seed: &SeedLexicon) -> Vec<SeedWarning> {
    let mut warnings = Vec::new();

    // Empty blocks and incomplete pairs
    for block in &seed.blocks {
        if block.pairs.is_empty() {
            warnings.push(SeedWarning {
                category: Some(block.category),
                message: "block has no pairs".into(),
            });
        }
        for (primary, secondary) in &block.pairs {
            if primary.trim().is_empty() || secondary.trim().is_empty() {
                warnings.push(SeedWarning {
                    category: Some(block.category),
                    message: format!("incomplete pair ['{primary}', '{secondary}'] will be skipped"),
                });
            }
        }
    }

    // Duplicate pairs across the whole lexicon
    let mut seen = HashSet::new();
    for block in &seed.blocks {
        for (primary, secondary) in &block.pairs {
            let key = (primary.trim().to_lowercase(), secondary.trim().to_lowercase());
            if !key.0.is_empty() && !key.1.is_empty() && !seen.insert(key) {
                warnings.push(SeedWarning {
                    category: Some(block.category),
                    message: format!("duplicate pair: {primary} / {secondary}"),
                });
            }
        }
    }

    // Categories that cannot be drilled on their own
    for category in Category::ALL {
        if !seed.blocks.iter().any(|b| b.category == category) {
            warnings.push(SeedWarning {
                category: Some(category),
                message: format!("no block for category {category}"),
            });
        }
    }

    warnings
}
