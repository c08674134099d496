//! Lexicon weight statistics.
//!
//! Summaries of how the adaptive weights are distributed, per category and
//! across the whole lexicon, plus the words most likely to come up next.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Category, Lexicon, LexiconRow, DEFAULT_WEIGHT};

/// Weight statistics for one group of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    /// Number of rows.
    pub words: usize,
    pub mean_weight: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    /// Rows whose weight moved away from the initial value.
    pub practiced: usize,
    /// Share of the lexicon's total weight held by this group.
    pub draw_share: f64,
}

/// Aggregate statistics across the lexicon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconStats {
    pub per_category: BTreeMap<Category, WeightStats>,
    pub overall: WeightStats,
}

fn weight_stats<'a>(rows: impl Iterator<Item = &'a LexiconRow>, total_weight: f64) -> WeightStats {
    let mut words = 0usize;
    let mut sum = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = 0.0f64;
    let mut practiced = 0usize;

    for row in rows {
        words += 1;
        sum += row.weight;
        min = min.min(row.weight);
        max = max.max(row.weight);
        if row.weight != DEFAULT_WEIGHT {
            practiced += 1;
        }
    }

    if words == 0 {
        return WeightStats {
            words: 0,
            mean_weight: 0.0,
            min_weight: 0.0,
            max_weight: 0.0,
            practiced: 0,
            draw_share: 0.0,
        };
    }

    WeightStats {
        words,
        mean_weight: sum / words as f64,
        min_weight: min,
        max_weight: max,
        practiced,
        draw_share: if total_weight > 0.0 {
            sum / total_weight
        } else {
            0.0
        },
    }
}

/// Compute per-category and overall weight statistics.
pub fn compute_lexicon_stats(lexicon: &Lexicon) -> LexiconStats {
    let total_weight: f64 = lexicon.rows.iter().map(|r| r.weight).sum();

    let per_category = lexicon
        .categories()
        .into_iter()
        .map(|category| {
            let rows = lexicon.rows.iter().filter(|r| r.category == category);
            (category, weight_stats(rows, total_weight))
        })
        .collect();

    LexiconStats {
        per_category,
        overall: weight_stats(lexicon.rows.iter(), total_weight),
    }
}

/// The `k` heaviest rows with their store positions, heaviest first.
///
/// Ties keep store order.
pub fn hardest_words(lexicon: &Lexicon, k: usize) -> Vec<(usize, &LexiconRow)> {
    let mut ranked: Vec<(usize, &LexiconRow)> = lexicon.rows.iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.weight.total_cmp(&a.1.weight));
    ranked.truncate(k);
    ranked
}
