//! Weighted sampling of distinct population positions.
//!
//! Two strategies are available:
//!
//! - [`SamplingStrategy::TopUp`] draws with replacement, keeps the distinct
//!   positions and redraws only the shortfall, from the rows still missing,
//!   until the sample is complete.
//! - [`SamplingStrategy::Reservoir`] draws without replacement in a single
//!   pass using exponential keys (`ln(u) / w`, keep the largest).
//!
//! Both draw each surviving candidate with probability proportional to its
//! weight. Requests that could never complete are rejected before any draw.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DrillError;

/// How distinct positions are drawn from the weight column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingStrategy {
    /// Draw with replacement, then top up the duplicates' shortfall.
    #[default]
    TopUp,
    /// Single-pass weighted sampling without replacement.
    Reservoir,
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingStrategy::TopUp => write!(f, "top-up"),
            SamplingStrategy::Reservoir => write!(f, "reservoir"),
        }
    }
}

impl FromStr for SamplingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top-up" | "topup" => Ok(SamplingStrategy::TopUp),
            "reservoir" => Ok(SamplingStrategy::Reservoir),
            other => Err(format!("unknown sampling strategy: {other}")),
        }
    }
}

/// Draw `n` distinct positions from `weights`.
///
/// Fails with [`DrillError::SampleTooLarge`] if `n` exceeds the population,
/// [`DrillError::InvalidWeight`] on a negative or non-finite weight, and
/// [`DrillError::InsufficientWeight`] if fewer than `n` positions can ever be
/// drawn. `n == 0` returns an empty sample without touching `rng`.
pub fn sample_unique<R: Rng + ?Sized>(
    weights: &[f64],
    n: usize,
    strategy: SamplingStrategy,
    rng: &mut R,
) -> Result<Vec<usize>, DrillError> {
    check_request(weights, n)?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let sample = match strategy {
        SamplingStrategy::TopUp => sample_top_up(weights, n, rng)?,
        SamplingStrategy::Reservoir => sample_reservoir(weights, n, rng),
    };
    debug_assert_eq!(sample.len(), n);
    Ok(sample)
}

fn check_request(weights: &[f64], n: usize) -> Result<(), DrillError> {
    if n > weights.len() {
        return Err(DrillError::SampleTooLarge {
            requested: n,
            available: weights.len(),
        });
    }

    if let Some((position, &weight)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w < 0.0)
    {
        return Err(DrillError::InvalidWeight { position, weight });
    }

    let drawable = weights.iter().filter(|w| **w > 0.0).count();
    if n > drawable {
        return Err(DrillError::InsufficientWeight {
            requested: n,
            drawable,
        });
    }

    Ok(())
}

/// Draw with replacement, keep first occurrences, redraw the shortfall.
///
/// Every top-up round draws from the rows not yet in the sample, so each
/// round adds at least one new position even when some weights are too
/// small to move the cumulative total.
fn sample_top_up<R: Rng + ?Sized>(
    weights: &[f64],
    n: usize,
    rng: &mut R,
) -> Result<Vec<usize>, DrillError> {
    let mut pool = weights.to_vec();
    let mut seen = HashSet::with_capacity(n);
    let mut sample = Vec::with_capacity(n);
    let mut shortfall = n;
    let mut round = 0u32;

    while shortfall > 0 {
        round += 1;
        let dist = WeightedIndex::new(&pool).map_err(|_| DrillError::InsufficientWeight {
            requested: n,
            drawable: sample.len(),
        })?;

        let drawn_before = sample.len();
        for _ in 0..shortfall {
            let position = dist.sample(rng);
            if seen.insert(position) {
                sample.push(position);
            }
        }
        for &position in &sample[drawn_before..] {
            pool[position] = 0.0;
        }

        shortfall = n - sample.len();
        tracing::debug!(round, drawn = sample.len(), shortfall, "top-up round");
    }

    Ok(sample)
}

/// Keep the `n` largest keys `ln(u) / w` over all positive weights.
fn sample_reservoir<R: Rng + ?Sized>(weights: &[f64], n: usize, rng: &mut R) -> Vec<usize> {
    let mut keyed: Vec<(f64, usize)> = weights
        .iter()
        .enumerate()
        .filter(|(_, w)| **w > 0.0)
        .map(|(i, w)| {
            // u in (0, 1] so ln(u) is finite
            let u: f64 = 1.0 - rng.gen::<f64>();
            (u.ln() / w, i)
        })
        .collect();

    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.truncate(n);
    keyed.into_iter().map(|(_, i)| i).collect()
}
