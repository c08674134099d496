//! Difficulty ratings and the weight update rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrillError;

/// A self-assessed difficulty between 0 (trivial) and 3 (missed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 3;

    pub fn value(self) -> u8 {
        self.0
    }

    /// Short description shown next to the rating scale.
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "very easy",
            1 => "not perfect",
            2 => "quite hard to find",
            _ => "really missed it",
        }
    }

    /// Every rating, easiest first.
    pub fn scale() -> impl Iterator<Item = Rating> {
        (0..=Self::MAX).map(Rating)
    }
}

impl TryFrom<u8> for Rating {
    type Error = DrillError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value <= Self::MAX {
            Ok(Rating(value))
        } else {
            Err(DrillError::InvalidRating(value.to_string()))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| DrillError::InvalidRating(trimmed.to_string()))
            .and_then(Rating::try_from)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// New weight after a rating: the mean of the old weight and the rating.
///
/// Stays within `[old / 2, (old + 3) / 2]`, so a non-negative weight remains
/// non-negative and never exceeds `max(old, 3)`.
pub fn rescore(old_weight: f64, rating: Rating) -> f64 {
    (old_weight + f64::from(rating.value())) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rating(v: u8) -> Rating {
        Rating::try_from(v).unwrap()
    }

    #[test]
    fn worked_examples() {
        assert_eq!(rescore(1.5, rating(3)), 2.25);
        assert_eq!(rescore(2.25, rating(0)), 1.125);
    }

    #[test]
    fn parse_accepts_only_zero_to_three() {
        assert_eq!(" 2 ".parse::<Rating>().unwrap(), rating(2));
        assert_eq!(
            "4".parse::<Rating>().unwrap_err(),
            DrillError::InvalidRating("4".into())
        );
        assert!("-1".parse::<Rating>().is_err());
        assert!("hard".parse::<Rating>().is_err());
        assert!("".parse::<Rating>().is_err());
        assert!("1.5".parse::<Rating>().is_err());
    }

    #[test]
    fn serde_rejects_out_of_range() {
        assert_eq!(serde_json::to_string(&rating(1)).unwrap(), "1");
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn repeated_misses_converge_to_three() {
        let mut w = 1.5;
        for _ in 0..60 {
            w = rescore(w, rating(3));
        }
        assert!((w - 3.0).abs() < 1e-9);
    }

    #[test]
    fn scale_lists_four_ratings() {
        let labels: Vec<&str> = Rating::scale().map(Rating::label).collect();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[3], "really missed it");
    }

    proptest! {
        #[test]
        fn update_stays_within_bounds(old in 0.0f64..1e6, r in 0u8..=3) {
            let new = rescore(old, rating(r));
            prop_assert!(new >= 0.0);
            prop_assert!(new >= old / 2.0);
            prop_assert!(new <= (old + 3.0) / 2.0);
            prop_assert!(new <= old.max(3.0));
        }
    }
}
