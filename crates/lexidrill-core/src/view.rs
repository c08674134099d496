//! Population view: the rows of a lexicon eligible for one session.
//!
//! A view owns copies of the matching rows and remembers, for every
//! view-local position, the store position it was taken from. The merge step
//! relies on that mapping to write weights back.

use crate::error::DrillError;
use crate::model::{CategorySelector, Lexicon, LexiconRow};

/// The filtered rows of a lexicon plus their store positions.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationView {
    selector: CategorySelector,
    rows: Vec<LexiconRow>,
    store_positions: Vec<usize>,
}

impl PopulationView {
    /// Filter `lexicon` down to the rows matching `selector`.
    ///
    /// Selecting a category with no rows in the store is a caller error.
    pub fn build(lexicon: &Lexicon, selector: CategorySelector) -> Result<Self, DrillError> {
        let (store_positions, rows): (Vec<usize>, Vec<LexiconRow>) = lexicon
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| selector.matches(row.category))
            .map(|(i, row)| (i, row.clone()))
            .unzip();

        if let CategorySelector::Only(category) = selector {
            if rows.is_empty() {
                return Err(DrillError::UnknownCategory(category.to_string()));
            }
        }

        tracing::debug!(
            selector = %selector,
            eligible = rows.len(),
            total = lexicon.len(),
            "built population view"
        );

        Ok(Self {
            selector,
            rows,
            store_positions,
        })
    }

    pub fn selector(&self) -> CategorySelector {
        self.selector
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[LexiconRow] {
        &self.rows
    }

    pub fn row(&self, position: usize) -> Option<&LexiconRow> {
        self.rows.get(position)
    }

    /// The weight column, in view order.
    pub fn weights(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.weight).collect()
    }

    /// Store position of the row at view position `position`.
    pub fn store_position(&self, position: usize) -> Option<usize> {
        self.store_positions.get(position).copied()
    }

    /// Pairs of `(store position, row)` in view order.
    pub fn iter_with_positions(&self) -> impl Iterator<Item = (usize, &LexiconRow)> {
        self.store_positions.iter().copied().zip(self.rows.iter())
    }

    /// Replace the weight of the row at view position `position`.
    ///
    /// Returns the previous weight, or `None` if the position is out of range.
    pub fn set_weight(&mut self, position: usize, weight: f64) -> Option<f64> {
        let row = self.rows.get_mut(position)?;
        Some(std::mem::replace(&mut row.weight, weight))
    }
}
