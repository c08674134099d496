//! Write-back of session weights into the full lexicon.

use crate::error::DrillError;
use crate::model::{CategorySelector, Lexicon};
use crate::view::PopulationView;

/// Summary of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Rows of the view that were mapped back.
    pub rows_considered: usize,
    /// Rows whose stored weight actually changed.
    pub weights_changed: usize,
}

/// Copy the view's weights back into `lexicon`.
///
/// For a whole-lexicon view the store rows are replaced by the view rows.
/// Otherwise only the weight of each mapped row is overwritten; category and
/// words are never touched, and rows outside the view stay as they were.
pub fn merge_view(lexicon: &mut Lexicon, view: &PopulationView) -> Result<MergeOutcome, DrillError> {
    let mut outcome = MergeOutcome {
        rows_considered: view.len(),
        weights_changed: 0,
    };

    match view.selector() {
        CategorySelector::All => {
            if view.len() != lexicon.len() {
                return Err(DrillError::RowCountMismatch {
                    view: view.len(),
                    store: lexicon.len(),
                });
            }
            outcome.weights_changed = lexicon
                .rows
                .iter()
                .zip(view.rows())
                .filter(|(old, new)| old.weight != new.weight)
                .count();
            lexicon.rows = view.rows().to_vec();
        }
        CategorySelector::Only(_) => {
            let store_len = lexicon.rows.len();
            for (store_position, row) in view.iter_with_positions() {
                let target = lexicon.rows.get_mut(store_position).ok_or(
                    DrillError::RowCountMismatch {
                        view: store_position + 1,
                        store: store_len,
                    },
                )?;
                if target.weight != row.weight {
                    target.weight = row.weight;
                    outcome.weights_changed += 1;
                }
            }
        }
    }

    tracing::debug!(
        considered = outcome.rows_considered,
        changed = outcome.weights_changed,
        "merged session weights"
    );
    Ok(outcome)
}
