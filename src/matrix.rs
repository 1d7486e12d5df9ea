//! Markov matrix representation and addressing
//!
//! The handler owns the textual cell conventions (final-state token,
//! no-transition marker, default think time) and the allocate/reset/set-by-name
//! operations, so the matrix's cell format can vary independently of the
//! graph-walk that fills it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// State name of the absorbing final state
pub const DEFAULT_FINAL_STATE_NAME: &str = "$";

/// Cell content marking the absence of a transition
pub const DEFAULT_NO_TRANSITION_MARKER: &str = "0.0; n(0 0)";

/// Think-time descriptor used where no timing information applies
pub const DEFAULT_THINK_TIME: &str = "n(0 0)";

/// A square table of formatted transition descriptors, indexed by state name.
///
/// One row/column per use case, plus one for the final state at the last
/// index. The name-to-index map is built once at allocation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkovMatrix {
    states: Vec<String>,
    index: HashMap<String, usize>,
    cells: Vec<Vec<String>>,
}

impl MarkovMatrix {
    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.states.len()
    }

    /// Ordered state names; the final state is always last
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Row-major cell grid
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Cell content at (row-state, column-state)
    pub fn value_at(&self, row_state: &str, col_state: &str) -> Result<&str, ModelError> {
        let row = self.state_index(row_state)?;
        let col = self.state_index(col_state)?;
        Ok(&self.cells[row][col])
    }

    fn state_index(&self, name: &str) -> Result<usize, ModelError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ModelError::UnknownState(name.to_string()))
    }
}

/// Creates and modifies Markov matrices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkovMatrixHandler {
    final_state_name: String,
    no_transition_marker: String,
    default_think_time: String,
}

impl Default for MarkovMatrixHandler {
    fn default() -> Self {
        Self::new(
            DEFAULT_FINAL_STATE_NAME,
            DEFAULT_NO_TRANSITION_MARKER,
            DEFAULT_THINK_TIME,
        )
    }
}

impl MarkovMatrixHandler {
    /// Create a handler with explicit cell conventions
    pub fn new(
        final_state_name: impl Into<String>,
        no_transition_marker: impl Into<String>,
        default_think_time: impl Into<String>,
    ) -> Self {
        Self {
            final_state_name: final_state_name.into(),
            no_transition_marker: no_transition_marker.into(),
            default_think_time: default_think_time.into(),
        }
    }

    /// Name of the absorbing final state
    pub fn final_state_name(&self) -> &str {
        &self.final_state_name
    }

    /// Think-time descriptor used for cells without timing information
    pub fn default_think_time_value(&self) -> &str {
        &self.default_think_time
    }

    /// Cell content marking the absence of a transition
    pub fn no_transition_marker(&self) -> &str {
        &self.no_transition_marker
    }

    /// Allocate a square matrix for the given states plus the final state.
    ///
    /// The final state always occupies the last index; an occurrence of the
    /// final-state name in the input is not duplicated, so the dimension is
    /// the number of distinct non-final input states plus one. All cells start
    /// reset to the no-transition marker.
    pub fn create_empty_matrix_for_states(&self, states: &[String]) -> MarkovMatrix {
        let mut names: Vec<String> = states
            .iter()
            .filter(|s| *s != &self.final_state_name)
            .cloned()
            .collect();
        names.push(self.final_state_name.clone());

        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let dimension = names.len();
        let cells = vec![vec![self.no_transition_marker.clone(); dimension]; dimension];

        MarkovMatrix {
            states: names,
            index,
            cells,
        }
    }

    /// Fill every cell with the no-transition marker, in place.
    pub fn reset_matrix(&self, matrix: &mut MarkovMatrix) {
        for row in &mut matrix.cells {
            for cell in row {
                *cell = self.no_transition_marker.clone();
            }
        }
    }

    /// Write a value at (row-state, column-state), addressed by name.
    pub fn set_value_at_cell(
        &self,
        value: &str,
        row_state: &str,
        col_state: &str,
        matrix: &mut MarkovMatrix,
    ) -> Result<(), ModelError> {
        let row = matrix.state_index(row_state)?;
        let col = matrix.state_index(col_state)?;
        matrix.cells[row][col] = value.to_string();
        Ok(())
    }
}
