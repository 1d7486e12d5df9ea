//! Relative-to-matrix transformation
//!
//! Flattens a relative behavior model into a square Markov matrix of formatted
//! `"<probability>; n(<mean> <deviation>)"` cells, with an explicit absorbing
//! final state.

use crate::error::ModelError;
use crate::matrix::{MarkovMatrix, MarkovMatrixHandler};
use crate::model::BehaviorModelRelative;

/// Transformer from relative behavior models to Markov matrices
pub struct MarkovMatrixTransformer {
    handler: MarkovMatrixHandler,
}

impl Default for MarkovMatrixTransformer {
    fn default() -> Self {
        Self::new(MarkovMatrixHandler::default())
    }
}

impl MarkovMatrixTransformer {
    /// Create a transformer bound to the given matrix handler
    pub fn new(handler: MarkovMatrixHandler) -> Self {
        Self { handler }
    }

    /// The associated matrix handler
    pub fn handler(&self) -> &MarkovMatrixHandler {
        &self.handler
    }

    /// Transform a relative behavior model into a Markov matrix.
    ///
    /// The model is read-only; transforming the same model twice yields
    /// identical matrices.
    pub fn transform(&self, model: &BehaviorModelRelative) -> Result<MarkovMatrix, ModelError> {
        let final_state = self.handler.final_state_name();

        let states: Vec<String> = model
            .vertices
            .iter()
            .map(|v| v.state_name(final_state).to_string())
            .collect();

        let mut matrix = self.handler.create_empty_matrix_for_states(&states);
        self.store_model_in_matrix(model, &mut matrix)?;

        Ok(matrix)
    }

    /// Fill a matrix with the transition cells of a relative model.
    fn store_model_in_matrix(
        &self,
        model: &BehaviorModelRelative,
        matrix: &mut MarkovMatrix,
    ) -> Result<(), ModelError> {
        let final_state = self.handler.final_state_name();

        self.handler.reset_matrix(matrix);

        for (index, src_vertex) in model.vertices.iter().enumerate() {
            if src_vertex.is_final() {
                // The final state is absorbing; its row keeps the
                // no-transition markers.
                continue;
            }

            let src_name = src_vertex.state_name(final_state);
            let mut value_sum = 0.0;

            for transition in &src_vertex.outgoing {
                let probability = transition.value;
                let dst_vertex = model.vertices.get(transition.target).ok_or(
                    ModelError::InvalidTarget {
                        vertex: index,
                        target: transition.target,
                    },
                )?;
                let dst_name = dst_vertex.state_name(final_state);

                if dst_name != final_state {
                    value_sum += probability;
                }

                let (mean, deviation) = match transition.think_time_params.as_slice() {
                    [mean, deviation] => (*mean, *deviation),
                    _ => (0.0, 0.0),
                };

                self.handler.set_value_at_cell(
                    &format!("{}; n({} {})", probability, mean as i64, deviation as i64),
                    src_name,
                    dst_name,
                    matrix,
                )?;
            }

            // Absorption cell: the residual mass not sent to non-final states.
            // Mass on explicit final-targeting transitions is excluded from
            // value_sum, and this write lands after their cells, so rows with
            // direct final transitions may not sum to 1.0. Kept as-is for
            // compatibility with existing behavior-model consumers.
            self.handler.set_value_at_cell(
                &format!(
                    "{}; {}",
                    1.0 - value_sum,
                    self.handler.default_think_time_value()
                ),
                src_name,
                final_state,
                matrix,
            )?;
        }

        Ok(())
    }
}
