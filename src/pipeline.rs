//! Pipeline orchestration
//!
//! Public entry points chaining the two transformation stages:
//! absolute model → relative model → Markov matrix.

use crate::error::ModelError;
use crate::markov::MarkovMatrixTransformer;
use crate::matrix::{MarkovMatrix, MarkovMatrixHandler};
use crate::model::{BehaviorModelAbsolute, BehaviorModelRelative};
use crate::relative::RelativeTransformer;

/// Transform a batch of absolute behavior models into Markov matrices using
/// the default matrix conventions (one-shot, order-preserving).
pub fn models_to_matrices(
    models: &[BehaviorModelAbsolute],
) -> Result<Vec<MarkovMatrix>, ModelError> {
    MatrixGenerator::new().generate_batch(models)
}

/// Generator carrying a configured matrix handler.
///
/// Use this when the final-state token or cell markers differ from the
/// defaults.
pub struct MatrixGenerator {
    transformer: MarkovMatrixTransformer,
}

impl Default for MatrixGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixGenerator {
    /// Create a generator with the default matrix conventions
    pub fn new() -> Self {
        Self::with_handler(MarkovMatrixHandler::default())
    }

    /// Create a generator with explicit matrix conventions
    pub fn with_handler(handler: MarkovMatrixHandler) -> Self {
        Self {
            transformer: MarkovMatrixTransformer::new(handler),
        }
    }

    /// The matrix handler in use
    pub fn handler(&self) -> &MarkovMatrixHandler {
        self.transformer.handler()
    }

    /// Transform one absolute model into a Markov matrix
    pub fn generate(&self, model: &BehaviorModelAbsolute) -> Result<MarkovMatrix, ModelError> {
        // Stage 1: normalize counts into probabilities and think times
        let relative = RelativeTransformer::transform_one(model)?;

        // Stage 2: flatten into the matrix
        self.transformer.transform(&relative)
    }

    /// Transform a batch of absolute models, order-preserving
    pub fn generate_batch(
        &self,
        models: &[BehaviorModelAbsolute],
    ) -> Result<Vec<MarkovMatrix>, ModelError> {
        let relative = RelativeTransformer::transform(models)?;
        relative
            .iter()
            .map(|model| self.transformer.transform(model))
            .collect()
    }

    /// Transform one relative model into a Markov matrix
    pub fn generate_from_relative(
        &self,
        model: &BehaviorModelRelative,
    ) -> Result<MarkovMatrix, ModelError> {
        self.transformer.transform(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Transition, UseCase, Vertex};
    use pretty_assertions::assert_eq;

    fn session_model() -> BehaviorModelAbsolute {
        // login -> browse (x3, sampled), login -> end (x1),
        // browse -> browse (x2), browse -> end (x2)
        let mut login = Vertex::with_use_case(UseCase::with_id("uc-1", "login"));
        login
            .outgoing
            .push(Transition::with_time_diffs(1, 3.0, vec![100.0, 200.0, 300.0]));
        login.outgoing.push(Transition::new(2, 1.0));

        let mut browse = Vertex::with_use_case(UseCase::with_id("uc-2", "browse"));
        browse.outgoing.push(Transition::new(1, 2.0));
        browse.outgoing.push(Transition::new(2, 2.0));

        BehaviorModelAbsolute {
            vertices: vec![login, browse, Vertex::final_vertex()],
        }
    }

    #[test]
    fn test_end_to_end_generation() {
        let matrix = MatrixGenerator::new().generate(&session_model()).unwrap();

        assert_eq!(matrix.states(), &["login", "browse", "$"]);
        assert_eq!(matrix.value_at("login", "browse").unwrap(), "0.75; n(200 100)");
        assert_eq!(matrix.value_at("login", "$").unwrap(), "0.25; n(0 0)");
        assert_eq!(matrix.value_at("browse", "browse").unwrap(), "0.5; n(0 0)");
        assert_eq!(matrix.value_at("browse", "$").unwrap(), "0.5; n(0 0)");
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let generator = MatrixGenerator::new();
        let models = vec![session_model(), session_model()];

        let batch = generator.generate_batch(&models).unwrap();
        let single = generator.generate(&models[0]).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], single);
        assert_eq!(batch[1], single);
    }

    #[test]
    fn test_models_to_matrices_one_shot() {
        let matrices = models_to_matrices(&[session_model()]).unwrap();
        assert_eq!(matrices.len(), 1);
        assert_eq!(matrices[0].dimension(), 3);
    }

    #[test]
    fn test_custom_handler_conventions() {
        let generator =
            MatrixGenerator::with_handler(MarkovMatrixHandler::new("exit", "-", "n(0 0)"));
        let matrix = generator.generate(&session_model()).unwrap();

        assert_eq!(matrix.states(), &["login", "browse", "exit"]);
        assert_eq!(matrix.value_at("exit", "login").unwrap(), "-");
        assert_eq!(matrix.value_at("login", "exit").unwrap(), "0.25; n(0 0)");
    }
}
