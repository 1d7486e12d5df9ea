//! Absolute-to-relative model transformation
//!
//! This module converts absolute behavior models (raw occurrence counts plus
//! timing samples) into relative behavior models (transition probabilities
//! plus think-time mean/deviation). Each model in a batch is independent, so
//! the batch is processed in parallel with results collected in input order.

use chrono::Utc;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::error::ModelError;
use crate::model::{BehaviorModelAbsolute, BehaviorModelRelative, Vertex};
use crate::stats;

/// Transformer from absolute to relative behavior models
pub struct RelativeTransformer;

impl RelativeTransformer {
    /// Transform a batch of absolute models, element-wise and order-preserving.
    pub fn transform(
        models: &[BehaviorModelAbsolute],
    ) -> Result<Vec<BehaviorModelRelative>, ModelError> {
        models.par_iter().map(Self::transform_one).collect()
    }

    /// Transform a single absolute model into a relative model.
    ///
    /// The source model is left untouched: every vertex is deep-cloned into
    /// the output before its outgoing transitions are rewritten.
    pub fn transform_one(
        model: &BehaviorModelAbsolute,
    ) -> Result<BehaviorModelRelative, ModelError> {
        let mut vertices = Vec::with_capacity(model.vertices.len());

        for (index, vertex) in model.vertices.iter().enumerate() {
            let mut cloned = vertex.clone();
            convert_outgoing_transition_values(index, &mut cloned)?;
            vertices.push(cloned);
        }

        Ok(BehaviorModelRelative {
            vertices,
            computed_at: Utc::now(),
        })
    }
}

/// Rewrite a vertex's outgoing transition values from occurrence counts to
/// probabilities and attach `[mean, deviation]` think-time parameters.
///
/// A vertex with no outgoing transitions (the final vertex) is left as is.
fn convert_outgoing_transition_values(
    index: usize,
    vertex: &mut Vertex,
) -> Result<(), ModelError> {
    if vertex.outgoing.is_empty() {
        return Ok(());
    }

    // Each transition may have fired several times towards its target, so the
    // divisor is the sum over all outgoing counts.
    let n: f64 = vertex.outgoing.iter().map(|t| t.value).sum();
    if n <= 0.0 {
        return Err(ModelError::ZeroTransitionCount { vertex: index });
    }

    for transition in &mut vertex.outgoing {
        transition.value /= n;

        let (mean, deviation) = if transition.time_diffs.is_empty() {
            (0.0, 0.0)
        } else {
            (
                stats::mean(&transition.time_diffs),
                stats::deviation(&transition.time_diffs),
            )
        };

        transition.think_time_params.push(mean);
        transition.think_time_params.push(deviation);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Transition, UseCase};
    use pretty_assertions::assert_eq;

    fn single_source_model() -> BehaviorModelAbsolute {
        // "A" departs 3 times to "B" and once to the final vertex.
        let mut a = Vertex::with_use_case(UseCase::with_id("uc-a", "A"));
        a.outgoing.push(Transition::with_time_diffs(1, 3.0, vec![10.0, 20.0, 30.0]));
        a.outgoing.push(Transition::new(2, 1.0));

        let mut b = Vertex::with_use_case(UseCase::with_id("uc-b", "B"));
        b.outgoing.push(Transition::new(2, 2.0));

        BehaviorModelAbsolute {
            vertices: vec![a, b, Vertex::final_vertex()],
        }
    }

    #[test]
    fn test_counts_become_probabilities() {
        let relative = RelativeTransformer::transform_one(&single_source_model()).unwrap();

        let a = &relative.vertices[0];
        assert_eq!(a.outgoing[0].value, 0.75);
        assert_eq!(a.outgoing[1].value, 0.25);

        let sum: f64 = a.outgoing.iter().map(|t| t.value).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_think_time_params_have_two_entries() {
        let relative = RelativeTransformer::transform_one(&single_source_model()).unwrap();

        for vertex in &relative.vertices {
            for transition in &vertex.outgoing {
                assert_eq!(transition.think_time_params.len(), 2);
            }
        }
    }

    #[test]
    fn test_think_time_mean_and_deviation() {
        let relative = RelativeTransformer::transform_one(&single_source_model()).unwrap();

        let with_samples = &relative.vertices[0].outgoing[0];
        assert_eq!(with_samples.think_time_params[0], 20.0);
        assert!((with_samples.think_time_params[1] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_samples_default_to_zero() {
        let relative = RelativeTransformer::transform_one(&single_source_model()).unwrap();

        let without_samples = &relative.vertices[0].outgoing[1];
        assert_eq!(without_samples.think_time_params, vec![0.0, 0.0]);
    }

    #[test]
    fn test_use_case_identity_preserved() {
        let model = single_source_model();
        let relative = RelativeTransformer::transform_one(&model).unwrap();

        assert_eq!(model.vertices[0].use_case, relative.vertices[0].use_case);
        assert!(relative.vertices[2].is_final());
    }

    #[test]
    fn test_source_model_not_mutated() {
        let model = single_source_model();
        let before = model.clone();
        RelativeTransformer::transform_one(&model).unwrap();
        assert_eq!(model, before);
    }

    #[test]
    fn test_zero_count_sum_is_an_error() {
        let mut model = single_source_model();
        model.vertices[1].outgoing[0].value = 0.0;

        let result = RelativeTransformer::transform_one(&model);
        assert!(matches!(
            result,
            Err(ModelError::ZeroTransitionCount { vertex: 1 })
        ));
    }

    #[test]
    fn test_final_vertex_untouched() {
        let relative = RelativeTransformer::transform_one(&single_source_model()).unwrap();
        assert!(relative.vertices[2].outgoing.is_empty());
    }

    #[test]
    fn test_batch_preserves_order() {
        let first = single_source_model();

        let mut second = single_source_model();
        second.vertices[0].use_case = Some(UseCase::with_id("uc-c", "C"));

        let relative = RelativeTransformer::transform(&[first, second]).unwrap();
        assert_eq!(relative.len(), 2);
        assert_eq!(relative[0].vertices[0].state_name("$"), "A");
        assert_eq!(relative[1].vertices[0].state_name("$"), "C");
    }

    #[test]
    fn test_batch_fails_on_any_malformed_model() {
        let good = single_source_model();
        let mut bad = single_source_model();
        bad.vertices[0].outgoing[0].value = 0.0;
        bad.vertices[0].outgoing[1].value = 0.0;

        assert!(RelativeTransformer::transform(&[good, bad]).is_err());
    }
}
