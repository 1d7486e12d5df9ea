//! Behavior model graph types
//!
//! This module defines the graph object model shared by the absolute and
//! relative behavior model variants: use cases, vertices, and the directed
//! transitions between them. Transitions address their target vertex by index
//! into the owning model's vertex list, so a derived `Clone` of a model is a
//! fully independent deep copy with no aliasing into the source graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A distinct application-level operation observed in a session trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseCase {
    /// Stable identifier
    pub id: String,
    /// Human-readable name; unique within a model, used as the matrix state key
    pub name: String,
}

impl UseCase {
    /// Create a use case with a freshly minted UUID identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }

    /// Create a use case with a caller-supplied identifier
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A directed edge between two vertices (self-loops allowed)
///
/// In an absolute model `value` is an occurrence count and `time_diffs` holds
/// the raw inter-request timing samples. In a relative model `value` is a
/// probability in [0, 1] and `think_time_params` holds exactly
/// `[mean, deviation]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Index of the target vertex in the owning model's vertex list
    pub target: usize,
    /// Occurrence count (absolute) or probability (relative)
    pub value: f64,
    /// Raw inter-request timing samples (absolute models only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_diffs: Vec<f64>,
    /// Think-time parameters `[mean, deviation]` (relative models only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub think_time_params: Vec<f64>,
}

impl Transition {
    /// Create a transition with no timing data
    pub fn new(target: usize, value: f64) -> Self {
        Self {
            target,
            value,
            time_diffs: Vec::new(),
            think_time_params: Vec::new(),
        }
    }

    /// Create a transition carrying raw timing samples
    pub fn with_time_diffs(target: usize, value: f64, time_diffs: Vec<f64>) -> Self {
        Self {
            target,
            value,
            time_diffs,
            think_time_params: Vec::new(),
        }
    }
}

/// A node in a behavior model graph
///
/// A vertex with no use case is the distinguished final vertex, marking the
/// end of a session. Outgoing transitions keep their insertion order so that
/// traversal, and therefore matrix output, is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Associated use case; `None` marks the final vertex
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_case: Option<UseCase>,
    /// Outgoing transitions, in insertion order
    #[serde(default)]
    pub outgoing: Vec<Transition>,
}

impl Vertex {
    /// Create a vertex for a use case
    pub fn with_use_case(use_case: UseCase) -> Self {
        Self {
            use_case: Some(use_case),
            outgoing: Vec::new(),
        }
    }

    /// Create the final (absorbing) vertex
    pub fn final_vertex() -> Self {
        Self {
            use_case: None,
            outgoing: Vec::new(),
        }
    }

    /// Whether this is the final vertex
    pub fn is_final(&self) -> bool {
        self.use_case.is_none()
    }

    /// State name of this vertex: the use case name, or the given final-state
    /// name for the final vertex
    pub fn state_name<'a>(&'a self, final_state_name: &'a str) -> &'a str {
        match &self.use_case {
            Some(use_case) => &use_case.name,
            None => final_state_name,
        }
    }
}

/// Behavior model with raw occurrence counts and timing samples
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BehaviorModelAbsolute {
    /// Vertices in traversal order; one per distinct use case, plus the final vertex
    pub vertices: Vec<Vertex>,
}

impl BehaviorModelAbsolute {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a model from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, crate::error::ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check structural well-formedness, returning human-readable findings.
    ///
    /// An empty result means the model satisfies the absolute-model
    /// invariants: unique use case names, at most one final vertex, in-bounds
    /// transition targets, non-negative counts, and a positive count sum for
    /// every vertex that has outgoing transitions.
    pub fn validate(&self) -> Vec<String> {
        let mut findings = validate_graph(&self.vertices);

        for (index, vertex) in self.vertices.iter().enumerate() {
            if !vertex.outgoing.is_empty() {
                let sum: f64 = vertex.outgoing.iter().map(|t| t.value).sum();
                if sum <= 0.0 {
                    findings.push(format!(
                        "vertex {index}: outgoing transitions sum to zero occurrence count"
                    ));
                }
            }
        }

        findings
    }
}

/// Behavior model with transition probabilities and think-time parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorModelRelative {
    /// Vertices in traversal order, mirroring the source absolute model
    pub vertices: Vec<Vertex>,
    /// When the relative model was computed
    pub computed_at: DateTime<Utc>,
}

impl BehaviorModelRelative {
    /// Parse a model from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, crate::error::ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check structural well-formedness, returning human-readable findings.
    ///
    /// Beyond the shared graph checks this verifies the relative-model
    /// invariants: every transition carries exactly two think-time parameters
    /// and every non-final vertex's outgoing probabilities sum to 1.0 within
    /// 1e-9.
    pub fn validate(&self) -> Vec<String> {
        let mut findings = validate_graph(&self.vertices);

        for (index, vertex) in self.vertices.iter().enumerate() {
            for (t_index, transition) in vertex.outgoing.iter().enumerate() {
                if transition.think_time_params.len() != 2 {
                    findings.push(format!(
                        "vertex {index} transition {t_index}: expected 2 think-time parameters, found {}",
                        transition.think_time_params.len()
                    ));
                }
            }

            if !vertex.outgoing.is_empty() {
                let sum: f64 = vertex.outgoing.iter().map(|t| t.value).sum();
                if (sum - 1.0).abs() > 1e-9 {
                    findings.push(format!(
                        "vertex {index}: outgoing probabilities sum to {sum}, expected 1.0"
                    ));
                }
            }
        }

        findings
    }
}

/// Checks shared by both model variants
fn validate_graph(vertices: &[Vertex]) -> Vec<String> {
    let mut findings = Vec::new();
    let mut seen_names: Vec<&str> = Vec::new();
    let mut final_count = 0;

    for (index, vertex) in vertices.iter().enumerate() {
        match &vertex.use_case {
            Some(use_case) => {
                if seen_names.contains(&use_case.name.as_str()) {
                    findings.push(format!(
                        "vertex {index}: duplicate use case name \"{}\"",
                        use_case.name
                    ));
                }
                seen_names.push(&use_case.name);
            }
            None => final_count += 1,
        }

        for (t_index, transition) in vertex.outgoing.iter().enumerate() {
            if transition.target >= vertices.len() {
                findings.push(format!(
                    "vertex {index} transition {t_index}: target index {} out of bounds",
                    transition.target
                ));
            }
            if transition.value < 0.0 {
                findings.push(format!(
                    "vertex {index} transition {t_index}: negative value {}",
                    transition.value
                ));
            }
        }
    }

    if final_count > 1 {
        findings.push(format!("model has {final_count} final vertices, expected at most 1"));
    }

    findings
}
