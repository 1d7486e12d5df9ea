//! markovgen - Behavior model to Markov matrix transformation
//!
//! markovgen turns recorded user-session behavior graphs into probabilistic
//! behavior models and Markov transition matrices suitable for driving
//! synthetic load generation. The pipeline has two stages: absolute models
//! (occurrence counts + timing samples) are normalized into relative models
//! (probabilities + think-time statistics), which are then flattened into a
//! square matrix keyed by use case names with an explicit absorbing final
//! state.
//!
//! ## Modules
//!
//! - **model**: behavior graph types (use cases, vertices, transitions)
//! - **relative**: absolute → relative normalization
//! - **markov** / **matrix**: relative → Markov matrix flattening
//! - **pipeline**: end-to-end orchestration

pub mod error;
pub mod markov;
pub mod matrix;
pub mod model;
pub mod pipeline;
pub mod relative;
pub mod render;
pub mod stats;

pub use error::ModelError;
pub use markov::MarkovMatrixTransformer;
pub use matrix::{MarkovMatrix, MarkovMatrixHandler};
pub use model::{BehaviorModelAbsolute, BehaviorModelRelative, Transition, UseCase, Vertex};
pub use pipeline::{models_to_matrices, MatrixGenerator};
pub use relative::RelativeTransformer;

/// markovgen version embedded in CLI output
pub const MARKOVGEN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generator name for provenance
pub const GENERATOR_NAME: &str = "markovgen";
