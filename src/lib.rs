//! `surfrank`: PageRank for a static link graph, estimated two ways.
//!
//! - [`sample_pagerank`]: a random surfer walks a single Markov chain driven by the
//!   [`transition()`] model; visit frequencies become the rank vector.
//! - [`iterate_pagerank`]: the PageRank recurrence is applied to the whole vector until
//!   no node moves by more than the tolerance in one pass.
//!
//! Graph construction from a corpus of HTML pages lives in [`corpus`]; the estimators only
//! ever see a validated [`LinkGraph`].
//!
//! Public invariants (must not drift):
//! - **Node order**: nodes are addressed by their index in sorted-name order
//!   (`0..graph.node_count()`); index-level `*_run` functions return vectors in that order.
//! - **Mass conservation**: every returned [`RankVector`] sums to 1. Dangling nodes spread
//!   their mass uniformly over all nodes, in both estimators.
//! - **Determinism**: iteration is deterministic; sampling is deterministic for a seeded
//!   generator.
//! - **No silent truncation**: hitting the iteration cap is an error
//!   ([`Error::ConvergenceNotReached`]), never a partial result.

pub mod corpus;
pub mod graph;
pub mod pagerank;
pub mod rank;
pub mod sampling;
pub mod transition;

pub use corpus::{crawl, extract_links, pages_to_graph, CorpusError};
pub use graph::{GraphRef, LinkGraph};
pub use pagerank::{iterate_pagerank, iterate_pagerank_with, PageRankConfig};
pub use pagerank::{pagerank_checked_run, pagerank_run, PageRankRun};
pub use rank::RankVector;
pub use sampling::{sample_pagerank, sample_pagerank_with, sample_run, SampleRun, SamplingConfig};
pub use transition::{step, transition, transition_distribution};

/// Default damping factor shared by both estimators.
pub const DEFAULT_DAMPING: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no convergence after {iterations} iterations (max delta {max_delta:e})")]
    ConvergenceNotReached { iterations: usize, max_delta: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
