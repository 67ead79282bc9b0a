//! PageRank by fixed-point iteration.
//!
//! Every pass recomputes the whole vector from the previous one (simultaneous update):
//!
//! \[
//!   r'(p) = \frac{1-d}{N} + d \sum_{q \to p} \frac{r(q)}{\deg(q)} + d \sum_{q\ \text{dangling}} \frac{r(q)}{N}
//! \]
//!
//! A dangling node behaves as if it linked to every node, so the vector keeps summing to 1.
//! The run stops after the first pass in which no node moved by more than `tolerance`.

use tracing::{debug, trace, warn};

use crate::graph::{GraphRef, LinkGraph};
use crate::rank::RankVector;
use crate::transition::validate_damping;
use crate::{Error, Result};

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankRun {
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// Largest per-node change in the final pass.
    pub max_delta: f64,
    pub converged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    pub damping: f64,
    /// Per-node convergence threshold for one pass.
    pub tolerance: f64,
    /// Safety cap on passes.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: crate::DEFAULT_DAMPING,
            tolerance: 0.001,
            max_iterations: 10_000,
        }
    }
}

impl PageRankConfig {
    pub fn with_damping(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        if self.max_iterations == 0 {
            return Err(Error::InvalidInput(
                "max_iterations must be > 0".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidInput(
                "tolerance must be finite and > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Iterative PageRank with convergence reporting.
///
/// Unchecked: does not validate `config`, and reports (rather than fails) a run that hit
/// `max_iterations` via `converged = false`. An empty graph yields an empty, converged run.
pub fn pagerank_run<G: GraphRef>(graph: &G, config: PageRankConfig) -> PageRankRun {
    let n = graph.node_count();
    if n == 0 {
        return PageRankRun {
            scores: Vec::new(),
            iterations: 0,
            max_delta: 0.0,
            converged: true,
        };
    }
    let n_f64 = n as f64;
    let mut scores = vec![1.0 / n_f64; n];
    let mut new_scores = vec![0.0; n];
    let out_degrees: Vec<usize> = (0..n).map(|i| graph.out_degree(i)).collect();
    let teleport = (1.0 - config.damping) / n_f64;

    let mut iters = 0usize;
    let mut last_delta = f64::INFINITY;
    let mut converged = false;
    for _ in 0..config.max_iterations {
        iters += 1;
        let dangling_sum: f64 = out_degrees
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(i, _)| scores[i])
            .sum();
        let dangling_contrib = config.damping * dangling_sum / n_f64;
        new_scores.fill(teleport + dangling_contrib);

        for u in 0..n {
            let deg = out_degrees[u];
            if deg > 0 {
                let share = config.damping * scores[u] / deg as f64;
                for &v in graph.neighbors_ref(u) {
                    new_scores[v] += share;
                }
            }
        }

        let delta = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);
        trace!(iteration = iters, max_delta = delta, "pagerank pass");
        last_delta = delta;
        std::mem::swap(&mut scores, &mut new_scores);
        if delta <= config.tolerance {
            converged = true;
            break;
        }
    }
    PageRankRun {
        scores,
        iterations: iters,
        max_delta: last_delta,
        converged,
    }
}

/// Checked iterative PageRank.
///
/// Validates `config`, rejects an empty graph, and turns a run that hit the iteration cap
/// into [`Error::ConvergenceNotReached`].
pub fn pagerank_checked_run<G: GraphRef>(
    graph: &G,
    config: PageRankConfig,
) -> Result<PageRankRun> {
    config.validate()?;
    if graph.node_count() == 0 {
        return Err(Error::InvalidInput("graph has no nodes".to_string()));
    }
    let run = pagerank_run(graph, config);
    if !run.converged {
        warn!(
            iterations = run.iterations,
            max_delta = run.max_delta,
            tolerance = config.tolerance,
            "pagerank iteration cap reached"
        );
        return Err(Error::ConvergenceNotReached {
            iterations: run.iterations,
            max_delta: run.max_delta,
        });
    }
    debug!(
        nodes = graph.node_count(),
        iterations = run.iterations,
        max_delta = run.max_delta,
        "pagerank converged"
    );
    Ok(run)
}

/// PageRank of every page in `graph` by iteration, with the default tolerance and cap.
pub fn iterate_pagerank(graph: &LinkGraph, damping: f64) -> Result<RankVector> {
    iterate_pagerank_with(graph, PageRankConfig::with_damping(damping))
}

pub fn iterate_pagerank_with(graph: &LinkGraph, config: PageRankConfig) -> Result<RankVector> {
    let run = pagerank_checked_run(graph, config)?;
    Ok(RankVector::from_scores(graph, run.scores))
}
