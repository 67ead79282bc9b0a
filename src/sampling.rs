//! PageRank by random-surfer sampling.
//!
//! One Markov chain, no restarts: the first page is uniform, every later page is a
//! [`step`] from the previous one. Visit counts divided by the number of samples are the
//! estimate.
//!
//! Randomness is always injected. [`sample_pagerank`] takes any `Rng`; [`SamplingConfig`]
//! builds a `StdRng` from its seed, or from entropy when there is none.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::graph::{GraphRef, LinkGraph};
use crate::rank::RankVector;
use crate::transition::{step, validate_damping};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    pub damping: f64,
    /// Chain length, including the starting page.
    pub samples: usize,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            damping: crate::DEFAULT_DAMPING,
            samples: 10_000,
            seed: None,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        if self.samples == 0 {
            return Err(Error::InvalidInput("samples must be > 0".to_string()));
        }
        Ok(())
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleRun {
    pub scores: Vec<f64>,
    /// Raw visit counts, indexed like `scores`.
    pub visits: Vec<u64>,
    pub samples: usize,
}

/// Walk `samples` steps and count visits.
///
/// Unchecked: `damping` must be in `[0,1]`. An empty graph or `samples == 0` yields an
/// empty run.
pub fn sample_run<G, R>(graph: &G, damping: f64, samples: usize, rng: &mut R) -> SampleRun
where
    G: GraphRef,
    R: Rng + ?Sized,
{
    let n = graph.node_count();
    if n == 0 || samples == 0 {
        return SampleRun {
            scores: Vec::new(),
            visits: Vec::new(),
            samples: 0,
        };
    }

    let mut visits = vec![0u64; n];
    let mut page = rng.gen_range(0..n);
    visits[page] += 1;
    for _ in 1..samples {
        page = step(graph, page, damping, rng);
        visits[page] += 1;
    }

    let total = samples as f64;
    let scores = visits.iter().map(|&c| c as f64 / total).collect();
    SampleRun {
        scores,
        visits,
        samples,
    }
}

/// PageRank of every page in `graph`, estimated from `samples` random-surfer steps.
pub fn sample_pagerank<R: Rng + ?Sized>(
    graph: &LinkGraph,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<RankVector> {
    graph.ensure_non_empty()?;
    validate_damping(damping)?;
    if samples == 0 {
        return Err(Error::InvalidInput("samples must be > 0".to_string()));
    }
    let run = sample_run(graph, damping, samples, rng);
    debug!(
        nodes = graph.node_count(),
        samples = run.samples,
        "sampling finished"
    );
    Ok(RankVector::from_scores(graph, run.scores))
}

pub fn sample_pagerank_with(graph: &LinkGraph, config: &SamplingConfig) -> Result<RankVector> {
    config.validate()?;
    let mut rng = config.rng();
    sample_pagerank(graph, config.damping, config.samples, &mut rng)
}
