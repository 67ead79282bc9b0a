//! Random-surfer transition model.
//!
//! From node `u`, with probability `damping` the surfer follows one of `u`'s out-links
//! (uniformly); otherwise it jumps to a uniformly random node. A dangling node has nothing
//! to follow, so its next step is uniform over all nodes whatever the damping.
//!
//! [`transition_distribution`] is the exact distribution; [`step`] draws one node from it.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::{GraphRef, LinkGraph};
use crate::rank::RankVector;
use crate::{Error, Result};

pub(crate) fn validate_damping(damping: f64) -> Result<()> {
    if !damping.is_finite() {
        return Err(Error::InvalidInput("damping must be finite".to_string()));
    }
    if damping <= 0.0 || damping >= 1.0 {
        return Err(Error::InvalidInput(format!(
            "damping must be in (0,1), got {damping}"
        )));
    }
    Ok(())
}

/// Next-node distribution from `node`, indexed like `graph`.
///
/// Unchecked: `node` must be `< graph.node_count()` and `damping` in `[0,1]`.
pub fn transition_distribution<G: GraphRef>(graph: &G, node: usize, damping: f64) -> Vec<f64> {
    let n = graph.node_count();
    let links = graph.neighbors_ref(node);
    if links.is_empty() {
        return vec![1.0 / n as f64; n];
    }
    let mut dist = vec![(1.0 - damping) / n as f64; n];
    let share = damping / links.len() as f64;
    for &v in links {
        dist[v] += share;
    }
    dist
}

/// Draw the surfer's next node from `node`.
///
/// Samples exactly [`transition_distribution`]: a `damping`-weighted coin picks between a
/// uniform out-link and a uniform jump; dangling nodes always jump.
///
/// Unchecked: `node` must be `< graph.node_count()` and `damping` in `[0,1]`.
pub fn step<G, R>(graph: &G, node: usize, damping: f64, rng: &mut R) -> usize
where
    G: GraphRef,
    R: Rng + ?Sized,
{
    if rng.gen_bool(damping) {
        if let Some(&next) = graph.neighbors_ref(node).choose(rng) {
            return next;
        }
    }
    rng.gen_range(0..graph.node_count())
}

/// Probability of visiting each node next, given the surfer is on `page`.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> Result<RankVector> {
    graph.ensure_non_empty()?;
    validate_damping(damping)?;
    let node = graph
        .index_of(page)
        .ok_or_else(|| Error::InvalidInput(format!("unknown node {page:?}")))?;
    Ok(RankVector::from_scores(
        graph,
        transition_distribution(graph, node, damping),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn corpus() -> LinkGraph {
        // 1 -> {2, 3}, 2 -> {3}, 3 -> {2}, 4 dangling
        LinkGraph::from_links([
            ("1", vec!["2", "3"]),
            ("2", vec!["3"]),
            ("3", vec!["2"]),
            ("4", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn follows_links_with_damping_weight() {
        let dist = transition(&corpus(), "1", 0.85).unwrap();
        let jump = 0.15 / 4.0;
        assert!((dist.get("1").unwrap() - jump).abs() < 1e-12);
        assert!((dist.get("2").unwrap() - (jump + 0.425)).abs() < 1e-12);
        assert!((dist.get("3").unwrap() - (jump + 0.425)).abs() < 1e-12);
        assert!((dist.get("4").unwrap() - jump).abs() < 1e-12);
        assert!((dist.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn dangling_node_is_uniform() {
        for damping in [0.1, 0.5, 0.85, 0.99] {
            let dist = transition(&corpus(), "4", damping).unwrap();
            for (_, p) in dist.iter() {
                assert!((p - 0.25).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn rejects_bad_arguments() {
        let g = corpus();
        assert!(transition(&g, "9", 0.85).is_err());
        assert!(transition(&g, "1", 0.0).is_err());
        assert!(transition(&g, "1", 1.0).is_err());
        assert!(transition(&g, "1", f64::NAN).is_err());
        assert!(transition(&LinkGraph::new(), "1", 0.85).is_err());
    }

    #[test]
    fn step_accepts_closed_damping_bounds() {
        let g = corpus();
        let mut rng = StdRng::seed_from_u64(11);
        // "2" links only to "3"
        for _ in 0..100 {
            assert_eq!(step(&g, 1, 1.0, &mut rng), 2);
        }
        let mut seen = vec![false; g.node_count()];
        for _ in 0..1_000 {
            seen[step(&g, 1, 0.0, &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn step_matches_distribution() {
        let g = corpus();
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 200_000;
        for node in 0..g.node_count() {
            let mut counts = vec![0usize; g.node_count()];
            for _ in 0..draws {
                counts[step(&g, node, 0.85, &mut rng)] += 1;
            }
            let expected = transition_distribution(&g, node, 0.85);
            for (c, p) in counts.iter().zip(expected) {
                let freq = *c as f64 / draws as f64;
                assert!((freq - p).abs() < 0.01, "node={node} freq={freq} p={p}");
            }
        }
    }
}
