//! Named score vectors.

use std::cmp::Ordering;

use crate::graph::LinkGraph;

/// A probability distribution over the nodes of a [`LinkGraph`].
///
/// Returned by both estimators, and by [`crate::transition()`] as the next-node
/// distribution. Entries are kept in node (sorted-name) order.
#[derive(Debug, Clone, PartialEq)]
pub struct RankVector {
    names: Vec<String>,
    scores: Vec<f64>,
}

impl RankVector {
    /// `scores` must be indexed like `graph`.
    pub(crate) fn from_scores(graph: &LinkGraph, scores: Vec<f64>) -> Self {
        debug_assert_eq!(graph.names().len(), scores.len());
        Self {
            names: graph.names().to_vec(),
            scores,
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        // names are sorted
        self.names
            .binary_search_by(|n| n.as_str().cmp(name))
            .ok()
            .map(|i| self.scores[i])
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// `(name, score)` pairs sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn sum(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// The `k` highest-scoring nodes, best first. Ties go to the smaller name.
    pub fn top_k(&self, k: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked.truncate(k);
        ranked
    }

    /// Largest per-node absolute difference against `other`.
    ///
    /// Nodes present in only one of the two vectors count with their full score.
    pub fn max_abs_diff(&self, other: &RankVector) -> f64 {
        let mine = self
            .iter()
            .map(|(name, s)| (s - other.get(name).unwrap_or(0.0)).abs());
        let theirs = other
            .iter()
            .filter(|(name, _)| self.get(name).is_none())
            .map(|(_, s)| s.abs());
        mine.chain(theirs).fold(0.0, f64::max)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RankVector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, score) in self.iter() {
            map.serialize_entry(name, &score)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> LinkGraph {
        LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]).unwrap()
    }

    #[test]
    fn lookup_and_order() {
        let r = RankVector::from_scores(&three(), vec![0.2, 0.5, 0.3]);
        assert_eq!(r.get("b"), Some(0.5));
        assert_eq!(r.get("z"), None);
        let names: Vec<&str> = r.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(r.scores(), [0.2, 0.5, 0.3]);
        assert!((r.sum() - 1.0).abs() < 1e-12);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_map_keyed_by_name() {
        let r = RankVector::from_scores(&three(), vec![0.25, 0.5, 0.25]);
        let value = serde_json::to_value(&r).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["a"], 0.25);
        assert_eq!(map["b"], 0.5);
        assert_eq!(map["c"], 0.25);
    }

    #[test]
    fn top_k_breaks_ties_by_name() {
        let r = RankVector::from_scores(&three(), vec![0.25, 0.5, 0.25]);
        assert_eq!(r.top_k(2), vec![("b", 0.5), ("a", 0.25)]);
        assert_eq!(r.top_k(10).len(), 3);
    }

    #[test]
    fn max_abs_diff_is_symmetric_on_shared_nodes() {
        let g = three();
        let x = RankVector::from_scores(&g, vec![0.2, 0.5, 0.3]);
        let y = RankVector::from_scores(&g, vec![0.3, 0.4, 0.3]);
        assert!((x.max_abs_diff(&y) - 0.1).abs() < 1e-12);
        assert!((y.max_abs_diff(&x) - 0.1).abs() < 1e-12);
        assert_eq!(x.max_abs_diff(&x), 0.0);
    }
}
