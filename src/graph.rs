//! Link graph adapter.
//!
//! The estimators run on dense node indices through [`GraphRef`]. [`LinkGraph`] is the
//! named implementation: node identifiers are strings, stored in sorted order so that
//! index `i` always refers to the `i`-th smallest name.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{Error, Result};

/// Borrowed adjacency view over nodes `0..node_count()`.
pub trait GraphRef {
    fn node_count(&self) -> usize;

    /// Out-links of `node`. Must only contain indices `< node_count()`.
    fn neighbors_ref(&self, node: usize) -> &[usize];

    fn out_degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

/// An immutable directed link graph over named nodes.
///
/// Invariants (checked by [`LinkGraph::from_links`]):
/// - every out-link names a node of the graph;
/// - no node links to itself;
/// - out-link sets have no duplicates.
///
/// Nodes without out-links ("dangling") are valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    out_links: Vec<Vec<usize>>,
}

impl LinkGraph {
    /// The empty graph. Both estimators reject it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(node, out-links)` pairs.
    ///
    /// Fails with [`Error::InvalidInput`] on a repeated node, a self link, or a link to a
    /// node that is not itself a key.
    pub fn from_links<I, K, L, T>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut pages: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (node, targets) in links {
            let node = node.into();
            let targets: BTreeSet<String> = targets.into_iter().map(Into::into).collect();
            if pages.contains_key(&node) {
                return Err(Error::InvalidInput(format!("duplicate node {node:?}")));
            }
            pages.insert(node, targets);
        }

        let names: Vec<String> = pages.keys().cloned().collect();
        let index: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let mut out_links = Vec::with_capacity(names.len());
        for (node, targets) in &pages {
            let mut row = Vec::with_capacity(targets.len());
            for target in targets {
                if target == node {
                    return Err(Error::InvalidInput(format!("{node:?} links to itself")));
                }
                match index.get(target) {
                    Some(&t) => row.push(t),
                    None => {
                        return Err(Error::InvalidInput(format!(
                            "{node:?} links to unknown node {target:?}"
                        )))
                    }
                }
            }
            // BTreeSet iteration is sorted, and so are the indices.
            out_links.push(row);
        }

        Ok(Self {
            names,
            index,
            out_links,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.out_links.iter().map(Vec::len).sum()
    }

    /// Node names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, node: usize) -> Option<&str> {
        self.names.get(node).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names `name` links to, or `None` if `name` is not a node.
    pub fn out_links(&self, name: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let node = self.index_of(name)?;
        Some(self.out_links[node].iter().map(|&t| self.names[t].as_str()))
    }

    pub fn dangling_count(&self) -> usize {
        self.out_links.iter().filter(|row| row.is_empty()).count()
    }

    pub(crate) fn ensure_non_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidInput("graph has no nodes".to_string()));
        }
        Ok(())
    }
}

impl GraphRef for LinkGraph {
    fn node_count(&self) -> usize {
        self.names.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        &self.out_links[node]
    }
}
