//! Building a [`LinkGraph`] from a directory of HTML pages.
//!
//! This sits outside the estimators. It reads every `*.html` file in one directory (no
//! recursion), collects the `href` of each `<a>` tag, and keeps only links to other pages
//! of the same corpus. The page identifier is the file name.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex_lite::Regex;
use tracing::debug;

use crate::graph::LinkGraph;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid link graph: {0}")]
    Graph(#[from] crate::Error),
}

fn io_error(path: &Path, source: std::io::Error) -> CorpusError {
    CorpusError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn anchor_href() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("anchor pattern is valid")
    })
}

/// All distinct `href` targets of `<a>` tags in `html`.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    anchor_href()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Turn raw page → links data into a graph.
///
/// Self references and links to pages that are not keys of `pages` are dropped.
pub fn pages_to_graph(
    pages: BTreeMap<String, BTreeSet<String>>,
) -> Result<LinkGraph, CorpusError> {
    let known: BTreeSet<String> = pages.keys().cloned().collect();
    let mut dropped = 0usize;
    let pruned: Vec<(String, Vec<String>)> = pages
        .into_iter()
        .map(|(page, links)| {
            let total = links.len();
            let kept: Vec<String> = links
                .into_iter()
                .filter(|link| link != &page && known.contains(link))
                .collect();
            dropped += total - kept.len();
            (page, kept)
        })
        .collect();
    debug!(pages = pruned.len(), dropped_links = dropped, "pruned corpus links");
    Ok(LinkGraph::from_links(pruned)?)
}

/// Crawl `dir` and build its link graph.
///
/// A directory without HTML pages gives the empty graph; the estimators reject it.
pub fn crawl(dir: impl AsRef<Path>) -> Result<LinkGraph, CorpusError> {
    let dir = dir.as_ref();
    let mut pages = BTreeMap::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".html") || !path.is_file() {
            continue;
        }
        let contents = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
        pages.insert(name.to_string(), extract_links(&contents));
    }
    debug!(dir = %dir.display(), pages = pages.len(), "crawled corpus");
    pages_to_graph(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hrefs_from_anchor_tags() {
        let html = r#"
            <html><body>
              <a href="2.html">two</a>
              <a class="nav" href="3.html">three</a>
              <a href="2.html">two again</a>
              <link href="style.css">
              <ahref="bad.html">
            </body></html>
        "#;
        let links: Vec<String> = extract_links(html).into_iter().collect();
        assert_eq!(links, ["2.html", "3.html"]);
    }

    #[test]
    fn prunes_self_and_outside_links() {
        let mut pages = BTreeMap::new();
        pages.insert(
            "1.html".to_string(),
            BTreeSet::from(["1.html".to_string(), "2.html".to_string()]),
        );
        pages.insert(
            "2.html".to_string(),
            BTreeSet::from(["https://example.com".to_string()]),
        );
        let g = pages_to_graph(pages).unwrap();
        let links: Vec<&str> = g.out_links("1.html").unwrap().collect();
        assert_eq!(links, ["2.html"]);
        assert_eq!(g.out_links("2.html").unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = crawl("/definitely/not/a/corpus").unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
