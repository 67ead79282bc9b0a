//! surfrank command line interface
//!
//! Crawls a directory of HTML pages and prints the PageRank of every page, estimated by
//! random-surfer sampling and by iteration.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use surfrank::{
    crawl, iterate_pagerank_with, sample_pagerank_with, GraphRef, PageRankConfig, RankVector,
    SamplingConfig,
};

/// PageRank for a corpus of linked HTML pages.
#[derive(Parser, Debug)]
#[command(name = "surfrank")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the corpus' `.html` files
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(short, long, env = "SURFRANK_DAMPING", default_value_t = surfrank::DEFAULT_DAMPING)]
    damping: f64,

    /// Number of pages the random surfer visits
    #[arg(short = 'n', long, env = "SURFRANK_SAMPLES", default_value_t = 10_000)]
    samples: usize,

    /// Seed for the random surfer (random if unset)
    #[arg(short, long, env = "SURFRANK_SEED")]
    seed: Option<u64>,

    /// Per-page convergence threshold for the iterative estimate
    #[arg(long, env = "SURFRANK_TOLERANCE", default_value_t = 0.001)]
    tolerance: f64,

    /// Give up on iteration after this many passes
    #[arg(long, env = "SURFRANK_MAX_ITERATIONS", default_value_t = 10_000)]
    max_iterations: usize,

    /// Only list the K highest-ranked pages
    #[arg(short, long)]
    top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Output format for the rank vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// One page per line, four decimals
    Text,
    /// A JSON object holding both estimates
    Json,
}

impl Cli {
    fn sampling(&self) -> SamplingConfig {
        SamplingConfig {
            damping: self.damping,
            samples: self.samples,
            seed: self.seed,
        }
    }

    fn iteration(&self) -> PageRankConfig {
        PageRankConfig {
            damping: self.damping,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    samples: usize,
    sampling: &'a RankVector,
    iteration: &'a RankVector,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("surfrank=info")),
        )
        .init();

    let cli = Cli::parse();

    let graph = crawl(&cli.corpus)
        .with_context(|| format!("failed to load corpus {}", cli.corpus.display()))?;
    info!(
        pages = graph.node_count(),
        links = graph.edge_count(),
        dangling = graph.dangling_count(),
        "loaded corpus"
    );

    let sampled =
        sample_pagerank_with(&graph, &cli.sampling()).context("sampling estimate failed")?;
    let iterated =
        iterate_pagerank_with(&graph, cli.iteration()).context("iterative estimate failed")?;

    let stdout = std::io::stdout();
    write_report(
        &mut stdout.lock(),
        cli.format,
        cli.samples,
        &sampled,
        &iterated,
        cli.top,
    )
}

fn write_report(
    out: &mut impl Write,
    format: OutputFormat,
    samples: usize,
    sampled: &RankVector,
    iterated: &RankVector,
    top: Option<usize>,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "PageRank Results from Sampling (n = {samples})")?;
            write_ranks(out, sampled, top)?;
            writeln!(out, "PageRank Results from Iteration")?;
            write_ranks(out, iterated, top)?;
        }
        OutputFormat::Json => {
            let report = Report {
                samples,
                sampling: sampled,
                iteration: iterated,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// One `  page: rank` line per page, by name, or best first with `top`.
fn write_ranks(out: &mut impl Write, ranks: &RankVector, top: Option<usize>) -> io::Result<()> {
    let rows: Vec<(&str, f64)> = match top {
        Some(k) => ranks.top_k(k),
        None => ranks.iter().collect(),
    };
    for (page, rank) in rows {
        writeln!(out, "  {page}: {rank:.4}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfrank::{transition, LinkGraph};

    // a -> b -> c, c dangling
    fn chain() -> LinkGraph {
        LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec![])]).unwrap()
    }

    fn render(format: OutputFormat, top: Option<usize>) -> String {
        let g = chain();
        let uniform = transition(&g, "c", 0.85).unwrap();
        let skewed = transition(&g, "a", 0.5).unwrap();
        let mut buf = Vec::new();
        write_report(&mut buf, format, 10_000, &uniform, &skewed, top).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_report_lists_pages_by_name() {
        let expected = "\
PageRank Results from Sampling (n = 10000)
  a: 0.3333
  b: 0.3333
  c: 0.3333
PageRank Results from Iteration
  a: 0.1667
  b: 0.6667
  c: 0.1667
";
        assert_eq!(render(OutputFormat::Text, None), expected);
    }

    #[test]
    fn text_report_top_k_is_best_first() {
        let expected = "\
PageRank Results from Sampling (n = 10000)
  a: 0.3333
  b: 0.3333
PageRank Results from Iteration
  b: 0.6667
  a: 0.1667
";
        assert_eq!(render(OutputFormat::Text, Some(2)), expected);
    }

    #[test]
    fn json_report_holds_both_estimates_keyed_by_page() {
        let value: serde_json::Value =
            serde_json::from_str(&render(OutputFormat::Json, None)).unwrap();
        assert_eq!(value["samples"], 10_000);
        for key in ["sampling", "iteration"] {
            let ranks = value[key].as_object().unwrap();
            let pages: Vec<&str> = ranks.keys().map(String::as_str).collect();
            assert_eq!(pages, ["a", "b", "c"]);
        }
        let b = value["iteration"]["b"].as_f64().unwrap();
        assert!((b - (0.5 / 3.0 + 0.5)).abs() < 1e-12);
    }
}
