use anyhow::{Context, Result};
use clap::Parser;
use tracegroup::cli::{Cli, OutputFormat};
use tracegroup::config::AnalysisConfig;
use tracegroup::{ingest, AnalysisReport, Analyzer, GroupDetail};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            AnalysisConfig::from_toml(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => AnalysisConfig::default(),
    };
    if let Some(scheme) = cli.scheme {
        config.scheme = scheme;
    }
    Ok(config)
}

/// Print per-group response-time summaries
fn print_groups(report: &AnalysisReport) {
    println!("=== Trace Groups ===");
    println!("{:<20} {:>8} {:>14} {:>14}", "KEY", "TRACES", "AVERAGE", "VARIANCE");
    println!("─────────────────────────────────────────────────────────────");
    for (key, stats) in &report.groups {
        println!(
            "{:<20} {:>8} {:>14.3} {:>14.3}",
            format!("{:?}", key),
            stats.count,
            stats.average,
            stats.variance
        );
    }
    println!();
}

/// Print edge latencies and the covariance matrix for one group
fn print_group_detail(detail: &GroupDetail) {
    println!("=== Edges in group {:?} ===", detail.key);
    for stat in &detail.edges {
        println!(
            "{:<16} n={:<4} avg={:<12.3} var={:.3}",
            stat.edge.to_string(),
            stat.series.len(),
            stat.average,
            stat.variance
        );
    }
    println!();

    match &detail.covariance {
        Some(matrix) => {
            println!("=== Covariance matrix ===");
            for (edge, row) in matrix.edges.iter().zip(matrix.to_rows()) {
                let cells: Vec<String> = row.iter().map(|v| format!("{:>12.3}", v)).collect();
                println!("{:<16} {}", edge.to_string(), cells.join(" "));
            }
        }
        None => println!("Too few data points to create covariance matrix"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = load_config(&cli)?;
    let mut traces = ingest::load_traces(&cli.input)?;

    let analyzer = Analyzer::new(config);
    let report = analyzer.run(&mut traces)?;
    let detail = cli
        .group
        .as_deref()
        .map(|key| analyzer.group_detail(&report, key, &traces))
        .transpose()?;

    match cli.format {
        OutputFormat::Text => {
            print_groups(&report);
            if let Some(detail) = &detail {
                print_group_detail(detail);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "groups": report.groups,
                "index": report.index,
                "detail": detail,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
