//! Idbwatch - InternetDB host enrichment and monitoring CLI
//!
//! Enriches a list of IP addresses (or CIDR ranges) with host intelligence
//! from the Shodan InternetDB API, then prints the records, persists them as
//! JSON, or compares them against a previous snapshot and reports the newly
//! observed ports and vulnerabilities.

use anyhow::Context;
use clap::Parser;
use idbwatch_core::{
    client::InternetDbClient,
    diff,
    nmap::NmapRunner,
    output::{DisplayOptions, TextFormatter},
    pool, snapshot,
    targets::TargetExpander,
};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "idbwatch")]
#[command(version)]
#[command(about = "Enrich IPs with InternetDB host intelligence and monitor changes between runs", long_about = None)]
struct Cli {
    #[arg(help = "Target IPs or CIDR ranges; read from stdin when omitted")]
    targets: Vec<String>,

    #[arg(
        short = 'c',
        long,
        default_value_t = pool::DEFAULT_CONCURRENCY,
        help = "Number of concurrent lookups"
    )]
    concurrency: usize,

    #[arg(long, value_name = "FILE", help = "Save results to FILE as JSON")]
    json: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Compare results with a prior JSON snapshot, report changes, then update FILE"
    )]
    compare: Option<PathBuf>,

    #[arg(long, help = "Show only ip:port pairs")]
    pairs: bool,

    #[arg(long, help = "Hide CPEs")]
    no_cpes: bool,

    #[arg(long, help = "Hide hostnames")]
    no_hostnames: bool,

    #[arg(long, help = "Hide tags")]
    no_tags: bool,

    #[arg(long, help = "Hide vulnerabilities")]
    no_vulns: bool,

    #[arg(long, help = "Disable color in output")]
    no_color: bool,

    #[arg(long, help = "Run nmap service detection on discovered ports")]
    nmap: bool,

    #[arg(short, long, help = "Verbose diagnostics")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Per-target lookup failures and expansion warnings are diagnostics;
    // they only surface in verbose mode.
    let default_filter = if cli.verbose {
        "idbwatch=debug,idbwatch_core=debug,idbwatch_cli=debug"
    } else {
        "error"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let inputs = collect_inputs(&cli)?;
    let targets = expand_targets(&inputs);

    if targets.is_empty() {
        eprintln!("No targets to look up.");
        return Ok(());
    }

    let client = Arc::new(InternetDbClient::new()?);
    let records = pool::run(targets, cli.concurrency, client).await;
    let valid = pool::valid_records(records);

    let opts = DisplayOptions {
        show_cpes: !cli.no_cpes,
        show_hostnames: !cli.no_hostnames,
        show_tags: !cli.no_tags,
        show_vulns: !cli.no_vulns,
        color: !cli.no_color,
        pairs: cli.pairs,
    };

    if cli.json.is_none() && cli.compare.is_none() {
        let mut formatter = TextFormatter::new(opts);
        for record in &valid {
            formatter.write_record(record)?;
        }
        if cli.nmap {
            println!();
            for record in &valid {
                service_detect(&record.ip, &record.ports).await?;
            }
        }
        return Ok(());
    }

    if let Some(ref path) = cli.json {
        snapshot::save(path, &valid)
            .with_context(|| format!("failed to save snapshot to {}", path.display()))?;
        if cli.nmap {
            for record in &valid {
                service_detect(&record.ip, &record.ports).await?;
            }
        }
        return Ok(());
    }

    if let Some(ref path) = cli.compare {
        let old = snapshot::load(path);
        let report = diff::diff(&old, &valid);

        let mut formatter = TextFormatter::new(opts);
        formatter.write_report(&report)?;
        if !report.is_empty() {
            println!();
        }

        if cli.nmap {
            for record in report.first_seen.values() {
                service_detect(&record.ip, &record.ports).await?;
            }
            for (ip, host_diff) in &report.changed {
                let ports: Vec<u16> = host_diff.new_ports.iter().copied().collect();
                service_detect(ip, &ports).await?;
            }
        }

        // The snapshot always reflects the latest observed state, changed
        // or not.
        snapshot::save(path, &valid)
            .with_context(|| format!("failed to update snapshot {}", path.display()))?;
    }

    Ok(())
}

/// Collects raw input tokens from argv, or from stdin when none were given.
fn collect_inputs(cli: &Cli) -> anyhow::Result<Vec<String>> {
    if !cli.targets.is_empty() {
        return Ok(cli.targets.clone());
    }

    let mut inputs = Vec::new();
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            inputs.push(trimmed.to_string());
        }
    }
    Ok(inputs)
}

/// Expands every input token, dropping malformed ones with a warning.
fn expand_targets(inputs: &[String]) -> Vec<String> {
    let expander = TargetExpander::new();
    let mut targets = Vec::new();

    for input in inputs {
        match expander.expand(input) {
            Ok(hosts) => targets.extend(hosts),
            Err(e) => warn!(input = %input, error = %e, "skipping malformed target"),
        }
    }

    targets
}

/// Runs nmap service detection for one host and prints the detected services.
async fn service_detect(ip: &str, ports: &[u16]) -> anyhow::Result<()> {
    let runner = NmapRunner::new();
    let lines = runner
        .scan(ip, ports)
        .await
        .with_context(|| format!("nmap service detection failed for {}", ip))?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["idbwatch", "10.0.0.1"]);
        assert_eq!(cli.concurrency, 5);
        assert!(!cli.pairs);
        assert!(!cli.nmap);
        assert!(cli.json.is_none());
        assert!(cli.compare.is_none());
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "idbwatch",
            "-c",
            "10",
            "--compare",
            "snap.json",
            "--pairs",
            "--no-color",
            "10.0.0.0/24",
        ]);
        assert_eq!(cli.concurrency, 10);
        assert!(cli.pairs);
        assert!(cli.no_color);
        assert_eq!(cli.compare.unwrap(), PathBuf::from("snap.json"));
        assert_eq!(cli.targets, vec!["10.0.0.0/24"]);
    }

    #[test]
    fn test_expand_targets_drops_malformed() {
        let inputs = vec!["10.0.0.1".to_string(), "10.0.0.0/99".to_string()];
        let targets = expand_targets(&inputs);
        assert_eq!(targets, vec!["10.0.0.1"]);
    }
}
