use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "confluent workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the representation benchmarks and write a comparison report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
    /// Run the test suite once per feature combination
    Features,
}

const BENCH_NAME: &str = "intersection_benchmark";
const REPORT_PATH: &str = "benchmark_results/report.md";

/// Feature sets `xtask features` tests; the empty set is the default build.
const FEATURE_SETS: &[&str] = &["", "tracing", "proptest", "tracing,proptest"];

/// Representation columns, in report order.
const REPRESENTATIONS: &[&str] = &["table", "arena", "rc", "rc_hashset"];

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

#[derive(Deserialize)]
struct BenchmarkMeta {
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
enum Throughput {
    Elements(u64),
    Bytes(u64),
}

/// `(group, size) -> representation -> elements per second`
type Results = BTreeMap<(String, u64), BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
        Commands::Features => run_feature_tests()?,
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!(">>> Running {BENCH_NAME}...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.args(["bench", "--bench", BENCH_NAME, "--"]);

    if quick {
        cmd.arg("--measurement-time").arg("0.1");
        cmd.arg("--noplot");
        cmd.arg("--sample-size").arg("10");
    }

    let status = cmd
        .status()
        .with_context(|| format!("failed to spawn cargo bench for {BENCH_NAME}"))?;
    if !status.success() {
        anyhow::bail!("benchmark {BENCH_NAME} failed with {status}");
    }

    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn run_feature_tests() -> Result<()> {
    for features in FEATURE_SETS {
        let label = if features.is_empty() { "default" } else { features };
        println!(">>> Testing with features: {label}");

        let mut cmd = Command::new("cargo");
        cmd.args(["test", "-p", "confluent"]);
        if !features.is_empty() {
            cmd.args(["--features", features]);
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to spawn cargo test ({label})"))?;
        if !status.success() {
            anyhow::bail!("tests failed with features {label}: {status}");
        }
    }
    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");

    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    let report_path = Path::new(REPORT_PATH);
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("failed to create {}", report_path.display()))?;

    writeln!(file, "# Representation Benchmark Report")?;
    writeln!(file)?;

    write!(file, "| Group | Size |")?;
    for repr in REPRESENTATIONS {
        write!(file, " {repr} (elem/s) |")?;
    }
    writeln!(file)?;

    write!(file, "|---|---|")?;
    for _ in REPRESENTATIONS {
        write!(file, "---|")?;
    }
    writeln!(file)?;

    for ((group, size), by_repr) in &results {
        write!(file, "| {group} | {size} |")?;
        for repr in REPRESENTATIONS {
            match by_repr.get(*repr) {
                Some(rate) => write!(file, " {} |", format_rate(*rate))?,
                None => write!(file, " N/A |")?,
            }
        }
        writeln!(file)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_rate(rate: f64) -> String {
    if rate > 1_000_000_000.0 {
        format!("{:.2}G", rate / 1_000_000_000.0)
    } else if rate > 1_000_000.0 {
        format!("{:.2}M", rate / 1_000_000.0)
    } else if rate > 1_000.0 {
        format!("{:.2}K", rate / 1_000.0)
    } else {
        format!("{rate:.0}")
    }
}

/// Walks criterion's output tree looking for
/// `<group>/<representation>/<size>/new/estimates.json`.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|s| s.to_str()) != Some("report") {
                collect_results(&path, results)?;
            }
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        let Some(sample_dir) = path.parent().filter(|p| p.ends_with("new")) else {
            continue;
        };
        let components: Vec<&str> = sample_dir
            .ancestors()
            .skip(1)
            .take(3)
            .filter_map(|p| p.file_name().and_then(|s| s.to_str()))
            .collect();
        let [size, repr, group] = components.as_slice() else {
            continue;
        };
        let Ok(size) = size.parse::<u64>() else {
            continue;
        };

        let estimates: Estimates = read_json(&path)?;
        // Throughput kinds this tool does not know count as one element.
        let throughput = read_json::<BenchmarkMeta>(&sample_dir.join("benchmark.json"))
            .ok()
            .and_then(|meta| meta.throughput);
        let elements = match throughput {
            Some(Throughput::Elements(n) | Throughput::Bytes(n)) => n as f64,
            None => 1.0,
        };

        let time_ns = estimates.mean.point_estimate;
        if time_ns > 0.0 {
            results
                .entry((group.to_string(), size))
                .or_default()
                .insert(repr.to_string(), elements * 1e9 / time_ns);
        }
    }

    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}
