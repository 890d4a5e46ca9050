use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};

use semverdiff_core::{Config, Report, Severity, TypeDefinition};
use semverdiff_engine::ChangeCalculator;

/// semverdiff - classify API changes between two model snapshots
#[derive(Parser)]
#[command(name = "semverdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: semverdiff.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two model snapshots and report every classified change
    Compare {
        /// Snapshot of the old version (JSON)
        old: PathBuf,

        /// Snapshot of the new version (JSON)
        new: PathBuf,

        /// Output file for the JSON report
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Also write a markdown report
        #[arg(short, long)]
        markdown: Option<PathBuf>,

        /// Exit non-zero when the outcome reaches this severity
        #[arg(long, value_enum, default_value_t = FailOn::Breaking)]
        fail_on: FailOn,
    },

    /// List the visible types of a snapshot
    Show {
        /// Snapshot file (JSON)
        snapshot: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FailOn {
    Feature,
    Breaking,
}

impl FailOn {
    fn threshold(self) -> Severity {
        match self {
            Self::Feature => Severity::Feature,
            Self::Breaking => Severity::Breaking,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("semverdiff.toml").exists() {
        Config::from_file(Path::new("semverdiff.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    match cli.command {
        Commands::Compare {
            old,
            new,
            output,
            markdown,
            fail_on,
        } => compare_command(
            &config,
            &old,
            &new,
            &output,
            markdown.as_deref(),
            fail_on,
            cli.verbose,
        ),
        Commands::Show { snapshot } => show_command(&snapshot),
    }
}

/// Compare command - classify every change between two snapshots
fn compare_command(
    config: &Config,
    old_path: &Path,
    new_path: &Path,
    output: &Path,
    markdown: Option<&Path>,
    fail_on: FailOn,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("{} {}", "Loading old snapshot:".cyan(), old_path.display());
    }
    let old = load_snapshot(old_path)?;

    if verbose {
        eprintln!("{} {}", "Loading new snapshot:".cyan(), new_path.display());
    }
    let new = load_snapshot(new_path)?;

    if verbose {
        eprintln!(
            "Comparing {} old and {} new root types",
            old.len(),
            new.len()
        );
    }

    let calculator = ChangeCalculator::new(config.comparer_options())?;
    let outcome = calculator.calculate(&old, &new)?;

    let report = Report::from_outcome(outcome);
    report.save_to_file(output)?;

    if verbose {
        eprintln!("{} {}", "Report saved to:".green(), output.display());
    }

    if let Some(md_path) = markdown {
        std::fs::write(md_path, report.to_markdown())?;
        if verbose {
            eprintln!("{} {}", "Markdown report saved to:".green(), md_path.display());
        }
    }

    print_report_summary(&report);

    if report.change_type >= fail_on.threshold() && report.change_type != Severity::None {
        std::process::exit(1);
    }

    Ok(())
}

/// Show command - list the visible types of a snapshot
fn show_command(snapshot_path: &Path) -> Result<()> {
    let types = load_snapshot(snapshot_path)?;

    println!("{} root types", types.len());
    for ty in &types {
        print_type(ty, 0);
    }

    Ok(())
}

fn print_type(ty: &TypeDefinition, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    let label = format!("{} {}", ty.kind.item_kind(), ty.full_name);
    if ty.is_visible {
        println!("{indent}{}", label.green());
    } else {
        println!("{indent}{} {}", label.dimmed(), "(not visible)".dimmed());
    }

    for child in &ty.child_types {
        print_type(child, depth + 1);
    }
}

fn load_snapshot(path: &Path) -> Result<Vec<TypeDefinition>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

/// Print report summary to stdout
fn print_report_summary(report: &Report) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "API Comparison Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("Version: {}", report.version);
    println!("Timestamp: {}", report.timestamp);
    println!();

    let impact = match report.change_type {
        Severity::Breaking => "breaking".red().bold(),
        Severity::Feature => "feature".yellow().bold(),
        Severity::None => "none".green().bold(),
    };
    println!("{} {}", "Overall impact:".bold(), impact);
    println!();

    println!("{}", "Summary:".bold());
    println!("  Total changes: {}", report.summary.total);

    if report.summary.breaking > 0 {
        println!(
            "  Breaking: {}",
            report.summary.breaking.to_string().red().bold()
        );
    } else {
        println!("  Breaking: {}", report.summary.breaking.to_string().green());
    }

    if report.summary.feature > 0 {
        println!(
            "  Feature:  {}",
            report.summary.feature.to_string().yellow()
        );
    } else {
        println!("  Feature:  {}", report.summary.feature.to_string().green());
    }
    println!();

    if report.results.is_empty() {
        println!("{}", "✓ No changes detected!".green().bold());
    } else {
        println!("{}", "Changes:".bold());
        for result in &report.results {
            let severity_str = match result.change_type {
                Severity::Breaking => "BREAKING".red().bold(),
                Severity::Feature => "FEATURE".yellow().bold(),
                Severity::None => "NONE".cyan(),
            };

            println!("  [{}] {}", severity_str, result.message);
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
