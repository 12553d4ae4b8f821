//! classpath-tools: Duplicate-class and dependency conflict detection for JVM build output
//!
//! Scans assembled build artifacts for duplicate components and analyzes
//! dependency trees for version conflicts.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use classpath_tools::{
    cli,
    config::{BehaviorConfig, CheckConfig, OutputConfig, ResolveConfig, ScanConfig},
    report::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nRecognized Unit Formats:",
        "\n  class, jar, war, ear, sar, zip, gzip",
        "\n\nOutput Formats:",
        "\n  summary, json",
        "\n\nFeatures:",
        "\n  Duplicate-class detection, shallow archive fingerprinting, version conflict analysis"
    )
}

#[derive(Parser)]
#[command(name = "classpath-tools")]
#[command(version, long_version = build_long_version())]
#[command(about = "Duplicate-class and dependency conflict detection for JVM build output", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No findings (or --no-fail)
    1  Duplicate components or version conflicts found
    2  Analysis failed to run

EXAMPLES:
    # Scan an assembled library directory
    classpath-tools scan build/lib

    # CI/CD pipeline check over scan and tree together
    classpath-tools check --lib-dir build/lib --tree deps.json

    # Export JSON for processing
    classpath-tools resolve deps.json -o json > conflicts.json

    # Shallow scan keyed by archive name and manifest
    classpath-tools scan build/lib --shallow")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `scan` subcommand
#[derive(Parser)]
struct ScanArgs {
    /// Build output file or directory to scan
    root: PathBuf,

    /// Register archives whole instead of opening their class entries
    #[arg(long)]
    shallow: bool,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit 0 even when findings are present
    #[arg(long)]
    no_fail: bool,
}

/// Arguments for the `resolve` subcommand
#[derive(Parser)]
struct ResolveArgs {
    /// Dependency tree JSON document
    tree: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit 0 even when findings are present
    #[arg(long)]
    no_fail: bool,
}

/// Arguments for the `check` subcommand
#[derive(Parser)]
struct CheckArgs {
    /// Assembled library directory to scan for duplicate components
    #[arg(long)]
    lib_dir: Option<PathBuf>,

    /// Dependency tree JSON document to analyze for version conflicts
    #[arg(long)]
    tree: Option<PathBuf>,

    /// Register archives whole instead of opening their class entries
    #[arg(long)]
    shallow: bool,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit 0 even when findings are present
    #[arg(long)]
    no_fail: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan build output for duplicate components
    Scan(ScanArgs),

    /// Analyze a dependency tree for version conflicts
    Resolve(ResolveArgs),

    /// Run the duplicate scan and tree analysis together
    Check(CheckArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match run(cli) {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(cli::exit_codes::FATAL);
        }
    }
}

/// Dispatch to command handlers
fn run(cli: Cli) -> Result<i32> {
    let no_color = cli.no_color;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Scan(args) => {
            let config = ScanConfig {
                root: args.root,
                scan_archive_entries: !args.shallow,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    no_color,
                },
                behavior: BehaviorConfig {
                    quiet,
                    fail_on_findings: !args.no_fail,
                },
            };
            cli::run_scan(config)
        }

        Commands::Resolve(args) => {
            let config = ResolveConfig {
                tree: args.tree,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    no_color,
                },
                behavior: BehaviorConfig {
                    quiet,
                    fail_on_findings: !args.no_fail,
                },
            };
            cli::run_resolve(config)
        }

        Commands::Check(args) => {
            let config = CheckConfig {
                lib_dir: args.lib_dir,
                tree: args.tree,
                scan_archive_entries: !args.shallow,
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    no_color,
                },
                behavior: BehaviorConfig {
                    quiet,
                    fail_on_findings: !args.no_fail,
                },
            };
            cli::run_check(config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "classpath-tools", &mut io::stdout());
            Ok(cli::exit_codes::PASS)
        }
    }
}
