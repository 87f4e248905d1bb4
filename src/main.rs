use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use version_audit::check::{CheckReport, CheckStatus, Checker};
use version_audit::config::CheckoutLayout;

#[derive(Parser)]
#[command(name = "version-audit")]
#[command(version, about = "Audits a package checkout for version metadata consistency")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the consistency checks against a checkout
    Check {
        /// Checkout root directory
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Package directory name; discovered when omitted
        #[arg(long)]
        package: Option<String>,

        /// Report output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let (root, package, format) = match cli.command {
        Some(Command::Check {
            root,
            package,
            format,
        }) => (root, package, format),
        None => (PathBuf::from("."), None, OutputFormat::Text),
    };

    let layout = CheckoutLayout::discover(&root, package.as_deref())?;
    let report = Checker::new(layout).run();

    match format {
        OutputFormat::Text => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if report.passed() {
        Ok(())
    } else {
        std::process::exit(1)
    }
}

fn print_report(report: &CheckReport) {
    println!("build state: {}", report.build_state.as_str());

    for outcome in &report.outcomes {
        let status = match outcome.status {
            CheckStatus::Passed => "pass",
            CheckStatus::Failed => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        match &outcome.message {
            Some(message) => println!("{status}  {}: {message}", outcome.kind.as_str()),
            None => println!("{status}  {}", outcome.kind.as_str()),
        }
    }
}
