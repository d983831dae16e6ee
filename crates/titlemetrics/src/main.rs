use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use titlemetrics_core::export::{report_json, section_parquet_bytes};
use titlemetrics_core::pipeline;

mod config;
mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Catalog analytics over a titles dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every report section to the terminal
    Report(InputArgs),
    /// Write the report to disk as JSON or per-section Parquet
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Catalog CSV path (falls back to TITLEMETRICS_DATA, then titlemetrics.toml)
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output directory
    #[arg(long, default_value = "report")]
    out: PathBuf,

    #[arg(long, value_enum, default_value = "json")]
    format: ExportFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Json,
    Parquet,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report(args) => {
            let report = build_report(args.input)?;
            render::print_report(&report);
            Ok(())
        }
        Command::Export(args) => {
            let report = build_report(args.input.input)?;
            std::fs::create_dir_all(&args.out)
                .with_context(|| format!("failed to create {}", args.out.display()))?;

            match args.format {
                ExportFormat::Json => {
                    let out_path = args.out.join("report.json");
                    std::fs::write(&out_path, report_json(&report)?)
                        .with_context(|| format!("failed to write {}", out_path.display()))?;
                    info!(path = %out_path.display(), "report written");
                }
                ExportFormat::Parquet => {
                    for section in &report.sections {
                        let bytes = section_parquet_bytes(section)?;
                        let out_path = args.out.join(format!("{}.parquet", section.key));
                        std::fs::write(&out_path, bytes)
                            .with_context(|| format!("failed to write {}", out_path.display()))?;
                    }
                    info!(
                        sections = report.sections.len(),
                        dir = %args.out.display(),
                        "report written"
                    );
                }
            }
            Ok(())
        }
    }
}

fn build_report(input: Option<PathBuf>) -> Result<titlemetrics_core::CatalogReport> {
    let path = config::resolve_input(input)?;
    pipeline::run_file(&path)
        .with_context(|| format!("failed to build report from {}", path.display()))
}
