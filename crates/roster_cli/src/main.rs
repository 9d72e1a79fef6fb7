//! Roster Projection CLI
//!
//! Snapshot JSON → projection JSON runner, plus a CSV → snapshot converter
//! for spreadsheet exports from the budget office.

#[cfg(feature = "cli")]
use anyhow::{anyhow, Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "roster_cli")]
#[command(about = "Run roster compensation projections from snapshots or CSV exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run a projection from a snapshot JSON file
    Project {
        /// Input snapshot JSON (a ProjectionRequest)
        #[arg(long)]
        r#in: PathBuf,

        /// Output file for the projection JSON (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the projection JSON
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Build a snapshot JSON from CSV exports
    FromCsv {
        /// Athletes CSV file
        #[arg(long)]
        athletes: PathBuf,

        /// Compensation rows CSV file
        #[arg(long)]
        compensation: Option<PathBuf>,

        /// Field override rows CSV file
        #[arg(long)]
        overrides: Option<PathBuf>,

        /// Reporting year the projection anchors to
        #[arg(long)]
        year: u16,

        /// Fiscal-year start month by full name (e.g. "July")
        #[arg(long, default_value = "July")]
        month: String,

        /// Active scenario ("" = baseline)
        #[arg(long, default_value = "")]
        scenario: String,

        /// Output snapshot JSON file
        #[arg(long)]
        out: PathBuf,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Project { r#in, out, pretty } => {
            let request = std::fs::read_to_string(&r#in)
                .with_context(|| format!("read snapshot {}", r#in.display()))?;
            let result = cap_core::project_team_json(&request).map_err(|e| anyhow!(e))?;
            let output = if pretty {
                let value: serde_json::Value = serde_json::from_str(&result)?;
                serde_json::to_string_pretty(&value)?
            } else {
                result
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, output)
                        .with_context(|| format!("write projection {}", path.display()))?;
                    eprintln!("Projection written to {}", path.display());
                }
                None => println!("{output}"),
            }
        }

        Commands::FromCsv {
            athletes,
            compensation,
            overrides,
            year,
            month,
            scenario,
            out,
            metadata,
        } => {
            let athlete_rows = roster_cli::csv_import::load_athletes_csv(&athletes)?;
            let compensation_rows = match compensation {
                Some(path) => roster_cli::csv_import::load_compensation_csv(&path)?,
                None => Vec::new(),
            };
            let override_rows = match overrides {
                Some(path) => roster_cli::csv_import::load_overrides_csv(&path)?,
                None => Vec::new(),
            };

            let snapshot = serde_json::json!({
                "schema_version": cap_core::SCHEMA_VERSION,
                "year": year,
                "month": month,
                "scenario": scenario,
                "athletes": &athlete_rows,
                "compensation": &compensation_rows,
                "overrides": &override_rows,
            });
            std::fs::write(&out, serde_json::to_string_pretty(&snapshot)?)
                .with_context(|| format!("write snapshot {}", out.display()))?;
            eprintln!(
                "Snapshot written to {} ({} athletes, {} compensation rows, {} overrides)",
                out.display(),
                athlete_rows.len(),
                compensation_rows.len(),
                override_rows.len()
            );

            if let Some(path) = metadata {
                let meta = serde_json::json!({
                    "generated_at": chrono::Utc::now().to_rfc3339(),
                    "schema_version": cap_core::SCHEMA_VERSION,
                    "athletes": athlete_rows.len(),
                    "compensation_rows": compensation_rows.len(),
                    "override_rows": override_rows.len(),
                });
                std::fs::write(&path, serde_json::to_string_pretty(&meta)?)
                    .with_context(|| format!("write metadata {}", path.display()))?;
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("roster_cli was built without the 'cli' feature");
}
