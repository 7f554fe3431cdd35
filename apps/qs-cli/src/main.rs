use clap::{Parser, Subcommand};
use qs_analytics::BatchSummary;
use qs_app::{AppError, AppResult, Session};
use qs_table::{BatchId, ProcessVariable};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "qs-cli")]
#[command(about = "SteamScope CLI - batch process log inspection tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a batch log file
    Validate {
        /// Path to the batch log CSV
        data_path: PathBuf,
    },
    /// List batch ids present in a log
    Batches {
        /// Path to the batch log CSV
        data_path: PathBuf,
    },
    /// Print the stable-phase summary for one batch
    Summary {
        /// Path to the batch log CSV
        data_path: PathBuf,
        /// Batch id to summarize
        batch_id: String,
        /// Emit the summary as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export one variable's time series as CSV
    ExportSeries {
        /// Path to the batch log CSV
        data_path: PathBuf,
        /// Batch id
        batch_id: String,
        /// Variable name (e.g. process_temp, steam_flow_rate)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { data_path } => cmd_validate(&data_path),
        Commands::Batches { data_path } => cmd_batches(&data_path),
        Commands::Summary {
            data_path,
            batch_id,
            json,
        } => cmd_summary(&data_path, &batch_id, json),
        Commands::ExportSeries {
            data_path,
            batch_id,
            variable,
            output,
        } => cmd_export_series(&data_path, &batch_id, &variable, output.as_deref()),
    }
}

fn cmd_validate(data_path: &Path) -> AppResult<()> {
    println!("Validating log: {}", data_path.display());
    let session = Session::open(data_path)?;
    println!(
        "✓ Log is valid ({} readings, {} batches)",
        session.table().len(),
        session.batch_ids().len()
    );
    Ok(())
}

fn cmd_batches(data_path: &Path) -> AppResult<()> {
    let session = Session::open(data_path)?;

    println!("Batches in log:");
    for id in session.batch_ids() {
        println!("  {}", id);
    }
    Ok(())
}

fn cmd_summary(data_path: &Path, batch_id: &str, json: bool) -> AppResult<()> {
    let session = Session::open(data_path)?;
    let summary = session.summarize(&BatchId::new(batch_id))?;

    if json {
        let text = serde_json::to_string_pretty(&summary).map_err(|e| AppError::Backend {
            message: format!("Failed to serialize summary: {}", e),
        })?;
        println!("{}", text);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!("\nBatch #{}", summary.batch_id);
    println!("  Date:       {}", summary.start_time.format("%Y-%m-%d"));
    println!(
        "  Time range: {} - {}",
        summary.start_time.format("%H:%M:%S"),
        summary.end_time.format("%H:%M:%S")
    );
    println!("  Duration:   {:.2} min", summary.duration_minutes);

    println!("\nStable-phase statistics:");
    for entry in &summary.variables {
        println!("  {}", entry.variable.label());
        match &entry.stats {
            Some(stats) => {
                println!("    Mean:   {:.2}", stats.mean);
                println!("    Median: {:.2}", stats.median);
                println!("    Max:    {:.2}", stats.max);
                println!("    Min:    {:.2}", stats.min);
                if stats.std_dev.is_nan() {
                    println!("    Std:    n/a (single sample)");
                } else {
                    println!("    Std:    {:.4}", stats.std_dev);
                }
            }
            None => println!("    n/a (no valid samples)"),
        }
    }
}

fn cmd_export_series(
    data_path: &Path,
    batch_id: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let variable = ProcessVariable::from_name(variable)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown variable: {}", variable)))?;

    let session = Session::open(data_path)?;
    let series = session.series(&BatchId::new(batch_id), variable)?;

    // Build CSV
    let mut csv = String::from("timestamp,value\n");
    for (timestamp, value) in &series {
        csv.push_str(&format!(
            "{},{}\n",
            timestamp.format("%Y-%m-%d %H:%M:%S%.f"),
            value
        ));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}
