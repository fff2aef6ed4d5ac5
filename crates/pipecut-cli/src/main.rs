use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use pipecut_core::{CuttingJob, CuttingPlan, Optimizer, PackingMode};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "pipecut")]
#[command(about = "Pipe cutting planner - pack required lengths onto stock bars", long_about = None)]
struct Cli {
    /// Log optimizer decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a cutting plan
    Optimize {
        /// Job file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the plan (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep packing smaller pieces after the bar limit is hit
        #[arg(long)]
        continue_on_failure: bool,
    },

    /// Draw a saved plan as SVG
    Render {
        /// Plan file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Optimize {
            input,
            output,
            continue_on_failure,
        } => {
            optimize_command(input, output, continue_on_failure)?;
        }
        Commands::Render { input, output } => {
            render_command(input, output)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_job(input: &Path) -> Result<CuttingJob> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let job: CuttingJob = match input.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };

    Ok(job)
}

fn optimize_command(
    input: PathBuf,
    output: Option<PathBuf>,
    continue_on_failure: bool,
) -> Result<()> {
    eprintln!("{}", "🔍 Loading job...".bright_blue());

    let mut job = load_job(&input)?;
    if continue_on_failure {
        job.mode = PackingMode::ContinueOnFailure;
    }

    eprintln!(
        "  {} pieces to cut in {} lengths",
        job.requested_pieces().to_string().bright_white().bold(),
        job.requirements.len().to_string().bright_white().bold()
    );
    eprintln!(
        "  {} bars of {} m available, kerf {} mm",
        job.stock.max_count.to_string().bright_white().bold(),
        job.stock.length,
        job.stock.kerf_width
    );
    eprintln!();

    let optimizer = Optimizer::new(job)?;
    info!(mode = ?optimizer.job().mode, "Running optimization");
    let plan = optimizer.optimize();

    print_summary(&plan);

    let json = serde_json::to_string_pretty(&plan)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)
            .with_context(|| format!("failed to write {}", output_path.display()))?;
        eprintln!(
            "💾 Saved plan to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn print_summary(plan: &CuttingPlan) {
    let metrics = &plan.metrics;

    if plan.is_complete() {
        eprintln!("{}", "✅ Optimization complete!".bright_green().bold());
    } else {
        eprintln!(
            "{}",
            format!(
                "⚠️  {} of {} pieces could not be placed",
                plan.unplaced.len(),
                plan.requested_pieces
            )
            .bright_red()
            .bold()
        );
    }
    eprintln!();

    eprintln!("{}", "📊 Results:".bright_yellow().bold());
    eprintln!(
        "  Bars used: {} of {}",
        metrics.stock_used.to_string().bright_white().bold(),
        metrics.stock_total
    );
    if metrics.has_patterns() {
        eprintln!(
            "  Efficiency: {}",
            format!("{:.1}%", metrics.efficiency).bright_white()
        );
        eprintln!(
            "  Total waste: {}",
            format!("{:.3} m", metrics.waste_total).bright_white()
        );
    } else {
        eprintln!("  Nothing was cut");
    }

    for pattern in &plan.patterns {
        let pieces: Vec<String> = pattern
            .pieces()
            .map(|s| format!("{:.3}", s.length))
            .collect();
        eprintln!(
            "    • Bar {}: {} | waste {:.3} m ({:.1}%)",
            pattern.bar_index,
            pieces.join(" + ").bright_cyan(),
            pattern.waste,
            pattern.efficiency
        );
    }

    if !plan.unplaced.is_empty() {
        let unplaced: Vec<String> = plan.unplaced.iter().map(|l| format!("{:.3}", l)).collect();
        eprintln!("  Unplaced: {}", unplaced.join(", ").bright_red());
    }

    eprintln!();
}

fn render_command(input: PathBuf, output: PathBuf) -> Result<()> {
    eprintln!("{}", "🔍 Loading plan...".bright_blue());

    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let plan: CuttingPlan = serde_json::from_str(&content)?;

    eprintln!("{}", "🎨 Generating SVG...".bright_blue());
    let svg = render::render_plan_svg(&plan)?;

    std::fs::write(&output, svg)
        .with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!();
    eprintln!(
        "{} Saved SVG to {}",
        "✅".bright_green(),
        output.display().to_string().bright_white()
    );

    Ok(())
}
