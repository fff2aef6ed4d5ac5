use crate::types::*;
use crate::validation::validate_job;
use std::cmp::Ordering;
use tracing::{debug, trace};

mod bar;
mod metrics;

use bar::OpenBar;
pub use metrics::calculate_metrics;

/// Runs a validated [`CuttingJob`] end to end.
pub struct Optimizer {
    job: CuttingJob,
}

impl Optimizer {
    /// Validates the job and builds a new optimizer instance.
    pub fn new(job: CuttingJob) -> Result<Self> {
        validate_job(&job)?;
        Ok(Self { job })
    }

    pub fn job(&self) -> &CuttingJob {
        &self.job
    }

    /// Packs the job's pieces and derives the metrics for the result.
    pub fn optimize(&self) -> CuttingPlan {
        let stock = self.job.stock;
        let result = optimize_with_mode(&stock, &self.job.requirements, self.job.mode);
        let metrics = calculate_metrics(&stock, &result.patterns);

        CuttingPlan {
            stock,
            patterns: result.patterns,
            unplaced: result.unplaced,
            requested_pieces: self.job.requested_pieces(),
            metrics,
        }
    }
}

/// Packs pieces onto stock bars with first-fit decreasing, stopping at the
/// first piece that no longer fits once every allowed bar is open.
///
/// Inputs are not validated; see [`crate::validate_job`].
pub fn optimize(stock: &StockBarSpec, requirements: &[Requirement]) -> OptimizationResult {
    optimize_with_mode(stock, requirements, PackingMode::default())
}

/// First-fit decreasing with kerf accounting and an explicit policy for
/// pieces that hit the bar limit.
///
/// Pieces longer than a whole bar are reported unplaced without opening a
/// bar; they do not count as a capacity failure.
pub fn optimize_with_mode(
    stock: &StockBarSpec,
    requirements: &[Requirement],
    mode: PackingMode,
) -> OptimizationResult {
    let mut pieces = expand_requirements(requirements);
    // Stable, so equal lengths keep their expansion order
    pieces.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let kerf = stock.kerf_width_meters();
    let max_bars = stock.max_count as usize;
    let mut bars: Vec<OpenBar> = Vec::new();
    let mut unplaced = Vec::new();

    for (idx, &piece) in pieces.iter().enumerate() {
        if piece > stock.length {
            debug!(piece, bar_length = stock.length, "Piece longer than stock bar");
            unplaced.push(piece);
            continue;
        }

        if let Some((bar_idx, bar)) = bars
            .iter_mut()
            .enumerate()
            .find(|(_, bar)| bar.fits(piece, kerf))
        {
            bar.place(piece, kerf);
            trace!(
                piece,
                bar = bar_idx + 1,
                remaining = bar.remaining(),
                "Placed piece"
            );
            continue;
        }

        if bars.len() < max_bars {
            bars.push(OpenBar::open(stock.length, piece));
            debug!(piece, bar = bars.len(), "Opened new bar");
            continue;
        }

        match mode {
            PackingMode::StopOnFirstFailure => {
                unplaced.extend_from_slice(&pieces[idx..]);
                debug!(
                    piece,
                    unplaced = unplaced.len(),
                    "Bar limit reached, stopping"
                );
                break;
            }
            PackingMode::ContinueOnFailure => {
                debug!(piece, "Bar limit reached, skipping piece");
                unplaced.push(piece);
            }
        }
    }

    debug!(
        pieces = pieces.len(),
        bars = bars.len(),
        placed = bars.iter().map(OpenBar::piece_count).sum::<usize>(),
        unplaced = unplaced.len(),
        "Packing finished"
    );

    let patterns = bars
        .into_iter()
        .enumerate()
        .map(|(idx, bar)| bar.into_pattern(idx as u32 + 1))
        .collect();

    OptimizationResult { patterns, unplaced }
}

/// Flattens requirements into one entry per physical piece.
fn expand_requirements(requirements: &[Requirement]) -> Vec<f64> {
    let mut expanded = Vec::new();
    for requirement in requirements {
        for _ in 0..requirement.quantity {
            expanded.push(requirement.length);
        }
    }
    expanded
}
