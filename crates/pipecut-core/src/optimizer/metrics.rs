use crate::types::{CuttingPattern, Metrics, StockBarSpec};

/// Computes overall efficiency, waste and stock usage for a set of patterns.
///
/// With no patterns the efficiency is reported as 0 rather than NaN; use
/// [`Metrics::has_patterns`] to tell that case apart from a genuinely
/// wasteful plan.
pub fn calculate_metrics(stock: &StockBarSpec, patterns: &[CuttingPattern]) -> Metrics {
    let stock_used = patterns.len() as u32;
    let waste_total: f64 = patterns.iter().map(|p| p.waste).sum();
    let used_length: f64 = patterns.iter().map(|p| stock.length - p.waste).sum();
    let total_length = stock_used as f64 * stock.length;

    let efficiency = if stock_used > 0 {
        (used_length / total_length) * 100.0
    } else {
        0.0
    };

    Metrics {
        efficiency,
        stock_used,
        stock_total: stock.max_count,
        waste_total,
    }
}
