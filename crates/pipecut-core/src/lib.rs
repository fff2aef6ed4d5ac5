//! Cutting plans for stock pipes and bars.
//!
//! Pieces are packed onto fixed-length stock bars with a first-fit decreasing
//! heuristic that accounts for saw kerf, and the resulting patterns can be
//! summarized with [`calculate_metrics`].

mod optimizer;
mod types;
mod validation;

pub use optimizer::{calculate_metrics, optimize, optimize_with_mode, Optimizer};
pub use types::*;
pub use validation::{validate_job, MIN_PIECE_LENGTH};
