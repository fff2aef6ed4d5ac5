use serde::{Deserialize, Deserializer, Serialize};

/// Stock material - one bar type available in limited quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockBarSpec {
    /// Usable length of one bar, in meters
    pub length: f64,
    /// Material lost per cut, in millimeters
    #[serde(default)]
    pub kerf_width: f64,
    /// Hard cap on the number of bars that may be opened
    pub max_count: u32,
}

impl StockBarSpec {
    pub fn new(length: f64, kerf_width: f64, max_count: u32) -> Self {
        Self {
            length,
            kerf_width,
            max_count,
        }
    }

    /// Kerf width converted to the unit used for lengths (meters).
    pub fn kerf_width_meters(&self) -> f64 {
        self.kerf_width / 1000.0
    }
}

/// Piece length to cut and how many of them are needed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Length of one piece, in meters
    pub length: f64,
    pub quantity: u32,
    /// Display name, not used by the optimizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Requirement {
    pub fn new(length: f64, quantity: u32) -> Self {
        Self {
            length,
            quantity,
            label: None,
        }
    }
}

/// One contiguous span of a bar, either a cut piece or the trailing offcut
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub length: f64,
    /// Offset from the start of the bar, in meters
    pub position: f64,
    #[serde(deserialize_with = "deserialize_bool_from_int")]
    pub is_waste: bool,
}

impl Segment {
    pub fn end(&self) -> f64 {
        self.position + self.length
    }
}

/// How a single stock bar is divided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingPattern {
    /// 1-based, in the order bars were opened
    pub bar_index: u32,
    /// Used length over bar length, in percent
    pub efficiency: f64,
    /// Unused length at the end of the bar, in meters
    pub waste: f64,
    /// Left-to-right physical layout; a waste segment, if any, is last
    pub segments: Vec<Segment>,
}

impl CuttingPattern {
    /// Segments that are actual pieces (excludes the trailing offcut).
    pub fn pieces(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.is_waste)
    }

    pub fn waste_segment(&self) -> Option<&Segment> {
        self.segments.last().filter(|s| s.is_waste)
    }
}

/// Aggregate statistics over all produced patterns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Overall efficiency in percent; 0 when no bar was used
    pub efficiency: f64,
    pub stock_used: u32,
    pub stock_total: u32,
    pub waste_total: f64,
}

impl Metrics {
    /// False when nothing was packed, in which case `efficiency` is 0 by convention.
    pub fn has_patterns(&self) -> bool {
        self.stock_used > 0
    }
}

/// What to do once a piece no longer fits and every allowed bar is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingMode {
    /// Stop packing: the failing piece and all pieces after it stay unplaced
    #[default]
    StopOnFirstFailure,
    /// Skip the failing piece and keep trying the remaining (smaller) pieces
    ContinueOnFailure,
}

/// Output of a packing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub patterns: Vec<CuttingPattern>,
    /// Lengths of the pieces that could not be placed, in sort order
    pub unplaced: Vec<f64>,
}

impl OptimizationResult {
    pub fn placed_count(&self) -> usize {
        self.patterns.iter().map(|p| p.pieces().count()).sum()
    }

    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// True when every requested piece was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Input: stock, pieces to cut and packing policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingJob {
    pub stock: StockBarSpec,
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub mode: PackingMode,
}

impl CuttingJob {
    /// Total number of pieces requested over all requirements.
    pub fn requested_pieces(&self) -> usize {
        self.requirements.iter().map(|r| r.quantity as usize).sum()
    }
}

/// Output: the complete plan for a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingPlan {
    pub stock: StockBarSpec,
    pub patterns: Vec<CuttingPattern>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unplaced: Vec<f64>,
    pub requested_pieces: usize,
    pub metrics: Metrics,
}

impl CuttingPlan {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Error type for optimization
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;

/// Accepts a boolean or the integers 0/1, as some stores encode flags.
fn deserialize_bool_from_int<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
    }

    match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(flag) => Ok(flag),
        BoolOrInt::Int(0) => Ok(false),
        BoolOrInt::Int(1) => Ok(true),
        BoolOrInt::Int(other) => Err(serde::de::Error::custom(format!(
            "expected a boolean or 0/1, got {other}"
        ))),
    }
}
