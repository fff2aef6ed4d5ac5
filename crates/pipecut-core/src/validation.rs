use crate::types::*;

/// Shortest piece the optimizer is expected to handle, in meters.
pub const MIN_PIECE_LENGTH: f64 = 0.01;

impl StockBarSpec {
    /// Checks the stock parameters the optimizer relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(OptimizerError::InvalidInput(format!(
                "Stock length must be positive, got {}",
                self.length
            )));
        }

        if !self.kerf_width.is_finite() || self.kerf_width < 0.0 {
            return Err(OptimizerError::InvalidInput(format!(
                "Kerf width must not be negative, got {}",
                self.kerf_width
            )));
        }

        if self.max_count == 0 {
            return Err(OptimizerError::InvalidInput(
                "At least one stock bar must be available".to_string(),
            ));
        }

        Ok(())
    }
}

impl Requirement {
    pub fn validate(&self) -> Result<()> {
        let name = self.label.as_deref().unwrap_or("requirement");

        if !self.length.is_finite() || self.length < MIN_PIECE_LENGTH {
            return Err(OptimizerError::InvalidInput(format!(
                "Piece '{}' must be at least {} m long, got {}",
                name, MIN_PIECE_LENGTH, self.length
            )));
        }

        if self.quantity == 0 {
            return Err(OptimizerError::InvalidInput(format!(
                "Piece '{}' must have a quantity of at least 1",
                name
            )));
        }

        Ok(())
    }
}

/// Rejects jobs the optimizer is not meant to handle.
///
/// [`crate::optimize`] does not call this; it is the check a caller runs at
/// its boundary before handing input to the core.
pub fn validate_job(job: &CuttingJob) -> Result<()> {
    job.stock.validate()?;

    if job.requirements.is_empty() {
        return Err(OptimizerError::InvalidInput(
            "At least one requirement must be provided".to_string(),
        ));
    }

    for requirement in &job.requirements {
        requirement.validate()?;
    }

    Ok(())
}
