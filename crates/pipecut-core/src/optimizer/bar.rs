use crate::types::{CuttingPattern, Segment};

/// A stock bar that is still receiving pieces.
#[derive(Debug, Clone)]
pub(super) struct OpenBar {
    length: f64,
    remaining: f64,
    segments: Vec<Segment>,
}

impl OpenBar {
    /// Opens a bar with `piece` as its first cut at the very start.
    pub fn open(length: f64, piece: f64) -> Self {
        Self {
            length,
            remaining: length - piece,
            segments: vec![Segment {
                length: piece,
                position: 0.0,
                is_waste: false,
            }],
        }
    }

    /// The first piece of a bar has no cut in front of it.
    fn kerf_needed(&self, kerf: f64) -> f64 {
        if self.segments.is_empty() {
            0.0
        } else {
            kerf
        }
    }

    pub fn fits(&self, piece: f64, kerf: f64) -> bool {
        self.remaining >= piece + self.kerf_needed(kerf)
    }

    /// Appends `piece` after the last cut. Callers check `fits` first.
    pub fn place(&mut self, piece: f64, kerf: f64) {
        let kerf_needed = self.kerf_needed(kerf);
        let position = self.used() + kerf_needed;

        self.segments.push(Segment {
            length: piece,
            position,
            is_waste: false,
        });
        self.remaining -= piece + kerf_needed;
    }

    pub fn used(&self) -> f64 {
        self.length - self.remaining
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn piece_count(&self) -> usize {
        self.segments.len()
    }

    /// Closes the bar, appending the leftover as a trailing waste segment.
    pub fn into_pattern(mut self, bar_index: u32) -> CuttingPattern {
        let efficiency = self.used() / self.length * 100.0;

        if self.remaining > 0.0 {
            let position = self.segments.last().map(Segment::end).unwrap_or(0.0);
            self.segments.push(Segment {
                length: self.remaining,
                position,
                is_waste: true,
            });
        }

        CuttingPattern {
            bar_index,
            efficiency,
            waste: self.remaining,
            segments: self.segments,
        }
    }
}
