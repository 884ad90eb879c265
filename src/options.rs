use crate::error::{Error, Result};

/// Largest ceiling a single `u64` draw can serve.
pub const MAX_HEIGHT_LIMIT: usize = 64;

/// Tuning knobs for a [`SkipListSet`](crate::SkipListSet).
///
/// The ceiling on element heights normally follows the element count
/// (`⌊log2 n⌋`, at least 1). `max_height_limit` caps it from above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Absolute cap on drawn element heights. Must be in `1..=64`.
    pub max_height_limit: usize,
    /// Seed for the height generator. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_height_limit: 32,
            seed: None,
        }
    }
}

impl Options {
    pub fn with_max_height_limit(mut self, limit: usize) -> Self {
        self.max_height_limit = limit;
        self
    }

    /// Fix the height generator seed so level placement is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every field is within range.
    pub fn validate(&self) -> Result<()> {
        if self.max_height_limit == 0 || self.max_height_limit > MAX_HEIGHT_LIMIT {
            return Err(Error::InvalidArgument(format!(
                "max_height_limit must be in 1..={MAX_HEIGHT_LIMIT}, got {}",
                self.max_height_limit
            )));
        }
        Ok(())
    }
}
