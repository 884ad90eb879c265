use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Draws element heights with the classic coin-flip distribution.
///
/// P(height >= k) = 2^-(k-1), capped at the ceiling passed to [`draw`].
/// Instead of flipping one coin per level, one uniform word is masked to
/// `ceiling` bits and the position of its lowest set bit is the height.
/// An all-zero draw has no lowest set bit and is retried.
///
/// [`draw`]: HeightGenerator::draw
#[derive(Debug, Clone)]
pub struct HeightGenerator {
    rng: StdRng,
}

impl HeightGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        HeightGenerator { rng }
    }

    /// Draw a height in `[1, ceiling]`.
    pub fn draw(&mut self, ceiling: usize) -> usize {
        let ceiling = ceiling.clamp(1, 64);
        let mask = if ceiling == 64 {
            u64::MAX
        } else {
            (1u64 << ceiling) - 1
        };

        loop {
            let bits = self.rng.next_u64() & mask;
            if bits != 0 {
                return bits.trailing_zeros() as usize + 1;
            }
        }
    }
}

/// Count-driven ceiling: `⌊log2 n⌋`, at least 1, at most `limit`.
pub fn ceiling_for(count: usize, limit: usize) -> usize {
    let log2 = if count == 0 { 0 } else { count.ilog2() as usize };
    log2.max(1).min(limit)
}
