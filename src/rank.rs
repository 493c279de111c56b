//! Geometric rank generation for zip tree nodes.

use rand::{self, Rng, SeedableRng, XorShiftRng};

/// The rank of a node. Higher ranks sit closer to the root.
pub type Rank = u32;

// Fixed upper words of the xorshift state so that no `u64` seed yields the all-zero state.
const SEED_PAD: [u32; 2] = [0x193a_6754, 0xa8a7_d469];

fn expand_seed(seed: u64) -> [u32; 4] {
    [seed as u32, (seed >> 32) as u32, SEED_PAD[0], SEED_PAD[1]]
}

/// A generator of node ranks drawn from a geometric distribution with success probability `1/2`.
///
/// A rank is the number of heads flipped by a fair coin before the first tail, so rank `r` occurs
/// with probability `2^-(r + 1)`. This mirrors how a skip list picks the level of a new element.
///
/// # Examples
/// ```
/// use zip_trees::rank::RankSampler;
///
/// let mut a = RankSampler::from_seed(7);
/// let mut b = RankSampler::from_seed(7);
/// for _ in 0..100 {
///     assert_eq!(a.sample(), b.sample());
/// }
/// ```
pub struct RankSampler {
    rng: XorShiftRng,
}

impl RankSampler {
    /// Constructs a new `RankSampler` seeded from the thread-local entropy source.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::rank::RankSampler;
    ///
    /// let mut sampler = RankSampler::new();
    /// let _ = sampler.sample();
    /// ```
    pub fn new() -> Self {
        RankSampler {
            rng: rand::weak_rng(),
        }
    }

    /// Constructs a new `RankSampler` that replays the same ranks for the same `seed`.
    pub fn from_seed(seed: u64) -> Self {
        RankSampler {
            rng: XorShiftRng::from_seed(expand_seed(seed)),
        }
    }

    /// Restarts the rank sequence from `seed`.
    ///
    /// # Examples
    /// ```
    /// use zip_trees::rank::RankSampler;
    ///
    /// let mut sampler = RankSampler::from_seed(3);
    /// let first = (0..10).map(|_| sampler.sample()).collect::<Vec<u32>>();
    /// sampler.reseed(3);
    /// let second = (0..10).map(|_| sampler.sample()).collect::<Vec<u32>>();
    /// assert_eq!(first, second);
    /// ```
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(expand_seed(seed));
    }

    /// Samples a rank.
    ///
    /// Each uniformly random bit is one coin flip, so the number of leading zeros of a random word
    /// is a geometric sample. An all-zero word means 32 heads in a row and another word is drawn.
    pub fn sample(&mut self) -> Rank {
        let mut rank: Rank = 0;
        loop {
            let word = self.rng.next_u32();
            rank = rank.saturating_add(word.leading_zeros());
            if word != 0 {
                return rank;
            }
        }
    }
}

impl Default for RankSampler {
    fn default() -> Self {
        Self::new()
    }
}
