use rand::{Error, RngCore, SeedableRng};
use sha2::{Digest, Sha256};

const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;

/// Linear-congruential generator used for mock chart data.
///
/// Two instances built from the same seed always yield the same sequence, so a
/// chart seeded from a match id renders identically on every frame. Not meant
/// to be shared across threads; build one per derivation and drop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    /// Uniform sample in `[0, 1)` built from the top 53 bits of one draw.
    pub fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform sample in `[min, max)`. Returns `min` when the range is empty.
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        let t = self.unit();
        if min >= max {
            return min;
        }
        // Interpolating instead of `min + (max - min) * t` keeps huge spans finite.
        let value = min * (1.0 - t) + max * t;
        if value < max { value } else { min }
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for SeededRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    // The default impl scrambles the seed first, which would make this diverge
    // from `SeededRng::new` for the same integer.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// Stable seed for an entity id: the first 8 bytes of its SHA-256, little-endian.
pub fn seed_for_id(id: &str) -> u64 {
    let digest = Sha256::digest(id.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{SeededRng, seed_for_id};

    fn first_n(seed: u64, n: usize) -> Vec<u64> {
        let mut rng = SeededRng::new(seed);
        (0..n).map(|_| rng.next()).collect()
    }

    #[test]
    fn same_seed_same_sequence() {
        for seed in [0, 1, 42, u64::MAX, 0x9E37_79B9_7F4A_7C15] {
            assert_eq!(first_n(seed, 64), first_n(seed, 64));
        }
    }

    #[test]
    fn seed_42_is_stable_and_differs_from_43() {
        let a = first_n(42, 10);
        assert_eq!(a, first_n(42, 10));
        assert_ne!(a, first_n(43, 10));
    }

    #[test]
    fn first_value_follows_recurrence() {
        let mut rng = SeededRng::new(0);
        assert_eq!(rng.next(), 1442695040888963407);
        let mut rng = SeededRng::new(1);
        assert_eq!(rng.next(), 6364136223846793005u64.wrapping_add(1442695040888963407));
    }

    #[test]
    fn uniform_stays_in_half_open_range() {
        for seed in 0..50u64 {
            let mut rng = SeededRng::new(seed);
            for (lo, hi) in [(-40.0, 80.0), (0.0, 1.0), (1e-9, 2e-9), (-1e300, 1e300)] {
                for _ in 0..200 {
                    let v = rng.uniform(lo, hi);
                    assert!(v >= lo && v < hi, "{v} not in [{lo}, {hi})");
                }
            }
        }
    }

    #[test]
    fn uniform_with_empty_range_returns_min() {
        let mut rng = SeededRng::new(7);
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
        assert_eq!(rng.uniform(5.0, 1.0), 5.0);
    }

    #[test]
    fn works_through_rand_traits() {
        use rand::{RngCore, SeedableRng};

        let mut a = SeededRng::seed_from_u64(99);
        let mut b = SeededRng::new(99);
        assert_eq!(RngCore::next_u64(&mut a), b.next());

        let roll = a.gen_range(1..=6);
        assert!((1..=6).contains(&roll));

        let mut buf = [0u8; 11];
        a.fill(&mut buf[..]);
    }

    #[test]
    fn id_seed_is_stable() {
        assert_eq!(seed_for_id("MEX-BRA-15 Oct"), seed_for_id("MEX-BRA-15 Oct"));
        assert_ne!(seed_for_id("MEX-BRA-15 Oct"), seed_for_id("BRA-MEX-15 Oct"));
    }
}
