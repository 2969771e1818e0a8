//! Random numbers: rand, srand and rand_s.
//!
//! The classic generator is the CRT linear congruential generator
//! (`state * 214013 + 2531011`, 15 output bits). Its state lives in a [`Rand`]
//! value; the free functions [`srand`]/[`rand`] share one process-wide
//! instance behind a mutex. [`rand_s`] draws from the operating system and
//! shares no state with either.

use parking_lot::Mutex;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::errno::CheckedError;

/// Largest value [`rand`] returns.
pub const RAND_MAX: i32 = 0x7fff;

const MULTIPLIER: u32 = 214_013;
const INCREMENT: u32 = 2_531_011;

/// Seedable classic generator. Same seed, same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rand {
    state: u32,
}

impl Rand {
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Restarts the sequence from `seed`.
    pub fn seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Next value in `0..=RAND_MAX`.
    pub fn next_value(&mut self) -> i32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        ((self.state >> 16) & 0x7fff) as i32
    }
}

impl Default for Rand {
    /// An unseeded C program behaves as if `srand(1)` had been called.
    fn default() -> Self {
        Self::new(1)
    }
}

static SHARED: Mutex<Rand> = parking_lot::const_mutex(Rand::new(1));

/// Seeds the shared generator.
pub fn srand(seed: u32) {
    SHARED.lock().seed(seed);
}

/// Next value of the shared generator.
pub fn rand() -> i32 {
    SHARED.lock().next_value()
}

/// Fills `value` from the operating system's random source.
pub fn rand_s(value: &mut u32) -> Result<(), CheckedError> {
    let mut bytes = [0u8; 4];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| CheckedError::Io(std::io::Error::other(e.to_string())))?;
    *value = u32::from_ne_bytes(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crt_reference_sequence() {
        // First values of the CRT generator after srand(1).
        let mut g = Rand::default();
        let seq: Vec<i32> = (0..5).map(|_| g.next_value()).collect();
        assert_eq!(seq, vec![41, 18467, 6334, 26500, 19169]);
    }

    #[test]
    fn reseeding_restarts_sequence() {
        let mut g = Rand::new(42);
        let first: Vec<i32> = (0..8).map(|_| g.next_value()).collect();
        g.seed(42);
        let again: Vec<i32> = (0..8).map(|_| g.next_value()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn values_stay_in_range() {
        let mut g = Rand::new(7);
        assert!((0..10_000).map(|_| g.next_value()).all(|v| (0..=RAND_MAX).contains(&v)));
    }

    #[test]
    fn shared_generator_serves_values() {
        srand(3);
        let v = rand();
        assert!((0..=RAND_MAX).contains(&v));
    }

    #[test]
    fn rand_s_fills_value() {
        let mut a = 0;
        let mut b = 0;
        rand_s(&mut a).unwrap();
        rand_s(&mut b).unwrap();
        assert_ne!((a, b), (0, 0));
    }
}
