//! Standard library utilities: environment lookup and random numbers.

pub mod env;
pub mod random;

pub use env::{getenv, getenv_s};
pub use random::{RAND_MAX, Rand, rand, rand_s, srand};
