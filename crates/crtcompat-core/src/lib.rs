//! # crtcompat-core
//!
//! Safe Rust implementations of two families of C library primitives:
//!
//! - the **classic** family (`strcpy`, `memcpy`, `sprintf`, `fgets`, `rand`, ...),
//!   which knows nothing about destination capacity, and
//! - the **bounds-checked** family (`strcpy_s`, `memcpy_s`, `sprintf_s`,
//!   `gets_s`, `rand_s`, ...), which takes an explicit capacity and refuses
//!   rather than writing past it.
//!
//! Strings are modeled as `&[u8]` slices where the first NUL byte marks the
//! logical end. Classic primitives can never overrun a Rust slice; where C
//! would write past the end they stop at the physical end of the slice.
//! No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod errno;
pub mod stdio;
pub mod stdlib;
pub mod string;

pub use errno::{CheckedError, Errno, Status};
