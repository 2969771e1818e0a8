//! String and memory operations.
//!
//! `classic` holds the capacity-unaware `<string.h>` functions, `checked`
//! the bounds-checked `_s` variants. Both operate on byte slices.

pub mod checked;
pub mod classic;
pub mod strtok;

pub use checked::{
    memcpy_s, memmove_s, strcat_s, strcpy_s, strlwr_s, strncat_s, strncpy_s, strupr_s,
};
pub use classic::{
    memcpy, memmove, strcat, strcpy, strlen, strlwr, strncat, strncpy, strnlen, strupr,
};
pub use strtok::{Strtok, strtok_r, strtok_s};
