//! Standard I/O: formatted output, file opening, line input, formatted input.

pub mod file;
pub mod format;
pub mod line;
pub mod scan;

pub use file::{OpenFlags, fopen, fopen_s, parse_mode};
pub use format::{fprintf, fprintf_s, printf, printf_s, sprintf, sprintf_s};
pub use line::{fgets, gets_s};
pub use scan::{EOF, ScanArg, fscanf, fscanf_s, scanf, scanf_s, sscanf, sscanf_s};
