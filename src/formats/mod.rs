//! Record encodings that follow the container tag byte

pub mod format_a;
pub mod format_b;
