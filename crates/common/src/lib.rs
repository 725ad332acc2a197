//! Shared value types for the farmstead scene.
//!
//! # Invariants
//! - Colors are plain values; nothing hands out references into the palette.
//! - Palette indexing is cyclic, every integer index is valid.

mod color;

pub use color::{Color, PALETTE, PALETTE_SIZE, color_at, random_color};

pub fn crate_info() -> &'static str {
    "farmstead-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
