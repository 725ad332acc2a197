use rand::Rng;
use serde::{Deserialize, Serialize};

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Name of the palette entry this color matches, if any.
    pub fn name(&self) -> Option<&'static str> {
        PALETTE
            .iter()
            .position(|c| c == self)
            .map(|i| PALETTE_NAMES[i])
    }

    /// Opaque RGBA, the layout GPU vertex data expects.
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_rgba()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "rgb({:.2}, {:.2}, {:.2})", self.r, self.g, self.b),
        }
    }
}

pub const PALETTE_SIZE: usize = 8;

/// The fixed building palette, in lookup order.
pub const PALETTE: [Color; PALETTE_SIZE] = [
    Color::rgb(1.0, 0.0, 0.0),
    Color::rgb(0.0, 1.0, 0.0),
    Color::rgb(0.0, 0.0, 1.0),
    Color::rgb(1.0, 1.0, 0.0),
    Color::rgb(1.0, 0.0, 1.0),
    Color::rgb(0.0, 1.0, 1.0),
    Color::rgb(1.0, 0.5, 0.0),
    Color::rgb(0.6, 0.3, 0.8),
];

const PALETTE_NAMES: [&str; PALETTE_SIZE] = [
    "red", "green", "blue", "yellow", "magenta", "cyan", "orange", "purple",
];

/// Palette entry at `index mod PALETTE_SIZE`. Negative indices wrap too.
pub fn color_at(index: i64) -> Color {
    PALETTE[index.rem_euclid(PALETTE_SIZE as i64) as usize]
}

/// Uniformly pick a palette entry.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    PALETTE[rng.gen_range(0..PALETTE_SIZE)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn color_at_is_cyclic() {
        for i in -20i64..20 {
            assert_eq!(color_at(i), color_at(i + PALETTE_SIZE as i64));
        }
    }

    #[test]
    fn color_at_handles_extreme_indices() {
        assert_eq!(color_at(i64::MIN), PALETTE[0]);
        assert_eq!(color_at(i64::MAX), PALETTE[7]);
        assert_eq!(color_at(-1), PALETTE[7]);
    }

    #[test]
    fn random_color_stays_in_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let c = random_color(&mut rng);
            assert!(PALETTE.contains(&c));
        }
    }

    #[test]
    fn random_color_reaches_every_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = [false; PALETTE_SIZE];
        for _ in 0..500 {
            let c = random_color(&mut rng);
            seen[PALETTE.iter().position(|p| *p == c).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn palette_names() {
        assert_eq!(PALETTE[0].name(), Some("red"));
        assert_eq!(PALETTE[7].to_string(), "purple");
        assert_eq!(Color::rgb(0.3, 0.8, 0.3).name(), None);
        assert_eq!(Color::rgb(0.3, 0.8, 0.3).to_string(), "rgb(0.30, 0.80, 0.30)");
    }

    #[test]
    fn rgba_is_opaque() {
        let rgba: [f32; 4] = PALETTE[6].into();
        assert_eq!(rgba, [1.0, 0.5, 0.0, 1.0]);
    }
}
