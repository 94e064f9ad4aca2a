//! RNG module - uniform piece generation
//!
//! Every draw picks a kind uniformly from the seven, independently of earlier
//! draws: repeats are allowed and there is no bag. The color is drawn the same
//! way, independently of the kind.
//!
//! Generation is seeded so games are reproducible for tests and replays.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::{Color, PieceKind};

/// Uniform kind/color generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SmallRng,
    seed: u64,
    drawn: u64,
}

impl PieceGenerator {
    /// Create a new generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            seed,
            drawn: 0,
        }
    }

    /// Draw the next kind and color
    pub fn draw(&mut self) -> (PieceKind, Color) {
        self.drawn += 1;
        let kind = PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())];
        let color = Color::ALL[self.rng.gen_range(0..Color::ALL.len())];
        (kind, color)
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of pieces drawn so far
    pub fn drawn(&self) -> u64 {
        self.drawn
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
