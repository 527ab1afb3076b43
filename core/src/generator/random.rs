use alloc::vec::Vec;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Uniform draws from any [`rand`] generator.
#[derive(Clone, Debug)]
pub struct RngCoords<R> {
    rng: R,
}

impl<R> RngCoords<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngCoords<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CoordSource for RngCoords<R> {
    fn next_coords(&mut self, (width, height): Coord2) -> Coord2 {
        (
            self.rng.random_range(0..width),
            self.rng.random_range(0..height),
        )
    }
}

/// Replays a fixed list of draws, starting over once it runs out.
///
/// Meant for tests and reproducible layouts. An empty script always draws `(0, 0)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedCoords {
    draws: Vec<Coord2>,
    next: usize,
}

impl ScriptedCoords {
    pub fn new(draws: impl Into<Vec<Coord2>>) -> Self {
        Self {
            draws: draws.into(),
            next: 0,
        }
    }
}

impl CoordSource for ScriptedCoords {
    fn next_coords(&mut self, _size: Coord2) -> Coord2 {
        if self.draws.is_empty() {
            return (0, 0);
        }
        let coords = self.draws[self.next % self.draws.len()];
        self.next += 1;
        coords
    }
}
