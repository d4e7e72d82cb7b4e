//! Random-walk adversaries and the direction sources that drive them.

use std::fmt;

use maze_chase_core::{AdversaryId, CellCoord, Direction, GridError};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{movement::Actor, Grid};

/// Supplies the direction an adversary attempts on each tick.
pub trait DirectionSource {
    /// Draws the next direction.
    fn next_direction(&mut self) -> Direction;
}

/// Uniform random direction source backed by any [`RngCore`].
#[derive(Clone, Debug)]
pub struct RandomWalk<R> {
    rng: R,
}

impl<R> RandomWalk<R>
where
    R: RngCore,
{
    /// Wraps the provided random number generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomWalk<ChaCha8Rng> {
    /// Creates a reproducible source for one adversary.
    ///
    /// Every adversary draws from its own ChaCha stream selected by its
    /// identifier, so a single session seed yields independent sequences.
    #[must_use]
    pub fn seeded(seed: u64, id: AdversaryId) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(u64::from(id.get()));
        Self::new(rng)
    }
}

impl<R> DirectionSource for RandomWalk<R>
where
    R: RngCore,
{
    fn next_direction(&mut self) -> Direction {
        Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())]
    }
}

/// Direction source replaying a fixed script, repeating it when exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedDirections {
    script: Vec<Direction>,
    cursor: usize,
}

impl ScriptedDirections {
    /// Creates a scripted source. Returns `None` for an empty script.
    #[must_use]
    pub fn new(script: Vec<Direction>) -> Option<Self> {
        if script.is_empty() {
            return None;
        }
        Some(Self { script, cursor: 0 })
    }
}

impl DirectionSource for ScriptedDirections {
    fn next_direction(&mut self) -> Direction {
        let direction = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        direction
    }
}

/// Adversary wandering the maze one random step per tick.
pub struct Adversary {
    id: AdversaryId,
    actor: Actor,
    source: Box<dyn DirectionSource>,
}

impl Adversary {
    /// Creates an adversary standing on `start` and drawing directions from
    /// `source`.
    #[must_use]
    pub fn new(id: AdversaryId, start: CellCoord, source: Box<dyn DirectionSource>) -> Self {
        Self {
            id,
            actor: Actor::new(start),
            source,
        }
    }

    /// Identifier assigned to the adversary.
    #[must_use]
    pub const fn id(&self) -> AdversaryId {
        self.id
    }

    /// Cell currently occupied by the adversary.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.actor.cell()
    }

    /// Draws one direction and attempts it.
    ///
    /// A draw that points into a wall leaves the adversary where it is for
    /// this tick; there is no second draw.
    pub fn step(&mut self, grid: &Grid) -> Result<CellCoord, GridError> {
        let direction = self.source.next_direction();
        self.actor.step(grid, Some(direction))
    }
}

impl fmt::Debug for Adversary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adversary")
            .field("id", &self.id)
            .field("cell", &self.actor.cell())
            .finish_non_exhaustive()
    }
}
