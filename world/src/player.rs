//! The player-controlled actor.

use maze_chase_core::{CellCoord, Direction, GridError};

use crate::{movement::Actor, Grid};

/// Player-controlled actor driven by directional input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    actor: Actor,
}

impl Player {
    /// Creates a player standing on the provided cell.
    #[must_use]
    pub const fn new(start: CellCoord) -> Self {
        Self {
            actor: Actor::new(start),
        }
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.actor.cell()
    }

    /// Applies the single direction honoured this tick and returns the
    /// resulting position.
    pub fn handle_input(
        &mut self,
        grid: &Grid,
        direction: Option<Direction>,
    ) -> Result<CellCoord, GridError> {
        self.actor.step(grid, direction)
    }
}
