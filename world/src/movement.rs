//! Shared movement primitive used by the player and the adversaries.

use maze_chase_core::{CellCoord, Direction, GridError};

use crate::Grid;

/// Attempts a single-cell step from `current` in `direction`.
///
/// Returns the neighbouring cell when it is walkable and `current` otherwise;
/// a move into a wall is silently rejected. `None` keeps the actor in place.
/// Leaving the grid is an integrity fault reported as
/// [`GridError::OutOfBounds`].
pub fn attempt_move(
    grid: &Grid,
    current: CellCoord,
    direction: Option<Direction>,
) -> Result<CellCoord, GridError> {
    let Some(direction) = direction else {
        return Ok(current);
    };

    let candidate = current.neighbor(direction)?;
    if grid.is_walkable(candidate)? {
        Ok(candidate)
    } else {
        Ok(current)
    }
}

/// Position of a single actor on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Actor {
    cell: CellCoord,
}

impl Actor {
    pub(crate) const fn new(cell: CellCoord) -> Self {
        Self { cell }
    }

    pub(crate) const fn cell(&self) -> CellCoord {
        self.cell
    }

    pub(crate) fn step(
        &mut self,
        grid: &Grid,
        direction: Option<Direction>,
    ) -> Result<CellCoord, GridError> {
        self.cell = attempt_move(grid, self.cell, direction)?;
        Ok(self.cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pocket() -> Grid {
        Grid::parse(&["#####", "#.  #", "## ##", "#####"]).expect("valid pocket")
    }

    #[test]
    fn open_neighbour_is_entered() {
        let grid = pocket();
        let moved = attempt_move(&grid, CellCoord::new(1, 1), Some(Direction::Right));
        assert_eq!(moved, Ok(CellCoord::new(2, 1)));
    }

    #[test]
    fn wall_neighbour_is_rejected() {
        let grid = pocket();
        let moved = attempt_move(&grid, CellCoord::new(1, 1), Some(Direction::Down));
        assert_eq!(moved, Ok(CellCoord::new(1, 1)));
    }

    #[test]
    fn no_direction_keeps_position() {
        let grid = pocket();
        assert_eq!(
            attempt_move(&grid, CellCoord::new(2, 2), None),
            Ok(CellCoord::new(2, 2))
        );
    }

    #[test]
    fn actor_tracks_accepted_steps() {
        let grid = pocket();
        let mut actor = Actor::new(CellCoord::new(2, 1));

        assert_eq!(
            actor.step(&grid, Some(Direction::Down)),
            Ok(CellCoord::new(2, 2))
        );
        assert_eq!(
            actor.step(&grid, Some(Direction::Down)),
            Ok(CellCoord::new(2, 2))
        );
        assert_eq!(actor.cell(), CellCoord::new(2, 2));
    }

    #[test]
    fn stepping_off_the_origin_is_an_integrity_fault() {
        let grid = pocket();
        assert_eq!(
            attempt_move(&grid, CellCoord::new(0, 0), Some(Direction::Up)),
            Err(GridError::OutOfBounds { column: 0, row: -1 })
        );
    }
}
