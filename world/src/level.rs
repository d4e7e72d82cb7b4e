//! Level descriptions: a maze plus the actors' starting cells.

use maze_chase_core::{CellCoord, LayoutError};

use crate::Grid;

/// Maze shipped with the game.
pub const CLASSIC_MAZE: [&str; 7] = [
    "###################",
    "#........#........#",
    "#.###.###.#.###.###",
    "#.#...............#",
    "#.#.###.#####.###.#",
    "#.....#...#...#...#",
    "###################",
];

/// Player start cell of the classic maze.
pub const CLASSIC_PLAYER_START: CellCoord = CellCoord::new(1, 1);

/// Adversary start cells of the classic maze.
pub const CLASSIC_ADVERSARY_STARTS: [CellCoord; 2] = [CellCoord::new(10, 3), CellCoord::new(15, 5)];

/// Validated maze layout together with actor start positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    player: CellCoord,
    adversaries: Vec<CellCoord>,
}

impl Level {
    /// Creates a level, verifying that every start cell is walkable.
    pub fn new(
        grid: Grid,
        player: CellCoord,
        adversaries: Vec<CellCoord>,
    ) -> Result<Self, LayoutError> {
        for cell in std::iter::once(&player).chain(adversaries.iter()) {
            if !grid.is_walkable(*cell).unwrap_or(false) {
                return Err(LayoutError::BlockedStart { cell: *cell });
            }
        }

        Ok(Self {
            grid,
            player,
            adversaries,
        })
    }

    /// Parses the maze rows and validates the start cells.
    pub fn parse<S>(
        rows: &[S],
        player: CellCoord,
        adversaries: Vec<CellCoord>,
    ) -> Result<Self, LayoutError>
    where
        S: AsRef<str>,
    {
        Self::new(Grid::parse(rows)?, player, adversaries)
    }

    /// Builds the classic single-screen level.
    pub fn classic() -> Result<Self, LayoutError> {
        Self::parse(
            &CLASSIC_MAZE,
            CLASSIC_PLAYER_START,
            CLASSIC_ADVERSARY_STARTS.to_vec(),
        )
    }

    /// Maze layout of the level.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell the player starts on.
    #[must_use]
    pub const fn player_start(&self) -> CellCoord {
        self.player
    }

    /// Cells the adversaries start on, in identifier order.
    #[must_use]
    pub fn adversary_starts(&self) -> &[CellCoord] {
        &self.adversaries
    }

    pub(crate) fn into_parts(self) -> (Grid, CellCoord, Vec<CellCoord>) {
        (self.grid, self.player, self.adversaries)
    }
}
