#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the vocabulary that connects adapters and the
//! authoritative world. Adapters translate device input into a [`Direction`]
//! for each tick, the world advances its session by one tick, and reports a
//! [`TickResult`] carrying the new state together with the [`Event`] values
//! produced by that tick. Renderers consume tick results and never reach into
//! world internals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in input priority order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit offset of the direction expressed as `(column, row)` deltas.
    #[must_use]
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Parses the single-letter script notation (`U`, `D`, `L`, `R`).
    ///
    /// Lowercase letters are accepted as well. Any other character yields `None`.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' | 'u' => Some(Self::Up),
            'D' | 'd' => Some(Self::Down),
            'L' | 'l' => Some(Self::Left),
            'R' | 'r' => Some(Self::Right),
            _ => None,
        }
    }
}

/// Directions asserted simultaneously by an input device during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldDirections {
    /// Whether the up control is held.
    pub up: bool,
    /// Whether the down control is held.
    pub down: bool,
    /// Whether the left control is held.
    pub left: bool,
    /// Whether the right control is held.
    pub right: bool,
}

impl HeldDirections {
    /// Captures a set of held directions from the provided slice.
    #[must_use]
    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut held = Self::default();
        for direction in directions {
            match direction {
                Direction::Up => held.up = true,
                Direction::Down => held.down = true,
                Direction::Left => held.left = true,
                Direction::Right => held.right = true,
            }
        }
        held
    }

    /// Reports whether no direction is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    /// Resolves the held set into the single direction honoured this tick.
    ///
    /// Priority is `Up`, then `Down`, then `Left`, then `Right`.
    #[must_use]
    pub const fn resolve(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Returns the cell one step away in the provided direction.
    ///
    /// Fails with [`GridError::OutOfBounds`] when the step would leave the
    /// non-negative coordinate space. Upper bounds are the grid's concern.
    pub fn neighbor(self, direction: Direction) -> Result<CellCoord, GridError> {
        let (column_delta, row_delta) = direction.delta();
        let column = i64::from(self.column) + column_delta;
        let row = i64::from(self.row) + row_delta;
        match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => Ok(CellCoord::new(column, row)),
            _ => Err(GridError::OutOfBounds { column, row }),
        }
    }
}

/// Contents of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Impassable wall.
    Wall,
    /// Walkable cell holding an uncollected pickup.
    Pickup,
    /// Walkable cell with nothing on it.
    Empty,
}

impl CellKind {
    /// Reports whether actors may occupy the cell.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Character used for the cell in text layouts.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Pickup => '.',
            Self::Empty => ' ',
        }
    }

    /// Parses a text layout character into a cell kind.
    #[must_use]
    pub const fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '#' => Some(Self::Wall),
            '.' => Some(Self::Pickup),
            ' ' => Some(Self::Empty),
            _ => None,
        }
    }
}

/// Unique identifier assigned to an adversary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdversaryId(u32);

impl AdversaryId {
    /// Creates a new adversary identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Lifecycle state of a game session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    /// The session accepts further ticks.
    #[default]
    Running,
    /// An adversary caught the player.
    Lost,
    /// The player collected every pickup.
    Won,
}

impl SessionState {
    /// Reports whether the session has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Line announced to the player when the session ends.
    #[must_use]
    pub const fn announcement(self) -> Option<&'static str> {
        match self {
            Self::Running => None,
            Self::Lost => Some("Game Over!"),
            Self::Won => Some("You Win!"),
        }
    }
}

/// Immutable representation of a single adversary used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdversarySnapshot {
    /// Identifier assigned to the adversary.
    pub id: AdversaryId,
    /// Grid cell currently occupied by the adversary.
    pub cell: CellCoord,
}

/// Facts produced while processing a tick.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// The player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// The player requested a move into a wall and stayed in place.
    PlayerBlocked {
        /// Cell the player remains on.
        cell: CellCoord,
        /// Direction that was rejected.
        direction: Direction,
    },
    /// An adversary moved between two cells.
    AdversaryMoved {
        /// Identifier of the adversary that moved.
        id: AdversaryId,
        /// Cell the adversary occupied before moving.
        from: CellCoord,
        /// Cell the adversary occupies after the move.
        to: CellCoord,
    },
    /// The player consumed a pickup.
    PickupConsumed {
        /// Cell that held the pickup.
        cell: CellCoord,
        /// Score after the pickup was counted.
        score: u32,
    },
    /// An adversary reached the player's cell.
    PlayerCaught {
        /// Identifier of the adversary that caught the player.
        id: AdversaryId,
        /// Cell where the capture happened.
        cell: CellCoord,
    },
    /// The last pickup was consumed.
    PickupsCleared,
}

/// Everything a renderer needs to redraw after a tick.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickResult {
    /// Number of ticks processed by the session, including this one.
    pub tick: u64,
    /// Session state after the tick.
    pub state: SessionState,
    /// Score after the tick.
    pub score: u32,
    /// Cell occupied by the player.
    pub player: CellCoord,
    /// Adversaries ordered by identifier.
    pub adversaries: Vec<AdversarySnapshot>,
    /// Events produced by the tick in the order they happened.
    pub events: Vec<Event>,
}

/// Failures raised by grid queries and mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// A position outside the grid was queried. The wall border makes this an
    /// integrity fault rather than a gameplay condition.
    #[error("cell ({column}, {row}) lies outside the grid")]
    OutOfBounds {
        /// Column that was requested.
        column: i64,
        /// Row that was requested.
        row: i64,
    },
    /// A pickup was consumed from a cell that does not hold one.
    #[error("cell ({}, {}) holds no pickup", .cell.column(), .cell.row())]
    NoPickup {
        /// Cell that was targeted.
        cell: CellCoord,
    },
}

/// Failures raised while advancing a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session already reached a terminal state.
    #[error("session already finished in state {state:?}")]
    Finished {
        /// Terminal state the session is in.
        state: SessionState,
    },
    /// The grid reported an integrity fault.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Reasons a level description may be rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The layout contains no rows or no columns.
    #[error("layout is empty")]
    Empty,
    /// A row's length differs from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character does not describe a known cell kind.
    #[error("unknown cell glyph {glyph:?} at ({column}, {row})")]
    UnknownGlyph {
        /// Character that failed to parse.
        glyph: char,
        /// Column of the character.
        column: usize,
        /// Row of the character.
        row: usize,
    },
    /// A border cell is walkable.
    #[error("border cell ({column}, {row}) is not a wall")]
    OpenBorder {
        /// Column of the open border cell.
        column: u32,
        /// Row of the open border cell.
        row: u32,
    },
    /// The grid exceeds the addressable coordinate range.
    #[error("layout dimensions exceed the supported range")]
    TooLarge,
    /// An actor start position is outside the grid or on a wall.
    #[error("start cell ({}, {}) is not walkable", .cell.column(), .cell.row())]
    BlockedStart {
        /// Offending start position.
        cell: CellCoord,
    },
}
