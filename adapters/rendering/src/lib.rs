#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Chase adapters.
//!
//! A [`Scene`] mirrors everything a backend needs to draw one frame. It is
//! seeded once from the session and afterwards kept current by feeding it
//! each [`TickResult`], so backends never touch world state directly.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_chase_core::{
    AdversarySnapshot, CellCoord, CellKind, Direction, Event, HeldDirections, SessionState,
    TickResult,
};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Colors assigned to every kind of scene element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Color used to clear each frame.
    pub background: Color,
    /// Fill color of wall tiles.
    pub wall: Color,
    /// Fill color of pickups.
    pub pickup: Color,
    /// Fill color of the player.
    pub player: Color,
    /// Fill color of adversaries.
    pub adversary: Color,
    /// Color of the status line.
    pub text: Color,
}

impl Palette {
    /// Black background, blue walls, white pickups, a yellow player and red
    /// adversaries.
    #[must_use]
    pub const fn classic() -> Self {
        Self {
            background: Color::from_rgb_u8(0, 0, 0),
            wall: Color::from_rgb_u8(0, 0, 255),
            pickup: Color::from_rgb_u8(255, 255, 255),
            player: Color::from_rgb_u8(255, 255, 0),
            adversary: Color::from_rgb_u8(255, 0, 0),
            text: Color::from_rgb_u8(255, 255, 255),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Directions held down on this frame.
    pub held: HeldDirections,
    /// Whether the adapter detected a quit request on this frame.
    pub quit_requested: bool,
}

/// Remembers the most recent direction observed between two ticks.
///
/// Frames usually outnumber ticks, so a key tapped and released between two
/// ticks would otherwise never reach the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionLatch {
    latched: Option<Direction>,
}

impl DirectionLatch {
    /// Records the directions held on the current frame.
    pub fn observe(&mut self, held: HeldDirections) {
        if let Some(direction) = held.resolve() {
            self.latched = Some(direction);
        }
    }

    /// Returns the latched direction and clears the latch so it fires once.
    pub fn take(&mut self) -> Option<Direction> {
        self.latched.take()
    }
}

/// Tells the backend whether to keep presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    /// Present another frame.
    Continue,
    /// Stop the loop after this frame.
    Exit,
}

/// Describes the tile grid that hosts the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in world units.
    pub tile_length: f32,
}

impl TileGridPresentation {
    /// Tile size used by the classic presentation, in pixels.
    pub const DEFAULT_TILE_LENGTH: f32 = 32.0;

    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when `tile_length` is not a positive finite number.
    pub fn new(columns: u32, rows: u32, tile_length: f32) -> Result<Self, RenderingError> {
        if !(tile_length.is_finite() && tile_length > 0.0) {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            columns,
            rows,
            tile_length,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.columns as f32 * self.tile_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.rows as f32 * self.tile_length
    }

    /// Upper-left corner of a cell in world units.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.tile_length
    }

    /// Center of a cell in world units.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_origin(cell) + Vec2::splat(self.tile_length * 0.5)
    }
}

/// Scene description combining the maze and its inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Cell kinds in row-major order.
    pub cells: Vec<CellKind>,
    /// Cell occupied by the player.
    pub player: CellCoord,
    /// Adversaries ordered by identifier.
    pub adversaries: Vec<AdversarySnapshot>,
    /// Current score.
    pub score: u32,
    /// Current session state.
    pub state: SessionState,
}

impl Scene {
    /// Creates a scene from dense cell kinds and a session snapshot.
    ///
    /// Returns an error when the number of cells does not match the grid.
    pub fn new(
        tile_grid: TileGridPresentation,
        cells: Vec<CellKind>,
        snapshot: &TickResult,
    ) -> Result<Self, RenderingError> {
        let expected = tile_grid.columns as usize * tile_grid.rows as usize;
        if cells.len() != expected {
            return Err(RenderingError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }

        Ok(Self {
            tile_grid,
            cells,
            player: snapshot.player,
            adversaries: snapshot.adversaries.clone(),
            score: snapshot.score,
            state: snapshot.state,
        })
    }

    /// Brings the scene up to date with the outcome of a tick.
    pub fn apply_tick(&mut self, result: &TickResult) {
        for event in &result.events {
            if let Event::PickupConsumed { cell, .. } = event {
                if let Some(index) = self.index(*cell) {
                    self.cells[index] = CellKind::Empty;
                }
            }
        }

        self.player = result.player;
        self.adversaries.clone_from(&result.adversaries);
        self.score = result.score;
        self.state = result.state;
    }

    /// Kind of the cell at the provided coordinate, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Iterates every cell together with its coordinate in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let columns = self.tile_grid.columns.max(1);
        self.cells.iter().zip(0_u32..).map(move |(kind, index)| {
            (CellCoord::new(index % columns, index / columns), *kind)
        })
    }

    /// Status line shown beneath the maze.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self.state.announcement() {
            Some(announcement) => format!("{announcement} Final Score: {}", self.score),
            None => format!("Score: {}", self.score),
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.tile_grid.columns || cell.row() >= self.tile_grid.rows {
            return None;
        }
        let columns = self.tile_grid.columns as usize;
        Some(cell.row() as usize * columns + cell.column() as usize)
    }
}

/// Text rendering: `P` marks the player, `A` an adversary and `X` a capture.
impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.tile_grid.rows {
            for column in 0..self.tile_grid.columns {
                let cell = CellCoord::new(column, row);
                let has_adversary = self
                    .adversaries
                    .iter()
                    .any(|adversary| adversary.cell == cell);
                let glyph = match (cell == self.player, has_adversary) {
                    (true, true) => 'X',
                    (true, false) => 'P',
                    (false, true) => 'A',
                    (false, false) => self.cell(cell).map_or('?', CellKind::glyph),
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.status_line())
    }
}

/// Window configuration together with the initial scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Colors used to draw the scene.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            palette,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Chase scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the elapsed frame time and
    /// the input captured by the adapter, may mutate the scene before it is
    /// drawn, and decides whether the loop continues.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> LoopControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be positive to produce a visible grid.
    InvalidTileLength {
        /// Provided tile length that failed validation.
        tile_length: f32,
    },
    /// The dense cell list does not cover the grid exactly.
    CellCountMismatch {
        /// Number of cells implied by the grid dimensions.
        expected: usize,
        /// Number of cells provided.
        found: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
            Self::CellCountMismatch { expected, found } => {
                write!(f, "scene expects {expected} cells but received {found}")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_chase_core::AdversaryId;

    fn corridor_cells() -> Vec<CellKind> {
        "#####"
            .chars()
            .chain("#. .#".chars())
            .chain("#####".chars())
            .filter_map(CellKind::from_glyph)
            .collect()
    }

    fn snapshot() -> TickResult {
        TickResult {
            tick: 0,
            state: SessionState::Running,
            score: 0,
            player: CellCoord::new(1, 1),
            adversaries: vec![AdversarySnapshot {
                id: AdversaryId::new(0),
                cell: CellCoord::new(3, 1),
            }],
            events: Vec::new(),
        }
    }

    fn corridor_scene() -> Scene {
        let grid = TileGridPresentation::new(5, 3, 32.0).expect("valid grid");
        Scene::new(grid, corridor_cells(), &snapshot()).expect("valid scene")
    }

    #[test]
    fn tile_grid_rejects_non_positive_tile_length() {
        let error = TileGridPresentation::new(5, 3, 0.0).expect_err("zero tile length");
        assert_eq!(error, RenderingError::InvalidTileLength { tile_length: 0.0 });
    }

    #[test]
    fn cell_center_scales_with_tile_length() {
        let grid = TileGridPresentation::new(5, 3, 32.0).expect("valid grid");
        assert_eq!(grid.cell_center(CellCoord::new(2, 1)), Vec2::new(80.0, 48.0));
        assert!((grid.width() - 160.0).abs() < f32::EPSILON);
        assert!((grid.height() - 96.0).abs() < f32::EPSILON);
    }

    #[test]
    fn scene_rejects_mismatched_cell_count() {
        let grid = TileGridPresentation::new(4, 3, 32.0).expect("valid grid");
        let error = Scene::new(grid, corridor_cells(), &snapshot()).expect_err("mismatch");
        assert_eq!(
            error,
            RenderingError::CellCountMismatch {
                expected: 12,
                found: 15
            }
        );
    }

    #[test]
    fn apply_tick_clears_consumed_pickups() {
        let mut scene = corridor_scene();
        let mut result = snapshot();
        result.tick = 1;
        result.score = 1;
        result.player = CellCoord::new(1, 1);
        result.events = vec![Event::PickupConsumed {
            cell: CellCoord::new(1, 1),
            score: 1,
        }];

        scene.apply_tick(&result);

        assert_eq!(scene.cell(CellCoord::new(1, 1)), Some(CellKind::Empty));
        assert_eq!(scene.cell(CellCoord::new(3, 1)), Some(CellKind::Pickup));
        assert_eq!(scene.score, 1);
    }

    #[test]
    fn text_rendering_marks_actors() {
        let scene = corridor_scene();
        assert_eq!(scene.to_string(), "#####\n#P A#\n#####\nScore: 0");
    }

    #[test]
    fn status_line_announces_terminal_states() {
        let mut scene = corridor_scene();
        scene.state = SessionState::Lost;
        scene.score = 3;
        assert_eq!(scene.status_line(), "Game Over! Final Score: 3");
    }

    #[test]
    fn iter_cells_walks_row_major() {
        let scene = corridor_scene();
        let pickups: Vec<_> = scene
            .iter_cells()
            .filter(|(_, kind)| *kind == CellKind::Pickup)
            .map(|(cell, _)| cell)
            .collect();
        assert_eq!(pickups, vec![CellCoord::new(1, 1), CellCoord::new(3, 1)]);
    }
}
