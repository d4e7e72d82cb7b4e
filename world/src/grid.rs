//! Maze topology and pickup occupancy.

use std::fmt;

use maze_chase_core::{CellCoord, CellKind, GridError, LayoutError};

/// Dense row-major maze grid.
///
/// Dimensions are fixed at construction and the outer border is guaranteed
/// to be wall, so actors never step outside the grid. Pickup cells turn empty
/// once consumed and never revert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
    pickups_remaining: usize,
}

impl Grid {
    /// Parses a grid from text rows using `#` for walls, `.` for pickups and
    /// spaces for empty cells.
    pub fn parse<S>(rows: &[S]) -> Result<Self, LayoutError>
    where
        S: AsRef<str>,
    {
        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found,
                });
            }

            for (column_index, glyph) in row.chars().enumerate() {
                let kind = CellKind::from_glyph(glyph).ok_or(LayoutError::UnknownGlyph {
                    glyph,
                    column: column_index,
                    row: row_index,
                })?;
                cells.push(kind);
            }
        }

        let columns = u32::try_from(width).map_err(|_| LayoutError::TooLarge)?;
        let rows = u32::try_from(rows.len()).map_err(|_| LayoutError::TooLarge)?;
        Self::from_cells(columns, rows, cells)
    }

    fn from_cells(columns: u32, rows: u32, cells: Vec<CellKind>) -> Result<Self, LayoutError> {
        let pickups_remaining = cells
            .iter()
            .filter(|kind| matches!(kind, CellKind::Pickup))
            .count();
        let grid = Self {
            columns,
            rows,
            cells,
            pickups_remaining,
        };

        for (cell, kind) in grid.iter() {
            let on_border = cell.column() == 0
                || cell.row() == 0
                || cell.column() + 1 == columns
                || cell.row() + 1 == rows;
            if on_border && kind.is_walkable() {
                return Err(LayoutError::OpenBorder {
                    column: cell.column(),
                    row: cell.row(),
                });
            }
        }

        Ok(grid)
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Kind of the cell at the provided position.
    pub fn cell(&self, cell: CellCoord) -> Result<CellKind, GridError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Reports whether actors may occupy the provided position.
    pub fn is_walkable(&self, cell: CellCoord) -> Result<bool, GridError> {
        self.cell(cell).map(CellKind::is_walkable)
    }

    /// Reports whether the provided position holds an uncollected pickup.
    pub fn has_pickup(&self, cell: CellCoord) -> Result<bool, GridError> {
        self.cell(cell).map(|kind| kind == CellKind::Pickup)
    }

    /// Removes the pickup at the provided position.
    ///
    /// Callers must check [`Grid::has_pickup`] first; consuming a cell without
    /// a pickup fails with [`GridError::NoPickup`].
    pub fn consume_pickup(&mut self, cell: CellCoord) -> Result<(), GridError> {
        let index = self.index(cell)?;
        if self.cells[index] != CellKind::Pickup {
            return Err(GridError::NoPickup { cell });
        }

        self.cells[index] = CellKind::Empty;
        self.pickups_remaining -= 1;
        Ok(())
    }

    /// Reports whether any pickup is left in the maze.
    #[must_use]
    pub const fn any_pickups_remaining(&self) -> bool {
        self.pickups_remaining > 0
    }

    /// Number of pickups left in the maze.
    #[must_use]
    pub const fn pickups_remaining(&self) -> usize {
        self.pickups_remaining
    }

    /// Dense cell kinds stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Iterates every cell together with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let columns = self.columns.max(1);
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .zip(self.cells.iter().copied())
    }

    fn index(&self, cell: CellCoord) -> Result<usize, GridError> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return Err(GridError::OutOfBounds {
                column: i64::from(cell.column()),
                row: i64::from(cell.row()),
            });
        }

        let columns = self.columns as usize;
        Ok(cell.row() as usize * columns + cell.column() as usize)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.chunks(self.columns as usize).enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for kind in row {
                write!(f, "{}", kind.glyph())?;
            }
        }
        Ok(())
    }
}
