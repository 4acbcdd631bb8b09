use crate::config::{BORDER_THICKNESS, ConfigError, HUD_HEIGHT, TILE_COLUMNS};
use crate::input::Direction;
use crate::snake::Snake;

/// Grid position in logical cell coordinates.
///
/// Signed so that a candidate head one step past the edge is representable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Logical grid dimensions, fixed for the lifetime of a board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    width: u16,
    height: u16,
}

impl GridSize {
    /// Validates dimensions.
    ///
    /// Zero-sized grids are rejected, and so is a single cell since the snake
    /// would leave nowhere to put food.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if usize::from(width) * usize::from(height) < 2 {
            return Err(ConfigError::GridTooSmall { width, height });
        }
        Ok(Self { width, height })
    }

    /// Derives a square grid from the terminal area available to the game.
    ///
    /// Each tile is [`TILE_COLUMNS`] wide; the border and HUD rows are
    /// subtracted first.
    pub fn from_viewport(columns: u16, rows: u16) -> Result<Self, ConfigError> {
        let tiles_x = columns.saturating_sub(BORDER_THICKNESS) / TILE_COLUMNS;
        let tiles_y = rows.saturating_sub(BORDER_THICKNESS + HUD_HEIGHT);
        let side = tiles_x.min(tiles_y);

        Self::new(side, side).map_err(|_| ConfigError::ViewportTooSmall { columns, rows })
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Returns the start cell for a new snake.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Iterates every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..i32::from(self.height))
            .flat_map(move |y| (0..i32::from(self.width)).map(move |x| Position { x, y }))
    }
}

/// Returns true if any snake segment occupies `position`.
#[must_use]
pub fn is_occupied_by_snake(position: Position, snake: &Snake) -> bool {
    snake.occupies(position)
}
