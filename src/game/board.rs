use super::{
    config::{GRID_COLUMNS, GRID_ROWS},
    signal::Direction,
};

/// A cell coordinate in board units, aligned to the cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub x: u32,
    pub y: u32,
}

impl Segment {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Widest cell whose board width still fits in a `u32`
pub const MAX_CELL_WIDTH: u32 = u32::MAX / GRID_COLUMNS;

/// Board extents and cell size, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: u32,
    pub height: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Board {
    /// Size a board from the width of its container
    ///
    /// The board takes `percentage` percent of the container, truncated down
    /// to a multiple of the column count and never narrower than one unit per
    /// column. The height keeps a 3:2 aspect ratio, so cells divide both
    /// extents exactly. An unavailable (or nonsensical) container width
    /// yields the minimum board.
    pub fn from_container(container_width: Option<f64>, percentage: f64) -> Self {
        let raw = container_width.unwrap_or(0.0) * percentage / 100.0;
        let units = if raw.is_finite() && raw > 0.0 {
            (raw / GRID_COLUMNS as f64).floor() as u32
        } else {
            0
        };
        Self::with_cell_width(units)
    }

    /// Board whose cells are `cell_width` units wide, clamped to
    /// `1..=MAX_CELL_WIDTH`
    pub fn with_cell_width(cell_width: u32) -> Self {
        let width = cell_width.clamp(1, MAX_CELL_WIDTH) * GRID_COLUMNS;
        let height = width / 3 * 2;
        Self {
            width,
            height,
            cell_width: width / GRID_COLUMNS,
            cell_height: height / GRID_ROWS,
        }
    }

    pub fn columns(&self) -> u32 {
        self.width / self.cell_width
    }

    pub fn rows(&self) -> u32 {
        self.height / self.cell_height
    }

    /// Cell where a fresh snake's head starts
    pub fn center(&self) -> Segment {
        Segment::new(self.width / 2, self.height / 2)
    }

    /// Check that a segment is inside the board and on the cell grid
    pub fn contains(&self, seg: Segment) -> bool {
        seg.x < self.width
            && seg.y < self.height
            && seg.x % self.cell_width == 0
            && seg.y % self.cell_height == 0
    }

    /// The neighbouring cell in a direction, wrapping around the edges
    pub fn step(&self, seg: Segment, direction: Direction) -> Segment {
        let last_x = self.width - self.cell_width;
        let last_y = self.height - self.cell_height;

        match direction {
            Direction::Left => Segment {
                x: if seg.x == 0 { last_x } else { seg.x - self.cell_width },
                ..seg
            },
            Direction::Right => Segment {
                x: if seg.x >= last_x { 0 } else { seg.x + self.cell_width },
                ..seg
            },
            Direction::Up => Segment {
                y: if seg.y == 0 { last_y } else { seg.y - self.cell_height },
                ..seg
            },
            Direction::Down => Segment {
                y: if seg.y >= last_y { 0 } else { seg.y + self.cell_height },
                ..seg
            },
        }
    }

    /// Segment at a column/row index
    pub fn cell(&self, column: u32, row: u32) -> Segment {
        Segment::new(column * self.cell_width, row * self.cell_height)
    }

    /// Column/row index of a segment
    pub fn index_of(&self, seg: Segment) -> (u32, u32) {
        (seg.x / self.cell_width, seg.y / self.cell_height)
    }

    /// Every cell on the board, row by row
    pub fn cells(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.columns()).map(move |col| self.cell(col, row)))
    }
}
