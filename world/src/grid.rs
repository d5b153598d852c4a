//! Dense grid storage and directional projection into lines.

use twenty48_core::{BoardView, CellCoord, Direction, GridSize};

use crate::line;

/// Row-major grid of cell values where zero marks an empty cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<u32>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![0; size.cell_count()],
        }
    }

    /// Builds a grid from rows listed top to bottom.
    ///
    /// Returns `None` when the rows are empty or ragged, or when a cell is
    /// neither zero nor a power of two of at least two.
    #[must_use]
    pub fn from_rows(rows: &[Vec<u32>]) -> Option<Self> {
        let width = rows.first()?.len();
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        if !rows.iter().flatten().all(|&value| is_cell_value(value)) {
            return None;
        }
        let columns = u32::try_from(width).ok()?;
        let size = GridSize::new(columns, u32::try_from(rows.len()).ok()?).ok()?;
        Some(Self {
            size,
            cells: rows.concat(),
        })
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Row-major cell values.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Read-only view used by systems and renderers.
    #[must_use]
    pub fn view(&self) -> BoardView<'_> {
        BoardView::new(&self.cells, self.size)
    }

    /// Value stored in the cell, or `None` outside the grid.
    #[must_use]
    pub fn value(&self, cell: CellCoord) -> Option<u32> {
        self.view().value(cell)
    }

    /// Overwrites the cell, returning `false` when it lies outside the grid
    /// or `value` is neither zero nor a power of two of at least two.
    pub fn set(&mut self, cell: CellCoord, value: u32) -> bool {
        if !is_cell_value(value) {
            return false;
        }
        match self.size.index(cell) {
            Some(index) => {
                self.cells[index] = value;
                true
            }
            None => false,
        }
    }

    /// Reports whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.view().is_full()
    }

    /// Slides and merges every line towards the edge named by `direction`.
    ///
    /// Each row or column is projected into a line ordered so that the target
    /// edge comes first, merged, and written back through the same mapping.
    pub fn apply_direction(&mut self, direction: Direction) {
        let lanes = match direction {
            Direction::Left | Direction::Right => self.size.height(),
            Direction::Up | Direction::Down => self.size.width(),
        };

        for lane in 0..lanes {
            let indices = self.line_indices(direction, lane);
            let mut projected: Vec<u32> = indices.iter().map(|&index| self.cells[index]).collect();
            if !line::merge_in_place(&mut projected) {
                continue;
            }
            for (index, value) in indices.into_iter().zip(projected) {
                self.cells[index] = value;
            }
        }
    }

    /// Row-major indices of one row or column, ordered from the target edge.
    fn line_indices(&self, direction: Direction, lane: u32) -> Vec<usize> {
        let width = self.size.width() as usize;
        let height = self.size.height() as usize;
        let lane = lane as usize;

        match direction {
            Direction::Left => (0..width).map(|column| lane * width + column).collect(),
            Direction::Right => (0..width)
                .rev()
                .map(|column| lane * width + column)
                .collect(),
            Direction::Up => (0..height).map(|row| row * width + lane).collect(),
            Direction::Down => (0..height).rev().map(|row| row * width + lane).collect(),
        }
    }
}

/// Zero for an empty cell, otherwise a power of two no smaller than two.
fn is_cell_value(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[u32]]) -> Grid {
        let rows: Vec<Vec<u32>> = rows.iter().map(|row| row.to_vec()).collect();
        Grid::from_rows(&rows).expect("rectangular rows")
    }

    fn shifted(mut grid: Grid, direction: Direction) -> Vec<Vec<u32>> {
        grid.apply_direction(direction);
        grid.view().to_rows()
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Grid::from_rows(&[vec![2, 0], vec![0]]).is_none());
        assert!(Grid::from_rows(&[]).is_none());
    }

    #[test]
    fn left_merges_each_row_towards_column_zero() {
        let start = grid(&[&[0, 2, 2, 4], &[4, 0, 4, 4], &[0, 0, 0, 0], &[2, 4, 8, 16]]);
        assert_eq!(
            shifted(start, Direction::Left),
            vec![
                vec![4, 4, 0, 0],
                vec![8, 4, 0, 0],
                vec![0, 0, 0, 0],
                vec![2, 4, 8, 16],
            ]
        );
    }

    #[test]
    fn right_merges_each_row_towards_last_column() {
        let start = grid(&[&[0, 2, 2, 4], &[4, 0, 4, 4], &[2, 0, 0, 0], &[2, 2, 2, 2]]);
        assert_eq!(
            shifted(start, Direction::Right),
            vec![
                vec![0, 0, 4, 4],
                vec![0, 0, 4, 8],
                vec![0, 0, 0, 2],
                vec![0, 0, 4, 4],
            ]
        );
    }

    #[test]
    fn up_merges_each_column_towards_row_zero() {
        let start = grid(&[&[2, 0, 4], &[2, 4, 0], &[4, 4, 4]]);
        assert_eq!(
            shifted(start, Direction::Up),
            vec![vec![4, 8, 8], vec![4, 0, 0], vec![0, 0, 0]]
        );
    }

    #[test]
    fn down_merges_each_column_towards_last_row() {
        let start = grid(&[&[2, 0, 4], &[2, 4, 0], &[4, 4, 8]]);
        assert_eq!(
            shifted(start, Direction::Down),
            vec![vec![0, 0, 0], vec![4, 0, 4], vec![4, 8, 8]]
        );
    }

    #[test]
    fn down_prefers_pairs_nearest_the_bottom() {
        let start = grid(&[&[2], &[2], &[2]]);
        assert_eq!(shifted(start, Direction::Down), vec![vec![0], vec![2], vec![4]]);
    }

    #[test]
    fn non_square_grids_shift_along_both_axes() {
        let start = grid(&[&[2, 0, 2, 0, 8], &[2, 0, 0, 4, 8]]);
        assert_eq!(
            shifted(start.clone(), Direction::Left),
            vec![vec![4, 8, 0, 0, 0], vec![2, 4, 8, 0, 0]]
        );
        assert_eq!(
            shifted(start, Direction::Up),
            vec![vec![4, 0, 2, 4, 16], vec![0, 0, 0, 0, 0]]
        );
    }

    #[test]
    fn from_rows_rejects_values_that_are_not_tiles() {
        assert!(Grid::from_rows(&[vec![3, 3], vec![1, 0]]).is_none());
        assert!(Grid::from_rows(&[vec![2, 6]]).is_none());
        assert!(Grid::from_rows(&[vec![0, 2], vec![4, 1 << 31]]).is_some());
    }

    #[test]
    fn set_rejects_values_that_are_not_tiles() {
        let mut grid = Grid::new(GridSize::new(2, 2).expect("valid size"));

        assert!(!grid.set(CellCoord::new(1, 1), 5));
        assert!(!grid.set(CellCoord::new(1, 1), 1));
        assert_eq!(grid.value(CellCoord::new(1, 1)), Some(0));
        assert!(grid.set(CellCoord::new(1, 1), 8));
        assert!(grid.set(CellCoord::new(1, 1), 0));
    }

    #[test]
    fn set_rejects_cells_outside_the_grid() {
        let mut grid = Grid::new(GridSize::new(2, 2).expect("valid size"));
        assert!(grid.set(CellCoord::new(1, 1), 4));
        assert!(!grid.set(CellCoord::new(2, 0), 4));
        assert_eq!(grid.value(CellCoord::new(1, 1)), Some(4));
        assert!(!grid.is_full());
    }
}
