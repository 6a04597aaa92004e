//! Pure projection of a [`GameState`] onto display categories.
//!
//! Nothing here is cached: every render derives the grid from the state.

use super::state::{Cell, GameState};

/// What a single grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Food,
    Snake,
    /// Food and snake on the same cell
    Overlap,
}

impl GameState {
    pub fn cell_kind(&self, cell: Cell) -> CellKind {
        match (self.is_food(cell), self.is_occupied_by_snake(cell)) {
            (true, true) => CellKind::Overlap,
            (true, false) => CellKind::Food,
            (false, true) => CellKind::Snake,
            (false, false) => CellKind::Empty,
        }
    }

    /// Row-major grid of cell kinds
    pub fn project(&self) -> Vec<Vec<CellKind>> {
        (0..self.rows as i32)
            .map(|row| {
                (0..self.cols as i32)
                    .map(|col| self.cell_kind(Cell::new(row, col)))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Snake;

    #[test]
    fn test_projection_categories() {
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(0, 1)]).unwrap();
        let state = GameState::new(snake, Some(Cell::new(2, 2)), 3, 3);

        let grid = state.project();
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 3));
        assert_eq!(grid[0][0], CellKind::Snake);
        assert_eq!(grid[0][1], CellKind::Snake);
        assert_eq!(grid[2][2], CellKind::Food);
        assert_eq!(grid[1][1], CellKind::Empty);
    }

    #[test]
    fn test_overlap() {
        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(0, 1)]).unwrap();
        let state = GameState::new(snake, Some(Cell::new(0, 1)), 2, 2);

        assert_eq!(state.cell_kind(Cell::new(0, 1)), CellKind::Overlap);
        assert_eq!(state.cell_kind(Cell::new(0, 0)), CellKind::Snake);
    }

    #[test]
    fn test_unset_food_projects_nothing() {
        let state = GameState::new(Snake::new(Cell::new(1, 1)), None, 2, 3);
        let grid = state.project();

        let food_cells = grid
            .iter()
            .flatten()
            .filter(|kind| matches!(kind, CellKind::Food | CellKind::Overlap))
            .count();
        assert_eq!(food_cells, 0);
        assert_eq!(grid[1][1], CellKind::Snake);
        assert_eq!(grid[0].len(), 3);
    }
}
