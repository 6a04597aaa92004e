use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move cell by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move cell one step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }
}

/// The snake in the game
///
/// Segments are stored tail first, so the head is the last element. A snake
/// always has at least one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from cells ordered tail to head, `None` if there are none
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Get the tail position (first segment)
    pub fn tail(&self) -> Cell {
        self.body[0]
    }

    /// Segments from tail to head
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    /// Segments from tail to head, excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter().take(self.body.len() - 1)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_segments().any(|segment| *segment == cell)
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        // never drop the last remaining segment
        if self.body.len() > 1 {
            self.body.pop_front()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the grid
    Wall,
    /// Head ran into another segment
    SelfCollision,
}

/// Game-over check against a snake that has already moved
pub fn detect_collision(snake: &Snake, rows: usize, cols: usize) -> Option<CollisionType> {
    let head = snake.head();
    if !in_bounds(head, rows, cols) {
        return Some(CollisionType::Wall);
    }
    if snake.collides_with_body(head) {
        return Some(CollisionType::SelfCollision);
    }
    None
}

fn in_bounds(cell: Cell, rows: usize, cols: usize) -> bool {
    cell.row >= 0 && (cell.row as usize) < rows && cell.col >= 0 && (cell.col as usize) < cols
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub rows: usize,
    pub cols: usize,
    pub snake: Snake,
    pub food: Option<Cell>,
    pub current_direction: Option<Direction>,
    pub prev_direction: Option<Direction>,
    /// Direction the last movement actually used
    pub committed_direction: Option<Direction>,
    pub running: bool,
    pub ticks: u64,
}

impl GameState {
    /// Create a running game with no direction set
    pub fn new(snake: Snake, food: Option<Cell>, rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            snake,
            food,
            current_direction: None,
            prev_direction: None,
            committed_direction: None,
            running: true,
            ticks: 0,
        }
    }

    /// Builder-style helper to start with a direction already set
    pub fn heading(mut self, direction: Direction) -> Self {
        self.current_direction = Some(direction);
        self
    }

    /// Score is the snake length
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    pub fn is_terminated(&self) -> bool {
        !self.running
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        in_bounds(cell, self.rows, self.cols)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.contains(cell)
    }

    pub fn is_food(&self, cell: Cell) -> bool {
        self.food == Some(cell)
    }

    pub fn collision(&self) -> Option<CollisionType> {
        detect_collision(&self.snake, self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(pairs: &[(i32, i32)]) -> Snake {
        Snake::from_cells(pairs.iter().map(|&(r, c)| Cell::new(r, c))).unwrap()
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::Up), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::Left), Cell::new(5, 4));
        assert_eq!(cell.moved_in_direction(Direction::Right), Cell::new(5, 6));
    }

    #[test]
    fn test_snake_head_is_last() {
        let snake = snake(&[(0, 0), (0, 1), (0, 2)]);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(0, 0));
        assert_eq!(snake.head(), Cell::new(0, 2));
        assert_eq!(snake.body_segments().count(), 2);
    }

    #[test]
    fn test_empty_snake_is_rejected() {
        assert_eq!(Snake::from_cells(Vec::new()), None);
        assert_eq!(Snake::from_cells([Cell::new(3, 3)]), Some(Snake::new(Cell::new(3, 3))));
    }

    #[test]
    fn test_pop_tail_keeps_last_segment() {
        let mut snake = Snake::new(Cell::new(1, 1));
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);

        snake.push_head(Cell::new(1, 2));
        assert_eq!(snake.pop_tail(), Some(Cell::new(1, 1)));
        assert_eq!(snake.head(), Cell::new(1, 2));
    }

    #[test]
    fn test_collision_detection() {
        let snake = snake(&[(2, 2), (2, 3), (2, 4)]);
        assert!(!snake.collides_with_body(Cell::new(2, 4))); // head
        assert!(snake.collides_with_body(Cell::new(2, 3))); // body
        assert!(!snake.collides_with_body(Cell::new(0, 0))); // empty
    }

    #[test]
    fn test_detect_collision() {
        let fine = snake(&[(0, 0), (0, 1)]);
        assert_eq!(detect_collision(&fine, 5, 5), None);

        let off_left = Snake::new(Cell::new(0, -1));
        assert_eq!(detect_collision(&off_left, 5, 5), Some(CollisionType::Wall));

        let off_bottom = Snake::new(Cell::new(5, 0));
        assert_eq!(detect_collision(&off_bottom, 5, 5), Some(CollisionType::Wall));

        let bitten = snake(&[(2, 3), (2, 4), (1, 4), (2, 4)]);
        assert_eq!(
            detect_collision(&bitten, 5, 5),
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(Snake::new(Cell::new(0, 0)), None, 20, 20);

        assert!(state.is_in_bounds(Cell::new(0, 0)));
        assert!(state.is_in_bounds(Cell::new(19, 19)));
        assert!(!state.is_in_bounds(Cell::new(-1, 0)));
        assert!(!state.is_in_bounds(Cell::new(20, 0)));
        assert!(!state.is_in_bounds(Cell::new(0, 20)));
    }

    #[test]
    fn test_score_is_length() {
        let state = GameState::new(
            snake(&[(0, 0), (0, 1), (1, 1)]),
            Some(Cell::new(4, 4)),
            5,
            5,
        );
        assert_eq!(state.score(), 3);
        assert!(state.is_food(Cell::new(4, 4)));
        assert!(!state.is_terminated());
    }
}
