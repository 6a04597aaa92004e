use super::{
    action::{Direction, GameEvent},
    config::GameConfig,
    state::{Cell, CollisionType, GameState, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// Result of a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the snake moved this tick
    pub moved: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Collision that ended the game, if any
    pub collision: Option<CollisionType>,
}

impl TickOutcome {
    pub fn terminated(&self) -> bool {
        self.collision.is_some()
    }
}

/// The game engine that handles all game logic
///
/// The engine holds no game state of its own, only the configuration and the
/// random source used to place food.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: one segment at the origin, no direction, food placed
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(Cell::new(0, 0));
        let food = self.place_food(&snake, self.config.rows, self.config.cols);

        GameState::new(snake, food, self.config.rows, self.config.cols)
    }

    /// Apply a tick or a keypress
    ///
    /// Returns the tick outcome for [`GameEvent::Tick`], `None` for turns.
    pub fn update(&mut self, state: &mut GameState, event: GameEvent) -> Option<TickOutcome> {
        match event {
            GameEvent::Tick => Some(self.tick(state)),
            GameEvent::Turn(direction) => {
                self.set_direction(state, direction);
                None
            }
        }
    }

    /// Change the heading unless it would reverse the snake onto itself
    ///
    /// Returns whether the input was accepted.
    pub fn set_direction(&self, state: &mut GameState, input: Direction) -> bool {
        if !state.running {
            return false;
        }
        // the committed direction guards against two quick turns within one tick
        let reverses =
            |direction: Option<Direction>| direction.is_some_and(|d| d.is_opposite(input));
        if reverses(state.current_direction) || reverses(state.committed_direction) {
            return false;
        }

        state.prev_direction = state.current_direction;
        state.current_direction = Some(input);
        debug!(?input, "direction changed");
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !state.running {
            return outcome;
        }

        state.ticks += 1;

        if let Some(direction) = state.current_direction {
            // food is eaten one tick after the head reaches it
            let old_head = state.snake.head();
            state.snake.push_head(old_head.moved_in_direction(direction));

            if state.is_food(old_head) {
                outcome.ate_food = true;
                state.food = self.place_food(&state.snake, state.rows, state.cols);
            } else {
                state.snake.pop_tail();
            }
            state.committed_direction = Some(direction);
            outcome.moved = true;
        }

        if let Some(collision) = state.collision() {
            state.running = false;
            outcome.collision = Some(collision);
        }

        outcome
    }

    /// Pick a random cell the snake does not occupy
    ///
    /// Returns `None` when the snake covers the whole grid.
    fn place_food(&mut self, snake: &Snake, rows: usize, cols: usize) -> Option<Cell> {
        let occupied = snake
            .cells()
            .filter(|cell| cell.row >= 0 && cell.col >= 0)
            .filter(|cell| (cell.row as usize) < rows && (cell.col as usize) < cols)
            .count();
        if occupied >= rows * cols {
            return None;
        }

        loop {
            let row = self.rng.gen_range(0..rows) as i32;
            let col = self.rng.gen_range(0..cols) as i32;
            let cell = Cell::new(row, col);

            if !snake.contains(cell) {
                debug!(row, col, "food placed");
                return Some(cell);
            }
        }
    }
}
