use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::{info, warn};

use crate::game::{GameConfig, GameEngine, GameEvent, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive session: one game at a time, restarted after each game over.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.reset();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            rows = self.state.rows,
            cols = self.state.cols,
            tick_ms = self.engine.config().tick_ms,
            "session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        if let Err(err) = self.cleanup_terminal(&mut terminal) {
            warn!(?err, "failed to restore terminal");
            return Err(err);
        }

        info!(games_played = self.metrics.games_played, "session ended");
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Released on game over, recreated when the next game starts
        let mut tick_timer = Some(self.new_tick_timer());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = next_tick(&mut tick_timer) => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.sync_tick_timer(&mut tick_timer);
        }

        Ok(())
    }

    fn new_tick_timer(&self) -> Interval {
        let period = self.engine.config().tick_interval();
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    /// Keep the tick timer alive exactly while a game is running
    fn sync_tick_timer(&self, tick_timer: &mut Option<Interval>) {
        match (self.state.running, tick_timer.is_some()) {
            (true, false) => *tick_timer = Some(self.new_tick_timer()),
            (false, true) => *tick_timer = None,
            _ => {}
        }
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                self.engine.update(&mut self.state, GameEvent::Turn(direction));
            }
            KeyAction::Acknowledge => {
                if self.state.is_terminated() {
                    self.reset_game();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let Some(outcome) = self.engine.update(&mut self.state, GameEvent::Tick) else {
            return;
        };

        if let Some(collision) = outcome.collision {
            let score = self.state.score();
            info!(score, ticks = self.state.ticks, ?collision, "game over");
            self.metrics.on_game_over(score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        info!("new game");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Wait for the next tick, or forever when no game is running
async fn next_tick(tick_timer: &mut Option<Interval>) {
    match tick_timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, Snake};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn doomed_mode() -> HumanMode {
        let mut mode = HumanMode::new(GameConfig::small(), Some(3));
        mode.state = GameState::new(Snake::new(Cell::new(0, 0)), Some(Cell::new(4, 4)), 5, 5)
            .heading(Direction::Up);
        mode
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(1));
        assert!(mode.state.running);
        assert_eq!(mode.state.score(), 1);
        assert_eq!(mode.state.current_direction, None);
    }

    #[test]
    fn test_arrow_key_turns_snake() {
        let mut mode = HumanMode::new(GameConfig::small(), Some(1));
        mode.handle_event(key(KeyCode::Right));
        assert_eq!(mode.state.current_direction, Some(Direction::Right));

        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.state.current_direction, Some(Direction::Right));
    }

    #[test]
    fn test_game_over_then_acknowledge() {
        let mut mode = doomed_mode();

        mode.update_game();
        assert!(mode.state.is_terminated());
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.best_score, 1);

        // no further ticks apply
        let frozen = mode.state.clone();
        mode.update_game();
        assert_eq!(mode.state, frozen);

        mode.handle_event(key(KeyCode::Enter));
        assert!(mode.state.running);
        assert_eq!(mode.state.snake, Snake::new(Cell::new(0, 0)));
        assert_eq!(mode.state.ticks, 0);
    }

    #[test]
    fn test_acknowledge_ignored_while_running() {
        let mut mode = HumanMode::new(GameConfig::small(), Some(1));
        mode.handle_event(key(KeyCode::Down));
        mode.update_game();
        let before = mode.state.clone();

        mode.handle_event(key(KeyCode::Enter));
        assert_eq!(mode.state, before);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = HumanMode::new(GameConfig::small(), Some(1));
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[tokio::test]
    async fn test_tick_timer_follows_game() {
        let mut mode = doomed_mode();
        let mut tick_timer = Some(mode.new_tick_timer());

        mode.update_game();
        mode.sync_tick_timer(&mut tick_timer);
        assert!(tick_timer.is_none());

        mode.handle_event(key(KeyCode::Char('r')));
        mode.sync_tick_timer(&mut tick_timer);
        assert!(tick_timer.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_tick_waits_one_period() {
        let mode = HumanMode::new(GameConfig::small().with_tick_ms(50), Some(1));
        let mut tick_timer = Some(mode.new_tick_timer());
        let start = Instant::now();

        next_tick(&mut tick_timer).await;

        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
