use std::time::{Duration, Instant};

/// Per-session statistics. Kept in memory only.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: usize,
    pub games_played: u32,
    finished: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            finished: false,
        }
    }

    /// Refresh the clock; frozen once the current game is over
    pub fn update(&mut self) {
        if !self.finished {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.finished = false;
    }

    pub fn on_game_over(&mut self, final_score: usize) {
        self.update();
        self.finished = true;
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    /// Game clock as `MM:SS`
    pub fn format_time(&self) -> String {
        let secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
