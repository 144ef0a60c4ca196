use std::time::{Duration, Instant};

use crate::game::{GameStatus, Snapshot};

/// Per-session counters shown in the header
///
/// The play clock only runs while a game is running, so pausing freezes it.
/// Nothing here outlives the process.
pub struct SessionMetrics {
    running_since: Option<Instant>,
    banked: Duration,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub ticks: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            games_played: 0,
            ticks: 0,
        }
    }

    /// Refresh `elapsed_time` from the wall clock
    pub fn update(&mut self) {
        self.elapsed_time = match self.running_since {
            Some(since) => self.banked + since.elapsed(),
            None => self.banked,
        };
    }

    pub fn on_game_start(&mut self) {
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.running_since = Some(Instant::now());
    }

    pub fn on_tick(&mut self) {
        self.ticks += 1;
    }

    /// Follow the status carried by a snapshot
    pub fn on_status(&mut self, status: GameStatus) {
        match (status, self.running_since) {
            (GameStatus::Running, None) => self.running_since = Some(Instant::now()),
            (GameStatus::Paused | GameStatus::Ended | GameStatus::Idle, Some(since)) => {
                self.banked += since.elapsed();
                self.running_since = None;
            }
            _ => {}
        }
        self.update();
    }

    pub fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.on_status(snapshot.status);
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
        self.on_status(GameStatus::Ended);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
