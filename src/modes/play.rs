use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::clock::IntervalScheduler;
use crate::game::{Command, GameConfig, GameEngine, GameEvent, Snapshot, StepOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::{GameOverNotice, Renderer};

/// Interactive keyboard play in the terminal
pub struct PlayMode {
    engine: GameEngine<IntervalScheduler, StdRng>,
    snapshot: Snapshot,
    game_over: Option<GameOverNotice>,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        let engine = GameEngine::new(config, IntervalScheduler::new(), rng);
        let snapshot = engine.snapshot();

        Self {
            engine,
            snapshot,
            game_over: None,
            metrics: SessionMetrics::new(),
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick; pending forever while the clock is stopped
                _ = self.engine.scheduler_mut().tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.snapshot,
                            &self.metrics,
                            self.game_over.as_ref(),
                        );
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
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => self.apply(command),
                KeyAction::Quit => {
                    info!("quit requested");
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn apply(&mut self, command: Command) {
        if command == Command::Start {
            self.game_over = None;
            self.metrics.on_game_start();
        }
        self.engine.apply(command);
        self.sync_events();
    }

    fn update_game(&mut self) {
        if self.engine.tick() != StepOutcome::Skipped {
            self.metrics.on_tick();
        }
        self.sync_events();
    }

    /// Fold the engine's queued events into what the renderer draws
    fn sync_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                GameEvent::Snapshot(snapshot) => {
                    self.metrics.on_snapshot(&snapshot);
                    self.snapshot = snapshot;
                }
                GameEvent::GameOver { score, reason } => {
                    self.metrics.on_game_over();
                    self.game_over = Some(GameOverNotice { score, reason });
                }
            }
        }
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
