use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::warn;

use crate::game::{GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Palette, Renderer};
use crate::scheduler::{Scheduler, SchedulerHandle};
use crate::storage::HighScoreStore;

pub struct PlayMode {
    scheduler: Scheduler<StdRng>,
    renderer: Renderer,
    rng: StdRng,
}

impl PlayMode {
    pub fn new(
        config: GameConfig,
        container_width: Option<f64>,
        store: Arc<dyn HighScoreStore>,
    ) -> Self {
        let engine = GameEngine::new(config, container_width);
        let mut rng = StdRng::from_entropy();

        Self {
            scheduler: Scheduler::new(engine, store),
            renderer: Renderer::new(Palette::random(&mut rng)),
            rng,
        }
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            scheduler,
            mut renderer,
            mut rng,
        } = self;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let handle = scheduler.spawn();
        let mut front = FrontEnd::new();
        let result = front
            .run_loop(&mut terminal, &handle, &mut renderer, &mut rng)
            .await;

        // Release in reverse order of acquisition
        let stopped = handle.stop().await;
        cleanup_terminal(&mut terminal)?;

        result.and(stopped.map(|_| ()))
    }
}

/// Terminal side of a running session
struct FrontEnd {
    input_handler: InputHandler,
    should_quit: bool,
}

impl FrontEnd {
    fn new() -> Self {
        Self {
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        handle: &SchedulerHandle,
        renderer: &mut Renderer,
        rng: &mut StdRng,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let frames = handle.frames();
        let mut was_over = frames.borrow().is_over;

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, handle);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let snapshot = frames.borrow().clone();
                    if was_over && !snapshot.is_over {
                        renderer.set_palette(Palette::random(rng));
                    }
                    was_over = snapshot.is_over;

                    terminal.draw(|frame| {
                        renderer.render(frame, &snapshot);
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

    fn handle_event(&mut self, event: Event, handle: &SchedulerHandle) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Session(signal) => {
                if let Err(err) = handle.send(signal) {
                    warn!(error = %format!("{err:#}"), ?signal, "input dropped");
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
