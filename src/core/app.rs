//! Main application orchestrator: terminal lifecycle and the cooperative
//! poll loop.
//!
//! One loop iteration per second: read every sensor feed, derive rates,
//! rebuild histories and the process table, compute the layout, render,
//! then let the input poll sleep out the rest of the tick. Nothing here
//! overlaps — a slow external sensor stalls the tick, by design.

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::state::{AlertThresholds, DashState};
use crate::metrics::process::SortMode;
use crate::sensors;
use crate::ui::renderer::Renderer;
use crate::ui::theme::Theme;

const TICK: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Redraw,
    Quit,
}

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: DashState,
    resized: bool,
}

impl App {
    pub fn new(theme: Theme, thresholds: AlertThresholds) -> Result<Self> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            state: DashState::new(theme, thresholds),
            resized: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.setup_terminal()?;
        let result = self.poll_loop();
        // Always restore the terminal, even when the loop errored.
        let restore = self.restore_terminal();
        result.and(restore)
    }

    fn setup_terminal(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide,
        )?;
        Ok(())
    }

    fn restore_terminal(&mut self) -> Result<()> {
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show,
        )?;
        Ok(())
    }

    fn poll_loop(&mut self) -> Result<()> {
        // Prime the cumulative baselines so the first real tick has
        // previous samples to delta against.
        let baseline = sensors::collect(&mut self.state.cadence);
        self.state.apply(baseline, 0.0);
        self.render()?;
        tracing::info!("dashboard started");

        let mut last_tick = Instant::now();
        loop {
            let timeout = TICK.saturating_sub(last_tick.elapsed());
            if crossterm::event::poll(timeout)? {
                match crossterm::event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        match self.handle_key(key) {
                            KeyOutcome::Quit => return Ok(()),
                            KeyOutcome::Redraw => self.render()?,
                            KeyOutcome::Continue => {}
                        }
                    }
                    Event::Resize(..) => self.resized = true,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= TICK {
                let elapsed = last_tick.elapsed().as_secs_f64();
                last_tick = Instant::now();

                // The resize flag is consumed at the top of the tick; the
                // layout is recomputed from scratch on the redraw.
                if std::mem::take(&mut self.resized) {
                    self.terminal.clear()?;
                }

                let reading = sensors::collect(&mut self.state.cadence);
                self.state.apply(reading, elapsed);
                self.render()?;
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Quit;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyOutcome::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => {
                self.state.sort = SortMode::Cpu;
                KeyOutcome::Redraw
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.state.sort = SortMode::Memory;
                KeyOutcome::Redraw
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.state.sort = SortMode::Pid;
                KeyOutcome::Redraw
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.state.theme.cycle();
                tracing::info!(theme = ?self.state.theme.kind, "theme cycled");
                KeyOutcome::Redraw
            }
            _ => KeyOutcome::Continue,
        }
    }

    fn render(&mut self) -> Result<()> {
        self.terminal.draw(|frame| {
            Renderer::render(frame, &self.state);
        })?;
        Ok(())
    }
}
