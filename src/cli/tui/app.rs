use std::time::Duration;

use ratatui::{
    backend::Backend,
    crossterm::event::{self, Event, KeyEventKind},
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time;

use crate::orchestrator::{dispatch, Orchestrator};
use crate::Result;

use super::events::{action_for_key, AppEvent};
use super::theme::Theme;
use super::view;

const FRAME_INTERVAL: Duration = Duration::from_millis(80);
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Interactive module browser
pub struct App {
    orchestrator: Orchestrator,
    theme: Theme,
    /// Spinner frame counter, advanced on ticks while busy
    spinner: usize,
    /// Redraw on the next loop iteration
    dirty: bool,
}

impl App {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            theme: Theme::default(),
            spinner: 0,
            dirty: true,
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Run the application until the user quits
    pub async fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        // Input reader exits once the loop drops its receiver
        let input_tx = event_tx.clone();
        tokio::task::spawn_blocking(move || read_input(input_tx));

        // Everything fallible runs before the terminal is restored
        let result = self.session(&mut terminal, &mut event_rx, &event_tx).await;

        ratatui::restore();
        result
    }

    async fn session<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        event_rx: &mut UnboundedReceiver<AppEvent>,
        event_tx: &UnboundedSender<AppEvent>,
    ) -> Result<()> {
        terminal.clear()?;

        loop {
            if self.dirty {
                terminal.draw(|frame| {
                    view::render(frame, &self.orchestrator, &self.theme, self.spinner)
                })?;
                self.dirty = false;
            }

            match time::timeout(FRAME_INTERVAL, event_rx.recv()).await {
                Ok(Some(event)) => self.handle_event(event, event_tx),
                Ok(None) => break, // Channel closed
                Err(_) => self.handle_event(AppEvent::Tick, event_tx),
            }

            if self.orchestrator.should_quit() {
                break;
            }
        }

        Ok(())
    }

    /// Apply one event. Operations started by input are dispatched here.
    pub fn handle_event(&mut self, event: AppEvent, event_tx: &UnboundedSender<AppEvent>) {
        match event {
            AppEvent::Key(key) => {
                if let Some(action) = action_for_key(&key) {
                    if let Some(operation) = self.orchestrator.handle(action) {
                        dispatch(operation, event_tx.clone());
                    }
                    self.dirty = true;
                }
            }
            AppEvent::Resize(_, _) => self.dirty = true,
            AppEvent::OperationComplete(completion) => {
                self.orchestrator.complete(completion);
                self.dirty = true;
            }
            AppEvent::Tick => {
                if !self.orchestrator.is_idle() {
                    self.spinner = self.spinner.wrapping_add(1);
                    self.dirty = true;
                }
            }
        }
    }
}

/// Forward terminal input until the receiving side goes away
fn read_input(tx: UnboundedSender<AppEvent>) {
    while !tx.is_closed() {
        match event::poll(INPUT_POLL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                tracing::warn!(error = %e, "Terminal input failed");
                break;
            }
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let _ = tx.send(AppEvent::Key(key));
            }
            Ok(Event::Resize(width, height)) => {
                let _ = tx.send(AppEvent::Resize(width, height));
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Terminal input failed");
                break;
            }
        }
    }
}
