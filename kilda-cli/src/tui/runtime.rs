//! Single-app runtime: executes commands and feeds messages back into `update`

use crossterm::event::KeyEvent;
use futures::StreamExt;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::Frame;
use tokio::sync::mpsc;

use super::app::App;
use super::command::Command;
use super::state::Theme;
use super::subscription::SubscriptionGroup;

/// Object-safe view of an [`AppRuntime`], used by the multi-app runtime
pub trait Runtime {
    fn title(&self) -> &'static str;
    /// Apply every message that has arrived since the last call
    fn process_pending(&mut self) -> usize;
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);
    fn status(&self) -> Option<Line<'static>>;
    /// `(key, description)` pairs for the help bar
    fn key_hints(&self) -> Vec<(String, String)>;
    /// Returns true when an app shortcut consumed the key
    fn handle_key(&mut self, key: &KeyEvent) -> bool;
    fn quit_requested(&self) -> bool;
    fn teardown(&mut self);
}

pub struct AppRuntime<A: App> {
    state: A::State,
    tx: mpsc::UnboundedSender<A::Msg>,
    rx: mpsc::UnboundedReceiver<A::Msg>,
    subscriptions: SubscriptionGroup,
    quit_requested: bool,
    destroyed: bool,
}

impl<A: App> AppRuntime<A> {
    /// Initialise the app and start its initial command.
    /// Must be called from within a tokio runtime.
    pub fn new(params: A::InitParams) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state, command) = A::init(params);
        let mut runtime = Self {
            state,
            tx,
            rx,
            subscriptions: SubscriptionGroup::default(),
            quit_requested: false,
            destroyed: false,
        };
        log::debug!("Started app '{}'", A::title());
        runtime.execute(command);
        runtime
    }

    pub fn state(&self) -> &A::State {
        &self.state
    }

    pub fn dispatch(&mut self, msg: A::Msg) {
        if self.destroyed {
            return;
        }
        let command = A::update(&mut self.state, msg);
        self.execute(command);
    }

    fn execute(&mut self, command: Command<A::Msg>) {
        match command {
            Command::None => {}
            Command::Batch(commands) => {
                for command in commands {
                    self.execute(command);
                }
            }
            Command::Perform(future) => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let msg = future.await;
                    // Receiver gone means the app was torn down meanwhile
                    let _ = tx.send(msg);
                });
            }
            Command::Listen { key, mut stream } => {
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    while let Some(msg) = stream.next().await {
                        if tx.send(msg).is_err() {
                            break;
                        }
                    }
                });
                self.subscriptions.insert(key, handle.abort_handle());
            }
            Command::Cancel(key) => {
                if !self.subscriptions.cancel(&key) {
                    log::debug!("No listener '{}' to cancel", key);
                }
            }
            Command::QuitSelf => self.quit_requested = true,
        }
    }

    pub fn has_listener(&self, key: &str) -> bool {
        self.subscriptions.contains(key)
    }

    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Wait for the next message from a command or listener
    pub async fn next_message(&mut self) -> Option<A::Msg> {
        self.rx.recv().await
    }

    /// Dispatch messages until none arrives for `idle`
    #[cfg(test)]
    pub async fn settle(&mut self, idle: std::time::Duration) {
        while let Ok(Some(msg)) = tokio::time::timeout(idle, self.next_message()).await {
            self.dispatch(msg);
        }
    }
}

impl<A: App> Runtime for AppRuntime<A> {
    fn title(&self) -> &'static str {
        A::title()
    }

    fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.dispatch(msg);
            processed += 1;
        }
        processed
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        A::view(&self.state, frame, area, theme);
    }

    fn status(&self) -> Option<Line<'static>> {
        A::status(&self.state)
    }

    fn key_hints(&self) -> Vec<(String, String)> {
        A::subscriptions(&self.state)
            .into_iter()
            .map(|sub| (sub.binding.label(), sub.description))
            .collect()
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let msg = A::subscriptions(&self.state)
            .into_iter()
            .find(|sub| sub.binding.matches(key))
            .map(|sub| sub.msg);

        match msg {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn teardown(&mut self) {
        if self.destroyed {
            return;
        }
        let command = A::on_destroy(&mut self.state);
        self.execute(command);
        self.subscriptions.dispose();
        self.destroyed = true;
        log::debug!("Tore down app '{}'", A::title());
    }
}
