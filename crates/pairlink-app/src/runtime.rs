//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Session bridge to game logic
//! - [`Driver`]: Platform-specific I/O

use pairlink_core::Environment;

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// Generic runtime that orchestrates App, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment for time and shuffle randomness
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    app: App,
    bridge: Bridge<E>,
}

impl<D, E> Runtime<D, E>
where
    D: Driver<Instant = E::Instant>,
    E: Environment,
{
    /// Create a new runtime with the given driver and environment.
    pub fn new(driver: D, env: E, player_name: String) -> Self {
        let app = App::new(player_name.clone());
        let bridge = Bridge::new(env, player_name);
        Self { driver, app, bridge }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Polls for input events from the driver
    /// 2. Receives messages from the peer link
    /// 3. Processes actions and events between App and Bridge
    /// 4. Sends outgoing messages through the driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;
        if self.driver.is_linked() {
            let actions = self.app.handle(AppEvent::LinkUp);
            if self.process_actions(actions).await? {
                self.driver.stop();
                return Ok(());
            }
        }

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        if let Some(event) = self.driver.poll_event().await? {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }

        if self.driver.is_linked()
            && let Some(message) = self.driver.recv_message().await
        {
            let events = self.bridge.handle_message(message);
            self.send_outgoing().await?;
            if self.process_bridge_events(events).await? {
                return Ok(true);
            }
        }

        let now = self.driver.now();
        let events = self.bridge.handle_tick(now);
        self.send_outgoing().await?;
        if self.process_bridge_events(events).await? {
            return Ok(true);
        }

        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::ExportSave => {
                        pending_actions.extend(self.export_save()?);
                    },
                    AppAction::ImportSave => {
                        pending_actions.extend(self.import_save()?);
                    },

                    // Game operations go through the bridge
                    AppAction::StartGame { .. } | AppAction::FlipCard { .. } => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            let new_actions = self.app.handle(event);
                            pending_actions.extend(new_actions);
                        }
                        self.send_outgoing().await?;
                    },
                }
            }
        }
        Ok(false)
    }

    /// Export the current game through the driver's save store.
    fn export_save(&mut self) -> Result<Vec<AppAction>, D::Error> {
        match self.bridge.export_json() {
            Ok(json) => {
                self.driver.write_save(&json)?;
                Ok(self.app.handle(AppEvent::Notice { message: "game exported".into() }))
            },
            Err(e) => Ok(self.app.handle(AppEvent::Error { message: e.to_string() })),
        }
    }

    /// Import a game from the driver's save store.
    fn import_save(&mut self) -> Result<Vec<AppAction>, D::Error> {
        let Some(json) = self.driver.read_save()? else {
            return Ok(self.app.handle(AppEvent::Error { message: "no save to import".into() }));
        };

        let mut actions = Vec::new();
        for event in self.bridge.import_json(&json) {
            actions.extend(self.app.handle(event));
        }
        Ok(actions)
    }

    /// Process events from Bridge back to App.
    async fn process_bridge_events(&mut self, events: Vec<AppEvent>) -> Result<bool, D::Error> {
        for event in events {
            let actions = self.app.handle(event);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Send all pending outgoing messages to the peer.
    ///
    /// Messages queued while the link is down are dropped; the link is
    /// unreliable by contract and the session never depends on delivery.
    async fn send_outgoing(&mut self) -> Result<(), D::Error> {
        let messages = self.bridge.take_outgoing();
        if !self.driver.is_linked() {
            if !messages.is_empty() {
                tracing::warn!(count = messages.len(), "dropping outgoing messages, link down");
            }
            return Ok(());
        }
        for message in messages {
            self.driver.send_message(message).await?;
        }
        Ok(())
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Bridge
    pub fn bridge(&self) -> &Bridge<E> {
        &self.bridge
    }
}
