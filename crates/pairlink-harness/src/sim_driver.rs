//! Scripted driver for running the full app runtime in simulation.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use pairlink_app::{App, AppEvent, CardView, Driver};
use pairlink_proto::PeerMessage;
use thiserror::Error;

use crate::SimEnv;

/// Errors from the simulated driver.
///
/// The driver itself never fails; the type exists to satisfy the trait.
#[derive(Debug, Error)]
pub enum SimDriverError {
    /// Placeholder. Never constructed.
    #[error("simulated driver failure")]
    Simulated,
}

/// Observable side of a [`SimDriver`], shared with the test.
///
/// The runtime consumes the driver, so tests keep this handle to inspect
/// what the driver saw and sent.
#[derive(Default)]
pub struct SimState {
    /// Messages the runtime sent to the peer.
    pub sent: Vec<PeerMessage>,
    /// Messages queued for the runtime to receive.
    pub inbound: VecDeque<PeerMessage>,
    /// Whether the peer link is up.
    pub linked: bool,
    /// Render count.
    pub renders: usize,
    /// Board view from the most recent render.
    pub last_view: Vec<CardView>,
    /// Log line count from the most recent render.
    pub log_len: usize,
    /// In-memory save slot.
    pub save: Option<String>,
    /// Whether the runtime called `stop`.
    pub stopped: bool,
}

/// Scripted [`Driver`] implementation over virtual time.
///
/// Each `poll_event` advances the shared clock by one tick and yields the
/// next scripted event. When the script runs out, it yields `Tick` until
/// the runtime quits; scripts therefore end with a quit key.
pub struct SimDriver {
    env: SimEnv,
    script: VecDeque<AppEvent>,
    tick: Duration,
    state: Arc<Mutex<SimState>>,
}

/// Create a driver and the shared state handle to observe it with.
#[must_use]
pub fn new_sim_driver(
    env: SimEnv,
    script: Vec<AppEvent>,
) -> (SimDriver, Arc<Mutex<SimState>>) {
    let state = Arc::new(Mutex::new(SimState::default()));
    let driver = SimDriver {
        env,
        script: script.into(),
        tick: Duration::from_millis(100),
        state: Arc::clone(&state),
    };
    (driver, state)
}

impl SimDriver {
    #[allow(clippy::expect_used)]
    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().expect("invariant: sim state lock is never poisoned")
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = Duration;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        self.env.advance(self.tick);
        Ok(Some(self.script.pop_front().unwrap_or(AppEvent::Tick)))
    }

    async fn send_message(&mut self, message: PeerMessage) -> Result<(), Self::Error> {
        self.state().sent.push(message);
        Ok(())
    }

    async fn recv_message(&mut self) -> Option<PeerMessage> {
        self.state().inbound.pop_front()
    }

    fn is_linked(&self) -> bool {
        self.state().linked
    }

    fn now(&self) -> Duration {
        use pairlink_core::Environment as _;
        self.env.now()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let mut state = self.state();
        state.renders += 1;
        state.last_view = app.cards().to_vec();
        state.log_len = app.log().len();
        Ok(())
    }

    fn write_save(&mut self, json: &str) -> Result<(), Self::Error> {
        self.state().save = Some(json.to_string());
        Ok(())
    }

    fn read_save(&mut self) -> Result<Option<String>, Self::Error> {
        Ok(self.state().save.clone())
    }

    fn stop(&mut self) {
        self.state().stopped = true;
    }
}
