//! Simulated environment with virtual time and seeded randomness.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use pairlink_core::Environment;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic environment for simulation.
///
/// Time is a [`Duration`] since simulation start and only moves when
/// [`advance`](SimEnv::advance) is called. Randomness comes from a ChaCha8
/// stream seeded at construction, so the same seed replays the same decks.
///
/// Clones share the same clock and RNG stream.
#[derive(Clone)]
pub struct SimEnv {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    now: Duration,
    rng: ChaCha8Rng,
}

impl SimEnv {
    /// Create a simulated environment from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let inner = Inner { now: Duration::ZERO, rng: ChaCha8Rng::seed_from_u64(seed) };
        Self { inner: Arc::new(Mutex::new(inner)) }
    }

    /// Move the virtual clock forward.
    pub fn advance(&self, duration: Duration) {
        self.lock().now += duration;
    }

    #[allow(clippy::expect_used)]
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("invariant: sim env lock is never poisoned")
    }
}

impl Environment for SimEnv {
    type Instant = Duration;

    fn now(&self) -> Duration {
        self.lock().now
    }

    fn sleep(&self, _duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        // Virtual time only advances explicitly.
        std::future::ready(())
    }

    fn random_bytes(&self, buffer: &mut [u8]) {
        self.lock().rng.fill_bytes(buffer);
    }
}
