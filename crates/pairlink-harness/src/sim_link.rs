//! In-memory lossy link between two peers.

use std::collections::VecDeque;

use pairlink_proto::{PeerMessage, codec};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Which end of the link a peer sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    /// The side that started the peer game.
    Host,
    /// The side that received the deck.
    Guest,
}

/// Simulated unreliable link.
///
/// Every message goes through the real wire codec, so an encoding bug
/// surfaces in simulation exactly as it would on a device. Loss decisions
/// come from a seeded RNG: the same seed drops the same messages.
///
/// There is no delivery order guarantee beyond FIFO per direction; loss is
/// the only fault injected, matching the link contract the session is
/// written against.
pub struct LossyLink {
    loss: f64,
    rng: ChaCha8Rng,
    host_to_guest: VecDeque<PeerMessage>,
    guest_to_host: VecDeque<PeerMessage>,
    delivered: usize,
    dropped: usize,
}

impl LossyLink {
    /// Create a link that drops each message with probability `loss`.
    #[must_use]
    pub fn new(seed: u64, loss: f64) -> Self {
        Self {
            loss,
            rng: ChaCha8Rng::seed_from_u64(seed),
            host_to_guest: VecDeque::new(),
            guest_to_host: VecDeque::new(),
            delivered: 0,
            dropped: 0,
        }
    }

    /// A perfectly reliable link.
    #[must_use]
    pub fn lossless() -> Self {
        Self::new(0, 0.0)
    }

    /// Send a message from one end.
    ///
    /// The message is encoded and decoded through the wire codec before
    /// queueing. A message the codec rejects is treated as dropped.
    pub fn send(&mut self, from: End, message: &PeerMessage) {
        if self.loss > 0.0 && self.rng.gen_bool(self.loss) {
            self.dropped += 1;
            return;
        }

        let decoded = codec::encode(message).and_then(|bytes| codec::decode(&bytes));
        match decoded {
            Ok(message) => {
                self.delivered += 1;
                match from {
                    End::Host => self.host_to_guest.push_back(message),
                    End::Guest => self.guest_to_host.push_back(message),
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "codec rejected simulated message");
                self.dropped += 1;
            },
        }
    }

    /// Take the next message waiting at one end.
    pub fn recv(&mut self, at: End) -> Option<PeerMessage> {
        match at {
            End::Host => self.guest_to_host.pop_front(),
            End::Guest => self.host_to_guest.pop_front(),
        }
    }

    /// Messages delivered so far.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Messages dropped so far.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Whether both directions are drained.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.host_to_guest.is_empty() && self.guest_to_host.is_empty()
    }
}
