//! Datagram transport between two peers.
//!
//! Provides [`ConnectedPeer`] which handles UDP I/O for message transport.
//! This is a thin layer that just sends/receives encoded messages; all
//! protocol logic remains in the sans-IO [`Session`](crate::Session).
//!
//! The link carries one encoded message per datagram, capped at
//! [`pairlink_proto::MAX_PAYLOAD_SIZE`]. It is deliberately unreliable:
//! datagrams may be lost or reordered, and the session's claim validation
//! absorbs whatever arrives. Malformed inbound datagrams are logged and
//! dropped. Closure of `from_peer` is the single disconnection signal.

use std::net::SocketAddr;

use pairlink_proto::{MAX_PAYLOAD_SIZE, PeerMessage, codec};
use thiserror::Error;
use tokio::{net::UdpSocket, sync::mpsc};

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Binding or addressing the socket failed.
    #[error("link setup failed: {0}")]
    Setup(String),
}

/// Handle to a live peer link.
///
/// Messages are sent/received via the channels; an internal task owns the
/// socket and performs the I/O.
pub struct ConnectedPeer {
    /// Send messages to the peer.
    pub to_peer: mpsc::Sender<PeerMessage>,
    /// Receive messages from the peer.
    pub from_peer: mpsc::Receiver<PeerMessage>,
    /// Abort handle to stop the link task.
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedPeer {
    /// Tear down the link. `from_peer` closes as a result.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

impl Drop for ConnectedPeer {
    fn drop(&mut self) {
        self.abort_handle.abort();
    }
}

/// A bound but not yet connected link socket.
///
/// Splitting bind from connect lets a caller bind to port 0 and learn the
/// assigned address before telling the peer where to connect.
pub struct LinkSocket {
    socket: UdpSocket,
}

impl LinkSocket {
    /// Bind the local end of a link.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Setup`] if the address does not parse or the
    ///   bind fails
    pub async fn bind(bind_addr: &str) -> Result<Self, TransportError> {
        let bind: SocketAddr = bind_addr
            .parse()
            .map_err(|e| TransportError::Setup(format!("invalid bind address: {e}")))?;

        let socket = UdpSocket::bind(bind)
            .await
            .map_err(|e| TransportError::Setup(format!("bind failed: {e}")))?;

        Ok(Self { socket })
    }

    /// Address the socket actually bound to.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Setup`] if the OS cannot report the address
    pub fn local_addr(&self) -> Result<SocketAddr, TransportError> {
        self.socket
            .local_addr()
            .map_err(|e| TransportError::Setup(format!("local address lookup failed: {e}")))
    }

    /// Connect to the peer and spawn the I/O task.
    ///
    /// There is no handshake; the link is "up" as soon as the socket is
    /// connected.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Setup`] if the address does not parse or the
    ///   connect fails
    pub async fn connect(self, peer_addr: &str) -> Result<ConnectedPeer, TransportError> {
        let peer: SocketAddr = peer_addr
            .parse()
            .map_err(|e| TransportError::Setup(format!("invalid peer address: {e}")))?;

        self.socket
            .connect(peer)
            .await
            .map_err(|e| TransportError::Setup(format!("connect failed: {e}")))?;

        let (to_peer_tx, to_peer_rx) = mpsc::channel::<PeerMessage>(32);
        let (from_peer_tx, from_peer_rx) = mpsc::channel::<PeerMessage>(32);

        let handle = tokio::spawn(run_link(self.socket, to_peer_rx, from_peer_tx));

        Ok(ConnectedPeer {
            to_peer: to_peer_tx,
            from_peer: from_peer_rx,
            abort_handle: handle.abort_handle(),
        })
    }
}

/// Open a datagram link to a peer in one step.
///
/// Both sides call this with mirrored addresses. Use [`LinkSocket`] when
/// the local port is assigned by the OS and must be learned first.
///
/// # Errors
///
/// - [`TransportError::Setup`] if the addresses do not parse or the bind
///   fails
pub async fn connect(bind_addr: &str, peer_addr: &str) -> Result<ConnectedPeer, TransportError> {
    LinkSocket::bind(bind_addr).await?.connect(peer_addr).await
}

/// Run the link, bridging between channels and the socket.
///
/// Exits when the outbound channel closes (caller dropped the handle) or
/// the inbound channel closes (caller stopped reading).
async fn run_link(
    socket: UdpSocket,
    mut to_peer: mpsc::Receiver<PeerMessage>,
    from_peer: mpsc::Sender<PeerMessage>,
) {
    let mut buf = [0u8; MAX_PAYLOAD_SIZE];

    loop {
        tokio::select! {
            outgoing = to_peer.recv() => {
                let Some(message) = outgoing else {
                    break;
                };
                send_message(&socket, &message).await;
            },
            inbound = socket.recv(&mut buf) => {
                match inbound {
                    Ok(len) => match codec::decode(&buf[..len]) {
                        Ok(message) => {
                            if from_peer.send(message).await.is_err() {
                                break;
                            }
                        },
                        // Garbage on the wire is dropped, not fatal.
                        Err(e) => tracing::warn!(error = %e, "dropping undecodable datagram"),
                    },
                    Err(e) => {
                        tracing::warn!(error = %e, "link receive failed");
                        break;
                    },
                }
            },
        }
    }
}

/// Encode and send one message as one datagram.
///
/// Send failures are logged and swallowed: a lost datagram and a failed
/// send look the same to the protocol.
async fn send_message(socket: &UdpSocket, message: &PeerMessage) {
    let payload = match codec::encode(message) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode outbound message");
            return;
        },
    };

    if let Err(e) = socket.send(&payload).await {
        tracing::warn!(error = %e, "failed to send datagram");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn messages_cross_the_link() {
        // OS-assigned ports so parallel test runs never collide.
        let a = LinkSocket::bind("127.0.0.1:0").await.unwrap();
        let b = LinkSocket::bind("127.0.0.1:0").await.unwrap();
        let addr_a = a.local_addr().unwrap();
        let addr_b = b.local_addr().unwrap();

        let alice = a.connect(&addr_b.to_string()).await.unwrap();
        let mut bob = b.connect(&addr_a.to_string()).await.unwrap();

        alice.to_peer.send(PeerMessage::GameOver).await.unwrap();

        let received = tokio::time::timeout(std::time::Duration::from_secs(5), bob.from_peer.recv())
            .await
            .expect("message should arrive on loopback");
        assert_eq!(received, Some(PeerMessage::GameOver));
    }

    #[test]
    fn invalid_address_is_a_setup_error() {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let result = runtime.block_on(connect("not-an-address", "127.0.0.1:1"));
        assert!(matches!(result, Err(TransportError::Setup(_))));
    }
}
