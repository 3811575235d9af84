//! Line-oriented connection to the peer.
//!
//! The host dials with [`dial`]; the guest binds a [`GuestListener`] and
//! accepts exactly one connection. Both end up with a [`Connection`] that
//! sends and receives one message per line.

use crate::error::DuelError;
use crate::wire::{MAX_LINE_LEN, WireError};
use derive_getters::Getters;
use derive_new::new;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, instrument, warn};

/// Address and port of a peer or a listening socket.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Endpoint {
    /// Host name or IP address.
    address: String,
    /// TCP port.
    port: u16,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

/// One established connection to the peer.
///
/// Exactly one logical message is in flight at a time; every
/// [`send`](Self::send) on one side pairs with one
/// [`receive`](Self::receive) on the other.
#[derive(Debug)]
pub struct Connection<S> {
    stream: BufReader<S>,
    peer_timeout: Option<Duration>,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Connection<S> {
    /// Wraps an already connected stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
            peer_timeout: None,
        }
    }

    /// Bounds every [`receive`](Self::receive); `None` waits forever.
    pub fn with_peer_timeout(mut self, peer_timeout: Option<Duration>) -> Self {
        self.peer_timeout = peer_timeout;
        self
    }

    /// Sends one message.
    #[instrument(skip(self))]
    pub async fn send(&mut self, text: &str) -> Result<(), DuelError> {
        if text.contains(['\n', '\r']) {
            return Err(WireError::EmbeddedNewline.into());
        }
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');

        let writer = self.stream.get_mut();
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(DuelError::from_stream)?;
        writer.flush().await.map_err(DuelError::from_stream)?;
        debug!("Sent message");
        Ok(())
    }

    /// Receives one message, without its line terminator.
    ///
    /// # Errors
    ///
    /// - [`DuelError::ConnectionLost`] if the peer closed the stream
    /// - [`DuelError::PeerTimeout`] if the configured limit elapsed
    /// - [`DuelError::ProtocolViolation`] for oversized or non-UTF-8 lines
    #[instrument(skip(self))]
    pub async fn receive(&mut self) -> Result<String, DuelError> {
        match self.peer_timeout {
            Some(limit) => tokio::time::timeout(limit, self.read_line())
                .await
                .map_err(|_| {
                    warn!(seconds = limit.as_secs(), "Peer timed out");
                    DuelError::PeerTimeout(limit.as_secs())
                })?,
            None => self.read_line().await,
        }
    }

    async fn read_line(&mut self) -> Result<String, DuelError> {
        let mut line = String::new();
        // One spare byte for '\n', one more to detect an overlong line.
        let limit = (MAX_LINE_LEN + 2) as u64;
        let read = (&mut self.stream)
            .take(limit)
            .read_line(&mut line)
            .await
            .map_err(DuelError::from_stream)?;

        if read == 0 {
            info!("Peer closed the connection");
            return Err(DuelError::ConnectionLost);
        }
        if !line.ends_with('\n') {
            if line.len() > MAX_LINE_LEN {
                return Err(WireError::LineTooLong.into());
            }
            info!("Peer closed the connection mid-message");
            return Err(DuelError::ConnectionLost);
        }

        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
        if line.len() > MAX_LINE_LEN {
            return Err(WireError::LineTooLong.into());
        }
        debug!(message = %line, "Received message");
        Ok(line)
    }
}

/// Connects to a listening guest.
///
/// A refused or timed-out attempt maps to [`DuelError::ConnectionRefused`],
/// which the caller may retry.
#[instrument(skip_all, fields(endpoint = %endpoint))]
pub async fn dial(
    endpoint: &Endpoint,
    connect_timeout: Duration,
) -> Result<Connection<TcpStream>, DuelError> {
    info!("Dialing guest");
    let attempt = TcpStream::connect((endpoint.address().as_str(), *endpoint.port()));
    let stream = match tokio::time::timeout(connect_timeout, attempt).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::ConnectionRefused => {
            warn!(error = %e, "Connection refused");
            return Err(DuelError::ConnectionRefused(endpoint.to_string()));
        }
        Ok(Err(e)) => {
            warn!(error = %e, "Connection failed");
            return Err(DuelError::Io(e));
        }
        Err(_) => {
            warn!(seconds = connect_timeout.as_secs(), "Connection attempt timed out");
            return Err(DuelError::ConnectionRefused(endpoint.to_string()));
        }
    };
    stream.set_nodelay(true).map_err(DuelError::Io)?;
    info!(peer = ?stream.peer_addr().ok(), "Connected to guest");
    Ok(Connection::new(stream))
}

/// Listening socket on the guest side.
#[derive(Debug)]
pub struct GuestListener {
    listener: TcpListener,
}

impl GuestListener {
    /// Binds and listens on `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`DuelError::BindOrListen`], which is fatal.
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn bind(endpoint: &Endpoint) -> Result<Self, DuelError> {
        let listener = TcpListener::bind((endpoint.address().as_str(), *endpoint.port()))
            .await
            .map_err(|source| DuelError::BindOrListen {
                address: endpoint.to_string(),
                source,
            })?;
        info!(local = ?listener.local_addr().ok(), "Listening for host");
        Ok(Self { listener })
    }

    /// Address actually bound (useful when port 0 was requested).
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, DuelError> {
        self.listener.local_addr().map_err(DuelError::Io)
    }

    /// Accepts the single host connection and closes the listener.
    #[instrument(skip(self))]
    pub async fn accept_one(self) -> Result<Connection<TcpStream>, DuelError> {
        let (stream, peer) = self.listener.accept().await.map_err(DuelError::Io)?;
        stream.set_nodelay(true).map_err(DuelError::Io)?;
        info!(%peer, "Host connected");
        Ok(Connection::new(stream))
    }
}
