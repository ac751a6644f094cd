//! Pluggable transport for dispatched calls
//!
//! The dispatcher hands a serialized request to a [`Transport`] and
//! gets back either a raw response body or nothing. `Ok(None)` means
//! "no reply" and is a valid outcome: the pipeline treats it as
//! notification semantics (no result, no error). A transport that
//! considers missing data a fault reports a [`TransportError`] instead;
//! those propagate to callers unchanged.
//!
//! Exactly one `send` happens per dispatched call. Retries, timeouts
//! and pooling are transport concerns, not the dispatcher's.
//!
//! # Implementing a Transport
//!
//! ```rust
//! use async_trait::async_trait;
//! use remit_client::Transport;
//! use remit_core::TransportResult;
//!
//! struct Loopback;
//!
//! #[async_trait]
//! impl Transport for Loopback {
//!     async fn send(&self, request: &str) -> TransportResult<Option<String>> {
//!         let _ = request;
//!         Ok(None) // never replies
//!     }
//! }
//! ```

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use remit_core::{TransportError, TransportResult};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// Collaborator that carries one serialized request to the server
///
/// Implementations must be shareable across concurrent calls; interior
/// mutability (a lock around the connection) is the usual shape.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transmit a serialized request, returning the raw response body
    ///
    /// `Ok(None)` signals that no reply is coming. Failures are
    /// transport-level and reach the caller unwrapped.
    async fn send(&self, request: &str) -> TransportResult<Option<String>>;
}

// Allows sharing one transport between a caller and other owners
#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: &str) -> TransportResult<Option<String>> {
        (**self).send(request).await
    }
}

/// WebSocket transport
///
/// Performs one request/response round trip per `send`, holding the
/// connection lock for the whole exchange so replies cannot interleave
/// between concurrent calls. An empty text frame from the peer maps to
/// "no reply"; a close frame or EOF maps to [`TransportError::Closed`].
///
/// # Examples
///
/// ```rust,no_run
/// use remit_client::WsTransport;
///
/// # async fn example() -> remit_core::TransportResult<()> {
/// let transport = WsTransport::connect("ws://localhost:8080").await?;
/// # Ok(())
/// # }
/// ```
pub struct WsTransport {
    stream: Mutex<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl WsTransport {
    /// Connect to a WebSocket endpoint
    #[tracing::instrument(skip(url), fields(url = url))]
    pub async fn connect(url: &str) -> TransportResult<Self> {
        tracing::info!("Connecting to server");
        let (stream, _) = connect_async(url)
            .await
            .map_err(|e| TransportError::Other(e.to_string()))?;
        tracing::info!("Connected successfully");
        Ok(Self {
            stream: Mutex::new(stream),
        })
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn send(&self, request: &str) -> TransportResult<Option<String>> {
        let mut stream = self.stream.lock().await;
        stream
            .send(Message::Text(request.to_string()))
            .await
            .map_err(|e| TransportError::Other(e.to_string()))?;

        loop {
            match stream.next().await {
                Some(Ok(Message::Text(body))) => {
                    return if body.is_empty() {
                        Ok(None)
                    } else {
                        Ok(Some(body))
                    };
                }
                // Control frames between request and reply are skipped
                Some(Ok(Message::Ping(_)))
                | Some(Ok(Message::Pong(_)))
                | Some(Ok(Message::Binary(_)))
                | Some(Ok(Message::Frame(_))) => continue,
                Some(Ok(Message::Close(_))) | None => return Err(TransportError::Closed),
                Some(Err(e)) => return Err(TransportError::Other(e.to_string())),
            }
        }
    }
}
