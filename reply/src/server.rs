use std::time::{Duration, Instant};
use std::{future::Future, io, net::SocketAddr, sync::Arc};

use bytes::Bytes;
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::codec::Decoder;

use crate::config::Config;
use crate::http::{codec::ConnectionCodec, EncodeOptions, Response};

/// Receives the raw request head and the shared state.
type Handler<S, F> = fn(Bytes, S) -> F;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

pub struct Server<S, F> {
    state: S,
    handler: Handler<S, F>,
    semaphore: Arc<Semaphore>,
    max_connections: usize,
    timeout: Duration,
    max_head_len: usize,
    options: EncodeOptions,
}

impl<S, F> Server<S, F>
where
    S: Clone + Send + Sync + 'static,
    F: Future<Output = Response> + Send + 'static,
{
    pub fn new(config: &Config, state: S, handler: Handler<S, F>) -> Self {
        Self {
            state,
            handler,
            semaphore: Arc::new(Semaphore::new(config.max_connections)),
            max_connections: config.max_connections,
            timeout: config.timeout(),
            max_head_len: config.max_head_len,
            options: config.encode,
        }
    }

    pub async fn bind<A: ToSocketAddrs>(self, addr: A) -> io::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> io::Result<()> {
        let server = Arc::new(self);

        let addr = listener.local_addr()?;
        tracing::info!(target: "listener", ?addr, "server is running");

        let mut now = Instant::now();
        let mut connections = 0usize;

        loop {
            let permit = match Arc::clone(&server.semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return Ok(()),
            };

            let (socket, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    tracing::warn!(target: "listener", %err, "failed to accept connection");
                    drop(permit);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            connections += 1;
            if now.elapsed() > Duration::from_secs(1) {
                tracing::debug!(
                    target: "listener",
                    "{connections}/s with {} connections open",
                    server.open_connections()
                );
                now = Instant::now();
                connections = 0;
            }

            let server = Arc::clone(&server);
            tokio::spawn(server.handle_connection(socket, peer, permit));
        }
    }

    pub fn open_connections(&self) -> usize {
        self.max_connections - self.semaphore.available_permits()
    }

    /// Serves requests until the peer goes away, a response asks to close, or
    /// no complete request head arrives within the idle timeout.
    #[tracing::instrument(skip(self, io, _permit))]
    pub async fn handle_connection<T>(
        self: Arc<Self>,
        io: T,
        peer: SocketAddr,
        _permit: OwnedSemaphorePermit,
    ) where
        T: AsyncRead + AsyncWrite + Unpin,
    {
        let codec = ConnectionCodec::new(self.options).with_max_head_len(self.max_head_len);
        let mut framed = codec.framed(io);

        loop {
            let Ok(next) = tokio::time::timeout(self.timeout, framed.next()).await else {
                tracing::debug!("connection idle for {:?}, closing", self.timeout);
                return;
            };

            let head = match next.transpose() {
                Ok(Some(head)) => head,
                Ok(None) => {
                    tracing::trace!("connection closed by peer");
                    return;
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to read request");
                    return;
                }
            };

            let now = Instant::now();
            let response = (self.handler)(head, self.state.clone()).await;
            let close = response.close_connection();
            tracing::debug!(
                status = response.status().as_u16(),
                close,
                "handled in {:?}, sending response",
                now.elapsed()
            );

            if let Err(err) = framed.send(response).await {
                tracing::warn!(%err, "failed to send response");
                return;
            }

            if close {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::io::Builder;

    use super::*;
    use crate::http::{IntoResponse, StatusCode};

    async fn greet(_head: Bytes, close: bool) -> Response {
        let mut response = (StatusCode::Ok, "hi").into_response();
        response.set_close_connection(close);
        response
    }

    async fn echo_head(head: Bytes, _: ()) -> Response {
        let mut response = Response::new(false);
        response.set_status(StatusCode::Ok);
        response.set_body(head);
        response
    }

    fn server<S, F>(state: S, handler: Handler<S, F>) -> Arc<Server<S, F>>
    where
        S: Clone + Send + Sync + 'static,
        F: Future<Output = Response> + Send + 'static,
    {
        Arc::new(Server::new(&Config::default(), state, handler))
    }

    fn permit<S, F>(server: &Server<S, F>) -> OwnedSemaphorePermit {
        Arc::clone(&server.semaphore).try_acquire_owned().unwrap()
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:4000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_close_after_response() {
        let io = Builder::new()
            .read(b"GET / HTTP/1.1\r\n\r\n")
            .write(b"HTTP/1.1 200 \r\nConnection: close\r\nContent-Type: text/plain; charset=utf-8\r\n\r\nhi")
            .build();

        let server = server(true, greet);
        let permit = permit(&server);
        server.handle_connection(io, peer(), permit).await;
    }

    #[tokio::test]
    async fn test_keep_alive_serves_pipelined_requests() {
        let io = Builder::new()
            .read(b"GET /a HTTP/1.1\r\n\r\nGET /bc HTTP/1.1\r\n\r\n")
            .write(b"HTTP/1.1 200 \r\nContent-Length: 15\r\n\r\nGET /a HTTP/1.1")
            .write(b"HTTP/1.1 200 \r\nContent-Length: 16\r\n\r\nGET /bc HTTP/1.1")
            .build();

        let server = server((), echo_head);
        let permit = permit(&server);
        server.handle_connection(io, peer(), permit).await;
    }

    #[tokio::test]
    async fn test_permit_released_with_connection() {
        let io = Builder::new().build();

        let server = server(true, greet);
        let permit = permit(&server);
        assert_eq!(server.open_connections(), 1);

        Arc::clone(&server).handle_connection(io, peer(), permit).await;
        assert_eq!(server.open_connections(), 0);
    }
}
