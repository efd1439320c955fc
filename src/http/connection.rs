use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::http::parser::parse_request_path;
use crate::static_files::{FileResponder, PathSanitizer, ResponseOutcome};

/// One accepted connection, handled from its single read to its close.
pub struct Connection<'a, S> {
    stream: S,
    buffer: BytesMut,
    config: &'a StaticConfig,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Responding(String),
    Closed,
}

impl<'a, S> Connection<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: &'a StaticConfig) -> Self {
        Self {
            stream,
            buffer: BytesMut::zeroed(config.recv_buffer_size),
            config,
            state: ConnectionState::Reading,
        }
    }

    /// Runs the connection to completion and closes it.
    ///
    /// Returns `None` when the peer sent nothing, in which case nothing is
    /// written back.
    pub async fn run(mut self) -> Option<ResponseOutcome> {
        let mut outcome = None;

        loop {
            match &self.state {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await {
                        Some(path) => ConnectionState::Responding(path),
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Responding(requested) => {
                    let safe_path = PathSanitizer::from_config(self.config).sanitize(requested);
                    info!(path = %safe_path.display(), "Serving file");

                    let responder = FileResponder::new(self.config);
                    outcome = Some(responder.respond(&mut self.stream, &safe_path, false).await);
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        self.close().await;
        outcome
    }

    /// Performs the one read and extracts the requested path.
    pub async fn read_request(&mut self) -> Option<String> {
        let n = match self.stream.read(&mut self.buffer[..]).await {
            Ok(0) => {
                debug!("Peer closed before sending a request");
                return None;
            }
            Ok(n) => n,
            Err(e) => {
                debug!(error = %e, "Request read failed");
                return None;
            }
        };
        self.buffer.truncate(n);

        let path = parse_request_path(&self.buffer, self.config.max_path_len);
        info!(path = %path, "Requested");
        Some(path)
    }

    async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown failed");
        }
    }
}
