use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{info, warn};

use crate::config::{Config, ServerConfig, StaticConfig};
use crate::http::connection::Connection;

/// Binds the listener and serves connections forever.
///
/// Only setup failures return; they are fatal to the serving task.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = bind(&cfg.server)?;
    accept_loop(listener, &cfg.static_files).await
}

/// Creates the listening socket with address reuse enabled.
pub fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let addr = cfg.socket_addr();

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .context("Unable to create socket")?;

    socket
        .set_reuseaddr(true)
        .context("Unable to enable address reuse")?;
    socket
        .bind(addr)
        .with_context(|| format!("Socket unable to bind {addr}"))?;
    let listener = socket
        .listen(cfg.backlog)
        .context("Error during listen")?;

    info!("HTTP server listening on {}", addr);
    Ok(listener)
}

/// Accepts connections one at a time, handling each before the next accept.
pub async fn accept_loop(listener: TcpListener, cfg: &StaticConfig) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "Unable to accept connection");
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let outcome = Connection::new(socket, cfg).run().await;
        tracing::debug!(%peer, ?outcome, "Connection closed");
    }
}
