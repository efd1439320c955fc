//! Streams a file (or the 404 page) to a connection.
//!
//! ```text
//!   Open ──fail──► Open(fallback) ──fail──► NotFound
//!    │                 │
//!    └──ok──► Headers ◄┘
//!                │
//!                ▼
//!             Stream ──write/read error──► Truncated
//!                │
//!                ▼
//!             Served
//! ```
//!
//! The file handle is owned by [`FileResponder::respond`] and dropped on
//! every path out of it.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWrite};
use tracing::{debug, warn};

use crate::config::StaticConfig;
use crate::http::mime;
use crate::http::response::Response;
use crate::http::writer::{ResponseWriter, write_chunk};

/// What a single call to [`FileResponder::respond`] ended up sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Headers and the whole body reached the peer.
    Served { path: PathBuf, bytes: u64 },
    /// Headers claimed `expected` bytes but only `sent` body bytes went out.
    Truncated {
        path: PathBuf,
        sent: u64,
        expected: u64,
    },
    /// Neither the requested file nor the root document could be opened.
    NotFound,
}

pub struct FileResponder<'a> {
    config: &'a StaticConfig,
}

impl<'a> FileResponder<'a> {
    pub fn new(config: &'a StaticConfig) -> Self {
        Self { config }
    }

    /// Sends `path` to `conn`.
    ///
    /// When `path` cannot be opened and `is_fallback_attempt` is false, the
    /// root document is tried once instead; a failed fallback attempt ends in
    /// the 404 page.
    pub async fn respond<W>(
        &self,
        conn: &mut W,
        path: &Path,
        is_fallback_attempt: bool,
    ) -> ResponseOutcome
    where
        W: AsyncWrite + Unpin,
    {
        let Some((file, path)) = self.open(path, is_fallback_attempt).await else {
            return self.send_not_found(conn).await;
        };

        self.stream_file(conn, file, path).await
    }

    async fn open(&self, path: &Path, is_fallback_attempt: bool) -> Option<(File, PathBuf)> {
        match open_regular(path).await {
            Ok(file) => return Some((file, path.to_path_buf())),
            Err(e) => warn!(path = %path.display(), error = %e, "File not found"),
        }

        if is_fallback_attempt {
            return None;
        }

        let fallback = self.config.fallback_path();
        match open_regular(&fallback).await {
            Ok(file) => Some((file, fallback)),
            Err(e) => {
                warn!(path = %fallback.display(), error = %e, "Fallback document not found");
                None
            }
        }
    }

    async fn stream_file<W>(&self, conn: &mut W, mut file: File, path: PathBuf) -> ResponseOutcome
    where
        W: AsyncWrite + Unpin,
    {
        let expected = match file_length(&mut file).await {
            Ok(len) => len,
            Err(e) => {
                // headers not sent yet
                warn!(path = %path.display(), error = %e, "Unable to size file");
                return self.send_not_found(conn).await;
            }
        };

        let head = Response::file(mime::classify(&path.to_string_lossy()), expected);
        let mut writer = ResponseWriter::new(&head);
        if let Err(e) = writer.write_to_stream(conn).await {
            warn!(path = %path.display(), error = %e, "send error");
            return ResponseOutcome::Truncated {
                path,
                sent: 0,
                expected,
            };
        }

        let mut body = file.take(expected);
        let mut chunk = vec![0u8; self.config.chunk_size];
        let mut sent: u64 = 0;

        loop {
            let n = match body.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "read error");
                    return ResponseOutcome::Truncated {
                        path,
                        sent,
                        expected,
                    };
                }
            };

            if let Err(e) = write_chunk(conn, &chunk[..n]).await {
                warn!(path = %path.display(), sent, expected, error = %e, "send error");
                return ResponseOutcome::Truncated {
                    path,
                    sent,
                    expected,
                };
            }

            sent += n as u64;
            debug!(path = %path.display(), sent, expected, "chunk sent");
        }

        if sent < expected {
            warn!(path = %path.display(), sent, expected, "file shrank while streaming");
            return ResponseOutcome::Truncated {
                path,
                sent,
                expected,
            };
        }

        ResponseOutcome::Served { path, bytes: sent }
    }

    async fn send_not_found<W>(&self, conn: &mut W) -> ResponseOutcome
    where
        W: AsyncWrite + Unpin,
    {
        let mut writer = ResponseWriter::new(&Response::not_found());
        if let Err(e) = writer.write_to_stream(conn).await {
            warn!(error = %e, "send error");
        }
        ResponseOutcome::NotFound
    }
}

/// Opens `path` for reading, refusing directories.
async fn open_regular(path: &Path) -> std::io::Result<File> {
    let file = File::open(path).await?;
    if file.metadata().await?.is_dir() {
        return Err(std::io::Error::other("is a directory"));
    }
    Ok(file)
}

/// Seeks to the end to learn the length, then rewinds.
async fn file_length(file: &mut File) -> anyhow::Result<u64> {
    let len = file
        .seek(SeekFrom::End(0))
        .await
        .context("seek to end failed")?;
    file.seek(SeekFrom::Start(0))
        .await
        .context("rewind failed")?;
    Ok(len)
}
