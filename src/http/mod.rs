//! HTTP protocol implementation.
//!
//! Just enough HTTP/1.1 to hand out files: one request per connection, only
//! the request line is read, and every response closes the connection.
//!
//! # Architecture
//!
//! - **`connection`**: drives one connection through read, respond and close
//! - **`parser`**: pulls the path token out of the request line
//! - **`response`**: status codes and the response head
//! - **`writer`**: serializes responses and writes them across short writes
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Single read of the request
//!        └──────┬──────┘
//!               │ Path extracted        (0 bytes / error → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Responding     │ ← Sanitize, open, stream or 404
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Shutdown and drop the stream
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use beacon::config::StaticConfig;
//! use beacon::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let cfg = StaticConfig::default();
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         Connection::new(socket, &cfg).run().await;
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod response;
pub mod writer;
