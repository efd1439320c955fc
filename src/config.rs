//! Server configuration.
//!
//! Values come from an optional YAML file (path in `BEACON_CONFIG`) with
//! every field defaulted, followed by a handful of environment overrides.

use anyhow::Context;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
}

/// Listening socket settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, all IPv4 interfaces by default.
    pub host: IpAddr,
    pub port: u16,
    /// Pending-connection backlog passed to `listen`.
    pub backlog: u32,
}

/// Where files are served from and the buffer bounds used per request.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Storage root every served path is confined to.
    pub root: PathBuf,
    /// Served for `/` and used as the single-page-application fallback.
    pub index_document: String,
    /// Capacity of the single request read.
    pub recv_buffer_size: usize,
    /// Size of each body chunk read from disk and written to the peer.
    pub chunk_size: usize,
    /// Upper bound for the request path token and the joined sanitized path.
    pub max_path_len: usize,
    /// Refuse to start when the storage root cannot be inspected.
    pub require_storage: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 80,
            backlog: 5,
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/spiffs"),
            index_document: "index.html".to_string(),
            recv_buffer_size: 1024,
            chunk_size: 1024,
            max_path_len: 255,
            require_storage: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StaticConfig {
    /// Full path of the root document, e.g. `/spiffs/index.html`.
    pub fn fallback_path(&self) -> PathBuf {
        self.root.join(&self.index_document)
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `lookup` in place of the environment.
    ///
    /// `BEACON_CONFIG` names a YAML file; `BEACON_LISTEN`, `BEACON_PORT` and
    /// `BEACON_ROOT` override the corresponding values afterwards.
    pub fn load_from<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("BEACON_CONFIG") {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                Self::from_yaml(&raw).with_context(|| format!("invalid config file {path}"))?
            }
            None => Self::default(),
        };

        if let Some(listen) = lookup("BEACON_LISTEN") {
            let addr: SocketAddr = listen
                .parse()
                .with_context(|| format!("BEACON_LISTEN is not a socket address: {listen}"))?;
            cfg.server.host = addr.ip();
            cfg.server.port = addr.port();
        }

        if let Some(port) = lookup("BEACON_PORT") {
            cfg.server.port = port
                .parse()
                .with_context(|| format!("BEACON_PORT is not a port number: {port}"))?;
        }

        if let Some(root) = lookup("BEACON_ROOT") {
            cfg.static_files.root = PathBuf::from(root);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let sf = &self.static_files;
        if sf.recv_buffer_size == 0 {
            anyhow::bail!("static_files.recv_buffer_size must be greater than zero");
        }
        if sf.chunk_size == 0 {
            anyhow::bail!("static_files.chunk_size must be greater than zero");
        }
        if sf.max_path_len == 0 {
            anyhow::bail!("static_files.max_path_len must be greater than zero");
        }
        if sf.index_document.is_empty() || sf.index_document.contains('/') {
            anyhow::bail!("static_files.index_document must be a plain file name");
        }
        Ok(())
    }
}
