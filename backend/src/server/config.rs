//! Runtime settings and the server configuration derived from them.
//!
//! Settings are layered by `ortho_config`: CLI flags, then `ROSTER_*`
//! environment variables, then an optional config file.

use std::io;
use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use roster::outbound::persistence::DEFAULT_MONGO_URI;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Raw settings loaded at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct AppSettings {
    /// Store users in MongoDB instead of process memory.
    #[ortho_config(default = false)]
    pub use_mongo: bool,
    /// MongoDB connection string; only read when `use_mongo` is set.
    pub mongo_uri: Option<String>,
    /// Listener port.
    pub port: Option<u16>,
    /// Listener address.
    pub host: Option<String>,
}

impl AppSettings {
    pub fn mongo_uri(&self) -> &str {
        self.mongo_uri.as_deref().unwrap_or(DEFAULT_MONGO_URI)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Resolve the listener address.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        let host: IpAddr = self.host().parse().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listener host {:?}: {err}", self.host()),
            )
        })?;
        Ok(SocketAddr::new(host, self.port()))
    }
}

/// Storage backend chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    Mongo { uri: String },
}

impl StorageBackend {
    /// Short name used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InMemory => "memory",
            Self::Mongo { .. } => "mongodb",
        }
    }
}

/// Everything `create_server` needs.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) backend: StorageBackend,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, backend: StorageBackend) -> Self {
        Self { bind_addr, backend }
    }

    /// Derive the server configuration from loaded settings.
    ///
    /// # Errors
    /// Propagates [`AppSettings::bind_addr`] failures.
    pub fn from_settings(settings: &AppSettings) -> io::Result<Self> {
        let backend = if settings.use_mongo {
            StorageBackend::Mongo {
                uri: settings.mongo_uri().to_owned(),
            }
        } else {
            StorageBackend::InMemory
        };
        Ok(Self::new(settings.bind_addr()?, backend))
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[must_use]
    pub fn backend(&self) -> &StorageBackend {
        &self.backend
    }
}
