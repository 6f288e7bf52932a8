//! Server configuration.

use std::net::SocketAddr;

/// HTTP server configuration. Only read at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The address and port to listen on.
    pub listen: SocketAddr,
}
