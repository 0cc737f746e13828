//! Server settings, injected as `Options<ServerSettings>`.

use std::net::SocketAddr;

use serde::Serialize;

use crate::ServiceCollection;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    /// Parses `host:port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    fn check(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host cannot be empty".to_string());
        }
        self.socket_addr()
            .map(|_| ())
            .map_err(|e| format!("{}:{} is not a socket address: {e}", self.host, self.port))
    }
}

/// Registers `settings` as validated `Options<ServerSettings>`.
pub fn add_server_settings(services: &mut ServiceCollection, settings: ServerSettings) -> &mut ServiceCollection {
    services
        .add_options::<ServerSettings>()
        .default_with(move || settings.clone())
        .validate(ServerSettings::check)
        .register()
}
