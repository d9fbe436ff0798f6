//! Dial parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The dial parameters for one query.
///
/// Handlers forward these to the platform's connect primitive as given: nothing
/// is validated or defaulted, and absent timeouts mean the platform's own
/// behaviour applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Remote host name or address literal.
    pub host: String,

    /// Remote port.
    pub port: u16,

    /// Local address to bind before connecting.
    /// `None` = chosen by the platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_host: Option<String>,

    /// Local port to bind before connecting.
    /// `None` = ephemeral
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_port: Option<u16>,

    /// Connection establishment timeout.
    /// `None` = platform default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<Duration>,

    /// Socket read timeout.
    /// `None` = block until the peer closes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout: Option<Duration>,
}

impl ConnectionParams {
    /// Parameters for `host:port` with no extra dial options.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            local_host: None,
            local_port: None,
            connect_timeout: None,
            read_timeout: None,
        }
    }

    /// Start building parameters for `host:port`.
    #[must_use]
    pub fn builder(host: impl Into<String>, port: u16) -> ConnectionParamsBuilder {
        ConnectionParamsBuilder {
            params: Self::new(host, port),
        }
    }

    /// Whether a local bind source was requested.
    #[must_use]
    pub const fn binds_locally(&self) -> bool {
        self.local_host.is_some() || self.local_port.is_some()
    }

    /// The remote endpoint as `host:port`, bracketing IPv6 literals.
    #[must_use]
    pub fn endpoint(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Builder for [`ConnectionParams`].
#[derive(Debug)]
pub struct ConnectionParamsBuilder {
    params: ConnectionParams,
}

impl ConnectionParamsBuilder {
    /// Set the local address to bind before connecting
    #[must_use]
    pub fn local_host(mut self, host: impl Into<String>) -> Self {
        self.params.local_host = Some(host.into());
        self
    }

    /// Set the local port to bind before connecting
    #[must_use]
    pub fn local_port(mut self, port: u16) -> Self {
        self.params.local_port = Some(port);
        self
    }

    /// Set connection timeout
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.params.connect_timeout = Some(timeout);
        self
    }

    /// Set read timeout
    #[must_use]
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.params.read_timeout = Some(timeout);
        self
    }

    /// Build the parameters
    #[must_use]
    pub fn build(self) -> ConnectionParams {
        self.params
    }
}
