//! Static configuration, loaded once at process start.
//!
//! The configuration is a JSON object. Every field has a default, so a file
//! only needs the values that differ (typically `host` and the token parts).

use crate::core::{
    domain::{
        error::{DashError, DashResult, ValidationError},
        model::proxmox_connection::ProxmoxConnection,
        value_object::{
            ProxmoxApiToken, ProxmoxHost, ProxmoxPort, validate_api_token, validate_host,
            validate_port,
        },
    },
    infrastructure::api_client::DEFAULT_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Locations searched, in order, when no path is given explicitly.
pub const CONFIG_PATHS: [&str; 2] = ["config.json", "/opt/lxcdash/config.json"];

/// How guests are listed and how action targets are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterMode {
    /// List via `/cluster/resources` and look up each guest's host node.
    #[default]
    Cluster,
    /// List via `/nodes/{node}/...` and send every action to one node.
    SingleNode,
}

/// Dashboard configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Proxmox API host.
    pub host: String,
    /// Proxmox API port.
    pub port: u16,
    /// Token owner, `name@realm`.
    pub user: String,
    /// Token id.
    pub token_id: String,
    /// Token secret.
    pub token_secret: String,
    /// Verify the Proxmox TLS certificate.
    pub verify_tls: bool,
    /// Fixed node name. Empty or absent means auto-detect.
    pub node: Option<String>,
    /// Listing/resolution mode.
    pub mode: ClusterMode,
    /// Address the dashboard listens on.
    pub bind: String,
    /// Port the dashboard listens on.
    pub listen_port: u16,
    /// Upper bound for every upstream call, in seconds.
    pub timeout_secs: u64,
    /// Directory with the browser front end, served at `/`.
    pub web_dir: Option<PathBuf>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8006,
            user: "root@pam".to_string(),
            token_id: "lxcdash".to_string(),
            token_secret: String::new(),
            verify_tls: false,
            node: None,
            mode: ClusterMode::Cluster,
            bind: "127.0.0.1".to_string(),
            listen_port: 3000,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            web_dir: None,
        }
    }
}

impl DashConfig {
    /// Loads the configuration from `explicit`, or from the first existing
    /// entry of [`CONFIG_PATHS`].
    ///
    /// # Errors
    /// Returns `DashError::Config` if no file is found, the file cannot be read
    /// or is malformed, and `DashError::Validation` if a value is invalid.
    pub async fn load(explicit: Option<&Path>) -> DashResult<(Self, PathBuf)> {
        if let Some(path) = explicit {
            return Ok((Self::from_path(path).await?, path.to_path_buf()));
        }

        for candidate in CONFIG_PATHS {
            let path = PathBuf::from(candidate);
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Ok((Self::from_path(&path).await?, path));
            }
            debug!(path = %path.display(), "no configuration file here");
        }

        Err(DashError::Config(format!(
            "No configuration file found (looked in {})",
            CONFIG_PATHS.join(", ")
        )))
    }

    /// Reads and validates the configuration file at `path`.
    pub async fn from_path(path: &Path) -> DashResult<Self> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            DashError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text).map_err(|e| match e {
            DashError::Config(msg) => DashError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parses and validates a configuration document.
    pub fn from_json(text: &str) -> DashResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| DashError::Config(format!("Malformed configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value that the dashboard relies on at runtime.
    pub fn validate(&self) -> DashResult<()> {
        validate_host(&self.host)?;
        validate_port("port", self.port)?;
        validate_api_token(&self.user, &self.token_id, &self.token_secret)?;
        validate_port("listen_port", self.listen_port)?;
        self.bind_ip()?;
        if self.timeout_secs == 0 {
            return Err(ValidationError::Field {
                field: "timeout_secs".to_string(),
                message: "Timeout must be at least one second".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// The configured node, if non-empty after trimming.
    pub fn default_node(&self) -> Option<&str> {
        self.node
            .as_deref()
            .map(str::trim)
            .filter(|node| !node.is_empty())
    }

    /// Connection details for the Proxmox API.
    pub fn connection(&self) -> DashResult<ProxmoxConnection> {
        ProxmoxConnection::new(
            ProxmoxHost::new_unchecked(self.host.clone()),
            ProxmoxPort::new_unchecked(self.port),
            ProxmoxApiToken::new_unchecked(&self.user, &self.token_id, &self.token_secret),
            self.verify_tls,
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Socket address the HTTP server binds to.
    pub fn listen_addr(&self) -> DashResult<SocketAddr> {
        Ok(SocketAddr::new(self.bind_ip()?, self.listen_port))
    }

    fn bind_ip(&self) -> DashResult<IpAddr> {
        self.bind.parse::<IpAddr>().map_err(|_| {
            ValidationError::Field {
                field: "bind".to_string(),
                message: format!("'{}' is not an IP address", self.bind),
            }
            .into()
        })
    }
}
