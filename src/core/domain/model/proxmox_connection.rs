use crate::core::domain::{
    error::{DashResult, ValidationError},
    value_object::{ProxmoxApiToken, ProxmoxHost, ProxmoxPort},
};
use url::Url;

/// Everything needed to reach the Proxmox API: endpoint, token and TLS policy.
#[derive(Debug, Clone)]
pub struct ProxmoxConnection {
    api_token: ProxmoxApiToken,
    verify_tls: bool,
    proxmox_url: Url,
}

impl ProxmoxConnection {
    /// Builds the connection and its `https://{host}:{port}/` base URL.
    ///
    /// # Errors
    /// Returns `DashError::Validation` if the host and port do not form a valid URL.
    pub fn new(
        proxmox_host: ProxmoxHost,
        proxmox_port: ProxmoxPort,
        api_token: ProxmoxApiToken,
        verify_tls: bool,
    ) -> DashResult<Self> {
        let host = proxmox_host.as_str();
        // IPv6 literals need brackets inside a URL authority.
        let authority = if host.contains(':') {
            format!("[{}]:{}", host, proxmox_port.get())
        } else {
            format!("{}:{}", host, proxmox_port.get())
        };
        let proxmox_url = Url::parse(&format!("https://{}/", authority))
            .map_err(|e| ValidationError::Format(format!("Invalid Proxmox URL: {}", e)))?;

        Ok(Self {
            api_token,
            verify_tls,
            proxmox_url,
        })
    }

    /// Points the connection at an arbitrary base URL (plain HTTP test servers).
    #[cfg(test)]
    pub(crate) fn with_url(proxmox_url: Url, api_token: ProxmoxApiToken) -> Self {
        Self {
            api_token,
            verify_tls: false,
            proxmox_url,
        }
    }

    pub fn api_token(&self) -> &ProxmoxApiToken {
        &self.api_token
    }

    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    pub fn accept_invalid_certs(&self) -> bool {
        !self.verify_tls
    }

    pub fn proxmox_url(&self) -> &Url {
        &self.proxmox_url
    }
}
