use crate::core::domain::error::ValidationError;
use std::fmt;

/// A Proxmox API token (`user@realm!token-id=secret`).
///
/// The token is passed through to the cluster as an opaque `Authorization`
/// header. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxApiToken {
    user: String,
    token_id: String,
    secret: String,
}

impl ProxmoxApiToken {
    /// Creates a new token without validation.
    pub(crate) fn new_unchecked(
        user: impl Into<String>,
        token_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            token_id: token_id.into(),
            secret: secret.into(),
        }
    }

    /// Value of the `Authorization` header sent upstream.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("PVEAPIToken={}!{}={}", self.user, self.token_id, self.secret)
    }
}

impl fmt::Debug for ProxmoxApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxmoxApiToken")
            .field("user", &self.user)
            .field("token_id", &self.token_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Validates the three parts of an API token.
pub(crate) fn validate_api_token(
    user: &str,
    token_id: &str,
    secret: &str,
) -> Result<(), ValidationError> {
    let Some((name, realm)) = user.split_once('@') else {
        return Err(ValidationError::Field {
            field: "user".to_string(),
            message: "User must have the form name@realm".to_string(),
        });
    };
    if name.is_empty() || realm.is_empty() {
        return Err(ValidationError::Field {
            field: "user".to_string(),
            message: "User name and realm cannot be empty".to_string(),
        });
    }
    if user.chars().any(|c| c.is_whitespace() || c == '!' || c == '=') {
        return Err(ValidationError::Format(
            "User cannot contain whitespace, '!' or '='".to_string(),
        ));
    }

    if token_id.is_empty() {
        return Err(ValidationError::Field {
            field: "token_id".to_string(),
            message: "Token id cannot be empty".to_string(),
        });
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.';
    if !token_id.chars().all(allowed) {
        return Err(ValidationError::Format(
            "Token id contains invalid characters. Allowed: alphanumeric, -, _, .".to_string(),
        ));
    }

    if secret.is_empty() {
        return Err(ValidationError::Field {
            field: "token_secret".to_string(),
            message: "Token secret cannot be empty".to_string(),
        });
    }
    if secret.chars().any(char::is_whitespace) {
        return Err(ValidationError::Format(
            "Token secret cannot contain whitespace".to_string(),
        ));
    }
    Ok(())
}
