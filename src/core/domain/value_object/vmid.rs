use crate::core::domain::error::ValidationError;
use std::fmt;

const MIN_VMID: u32 = 100;
const MAX_VMID: u32 = 999_999_999;

/// A validated guest identifier as accepted by Proxmox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vmid(u32);

impl Vmid {
    /// Creates a new vmid without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(vmid: u32) -> Self {
        Self(vmid)
    }

    /// Parses and validates a vmid taken from a request path.
    ///
    /// Only the canonical decimal form is accepted: `0101`, ` 101` or `+101`
    /// do not name guest 101.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let not_canonical = || ValidationError::Field {
            field: "vmid".to_string(),
            message: format!("'{}' is not a numeric guest id", raw),
        };
        if raw.is_empty() || raw.starts_with('0') || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_canonical());
        }
        let vmid = raw.parse::<u32>().map_err(|_| not_canonical())?;
        validate_vmid(vmid)?;
        Ok(Self(vmid))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Vmid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates a vmid against the range Proxmox allocates from.
pub(crate) fn validate_vmid(vmid: u32) -> Result<(), ValidationError> {
    if !(MIN_VMID..=MAX_VMID).contains(&vmid) {
        return Err(ValidationError::ConstraintViolation(format!(
            "Guest id must be between {} and {} (got {})",
            MIN_VMID, MAX_VMID, vmid
        )));
    }
    Ok(())
}
