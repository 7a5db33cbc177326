//! Serde helpers for custom deserialization.

/// Deserialization of guest ids that upstream reports either as a JSON number
/// or as a numeric string, depending on the endpoint.
pub mod vmid {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => n,
            NumberOrString::String(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|_| D::Error::custom(format!("invalid vmid '{}'", s)))?,
        };
        u32::try_from(raw).map_err(|_| D::Error::custom(format!("vmid {} out of range", raw)))
    }
}
