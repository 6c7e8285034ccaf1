use thiserror::Error;

pub const ALLOW_LIST_GROUP_VAR: &str = "white_list_group";
pub const WEBHOOK_URL_VAR: &str = "webhook_url";

/// Runtime configuration for the responder, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderConfig {
    /// Identity group whose members are exempt from the deny action.
    pub allow_list_group: String,
    /// Chat webhook endpoint for access-granted notifications.
    pub webhook_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing configuration keys: {}", .0.join(", "))]
    MissingKeys(Vec<String>),
}

impl ResponderConfig {
    /// Resolve configuration through a lookup, collecting every missing key
    /// so a misconfigured deployment reports all defects at once.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let allow_list_group = require(&lookup, ALLOW_LIST_GROUP_VAR, &mut missing);
        let webhook_url = require(&lookup, WEBHOOK_URL_VAR, &mut missing);

        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing));
        }

        Ok(Self {
            allow_list_group: allow_list_group.unwrap_or_default(),
            webhook_url: webhook_url.unwrap_or_default(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|key| std::env::var(key).ok())
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    missing: &mut Vec<String>,
) -> Option<String> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => {
            missing.push(key.to_string());
            None
        }
    }
}
