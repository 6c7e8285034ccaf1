//! Error taxonomy for the responder.
//!
//! Lookups that can legitimately come back empty (a policy or topic missing
//! from the account) surface as named variants instead of failing later on
//! an unset value.

use thiserror::Error;

use crate::contract::ValidationError;

#[derive(Debug, Error)]
pub enum ResponderError {
    /// No managed policy with the expected name exists in the account.
    #[error("No managed policy named '{policy_name}' exists")]
    PolicyNotFound { policy_name: String },

    /// No notification topic matching the expected name exists.
    #[error("No notification topic matching '{topic_name}' exists")]
    TopicNotFound { topic_name: String },

    /// Identity directory call failed in transport.
    #[error("Identity directory call failed: {0}")]
    Directory(String),

    /// Notification delivery failed in transport.
    #[error("Notification delivery failed: {0}")]
    Notification(String),

    /// Event parsed but failed normalization.
    #[error("Invalid audit event: {0}")]
    InvalidEvent(#[from] ValidationError),

    /// Event payload did not match the expected shape.
    #[error("Malformed audit event payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_name_the_missing_resource() {
        let policy = ResponderError::PolicyNotFound {
            policy_name: "ClWDenyAccess1".to_string(),
        };
        assert_eq!(
            policy.to_string(),
            "No managed policy named 'ClWDenyAccess1' exists"
        );

        let topic = ResponderError::TopicNotFound {
            topic_name: "CDKCLWAccess".to_string(),
        };
        assert_eq!(
            topic.to_string(),
            "No notification topic matching 'CDKCLWAccess' exists"
        );
    }
}
