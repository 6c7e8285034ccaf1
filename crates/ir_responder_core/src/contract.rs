use serde::{Deserialize, Serialize};

pub const DENY_POLICY_PRIMARY: &str = "ClWDenyAccess1";
pub const DENY_POLICY_SECONDARY: &str = "ClWDenyAccess2";
pub const NOTIFICATION_TOPIC: &str = "CDKCLWAccess";
pub const NOTIFICATION_SUBJECT: &str = "Access to CloudWatch";
pub const CHAT_CHANNEL: &str = "ir-cdk-stacks";
pub const CHAT_MESSAGE_PREFIX: &str = "IN-CLW-01 Unauthorised CloudWatch Access:\n";

/// Audit event as delivered by the event dispatcher: a CloudTrail record
/// wrapped in a `detail` object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEvent {
    pub detail: AuditDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditDetail {
    #[serde(rename = "userIdentity")]
    pub user_identity: UserIdentity,
    #[serde(rename = "sourceIPAddress")]
    pub source_ip_address: String,
    #[serde(rename = "eventTime")]
    pub event_time: String,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    #[serde(rename = "eventName")]
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "type")]
    pub identity_type: String,
}

/// Actor type from the audit record. Only IAM users are subject to the
/// deny action; roles and service principals are left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdentityType {
    IamUser,
    Other(String),
}

impl UserIdentityType {
    pub fn parse(raw: &str) -> Self {
        if raw == "IAMUser" {
            UserIdentityType::IamUser
        } else {
            UserIdentityType::Other(raw.to_string())
        }
    }

    pub fn is_restricted(&self) -> bool {
        matches!(self, UserIdentityType::IamUser)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAuditEvent {
    pub user_name: String,
    pub identity_type: UserIdentityType,
    pub source_ip_address: String,
    pub event_time: String,
    pub user_agent: String,
    pub event_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Reject events the responder cannot act on instead of failing later on a
/// missing field.
pub fn normalize_event(event: AuditEvent) -> Result<NormalizedAuditEvent, ValidationError> {
    let user_name = event.detail.user_identity.user_name.trim().to_string();
    if user_name.is_empty() {
        return Err(ValidationError::new("userIdentity.userName cannot be empty"));
    }

    let event_name = event.detail.event_name.trim().to_string();
    if event_name.is_empty() {
        return Err(ValidationError::new("eventName cannot be empty"));
    }

    Ok(NormalizedAuditEvent {
        user_name,
        identity_type: UserIdentityType::parse(&event.detail.user_identity.identity_type),
        source_ip_address: event.detail.source_ip_address,
        event_time: event.detail.event_time,
        user_agent: event.detail.user_agent,
        event_name,
    })
}

/// Notification prefix describing who did what, from where, and when.
pub fn base_message(event: &NormalizedAuditEvent) -> String {
    format!(
        "IN_CLW_01: {} tried to perform {} on Cloudwatch at time {} from userAgent {} with IP {}. ",
        event.user_name,
        event.event_name,
        event.event_time,
        event.user_agent,
        event.source_ip_address
    )
}

/// Whether an attached policy name is one of the two deny policies.
pub fn is_deny_policy(policy_name: &str) -> bool {
    policy_name == DENY_POLICY_PRIMARY || policy_name == DENY_POLICY_SECONDARY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(user_name: &str, identity_type: &str) -> AuditEvent {
        AuditEvent {
            detail: AuditDetail {
                user_identity: UserIdentity {
                    user_name: user_name.to_string(),
                    identity_type: identity_type.to_string(),
                },
                source_ip_address: "203.0.113.7".to_string(),
                event_time: "2026-02-14T12:00:00Z".to_string(),
                user_agent: "aws-cli/2.15".to_string(),
                event_name: "DeleteAlarms".to_string(),
            },
        }
    }

    #[test]
    fn deserializes_dispatcher_field_names() {
        let event: AuditEvent = serde_json::from_value(serde_json::json!({
            "detail": {
                "userIdentity": {"userName": "mallory", "type": "IAMUser"},
                "sourceIPAddress": "203.0.113.7",
                "eventTime": "2026-02-14T12:00:00Z",
                "userAgent": "aws-cli/2.15",
                "eventName": "DeleteAlarms"
            }
        }))
        .expect("event should deserialize");

        assert_eq!(event.detail.user_identity.user_name, "mallory");
        assert_eq!(event.detail.user_identity.identity_type, "IAMUser");
    }

    #[test]
    fn normalize_rejects_empty_user_name() {
        let error = normalize_event(sample_event("  ", "IAMUser")).expect_err("should fail");
        assert_eq!(error.message(), "userIdentity.userName cannot be empty");
    }

    #[test]
    fn only_iam_user_type_is_restricted() {
        assert!(UserIdentityType::parse("IAMUser").is_restricted());
        assert!(!UserIdentityType::parse("AssumedRole").is_restricted());
        assert!(!UserIdentityType::parse("iamuser").is_restricted());
    }

    #[test]
    fn base_message_names_actor_action_and_origin() {
        let normalized =
            normalize_event(sample_event("mallory", "IAMUser")).expect("event should pass");
        let message = base_message(&normalized);

        assert!(message.starts_with("IN_CLW_01: mallory tried to perform DeleteAlarms"));
        assert!(message.contains("203.0.113.7"));
        assert!(message.contains("aws-cli/2.15"));
    }

    #[test]
    fn deny_policy_names_match_the_managed_policies() {
        assert!(is_deny_policy("ClWDenyAccess1"));
        assert!(is_deny_policy("ClWDenyAccess2"));
        assert!(!is_deny_policy("ReadOnlyAccess"));
    }
}
