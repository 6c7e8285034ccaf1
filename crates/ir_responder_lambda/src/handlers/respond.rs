use ir_responder_core::config::ResponderConfig;
use ir_responder_core::contract::{
    base_message, is_deny_policy, normalize_event, AuditEvent, NormalizedAuditEvent,
    CHAT_CHANNEL, CHAT_MESSAGE_PREFIX, DENY_POLICY_PRIMARY, DENY_POLICY_SECONDARY,
    NOTIFICATION_SUBJECT, NOTIFICATION_TOPIC,
};
use ir_responder_core::decision::{classify, AccessDecision};
use ir_responder_core::error::ResponderError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::identity::IdentityDirectory;
use crate::adapters::notify::{ChatWebhook, TopicNotifier};

pub const RESPONSE_BODY: &str = "Hello from CloudWatch Lambda!";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponderResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Decide whether the acting identity keeps its access and notify either way.
///
/// Adapter errors abort the invocation; the dispatcher's own retry policy
/// governs what happens next.
pub fn handle_audit_event(
    event: Value,
    config: &ResponderConfig,
    directory: &dyn IdentityDirectory,
    notifier: &dyn TopicNotifier,
    webhook: &dyn ChatWebhook,
) -> Result<ResponderResponse, ResponderError> {
    let event: AuditEvent = serde_json::from_value(event)?;
    let event = normalize_event(event)?;
    let mut message = base_message(&event);

    let group_members = directory
        .group_member_user_names(&config.allow_list_group)
        .map_err(ResponderError::Directory)?;
    let in_allow_list = group_members.iter().any(|name| name == &event.user_name);

    let attached = directory
        .attached_policy_names(&event.user_name)
        .map_err(ResponderError::Directory)?;
    let already_denied = attached.iter().any(|name| is_deny_policy(name));

    let decision = classify(&event.identity_type, already_denied, in_allow_list);
    log_responder_info("decision", &event, &decision);

    match decision {
        AccessDecision::AlreadyDenied => {
            message.push_str(
                " CloudWatchDeny Policy is already attached to deny access to CloudWatch.",
            );
            publish(notifier, &message)?;
        }
        AccessDecision::AttachDeny => {
            let primary_arn = resolve_policy_arn(directory, DENY_POLICY_PRIMARY)?;
            let secondary_arn = resolve_policy_arn(directory, DENY_POLICY_SECONDARY)?;

            directory
                .attach_user_policy(&event.user_name, &primary_arn)
                .map_err(ResponderError::Directory)?;
            directory
                .attach_user_policy(&event.user_name, &secondary_arn)
                .map_err(ResponderError::Directory)?;

            message.push_str(" CloudWatchDeny Policy attached to deny access to CloudWatch.");
            publish(notifier, &message)?;
        }
        AccessDecision::Allow => {
            message.push_str(" Access Granted : CloudWatch Access allowed.");
            publish(notifier, &message)?;
            webhook
                .post(CHAT_CHANNEL, &format!("{CHAT_MESSAGE_PREFIX}{message}"))
                .map_err(ResponderError::Notification)?;
        }
    }

    Ok(ResponderResponse {
        status_code: 200,
        body: RESPONSE_BODY.to_string(),
    })
}

fn resolve_policy_arn(
    directory: &dyn IdentityDirectory,
    policy_name: &str,
) -> Result<String, ResponderError> {
    directory
        .find_policy_arn(policy_name)
        .map_err(ResponderError::Directory)?
        .ok_or_else(|| ResponderError::PolicyNotFound {
            policy_name: policy_name.to_string(),
        })
}

fn publish(notifier: &dyn TopicNotifier, message: &str) -> Result<(), ResponderError> {
    let topic_arn = notifier
        .find_topic_arn(NOTIFICATION_TOPIC)
        .map_err(ResponderError::Notification)?
        .ok_or_else(|| ResponderError::TopicNotFound {
            topic_name: NOTIFICATION_TOPIC.to_string(),
        })?;

    notifier
        .publish(&topic_arn, NOTIFICATION_SUBJECT, message)
        .map_err(ResponderError::Notification)
}

fn log_responder_info(event_label: &str, event: &NormalizedAuditEvent, decision: &AccessDecision) {
    eprintln!(
        "{}",
        json!({
            "component": "unauth_access_responder",
            "event": event_label,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": {
                "user_name": event.user_name,
                "event_name": event.event_name,
                "source_ip": event.source_ip_address,
                "decision": format!("{decision:?}"),
            },
        })
    );
}
