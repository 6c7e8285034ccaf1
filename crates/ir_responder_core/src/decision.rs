use crate::contract::UserIdentityType;

/// Outcome of classifying one audit event. Branch order mirrors the
/// enforcement rule: an existing deny policy wins, then restricted users
/// outside the allow-listed group are denied, everyone else is let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// A deny policy is already attached; notify only.
    AlreadyDenied,
    /// Attach both deny policies and notify.
    AttachDeny,
    /// Notify on both channels, touch nothing.
    Allow,
}

pub fn classify(
    identity_type: &UserIdentityType,
    already_denied: bool,
    in_allow_list: bool,
) -> AccessDecision {
    if already_denied {
        AccessDecision::AlreadyDenied
    } else if identity_type.is_restricted() && !in_allow_list {
        AccessDecision::AttachDeny
    } else {
        AccessDecision::Allow
    }
}
