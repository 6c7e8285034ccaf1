//! Concrete stacks for the incident-response deployment: the CloudWatch
//! unauthorized-access responder, the Aurora monitoring stack, and the
//! external rate-limit stack.

use std::collections::BTreeMap;

use ir_responder_core::contract::{
    DENY_POLICY_PRIMARY, DENY_POLICY_SECONDARY, NOTIFICATION_TOPIC,
};

use crate::graph::{App, Effect, Environment, IngressRule, PolicyStatement, ResourceSpec, Stack};

/// Operator-supplied settings collected by the setup wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentSettings {
    pub account: String,
    pub region: String,
    pub cluster_name: String,
    pub allow_list_group: String,
    pub webhook_url: String,
    pub request_rate_limit: u64,
    pub protected_api_arn: String,
}

pub fn deployment_app(settings: &DeploymentSettings) -> App {
    let env = Environment {
        account: settings.account.clone(),
        region: settings.region.clone(),
    };

    App::new(env.clone())
        .stack(unauth_access_stack(env.clone(), settings))
        .stack(aurora_stack(env.clone(), settings))
        .stack(edge_protection_stack(env, settings))
}

/// IN-CLW-01: audit-event rule, responder function, notification topic, and
/// the two deny policies the responder attaches.
pub fn unauth_access_stack(env: Environment, settings: &DeploymentSettings) -> Stack {
    let mut function_environment = BTreeMap::new();
    function_environment.insert(
        "white_list_group".to_string(),
        settings.allow_list_group.clone(),
    );
    function_environment.insert("webhook_url".to_string(), settings.webhook_url.clone());

    Stack::new("ir-cdk-stacks", env)
        .resource(
            "UnauthAccessResponder",
            ResourceSpec::Function {
                handler: "responder_lambda".to_string(),
                runtime: "provided.al2023".to_string(),
                environment: function_environment,
                timeout_seconds: 30,
            },
        )
        .resource(
            "CloudWatchAuditRule",
            ResourceSpec::EventRule {
                event_source: "aws.monitoring".to_string(),
                event_names: vec![
                    "DeleteAlarms".to_string(),
                    "DisableAlarmActions".to_string(),
                    "PutMetricAlarm".to_string(),
                    "DeleteDashboards".to_string(),
                ],
                target_ref: "UnauthAccessResponder".to_string(),
            },
        )
        .resource(
            "AccessNotifications",
            ResourceSpec::Topic {
                topic_name: NOTIFICATION_TOPIC.to_string(),
            },
        )
        .resource(
            "DenyAccessPrimary",
            ResourceSpec::ManagedPolicy {
                policy_name: DENY_POLICY_PRIMARY.to_string(),
                statements: vec![PolicyStatement {
                    effect: Effect::Deny,
                    actions: vec!["cloudwatch:*".to_string()],
                    resources: vec!["*".to_string()],
                }],
            },
        )
        .resource(
            "DenyAccessSecondary",
            ResourceSpec::ManagedPolicy {
                policy_name: DENY_POLICY_SECONDARY.to_string(),
                statements: vec![PolicyStatement {
                    effect: Effect::Deny,
                    actions: vec!["logs:*".to_string()],
                    resources: vec!["*".to_string()],
                }],
            },
        )
}

/// IN-AUR-01: network plus the monitored Aurora cluster.
pub fn aurora_stack(env: Environment, settings: &DeploymentSettings) -> Stack {
    Stack::new("in-aur-01-stack", env)
        .resource(
            "Network",
            ResourceSpec::Vpc {
                cidr: "10.0.0.0/16".to_string(),
                max_azs: 2,
            },
        )
        .resource(
            "DatabaseAccess",
            ResourceSpec::SecurityGroup {
                vpc_ref: "Network".to_string(),
                ingress: vec![IngressRule {
                    port: 5432,
                    cidr: "10.0.0.0/16".to_string(),
                    description: "Aurora access from inside the VPC".to_string(),
                }],
            },
        )
        .resource(
            "AuditDatabase",
            ResourceSpec::DatabaseCluster {
                cluster_name: settings.cluster_name.clone(),
                engine: "aurora-postgresql".to_string(),
                vpc_ref: "Network".to_string(),
            },
        )
}

/// EXT-01: request-rate limiting in front of the public API.
pub fn edge_protection_stack(env: Environment, settings: &DeploymentSettings) -> Stack {
    Stack::new("ext-01-stack", env).resource(
        "RequestRateLimit",
        ResourceSpec::RateLimitRule {
            rate_limit: settings.request_rate_limit,
            target_arn: settings.protected_api_arn.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::synth_all;

    fn sample_settings() -> DeploymentSettings {
        DeploymentSettings {
            account: "111122223333".to_string(),
            region: "us-east-1".to_string(),
            cluster_name: "ir-audit-cluster".to_string(),
            allow_list_group: "clw-whitelist".to_string(),
            webhook_url: "https://hooks.slack.com/services/T0000/B0000/XXXX".to_string(),
            request_rate_limit: 2000,
            protected_api_arn: "arn:aws:apigateway:us-east-1::/restapis/abc123".to_string(),
        }
    }

    #[test]
    fn deployment_app_synthesizes_three_stacks() {
        let templates =
            synth_all(&deployment_app(&sample_settings())).expect("synth should pass");

        let names: Vec<&str> = templates
            .iter()
            .map(|template| template.stack_name.as_str())
            .collect();
        assert_eq!(names, vec!["ir-cdk-stacks", "in-aur-01-stack", "ext-01-stack"]);
    }

    #[test]
    fn responder_function_carries_wizard_settings() {
        let settings = sample_settings();
        let templates = synth_all(&deployment_app(&settings)).expect("synth should pass");

        let function = &templates[0].resources["UnauthAccessResponder"];
        assert_eq!(
            function["environment"]["white_list_group"],
            settings.allow_list_group
        );
        assert_eq!(function["environment"]["webhook_url"], settings.webhook_url);
    }

    #[test]
    fn deny_policies_use_the_names_the_responder_attaches() {
        let templates =
            synth_all(&deployment_app(&sample_settings())).expect("synth should pass");

        assert_eq!(
            templates[0].resources["DenyAccessPrimary"]["policy_name"],
            DENY_POLICY_PRIMARY
        );
        assert_eq!(
            templates[0].resources["DenyAccessSecondary"]["policy_name"],
            DENY_POLICY_SECONDARY
        );
    }
}
