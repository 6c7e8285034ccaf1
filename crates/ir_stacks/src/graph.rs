use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const TEMPLATE_SCHEMA_VERSION: &str = "v1";

/// Deployment target for a stack: one account in one region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Environment {
    pub account: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyStatement {
    pub effect: Effect,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngressRule {
    pub port: u16,
    pub cidr: String,
    pub description: String,
}

/// One node in the resource graph. `*_ref` fields name the logical id of
/// another resource in the same stack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceSpec {
    Vpc {
        cidr: String,
        max_azs: u8,
    },
    SecurityGroup {
        vpc_ref: String,
        ingress: Vec<IngressRule>,
    },
    Function {
        handler: String,
        runtime: String,
        environment: BTreeMap<String, String>,
        timeout_seconds: u64,
    },
    EventRule {
        event_source: String,
        event_names: Vec<String>,
        target_ref: String,
    },
    DatabaseCluster {
        cluster_name: String,
        engine: String,
        vpc_ref: String,
    },
    ManagedPolicy {
        policy_name: String,
        statements: Vec<PolicyStatement>,
    },
    Topic {
        topic_name: String,
    },
    RateLimitRule {
        rate_limit: u64,
        target_arn: String,
    },
}

impl ResourceSpec {
    /// Logical ids this resource depends on.
    pub fn references(&self) -> Vec<&str> {
        match self {
            ResourceSpec::SecurityGroup { vpc_ref, .. } => vec![vpc_ref.as_str()],
            ResourceSpec::DatabaseCluster { vpc_ref, .. } => vec![vpc_ref.as_str()],
            ResourceSpec::EventRule { target_ref, .. } => vec![target_ref.as_str()],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub logical_id: String,
    pub spec: ResourceSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stack {
    pub name: String,
    pub env: Environment,
    pub resources: Vec<Resource>,
}

impl Stack {
    pub fn new(name: impl Into<String>, env: Environment) -> Self {
        Self {
            name: name.into(),
            env,
            resources: Vec::new(),
        }
    }

    /// Append a resource. Duplicate logical ids are caught at synth time so
    /// a whole stack's defects surface together.
    pub fn resource(mut self, logical_id: impl Into<String>, spec: ResourceSpec) -> Self {
        self.resources.push(Resource {
            logical_id: logical_id.into(),
            spec,
        });
        self
    }
}

/// Collection of stacks sharing one deployment environment.
#[derive(Debug, Clone, PartialEq)]
pub struct App {
    pub env: Environment,
    pub stacks: Vec<Stack>,
}

impl App {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            stacks: Vec::new(),
        }
    }

    pub fn stack(mut self, stack: Stack) -> Self {
        self.stacks.push(stack);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthError {
    message: String,
}

impl SynthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SynthError {}
