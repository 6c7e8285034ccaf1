use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::graph::{App, Stack, SynthError, TEMPLATE_SCHEMA_VERSION};

/// Synthesized form of one stack: the JSON resource map the provisioning
/// engine consumes, plus a fingerprint for change detection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub stack_name: String,
    pub account: String,
    pub region: String,
    pub schema_version: String,
    pub resources: Value,
    pub template_fingerprint: String,
}

pub fn synth(stack: &Stack) -> Result<Template, SynthError> {
    let mut seen = BTreeSet::new();
    for resource in &stack.resources {
        if resource.logical_id.trim().is_empty() {
            return Err(SynthError::new(format!(
                "Stack '{}' contains a resource with an empty logical id",
                stack.name
            )));
        }
        if !seen.insert(resource.logical_id.as_str()) {
            return Err(SynthError::new(format!(
                "Duplicate logical id '{}' in stack '{}'",
                resource.logical_id, stack.name
            )));
        }
    }

    for resource in &stack.resources {
        for reference in resource.spec.references() {
            if !seen.contains(reference) {
                return Err(SynthError::new(format!(
                    "Resource '{}' in stack '{}' references unknown logical id '{}'",
                    resource.logical_id, stack.name, reference
                )));
            }
        }
    }

    let mut resource_map = serde_json::Map::new();
    for resource in &stack.resources {
        let body = serde_json::to_value(&resource.spec)
            .map_err(|error| SynthError::new(format!("Failed to serialize resource: {error}")))?;
        resource_map.insert(resource.logical_id.clone(), body);
    }

    let resources = Value::Object(resource_map);
    let fingerprint_input = json!({
        "stack_name": stack.name,
        "account": stack.env.account,
        "region": stack.env.region,
        "schema_version": TEMPLATE_SCHEMA_VERSION,
        "resources": resources,
    });

    Ok(Template {
        stack_name: stack.name.clone(),
        account: stack.env.account.clone(),
        region: stack.env.region.clone(),
        schema_version: TEMPLATE_SCHEMA_VERSION.to_string(),
        template_fingerprint: template_fingerprint(&fingerprint_input),
        resources,
    })
}

/// Synthesize every stack in the app, in definition order.
pub fn synth_all(app: &App) -> Result<Vec<Template>, SynthError> {
    app.stacks.iter().map(synth).collect()
}

fn template_fingerprint(value: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(stable_template_json(value));
    format!("{:x}", hasher.finalize())
}

fn stable_template_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).expect("serialization of template value should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Environment, ResourceSpec, Stack};

    fn test_env() -> Environment {
        Environment {
            account: "111122223333".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    fn vpc_spec() -> ResourceSpec {
        ResourceSpec::Vpc {
            cidr: "10.0.0.0/16".to_string(),
            max_azs: 2,
        }
    }

    #[test]
    fn empty_stack_synthesizes_to_empty_resource_map() {
        let template = synth(&Stack::new("empty", test_env())).expect("synth should pass");

        assert_eq!(template.stack_name, "empty");
        assert_eq!(template.resources, serde_json::json!({}));
        assert_eq!(template.schema_version, TEMPLATE_SCHEMA_VERSION);
    }

    #[test]
    fn synth_rejects_duplicate_logical_ids() {
        let stack = Stack::new("dup", test_env())
            .resource("Network", vpc_spec())
            .resource("Network", vpc_spec());

        let error = synth(&stack).expect_err("synth should fail");
        assert!(error.message().contains("Duplicate logical id 'Network'"));
    }

    #[test]
    fn synth_rejects_dangling_references() {
        let stack = Stack::new("dangling", test_env()).resource(
            "Database",
            ResourceSpec::DatabaseCluster {
                cluster_name: "audit-db".to_string(),
                engine: "aurora-postgresql".to_string(),
                vpc_ref: "MissingNetwork".to_string(),
            },
        );

        let error = synth(&stack).expect_err("synth should fail");
        assert!(error.message().contains("Database"));
        assert!(error.message().contains("MissingNetwork"));
    }

    #[test]
    fn fingerprint_is_stable_across_synths() {
        let stack = Stack::new("stable", test_env()).resource("Network", vpc_spec());

        let first = synth(&stack).expect("synth should pass");
        let second = synth(&stack).expect("synth should pass");
        assert_eq!(first.template_fingerprint, second.template_fingerprint);
    }

    #[test]
    fn fingerprint_changes_when_a_resource_changes() {
        let base = Stack::new("drift", test_env()).resource("Network", vpc_spec());
        let changed = Stack::new("drift", test_env()).resource(
            "Network",
            ResourceSpec::Vpc {
                cidr: "10.1.0.0/16".to_string(),
                max_azs: 2,
            },
        );

        let first = synth(&base).expect("synth should pass");
        let second = synth(&changed).expect("synth should pass");
        assert_ne!(first.template_fingerprint, second.template_fingerprint);
    }

    #[test]
    fn synth_all_preserves_definition_order() {
        let app = App::new(test_env())
            .stack(Stack::new("first", test_env()))
            .stack(Stack::new("second", test_env()));

        let templates = synth_all(&app).expect("synth should pass");
        let names: Vec<&str> = templates
            .iter()
            .map(|template| template.stack_name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
