use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::v1beta1::{CatalogCondition, LocalObjectReference};

#[derive(CustomResource, Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[kube(
    group = "servicecatalog.ext.dev",
    version = "v1alpha1",
    kind = "ServiceBindingUsage",
    status = "ServiceBindingUsageStatus",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingUsageSpec {
    /// Binding whose secret is injected into the target.
    pub service_binding_ref: LocalObjectReference,
    /// Workload the secret is injected into.
    pub used_by: UsedByRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ServiceBindingUsageParameters>,
}

/// Target of the injection. `kind` names a UsageKind resource.
#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UsedByRef {
    pub kind: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingUsageParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_prefix: Option<EnvPrefix>,
}

/// Prefix prepended to every environment variable injected from the secret.
#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EnvPrefix {
    pub name: String,
}

#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingUsageStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<CatalogCondition>,
}

impl ServiceBindingUsage {
    pub fn binding_name(&self) -> &str {
        &self.spec.service_binding_ref.name
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.spec
            .parameters
            .as_ref()?
            .env_prefix
            .as_ref()
            .map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_usage(parameters: Option<ServiceBindingUsageParameters>) -> ServiceBindingUsage {
        ServiceBindingUsage::new(
            "usage-a",
            ServiceBindingUsageSpec {
                service_binding_ref: LocalObjectReference {
                    name: "binding-a".into(),
                },
                used_by: UsedByRef {
                    kind: "deployment".into(),
                    name: "app-a".into(),
                },
                parameters,
            },
        )
    }

    #[test]
    fn test_binding_name() {
        let usage = make_usage(None);
        assert_eq!(usage.binding_name(), "binding-a");
    }

    #[test]
    fn test_env_prefix() {
        let usage = make_usage(None);
        assert!(usage.env_prefix().is_none());

        let usage = make_usage(Some(ServiceBindingUsageParameters { env_prefix: None }));
        assert!(usage.env_prefix().is_none());

        let usage = make_usage(Some(ServiceBindingUsageParameters {
            env_prefix: Some(EnvPrefix {
                name: "REDIS_".into(),
            }),
        }));
        assert_eq!(usage.env_prefix(), Some("REDIS_"));
    }
}
