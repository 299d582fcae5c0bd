pub mod binding;
pub mod broker;
pub mod class;
pub mod instance;
pub mod plan;

pub use binding::{ServiceBinding, ServiceBindingSpec, ServiceBindingStatus};
pub use broker::{ServiceBroker, ServiceBrokerSpec, ServiceBrokerStatus};
pub use class::{ServiceClass, ServiceClassSpec};
pub use instance::{ServiceInstance, ServiceInstanceSpec, ServiceInstanceStatus};
pub use plan::{ServicePlan, ServicePlanSpec};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CONDITION_READY: &str = "Ready";
pub const CONDITION_FAILED: &str = "Failed";
pub const CONDITION_TRUE: &str = "True";

/// Condition carried by broker, instance and binding statuses. Mirrors the
/// Service Catalog condition layout rather than `metav1.Condition`.
#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCondition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CatalogCondition {
    pub fn is(&self, type_: &str) -> bool {
        self.type_ == type_ && self.status == CONDITION_TRUE
    }
}

/// Reference to an object in the same namespace.
#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LocalObjectReference {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_is_matches_type_and_status() {
        let cond = CatalogCondition {
            type_: CONDITION_READY.into(),
            status: CONDITION_TRUE.into(),
            reason: None,
            message: None,
        };
        assert!(cond.is(CONDITION_READY));
        assert!(!cond.is(CONDITION_FAILED));
    }

    #[test]
    fn test_condition_is_rejects_false_status() {
        let cond = CatalogCondition {
            type_: CONDITION_READY.into(),
            status: "False".into(),
            reason: Some("Provisioning".into()),
            message: None,
        };
        assert!(!cond.is(CONDITION_READY));
    }
}
