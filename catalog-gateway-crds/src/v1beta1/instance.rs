use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::v1beta1::CatalogCondition;

pub const OPERATION_PROVISION: &str = "Provision";
pub const OPERATION_DEPROVISION: &str = "Deprovision";

#[derive(CustomResource, Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[kube(
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    kind = "ServiceInstance",
    status = "ServiceInstanceStatus",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstanceSpec {
    /// External name of the class to provision from.
    pub service_class_external_name: String,
    /// External name of the plan within that class.
    pub service_plan_external_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInstanceStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<CatalogCondition>,
    #[serde(default)]
    pub async_op_in_progress: bool,
    /// `Provision` or `Deprovision` while an operation is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_operation: Option<String>,
}

impl ServiceInstance {
    pub fn conditions(&self) -> &[CatalogCondition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or_default()
    }
}
