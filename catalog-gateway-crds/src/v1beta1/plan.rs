use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::v1beta1::LocalObjectReference;

#[derive(CustomResource, Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[kube(
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    kind = "ServicePlan",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlanSpec {
    pub external_name: String,
    /// Class the plan belongs to.
    pub service_class_ref: LocalObjectReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_metadata: Option<serde_json::Value>,
    /// JSON schema the broker advertises for provisioning parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_create_parameter_schema: Option<serde_json::Value>,
}

impl ServicePlan {
    pub fn class_name(&self) -> &str {
        &self.spec.service_class_ref.name
    }

    pub fn display_name(&self) -> Option<String> {
        self.spec
            .external_metadata
            .as_ref()?
            .get("displayName")?
            .as_str()
            .map(str::to_owned)
    }
}
