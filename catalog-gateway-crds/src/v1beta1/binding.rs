use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::v1beta1::{CatalogCondition, LocalObjectReference};

#[derive(CustomResource, Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[kube(
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    kind = "ServiceBinding",
    status = "ServiceBindingStatus",
    derive = "Default",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingSpec {
    /// Instance the binding credentials are issued for.
    pub instance_ref: LocalObjectReference,
    /// Secret the credentials are written to. Defaults to the binding name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBindingStatus {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<CatalogCondition>,
}

impl ServiceBinding {
    pub fn instance_name(&self) -> &str {
        &self.spec.instance_ref.name
    }

    /// Secret holding the credentials; falls back to the binding name.
    pub fn secret_name(&self) -> Option<&str> {
        self.spec
            .secret_name
            .as_deref()
            .or(self.metadata.name.as_deref())
    }

    pub fn conditions(&self) -> &[CatalogCondition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or_default()
    }
}
