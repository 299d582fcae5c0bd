use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[kube(
    group = "servicecatalog.k8s.io",
    version = "v1beta1",
    kind = "ServiceClass",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct ServiceClassSpec {
    /// Human-oriented name the class is selected by in the OSB catalog.
    pub external_name: String,
    /// Broker the class was fetched from.
    pub service_broker_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub bindable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Free-form metadata from the broker catalog (displayName and friends).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_metadata: Option<serde_json::Value>,
}

impl ServiceClass {
    /// displayName from the broker catalog metadata, if one was published.
    pub fn display_name(&self) -> Option<String> {
        self.spec
            .external_metadata
            .as_ref()?
            .get("displayName")?
            .as_str()
            .map(str::to_owned)
    }
}
