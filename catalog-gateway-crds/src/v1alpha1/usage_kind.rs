use kube::CustomResource;
use kube::core::GroupVersionKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[kube(
    group = "servicecatalog.ext.dev",
    version = "v1alpha1",
    kind = "UsageKind",
    derive = "Default",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct UsageKindSpec {
    /// Name shown in the UI when picking an injection target kind.
    pub display_name: String,
    /// Workload kind instances of this UsageKind may point at.
    pub resource: ResourceReference,
    /// JSONPath to the labels field on the target kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels_path: Option<String>,
}

#[derive(Serialize, Deserialize, JsonSchema, Default, PartialEq, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReference {
    pub group: String,
    pub kind: String,
    pub version: String,
}

impl UsageKind {
    pub fn gvk(&self) -> GroupVersionKind {
        GroupVersionKind::gvk(
            &self.spec.resource.group,
            &self.spec.resource.version,
            &self.spec.resource.kind,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gvk_from_resource_reference() {
        let kind = UsageKind::new(
            "deployment",
            UsageKindSpec {
                display_name: "Deployment".into(),
                resource: ResourceReference {
                    group: "apps".into(),
                    kind: "Deployment".into(),
                    version: "v1".into(),
                },
                labels_path: Some("spec.template.metadata.labels".into()),
            },
        );
        let gvk = kind.gvk();
        assert_eq!(gvk.group, "apps");
        assert_eq!(gvk.version, "v1");
        assert_eq!(gvk.kind, "Deployment");
    }
}
