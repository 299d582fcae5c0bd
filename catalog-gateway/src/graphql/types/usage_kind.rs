use std::sync::Arc;

use async_graphql::SimpleObject;
use catalog_gateway_crds::v1alpha1 as crds;
use kube::api::DynamicObject;

#[derive(SimpleObject, Clone, Debug)]
pub struct UsageKind {
    pub name: String,
    pub display_name: String,
    pub group: String,
    pub kind: String,
    pub version: String,
}

impl UsageKind {
    pub fn from_resource(kind: &crds::UsageKind) -> Option<Self> {
        let name = kind.metadata.name.clone()?;
        Some(Self {
            name,
            display_name: kind.spec.display_name.clone(),
            group: kind.spec.resource.group.clone(),
            kind: kind.spec.resource.kind.clone(),
            version: kind.spec.resource.version.clone(),
        })
    }

    pub fn from_resources(kinds: &[Arc<crds::UsageKind>]) -> Vec<Self> {
        kinds
            .iter()
            .filter_map(|kind| Self::from_resource(kind))
            .collect()
    }
}

/// A live resource of the kind a UsageKind points at, listed through the
/// dynamic API.
#[derive(SimpleObject, Clone, Debug)]
pub struct UsageKindResource {
    pub name: String,
    pub environment: String,
}

impl UsageKindResource {
    pub fn from_object(obj: &DynamicObject) -> Option<Self> {
        Some(Self {
            name: obj.metadata.name.clone()?,
            environment: obj.metadata.namespace.clone().unwrap_or_default(),
        })
    }

    pub fn from_objects(objs: &[DynamicObject]) -> Vec<Self> {
        objs.iter().filter_map(Self::from_object).collect()
    }
}

#[cfg(test)]
mod tests {
    use catalog_gateway_crds::v1alpha1::usage_kind::ResourceReference;
    use catalog_gateway_crds::v1alpha1::UsageKindSpec;
    use kube::api::{ApiResource, ObjectMeta};
    use kube::core::GroupVersionKind;

    use super::*;

    #[test]
    fn test_from_resource() {
        let kind = crds::UsageKind::new(
            "deployment",
            UsageKindSpec {
                display_name: "Deployment".into(),
                resource: ResourceReference {
                    group: "apps".into(),
                    kind: "Deployment".into(),
                    version: "v1".into(),
                },
                labels_path: None,
            },
        );
        let converted = UsageKind::from_resource(&kind).unwrap();
        assert_eq!(converted.display_name, "Deployment");
        assert_eq!(converted.group, "apps");
        assert_eq!(converted.kind, "Deployment");
    }

    #[test]
    fn test_from_objects_skips_unnamed() {
        let resource = ApiResource::from_gvk(&GroupVersionKind::gvk("apps", "v1", "Deployment"));
        let named = DynamicObject::new("app-a", &resource).within("prod");
        let mut unnamed = DynamicObject::new("app-b", &resource);
        unnamed.metadata = ObjectMeta::default();

        let converted = UsageKindResource::from_objects(&[unnamed, named]);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].name, "app-a");
        assert_eq!(converted[0].environment, "prod");
    }
}
