use std::sync::Arc;

use async_graphql::{Json, SimpleObject};
use catalog_gateway_crds::v1beta1 as crds;
use chrono::{DateTime, Utc};

use super::creation_timestamp;

#[derive(SimpleObject, Clone, Debug)]
pub struct ServicePlan {
    pub name: String,
    pub external_name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub related_service_class_name: String,
    pub free: Option<bool>,
    /// Schema the broker advertises for provisioning parameters.
    pub instance_create_parameter_schema: Option<Json<serde_json::Value>>,
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl ServicePlan {
    pub fn from_resource(plan: &crds::ServicePlan) -> Option<Self> {
        let name = plan.metadata.name.clone()?;
        Some(Self {
            name,
            external_name: plan.spec.external_name.clone(),
            display_name: plan.display_name(),
            description: plan.spec.description.clone(),
            related_service_class_name: plan.class_name().to_owned(),
            free: plan.spec.free,
            instance_create_parameter_schema: plan
                .spec
                .instance_create_parameter_schema
                .clone()
                .map(Json),
            creation_timestamp: creation_timestamp(&plan.metadata),
        })
    }

    pub fn from_resources(plans: &[Arc<crds::ServicePlan>]) -> Vec<Self> {
        plans
            .iter()
            .filter_map(|plan| Self::from_resource(plan))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use catalog_gateway_crds::v1beta1::{LocalObjectReference, ServicePlanSpec};

    use super::*;

    #[test]
    fn test_from_resource() {
        let plan = crds::ServicePlan::new(
            "plan-a",
            ServicePlanSpec {
                external_name: "standard".into(),
                service_class_ref: LocalObjectReference {
                    name: "class-a".into(),
                },
                free: Some(true),
                instance_create_parameter_schema: Some(serde_json::json!({"required": ["size"]})),
                ..Default::default()
            },
        );

        let converted = ServicePlan::from_resource(&plan).unwrap();
        assert_eq!(converted.related_service_class_name, "class-a");
        assert_eq!(converted.free, Some(true));
        assert!(converted.instance_create_parameter_schema.is_some());
    }

    #[test]
    fn test_from_resources_preserves_order() {
        let plans = vec![
            Arc::new(crds::ServicePlan::new("plan-b", ServicePlanSpec::default())),
            Arc::new(crds::ServicePlan::new("plan-a", ServicePlanSpec::default())),
        ];
        let names: Vec<&str> = ServicePlan::from_resources(&plans)
            .iter()
            .map(|plan| plan.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["plan-b", "plan-a"]);
    }
}
