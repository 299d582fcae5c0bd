use std::sync::Arc;

use async_graphql::{ComplexObject, Context, InputObject, Json, Result, SimpleObject};
use catalog_gateway_crds::v1beta1 as crds;
use catalog_gateway_k8s_utils::Event;
use chrono::{DateTime, Utc};
use kube::ResourceExt;

use super::{creation_timestamp, ServiceBinding, ServiceClass, ServicePlan, SubscriptionEventType};
use crate::catalog::status::{instance_status, InstanceStatusType};
use crate::catalog::Services;
use crate::graphql::error;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct ServiceInstance {
    pub name: String,
    pub environment: String,
    pub service_class_external_name: String,
    pub service_plan_external_name: String,
    pub status: InstanceStatusType,
    pub creation_timestamp: Option<DateTime<Utc>>,
}

#[ComplexObject]
impl ServiceInstance {
    /// Class this instance was provisioned from, when it is still published.
    async fn service_class(&self, ctx: &Context<'_>) -> Result<Option<ServiceClass>> {
        let services = ctx.data::<Arc<Services>>()?;
        let class = services
            .class
            .find_by_external_name(&self.service_class_external_name)
            .map_err(|e| {
                error::resource_error("ServiceClass", &self.service_class_external_name, None, e)
            })?;
        Ok(class.as_deref().and_then(ServiceClass::from_resource))
    }

    /// Plan this instance was provisioned with, resolved through its class.
    async fn service_plan(&self, ctx: &Context<'_>) -> Result<Option<ServicePlan>> {
        let services = ctx.data::<Arc<Services>>()?;
        let class = services
            .class
            .find_by_external_name(&self.service_class_external_name)
            .map_err(|e| {
                error::resource_error("ServiceClass", &self.service_class_external_name, None, e)
            })?;
        let Some(class) = class else {
            return Ok(None);
        };
        let plan = services
            .plan
            .find_for_class_by_external_name(&class.name_any(), &self.service_plan_external_name)
            .map_err(|e| {
                error::resource_error("ServicePlan", &self.service_plan_external_name, None, e)
            })?;
        Ok(plan.as_deref().and_then(ServicePlan::from_resource))
    }

    /// Bindings issued for this instance.
    async fn bindings(&self, ctx: &Context<'_>) -> Result<Vec<ServiceBinding>> {
        let services = ctx.data::<Arc<Services>>()?;
        let bindings = services
            .binding
            .list_for_instance(&self.environment, &self.name)
            .map_err(|e| {
                error::resource_error("ServiceBinding", &self.name, Some(&self.environment), e)
            })?;
        Ok(ServiceBinding::from_resources(&bindings))
    }
}

impl ServiceInstance {
    pub fn from_resource(instance: &crds::ServiceInstance) -> Option<Self> {
        let name = instance.metadata.name.clone()?;
        Some(Self {
            name,
            environment: instance.metadata.namespace.clone().unwrap_or_default(),
            service_class_external_name: instance.spec.service_class_external_name.clone(),
            service_plan_external_name: instance.spec.service_plan_external_name.clone(),
            status: instance_status(instance),
            creation_timestamp: creation_timestamp(&instance.metadata),
        })
    }

    pub fn from_resources(instances: &[Arc<crds::ServiceInstance>]) -> Vec<Self> {
        instances
            .iter()
            .filter_map(|instance| Self::from_resource(instance))
            .collect()
    }
}

#[derive(InputObject)]
pub struct CreateServiceInstanceInput {
    pub name: String,
    pub environment: String,
    pub service_class_external_name: String,
    pub service_plan_external_name: String,
    pub parameters: Option<Json<serde_json::Value>>,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct ServiceInstanceEvent {
    #[graphql(name = "type")]
    pub event_type: SubscriptionEventType,
    pub service_instance: ServiceInstance,
}

impl ServiceInstanceEvent {
    pub fn from_event(event: &Event<crds::ServiceInstance>) -> Option<Self> {
        Some(Self {
            event_type: SubscriptionEventType::of(event),
            service_instance: ServiceInstance::from_resource(event.object())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use catalog_gateway_crds::v1beta1::ServiceInstanceSpec;

    use super::*;

    #[test]
    fn test_from_resource_with_empty_status_is_pending() {
        let mut instance = crds::ServiceInstance::new(
            "instance-a",
            ServiceInstanceSpec {
                service_class_external_name: "redis".into(),
                service_plan_external_name: "standard".into(),
                parameters: None,
            },
        );
        instance.metadata.namespace = Some("prod".into());

        let converted = ServiceInstance::from_resource(&instance).unwrap();
        assert_eq!(converted.environment, "prod");
        assert_eq!(converted.service_class_external_name, "redis");
        assert_eq!(converted.status, InstanceStatusType::Pending);
    }

    #[test]
    fn test_from_event_carries_event_type() {
        let instance = crds::ServiceInstance::new("instance-a", ServiceInstanceSpec::default());
        let event = Event::Delete(Arc::new(instance));
        let converted = ServiceInstanceEvent::from_event(&event).unwrap();
        assert_eq!(converted.event_type, SubscriptionEventType::Delete);
    }
}
