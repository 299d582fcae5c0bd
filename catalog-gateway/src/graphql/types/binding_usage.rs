use std::sync::Arc;

use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject};
use catalog_gateway_crds::v1alpha1 as crds;
use catalog_gateway_k8s_utils::Event;
use chrono::{DateTime, Utc};

use super::{creation_timestamp, ServiceBinding, SubscriptionEventType};
use crate::catalog::Services;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct ServiceBindingUsage {
    pub name: String,
    pub environment: String,
    pub service_binding_name: String,
    pub used_by: UsageReference,
    /// Prefix prepended to the environment variables injected from the secret.
    pub env_prefix: Option<String>,
    pub creation_timestamp: Option<DateTime<Utc>>,
}

#[ComplexObject]
impl ServiceBindingUsage {
    /// Binding whose secret this usage injects, when it still exists.
    async fn binding(&self, ctx: &Context<'_>) -> Result<Option<ServiceBinding>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(services
            .binding
            .find(&self.service_binding_name, &self.environment)
            .as_deref()
            .and_then(ServiceBinding::from_resource))
    }
}

#[derive(SimpleObject, Clone, Debug, PartialEq)]
pub struct UsageReference {
    /// Name of a UsageKind resource.
    pub kind: String,
    pub name: String,
}

#[derive(InputObject)]
pub struct UsageReferenceInput {
    pub kind: String,
    pub name: String,
}

#[derive(InputObject)]
pub struct CreateServiceBindingUsageInput {
    pub name: String,
    pub environment: String,
    pub service_binding_name: String,
    pub used_by: UsageReferenceInput,
    pub env_prefix: Option<String>,
}

impl ServiceBindingUsage {
    pub fn from_resource(usage: &crds::ServiceBindingUsage) -> Option<Self> {
        let name = usage.metadata.name.clone()?;
        Some(Self {
            name,
            environment: usage.metadata.namespace.clone().unwrap_or_default(),
            service_binding_name: usage.binding_name().to_owned(),
            used_by: UsageReference {
                kind: usage.spec.used_by.kind.clone(),
                name: usage.spec.used_by.name.clone(),
            },
            env_prefix: usage.env_prefix().map(ToOwned::to_owned),
            creation_timestamp: creation_timestamp(&usage.metadata),
        })
    }

    pub fn from_resources(usages: &[Arc<crds::ServiceBindingUsage>]) -> Vec<Self> {
        usages
            .iter()
            .filter_map(|usage| Self::from_resource(usage))
            .collect()
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct ServiceBindingUsageEvent {
    #[graphql(name = "type")]
    pub event_type: SubscriptionEventType,
    pub service_binding_usage: ServiceBindingUsage,
}

impl ServiceBindingUsageEvent {
    pub fn from_event(event: &Event<crds::ServiceBindingUsage>) -> Option<Self> {
        Some(Self {
            event_type: SubscriptionEventType::of(event),
            service_binding_usage: ServiceBindingUsage::from_resource(event.object())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use catalog_gateway_crds::v1alpha1::binding_usage::{
        EnvPrefix, ServiceBindingUsageParameters, UsedByRef,
    };
    use catalog_gateway_crds::v1alpha1::ServiceBindingUsageSpec;
    use catalog_gateway_crds::v1beta1::LocalObjectReference;

    use super::*;

    fn make_usage(parameters: Option<ServiceBindingUsageParameters>) -> crds::ServiceBindingUsage {
        let mut usage = crds::ServiceBindingUsage::new(
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
        );
        usage.metadata.namespace = Some("prod".into());
        usage
    }

    #[test]
    fn test_from_resource() {
        let converted = ServiceBindingUsage::from_resource(&make_usage(None)).unwrap();
        assert_eq!(converted.service_binding_name, "binding-a");
        assert_eq!(
            converted.used_by,
            UsageReference {
                kind: "deployment".into(),
                name: "app-a".into(),
            }
        );
        assert!(converted.env_prefix.is_none());
    }

    #[test]
    fn test_from_resource_maps_env_prefix() {
        let usage = make_usage(Some(ServiceBindingUsageParameters {
            env_prefix: Some(EnvPrefix {
                name: "REDIS_".into(),
            }),
        }));
        let converted = ServiceBindingUsage::from_resource(&usage).unwrap();
        assert_eq!(converted.env_prefix.as_deref(), Some("REDIS_"));
    }

    #[test]
    fn test_from_event_carries_event_type() {
        let event = Event::Update(Arc::new(make_usage(None)));
        let converted = ServiceBindingUsageEvent::from_event(&event).unwrap();
        assert_eq!(converted.event_type, SubscriptionEventType::Update);
    }
}
