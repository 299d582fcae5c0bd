use std::sync::Arc;

use async_graphql::SimpleObject;
use catalog_gateway_crds::v1beta1 as crds;
use catalog_gateway_k8s_utils::Event;
use chrono::{DateTime, Utc};

use super::{creation_timestamp, SubscriptionEventType};
use crate::catalog::status::{binding_status, BindingStatusType};

#[derive(SimpleObject, Clone, Debug)]
pub struct ServiceBinding {
    pub name: String,
    pub environment: String,
    pub service_instance_name: String,
    /// Secret the broker wrote the credentials to.
    pub secret_name: Option<String>,
    pub status: BindingStatusType,
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl ServiceBinding {
    pub fn from_resource(binding: &crds::ServiceBinding) -> Option<Self> {
        let name = binding.metadata.name.clone()?;
        Some(Self {
            name,
            environment: binding.metadata.namespace.clone().unwrap_or_default(),
            service_instance_name: binding.instance_name().to_owned(),
            secret_name: binding.secret_name().map(ToOwned::to_owned),
            status: binding_status(binding),
            creation_timestamp: creation_timestamp(&binding.metadata),
        })
    }

    pub fn from_resources(bindings: &[Arc<crds::ServiceBinding>]) -> Vec<Self> {
        bindings
            .iter()
            .filter_map(|binding| Self::from_resource(binding))
            .collect()
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct ServiceBindingEvent {
    #[graphql(name = "type")]
    pub event_type: SubscriptionEventType,
    pub service_binding: ServiceBinding,
}

impl ServiceBindingEvent {
    pub fn from_event(event: &Event<crds::ServiceBinding>) -> Option<Self> {
        Some(Self {
            event_type: SubscriptionEventType::of(event),
            service_binding: ServiceBinding::from_resource(event.object())?,
        })
    }
}
