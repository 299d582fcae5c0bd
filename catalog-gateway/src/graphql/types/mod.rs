mod binding;
mod binding_usage;
mod broker;
mod class;
mod instance;
mod plan;
mod usage_kind;

pub use binding::{ServiceBinding, ServiceBindingEvent};
pub use binding_usage::{
    CreateServiceBindingUsageInput, ServiceBindingUsage, ServiceBindingUsageEvent,
    UsageReference, UsageReferenceInput,
};
pub use broker::{ServiceBroker, ServiceBrokerEvent, ServiceBrokerStatus};
pub use class::ServiceClass;
pub use instance::{CreateServiceInstanceInput, ServiceInstance, ServiceInstanceEvent};
pub use plan::ServicePlan;
pub use usage_kind::{UsageKind, UsageKindResource};

use async_graphql::Enum;
use catalog_gateway_k8s_utils::Event;
use chrono::{DateTime, Utc};
use kube::api::ObjectMeta;

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum SubscriptionEventType {
    Add,
    Update,
    Delete,
}

impl SubscriptionEventType {
    pub fn of<K>(event: &Event<K>) -> Self {
        match event {
            Event::Add(_) => Self::Add,
            Event::Update(_) => Self::Update,
            Event::Delete(_) => Self::Delete,
        }
    }
}

pub(crate) fn creation_timestamp(metadata: &ObjectMeta) -> Option<DateTime<Utc>> {
    metadata.creation_timestamp.as_ref().map(|time| time.0)
}
