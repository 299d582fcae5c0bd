pub mod binding;
pub mod binding_usage;
pub mod broker;
pub mod class;
pub mod instance;
pub mod pagination;
pub mod plan;
pub mod status;
pub mod usage_kind;

pub use binding::{BindingService, NewServiceBinding};
pub use binding_usage::{BindingUsageService, NewServiceBindingUsage};
pub use broker::BrokerService;
pub use class::ClassService;
pub use instance::{InstanceService, NewServiceInstance};
pub use plan::PlanService;
pub use usage_kind::UsageKindService;

use std::sync::Arc;

use kube::{Client, ResourceExt};

use crate::kubernetes::CatalogCaches;

/// Per-kind services, handed to the GraphQL roots via schema data.
pub struct Services {
    pub broker: BrokerService,
    pub class: ClassService,
    pub plan: PlanService,
    pub instance: InstanceService,
    pub binding: BindingService,
    pub binding_usage: BindingUsageService,
    pub usage_kind: UsageKindService,
}

impl Services {
    pub fn new(client: Client, caches: CatalogCaches) -> Self {
        Self {
            broker: BrokerService::new(caches.brokers),
            class: ClassService::new(caches.classes),
            plan: PlanService::new(caches.plans),
            instance: InstanceService::new(caches.instances, client.clone()),
            binding: BindingService::new(caches.bindings, client.clone()),
            binding_usage: BindingUsageService::new(caches.binding_usages, client.clone()),
            usage_kind: UsageKindService::new(caches.usage_kinds, client),
        }
    }
}

/// Listings are answered from cache state, ordered by namespace then name so
/// pagination windows are stable.
pub(crate) fn sorted<K: ResourceExt>(mut objs: Vec<Arc<K>>) -> Vec<Arc<K>> {
    objs.sort_by(|a, b| (a.namespace(), a.name_any()).cmp(&(b.namespace(), b.name_any())));
    objs
}
