use std::time::Duration;

use catalog_gateway_crds::v1alpha1::{ServiceBindingUsage, UsageKind};
use catalog_gateway_crds::v1beta1::{
    ServiceBinding, ServiceBroker, ServiceClass, ServiceInstance, ServicePlan,
};
use catalog_gateway_k8s_utils::{IndexSet, ResourceCache};
use kube::{Api, Client};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::{Error, Result};

/// Secondary index names, shared between cache construction and lookups.
pub const INDEX_EXTERNAL_NAME: &str = "externalName";
pub const INDEX_CLASS_NAME: &str = "serviceClassName";
pub const INDEX_CLASS_PLAN: &str = "serviceClassName/externalName";
pub const INDEX_INSTANCE_NAME: &str = "instanceName";
pub const INDEX_BINDING_NAME: &str = "bindingName";

/// Key of a namespaced object in a composite index.
pub fn composite_key(prefix: &str, suffix: &str) -> String {
    format!("{prefix}/{suffix}")
}

/// One cache per catalog kind, all synced before the gateway serves.
pub struct CatalogCaches {
    pub brokers: ResourceCache<ServiceBroker>,
    pub classes: ResourceCache<ServiceClass>,
    pub plans: ResourceCache<ServicePlan>,
    pub instances: ResourceCache<ServiceInstance>,
    pub bindings: ResourceCache<ServiceBinding>,
    pub binding_usages: ResourceCache<ServiceBindingUsage>,
    pub usage_kinds: ResourceCache<UsageKind>,
}

impl CatalogCaches {
    /// Start every cache and wait for the initial listings. Queries answered
    /// before this returns would silently come up empty, so the sync happens
    /// here, exactly once, under a bounded timeout.
    pub async fn start(
        client: Client,
        sync_timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let per_store = Some(sync_timeout);
        let caches = timeout(sync_timeout, async {
            tokio::try_join!(
                ResourceCache::start(
                    Api::all(client.clone()),
                    IndexSet::new(),
                    per_store,
                    cancel.child_token(),
                ),
                ResourceCache::start(
                    Api::all(client.clone()),
                    class_indexes(),
                    per_store,
                    cancel.child_token(),
                ),
                ResourceCache::start(
                    Api::all(client.clone()),
                    plan_indexes(),
                    per_store,
                    cancel.child_token(),
                ),
                ResourceCache::start(
                    Api::all(client.clone()),
                    instance_indexes(),
                    per_store,
                    cancel.child_token(),
                ),
                ResourceCache::start(
                    Api::all(client.clone()),
                    binding_indexes(),
                    per_store,
                    cancel.child_token(),
                ),
                ResourceCache::start(
                    Api::all(client.clone()),
                    binding_usage_indexes(),
                    per_store,
                    cancel.child_token(),
                ),
                ResourceCache::start(
                    Api::all(client.clone()),
                    IndexSet::new(),
                    per_store,
                    cancel.child_token(),
                ),
            )
        })
        .await
        .map_err(|_| Error::Timeout("store initialization".into()))??;

        let (brokers, classes, plans, instances, bindings, binding_usages, usage_kinds) = caches;
        Ok(Self {
            brokers,
            classes,
            plans,
            instances,
            bindings,
            binding_usages,
            usage_kinds,
        })
    }
}

pub fn class_indexes() -> IndexSet<ServiceClass> {
    IndexSet::new().with(INDEX_EXTERNAL_NAME, |class: &ServiceClass| {
        vec![class.spec.external_name.clone()]
    })
}

pub fn plan_indexes() -> IndexSet<ServicePlan> {
    IndexSet::new()
        .with(INDEX_CLASS_NAME, |plan: &ServicePlan| {
            vec![plan.class_name().to_owned()]
        })
        .with(INDEX_CLASS_PLAN, |plan: &ServicePlan| {
            vec![composite_key(plan.class_name(), &plan.spec.external_name)]
        })
}

pub fn instance_indexes() -> IndexSet<ServiceInstance> {
    IndexSet::new().with(INDEX_CLASS_NAME, |instance: &ServiceInstance| {
        vec![instance.spec.service_class_external_name.clone()]
    })
}

pub fn binding_indexes() -> IndexSet<ServiceBinding> {
    IndexSet::new().with(INDEX_INSTANCE_NAME, |binding: &ServiceBinding| {
        match binding.metadata.namespace.as_deref() {
            Some(namespace) => vec![composite_key(namespace, binding.instance_name())],
            None => Vec::new(),
        }
    })
}

pub fn binding_usage_indexes() -> IndexSet<ServiceBindingUsage> {
    IndexSet::new().with(INDEX_BINDING_NAME, |usage: &ServiceBindingUsage| {
        match usage.metadata.namespace.as_deref() {
            Some(namespace) => vec![composite_key(namespace, usage.binding_name())],
            None => Vec::new(),
        }
    })
}
