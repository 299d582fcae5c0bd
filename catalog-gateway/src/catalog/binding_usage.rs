use std::sync::Arc;

use catalog_gateway_crds::v1alpha1::binding_usage::{
    EnvPrefix, ServiceBindingUsageParameters, UsedByRef,
};
use catalog_gateway_crds::v1alpha1::{ServiceBindingUsage, ServiceBindingUsageSpec};
use catalog_gateway_crds::v1beta1::LocalObjectReference;
use catalog_gateway_k8s_utils::{EventStream, ResourceCache};
use kube::api::{DeleteParams, PostParams};
use kube::{Api, Client, ResourceExt};

use super::pagination::paginate;
use super::sorted;
use crate::kubernetes::{composite_key, INDEX_BINDING_NAME};
use crate::{Error, Result};

pub struct NewServiceBindingUsage {
    pub name: String,
    pub environment: String,
    pub binding_name: String,
    pub used_by_kind: String,
    pub used_by_name: String,
    pub env_prefix: Option<String>,
}

pub struct BindingUsageService {
    cache: ResourceCache<ServiceBindingUsage>,
    client: Client,
}

impl BindingUsageService {
    pub fn new(cache: ResourceCache<ServiceBindingUsage>, client: Client) -> Self {
        Self { cache, client }
    }

    fn api(&self, environment: &str) -> Api<ServiceBindingUsage> {
        Api::namespaced(self.client.clone(), environment)
    }

    pub fn find(&self, name: &str, environment: &str) -> Option<Arc<ServiceBindingUsage>> {
        self.cache.get(name, Some(environment))
    }

    pub fn list(
        &self,
        environment: &str,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Vec<Arc<ServiceBindingUsage>> {
        let usages = self
            .cache
            .state()
            .into_iter()
            .filter(|usage| usage.namespace().as_deref() == Some(environment))
            .collect();
        paginate(sorted(usages), first, offset)
    }

    /// Usages injecting a binding's secret, within the binding's environment.
    pub fn list_for_binding(
        &self,
        environment: &str,
        binding_name: &str,
    ) -> Result<Vec<Arc<ServiceBindingUsage>>> {
        Ok(sorted(self.cache.by_index(
            INDEX_BINDING_NAME,
            &composite_key(environment, binding_name),
        )?))
    }

    pub async fn create(&self, new: NewServiceBindingUsage) -> Result<ServiceBindingUsage> {
        let parameters = new.env_prefix.map(|name| ServiceBindingUsageParameters {
            env_prefix: Some(EnvPrefix { name }),
        });
        let mut usage = ServiceBindingUsage::new(
            &new.name,
            ServiceBindingUsageSpec {
                service_binding_ref: LocalObjectReference {
                    name: new.binding_name,
                },
                used_by: UsedByRef {
                    kind: new.used_by_kind,
                    name: new.used_by_name,
                },
                parameters,
            },
        );
        usage.metadata.namespace = Some(new.environment.clone());
        Ok(self
            .api(&new.environment)
            .create(&PostParams::default(), &usage)
            .await?)
    }

    pub async fn delete(&self, name: &str, environment: &str) -> Result<Arc<ServiceBindingUsage>> {
        let usage = self
            .cache
            .get(name, Some(environment))
            .ok_or_else(|| Error::NotFound {
                kind: "ServiceBindingUsage",
                name: name.into(),
            })?;
        self.api(environment)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(usage)
    }

    pub fn subscribe(&self, environment: &str) -> EventStream<ServiceBindingUsage> {
        let environment = environment.to_owned();
        self.cache.subscribe(move |usage| {
            usage.metadata.namespace.as_deref() == Some(environment.as_str())
        })
    }
}
