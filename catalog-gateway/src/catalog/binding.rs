use std::sync::Arc;

use catalog_gateway_crds::v1beta1::{LocalObjectReference, ServiceBinding, ServiceBindingSpec};
use catalog_gateway_k8s_utils::{EventStream, ResourceCache};
use kube::api::{DeleteParams, PostParams};
use kube::{Api, Client, ResourceExt};

use super::pagination::paginate;
use super::sorted;
use crate::kubernetes::{composite_key, INDEX_INSTANCE_NAME};
use crate::{Error, Result};

pub struct NewServiceBinding {
    pub name: String,
    pub environment: String,
    pub instance_name: String,
    pub parameters: Option<serde_json::Value>,
}

pub struct BindingService {
    cache: ResourceCache<ServiceBinding>,
    client: Client,
}

impl BindingService {
    pub fn new(cache: ResourceCache<ServiceBinding>, client: Client) -> Self {
        Self { cache, client }
    }

    fn api(&self, environment: &str) -> Api<ServiceBinding> {
        Api::namespaced(self.client.clone(), environment)
    }

    pub fn find(&self, name: &str, environment: &str) -> Option<Arc<ServiceBinding>> {
        self.cache.get(name, Some(environment))
    }

    pub fn list(
        &self,
        environment: &str,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Vec<Arc<ServiceBinding>> {
        let bindings = self
            .cache
            .state()
            .into_iter()
            .filter(|binding| binding.namespace().as_deref() == Some(environment))
            .collect();
        paginate(sorted(bindings), first, offset)
    }

    /// Bindings issued for an instance within its environment.
    pub fn list_for_instance(
        &self,
        environment: &str,
        instance_name: &str,
    ) -> Result<Vec<Arc<ServiceBinding>>> {
        Ok(sorted(self.cache.by_index(
            INDEX_INSTANCE_NAME,
            &composite_key(environment, instance_name),
        )?))
    }

    pub async fn create(&self, new: NewServiceBinding) -> Result<ServiceBinding> {
        let mut binding = ServiceBinding::new(
            &new.name,
            ServiceBindingSpec {
                instance_ref: LocalObjectReference {
                    name: new.instance_name,
                },
                secret_name: None,
                parameters: new.parameters,
            },
        );
        binding.metadata.namespace = Some(new.environment.clone());
        Ok(self
            .api(&new.environment)
            .create(&PostParams::default(), &binding)
            .await?)
    }

    pub async fn delete(&self, name: &str, environment: &str) -> Result<Arc<ServiceBinding>> {
        let binding = self
            .cache
            .get(name, Some(environment))
            .ok_or_else(|| Error::NotFound {
                kind: "ServiceBinding",
                name: name.into(),
            })?;
        self.api(environment)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(binding)
    }

    pub fn subscribe(&self, environment: &str) -> EventStream<ServiceBinding> {
        let environment = environment.to_owned();
        self.cache.subscribe(move |binding| {
            binding.metadata.namespace.as_deref() == Some(environment.as_str())
        })
    }
}
