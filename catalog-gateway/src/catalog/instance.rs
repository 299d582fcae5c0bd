use std::sync::Arc;

use catalog_gateway_crds::v1beta1::{ServiceInstance, ServiceInstanceSpec};
use catalog_gateway_k8s_utils::{EventStream, ResourceCache};
use kube::api::{DeleteParams, PostParams};
use kube::{Api, Client, ResourceExt};

use super::pagination::paginate;
use super::sorted;
use crate::kubernetes::INDEX_CLASS_NAME;
use crate::{Error, Result};

pub struct NewServiceInstance {
    pub name: String,
    pub environment: String,
    pub service_class_external_name: String,
    pub service_plan_external_name: String,
    pub parameters: Option<serde_json::Value>,
}

/// Reads come from the cache; create and delete go through the typed API.
pub struct InstanceService {
    cache: ResourceCache<ServiceInstance>,
    client: Client,
}

impl InstanceService {
    pub fn new(cache: ResourceCache<ServiceInstance>, client: Client) -> Self {
        Self { cache, client }
    }

    fn api(&self, environment: &str) -> Api<ServiceInstance> {
        Api::namespaced(self.client.clone(), environment)
    }

    pub fn find(&self, name: &str, environment: &str) -> Option<Arc<ServiceInstance>> {
        self.cache.get(name, Some(environment))
    }

    pub fn list(
        &self,
        environment: &str,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Vec<Arc<ServiceInstance>> {
        let instances = self
            .cache
            .state()
            .into_iter()
            .filter(|instance| instance.namespace().as_deref() == Some(environment))
            .collect();
        paginate(sorted(instances), first, offset)
    }

    /// Instances provisioned from a class, across environments.
    pub fn list_for_class(&self, class_external_name: &str) -> Result<Vec<Arc<ServiceInstance>>> {
        Ok(sorted(
            self.cache.by_index(INDEX_CLASS_NAME, class_external_name)?,
        ))
    }

    pub async fn create(&self, new: NewServiceInstance) -> Result<ServiceInstance> {
        let mut instance = ServiceInstance::new(
            &new.name,
            ServiceInstanceSpec {
                service_class_external_name: new.service_class_external_name,
                service_plan_external_name: new.service_plan_external_name,
                parameters: new.parameters,
            },
        );
        instance.metadata.namespace = Some(new.environment.clone());
        Ok(self
            .api(&new.environment)
            .create(&PostParams::default(), &instance)
            .await?)
    }

    /// Deletes through the API and returns the last cached revision, so the
    /// mutation payload carries the object that was removed.
    pub async fn delete(&self, name: &str, environment: &str) -> Result<Arc<ServiceInstance>> {
        let instance = self
            .cache
            .get(name, Some(environment))
            .ok_or_else(|| Error::NotFound {
                kind: "ServiceInstance",
                name: name.into(),
            })?;
        self.api(environment)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(instance)
    }

    pub fn subscribe(&self, environment: &str) -> EventStream<ServiceInstance> {
        let environment = environment.to_owned();
        self.cache.subscribe(move |instance| {
            instance.metadata.namespace.as_deref() == Some(environment.as_str())
        })
    }
}
