use std::sync::Arc;

use catalog_gateway_crds::v1alpha1::UsageKind;
use catalog_gateway_k8s_utils::ResourceCache;
use kube::api::{DynamicObject, ListParams};
use kube::{Api, Client};

use super::pagination::paginate;
use super::sorted;
use crate::{Error, Result};

pub struct UsageKindService {
    cache: ResourceCache<UsageKind>,
    client: Client,
}

impl UsageKindService {
    pub fn new(cache: ResourceCache<UsageKind>, client: Client) -> Self {
        Self { cache, client }
    }

    pub fn list(&self, first: Option<usize>, offset: Option<usize>) -> Vec<Arc<UsageKind>> {
        paginate(sorted(self.cache.state()), first, offset)
    }

    /// Live resources of the kind a UsageKind points at, listed through the
    /// dynamic API since the target kind is only known at runtime.
    pub async fn list_resources(
        &self,
        usage_kind: &str,
        environment: &str,
    ) -> Result<Vec<DynamicObject>> {
        let kind = self
            .cache
            .get(usage_kind, None)
            .ok_or_else(|| Error::NotFound {
                kind: "UsageKind",
                name: usage_kind.into(),
            })?;
        let (resource, _caps) = kube::discovery::pinned_kind(&self.client, &kind.gvk()).await?;
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), environment, &resource);
        Ok(api.list(&ListParams::default()).await?.items)
    }
}
