use std::sync::Arc;

use catalog_gateway_crds::v1beta1::ServicePlan;
use catalog_gateway_k8s_utils::ResourceCache;

use super::pagination::paginate;
use super::sorted;
use crate::kubernetes::{composite_key, INDEX_CLASS_NAME, INDEX_CLASS_PLAN};
use crate::Result;

pub struct PlanService {
    cache: ResourceCache<ServicePlan>,
}

impl PlanService {
    pub fn new(cache: ResourceCache<ServicePlan>) -> Self {
        Self { cache }
    }

    pub fn find(&self, name: &str) -> Option<Arc<ServicePlan>> {
        self.cache.get(name, None)
    }

    pub fn list(&self, first: Option<usize>, offset: Option<usize>) -> Vec<Arc<ServicePlan>> {
        paginate(sorted(self.cache.state()), first, offset)
    }

    /// Plans advertised for a class, by the owning class resource name.
    pub fn list_for_class(&self, class_name: &str) -> Result<Vec<Arc<ServicePlan>>> {
        Ok(sorted(self.cache.by_index(INDEX_CLASS_NAME, class_name)?))
    }

    /// Instance specs carry the plan's external name, scoped to its class.
    pub fn find_for_class_by_external_name(
        &self,
        class_name: &str,
        external_name: &str,
    ) -> Result<Option<Arc<ServicePlan>>> {
        let matches = self
            .cache
            .by_index(INDEX_CLASS_PLAN, &composite_key(class_name, external_name))?;
        Ok(sorted(matches).into_iter().next())
    }
}
