use std::sync::Arc;

use async_graphql::{ComplexObject, Context, Result, SimpleObject};
use catalog_gateway_crds::v1beta1 as crds;
use chrono::{DateTime, Utc};

use super::{creation_timestamp, ServiceInstance, ServicePlan};
use crate::catalog::Services;
use crate::graphql::error;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct ServiceClass {
    pub name: String,
    pub external_name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub service_broker_name: String,
    pub bindable: bool,
    pub tags: Vec<String>,
    pub creation_timestamp: Option<DateTime<Utc>>,
}

#[ComplexObject]
impl ServiceClass {
    /// Plans the broker advertises for this class.
    async fn plans(&self, ctx: &Context<'_>) -> Result<Vec<ServicePlan>> {
        let services = ctx.data::<Arc<Services>>()?;
        let plans = services
            .plan
            .list_for_class(&self.name)
            .map_err(|e| error::resource_error("ServicePlan", &self.name, None, e))?;
        Ok(ServicePlan::from_resources(&plans))
    }

    /// Instances provisioned from this class, across environments.
    async fn instances(&self, ctx: &Context<'_>) -> Result<Vec<ServiceInstance>> {
        let services = ctx.data::<Arc<Services>>()?;
        let instances = services
            .instance
            .list_for_class(&self.external_name)
            .map_err(|e| error::resource_error("ServiceInstance", &self.external_name, None, e))?;
        Ok(ServiceInstance::from_resources(&instances))
    }

    /// True when at least one instance was provisioned from this class.
    async fn activated(&self, ctx: &Context<'_>) -> Result<bool> {
        let services = ctx.data::<Arc<Services>>()?;
        let instances = services
            .instance
            .list_for_class(&self.external_name)
            .map_err(|e| error::resource_error("ServiceInstance", &self.external_name, None, e))?;
        Ok(!instances.is_empty())
    }
}

impl ServiceClass {
    pub fn from_resource(class: &crds::ServiceClass) -> Option<Self> {
        let name = class.metadata.name.clone()?;
        Some(Self {
            name,
            external_name: class.spec.external_name.clone(),
            display_name: class.display_name(),
            description: class.spec.description.clone(),
            service_broker_name: class.spec.service_broker_name.clone(),
            bindable: class.spec.bindable,
            tags: class.spec.tags.clone(),
            creation_timestamp: creation_timestamp(&class.metadata),
        })
    }

    pub fn from_resources(classes: &[Arc<crds::ServiceClass>]) -> Vec<Self> {
        classes
            .iter()
            .filter_map(|class| Self::from_resource(class))
            .collect()
    }
}
