use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use super::error;
use super::types::{
    ServiceBinding, ServiceBindingUsage, ServiceBroker, ServiceClass, ServiceInstance,
    ServicePlan, UsageKind, UsageKindResource,
};
use crate::catalog::Services;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn service_broker(
        &self,
        ctx: &Context<'_>,
        name: String,
        environment: String,
    ) -> Result<Option<ServiceBroker>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(services
            .broker
            .find(&name, &environment)
            .as_deref()
            .and_then(ServiceBroker::from_resource))
    }

    async fn service_brokers(
        &self,
        ctx: &Context<'_>,
        environment: String,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ServiceBroker>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(ServiceBroker::from_resources(&services.broker.list(
            &environment,
            first,
            offset,
        )))
    }

    async fn service_class(&self, ctx: &Context<'_>, name: String) -> Result<Option<ServiceClass>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(services
            .class
            .find(&name)
            .as_deref()
            .and_then(ServiceClass::from_resource))
    }

    async fn service_classes(
        &self,
        ctx: &Context<'_>,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ServiceClass>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(ServiceClass::from_resources(
            &services.class.list(first, offset),
        ))
    }

    async fn service_plan(&self, ctx: &Context<'_>, name: String) -> Result<Option<ServicePlan>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(services
            .plan
            .find(&name)
            .as_deref()
            .and_then(ServicePlan::from_resource))
    }

    async fn service_plans(
        &self,
        ctx: &Context<'_>,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ServicePlan>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(ServicePlan::from_resources(
            &services.plan.list(first, offset),
        ))
    }

    async fn service_instance(
        &self,
        ctx: &Context<'_>,
        name: String,
        environment: String,
    ) -> Result<Option<ServiceInstance>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(services
            .instance
            .find(&name, &environment)
            .as_deref()
            .and_then(ServiceInstance::from_resource))
    }

    async fn service_instances(
        &self,
        ctx: &Context<'_>,
        environment: String,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ServiceInstance>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(ServiceInstance::from_resources(&services.instance.list(
            &environment,
            first,
            offset,
        )))
    }

    async fn service_binding(
        &self,
        ctx: &Context<'_>,
        name: String,
        environment: String,
    ) -> Result<Option<ServiceBinding>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(services
            .binding
            .find(&name, &environment)
            .as_deref()
            .and_then(ServiceBinding::from_resource))
    }

    async fn service_bindings(
        &self,
        ctx: &Context<'_>,
        environment: String,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ServiceBinding>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(ServiceBinding::from_resources(&services.binding.list(
            &environment,
            first,
            offset,
        )))
    }

    async fn service_binding_usage(
        &self,
        ctx: &Context<'_>,
        name: String,
        environment: String,
    ) -> Result<Option<ServiceBindingUsage>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(services
            .binding_usage
            .find(&name, &environment)
            .as_deref()
            .and_then(ServiceBindingUsage::from_resource))
    }

    async fn service_binding_usages(
        &self,
        ctx: &Context<'_>,
        environment: String,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<ServiceBindingUsage>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(ServiceBindingUsage::from_resources(
            &services.binding_usage.list(&environment, first, offset),
        ))
    }

    async fn usage_kinds(
        &self,
        ctx: &Context<'_>,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<UsageKind>> {
        let services = ctx.data::<Arc<Services>>()?;
        Ok(UsageKind::from_resources(
            &services.usage_kind.list(first, offset),
        ))
    }

    /// Live resources of the kind a UsageKind points at, within an environment.
    async fn usage_kind_resources(
        &self,
        ctx: &Context<'_>,
        usage_kind: String,
        environment: String,
    ) -> Result<Vec<UsageKindResource>> {
        let services = ctx.data::<Arc<Services>>()?;
        let objs = services
            .usage_kind
            .list_resources(&usage_kind, &environment)
            .await
            .map_err(|e| error::resource_error("UsageKind", &usage_kind, None, e))?;
        Ok(UsageKindResource::from_objects(&objs))
    }
}
