use std::sync::Arc;

use async_graphql::{Context, Json, Object, Result};

use super::error;
use super::types::{
    CreateServiceBindingUsageInput, CreateServiceInstanceInput, ServiceBinding,
    ServiceBindingUsage, ServiceInstance,
};
use crate::catalog::{NewServiceBinding, NewServiceBindingUsage, NewServiceInstance, Services};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_service_instance(
        &self,
        ctx: &Context<'_>,
        params: CreateServiceInstanceInput,
    ) -> Result<ServiceInstance> {
        let services = ctx.data::<Arc<Services>>()?;
        let name = params.name.clone();
        let environment = params.environment.clone();
        let created = services
            .instance
            .create(NewServiceInstance {
                name: params.name,
                environment: params.environment,
                service_class_external_name: params.service_class_external_name,
                service_plan_external_name: params.service_plan_external_name,
                parameters: params.parameters.map(|p| p.0),
            })
            .await
            .map_err(|e| error::resource_error("ServiceInstance", &name, Some(&environment), e))?;
        ServiceInstance::from_resource(&created)
            .ok_or_else(|| error::internal("ServiceInstance", &name, Some(&environment)))
    }

    async fn delete_service_instance(
        &self,
        ctx: &Context<'_>,
        name: String,
        environment: String,
    ) -> Result<ServiceInstance> {
        let services = ctx.data::<Arc<Services>>()?;
        let deleted = services
            .instance
            .delete(&name, &environment)
            .await
            .map_err(|e| error::resource_error("ServiceInstance", &name, Some(&environment), e))?;
        ServiceInstance::from_resource(&deleted)
            .ok_or_else(|| error::internal("ServiceInstance", &name, Some(&environment)))
    }

    async fn create_service_binding(
        &self,
        ctx: &Context<'_>,
        service_binding_name: String,
        service_instance_name: String,
        environment: String,
        parameters: Option<Json<serde_json::Value>>,
    ) -> Result<ServiceBinding> {
        let services = ctx.data::<Arc<Services>>()?;
        let created = services
            .binding
            .create(NewServiceBinding {
                name: service_binding_name.clone(),
                environment: environment.clone(),
                instance_name: service_instance_name,
                parameters: parameters.map(|p| p.0),
            })
            .await
            .map_err(|e| {
                error::resource_error("ServiceBinding", &service_binding_name, Some(&environment), e)
            })?;
        ServiceBinding::from_resource(&created).ok_or_else(|| {
            error::internal("ServiceBinding", &service_binding_name, Some(&environment))
        })
    }

    async fn delete_service_binding(
        &self,
        ctx: &Context<'_>,
        service_binding_name: String,
        environment: String,
    ) -> Result<ServiceBinding> {
        let services = ctx.data::<Arc<Services>>()?;
        let deleted = services
            .binding
            .delete(&service_binding_name, &environment)
            .await
            .map_err(|e| {
                error::resource_error("ServiceBinding", &service_binding_name, Some(&environment), e)
            })?;
        ServiceBinding::from_resource(&deleted).ok_or_else(|| {
            error::internal("ServiceBinding", &service_binding_name, Some(&environment))
        })
    }

    async fn create_service_binding_usage(
        &self,
        ctx: &Context<'_>,
        input: CreateServiceBindingUsageInput,
    ) -> Result<ServiceBindingUsage> {
        let services = ctx.data::<Arc<Services>>()?;
        let name = input.name.clone();
        let environment = input.environment.clone();
        let created = services
            .binding_usage
            .create(NewServiceBindingUsage {
                name: input.name,
                environment: input.environment,
                binding_name: input.service_binding_name,
                used_by_kind: input.used_by.kind,
                used_by_name: input.used_by.name,
                env_prefix: input.env_prefix,
            })
            .await
            .map_err(|e| {
                error::resource_error("ServiceBindingUsage", &name, Some(&environment), e)
            })?;
        ServiceBindingUsage::from_resource(&created)
            .ok_or_else(|| error::internal("ServiceBindingUsage", &name, Some(&environment)))
    }

    async fn delete_service_binding_usage(
        &self,
        ctx: &Context<'_>,
        service_binding_usage_name: String,
        environment: String,
    ) -> Result<ServiceBindingUsage> {
        let services = ctx.data::<Arc<Services>>()?;
        let deleted = services
            .binding_usage
            .delete(&service_binding_usage_name, &environment)
            .await
            .map_err(|e| {
                error::resource_error(
                    "ServiceBindingUsage",
                    &service_binding_usage_name,
                    Some(&environment),
                    e,
                )
            })?;
        ServiceBindingUsage::from_resource(&deleted).ok_or_else(|| {
            error::internal(
                "ServiceBindingUsage",
                &service_binding_usage_name,
                Some(&environment),
            )
        })
    }
}
