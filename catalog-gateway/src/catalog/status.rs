use async_graphql::Enum;
use catalog_gateway_crds::v1beta1::instance::OPERATION_DEPROVISION;
use catalog_gateway_crds::v1beta1::{
    ServiceBinding, ServiceInstance, CONDITION_FAILED, CONDITION_READY,
};

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum InstanceStatusType {
    Running,
    Provisioning,
    Deprovisioning,
    Failed,
    Pending,
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum BindingStatusType {
    Ready,
    Pending,
    Failed,
    Unknown,
}

/// Current lifecycle phase of an instance, derived from its reported
/// conditions and any in-flight operation.
pub fn instance_status(instance: &ServiceInstance) -> InstanceStatusType {
    let Some(status) = instance.status.as_ref() else {
        return InstanceStatusType::Pending;
    };
    if status.async_op_in_progress {
        return match status.current_operation.as_deref() {
            Some(OPERATION_DEPROVISION) => InstanceStatusType::Deprovisioning,
            _ => InstanceStatusType::Provisioning,
        };
    }
    for condition in &status.conditions {
        if condition.is(CONDITION_READY) {
            return InstanceStatusType::Running;
        }
        if condition.is(CONDITION_FAILED) {
            return InstanceStatusType::Failed;
        }
    }
    InstanceStatusType::Pending
}

pub fn binding_status(binding: &ServiceBinding) -> BindingStatusType {
    let Some(status) = binding.status.as_ref() else {
        return BindingStatusType::Unknown;
    };
    for condition in &status.conditions {
        if condition.is(CONDITION_READY) {
            return BindingStatusType::Ready;
        }
        if condition.is(CONDITION_FAILED) {
            return BindingStatusType::Failed;
        }
    }
    BindingStatusType::Pending
}
