use thiserror::Error;

pub mod v1alpha1;
pub mod v1beta1;

use kube::CustomResourceExt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("yaml error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub fn crd_gen_usage_kind() -> Result<()> {
    print!(
        "---\n{}",
        serde_yaml::to_string(&v1alpha1::usage_kind::UsageKind::crd())?
    );
    Ok(())
}

pub fn crd_gen_binding_usage() -> Result<()> {
    print!(
        "---\n{}",
        serde_yaml::to_string(&v1alpha1::binding_usage::ServiceBindingUsage::crd())?
    );
    Ok(())
}

pub fn crd_gen_all() -> Result<()> {
    let crds = vec![
        v1beta1::broker::ServiceBroker::crd(),
        v1beta1::class::ServiceClass::crd(),
        v1beta1::plan::ServicePlan::crd(),
        v1beta1::instance::ServiceInstance::crd(),
        v1beta1::binding::ServiceBinding::crd(),
        v1alpha1::binding_usage::ServiceBindingUsage::crd(),
        v1alpha1::usage_kind::UsageKind::crd(),
    ];
    for crd in crds {
        print!("---\n{}", serde_yaml::to_string(&crd)?);
    }
    Ok(())
}
