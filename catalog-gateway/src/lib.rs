pub mod catalog;
pub mod config;
pub mod graphql;
pub mod http;
pub mod kubernetes;
pub mod metrics;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("kube error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("cache error: {0}")]
    Cache(#[from] catalog_gateway_k8s_utils::Error),

    #[error("crd error: {0}")]
    Crds(#[from] catalog_gateway_crds::Error),

    #[error("timed out waiting for {0}")]
    Timeout(String),

    #[error("{kind} {name} not found")]
    NotFound { kind: &'static str, name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
