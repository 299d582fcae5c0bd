pub mod cache;
pub mod index;
pub mod notifier;

pub use cache::{cache, CacheWriter, ResourceCache};
pub use index::IndexSet;
pub use notifier::{Event, EventStream, Notifier};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to create store: {0}")]
    StoreCreation(String),

    #[error("index {name} not found")]
    IndexNotFound { name: String },

    #[error("kube error: {0}")]
    KubeError(#[from] kube::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
