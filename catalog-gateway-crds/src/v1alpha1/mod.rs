pub mod binding_usage;
pub mod usage_kind;

pub use binding_usage::{ServiceBindingUsage, ServiceBindingUsageSpec, ServiceBindingUsageStatus};
pub use usage_kind::{UsageKind, UsageKindSpec};
