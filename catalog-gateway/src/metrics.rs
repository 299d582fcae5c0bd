use std::sync::Arc;

use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

#[derive(Clone)]
pub struct Metrics {
    pub graphql: GraphqlMetrics,
    pub registry: Arc<Registry>,
}

impl Default for Metrics {
    fn default() -> Self {
        let mut registry = Registry::with_prefix("catalog_gateway");
        let graphql = GraphqlMetrics::default().register(&mut registry);
        Self {
            registry: Arc::new(registry),
            graphql,
        }
    }
}

#[derive(Clone, Default)]
pub struct GraphqlMetrics {
    requests: Family<OperationLabels, Counter>,
    subscription_events: Family<ResourceLabels, Counter>,
}

impl GraphqlMetrics {
    pub fn register(self, registry: &mut Registry) -> Self {
        registry.register(
            "graphql_requests",
            "Number of executed GraphQL requests",
            self.requests.clone(),
        );
        registry.register(
            "subscription_events",
            "Number of events dispatched to GraphQL subscriptions",
            self.subscription_events.clone(),
        );
        self
    }

    pub fn count_request(&self, operation: &str) {
        self.requests
            .get_or_create(&OperationLabels {
                operation: operation.to_owned(),
            })
            .inc();
    }

    pub fn count_subscription_event(&self, resource: &str) {
        self.subscription_events
            .get_or_create(&ResourceLabels {
                resource: resource.to_owned(),
            })
            .inc();
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct OperationLabels {
    pub operation: String,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct ResourceLabels {
    pub resource: String,
}
