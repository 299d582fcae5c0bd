use std::sync::Arc;

use catalog_gateway_crds::v1beta1::ServiceBroker;
use catalog_gateway_k8s_utils::{EventStream, ResourceCache};
use kube::ResourceExt;

use super::pagination::paginate;
use super::sorted;

pub struct BrokerService {
    cache: ResourceCache<ServiceBroker>,
}

impl BrokerService {
    pub fn new(cache: ResourceCache<ServiceBroker>) -> Self {
        Self { cache }
    }

    pub fn find(&self, name: &str, environment: &str) -> Option<Arc<ServiceBroker>> {
        self.cache.get(name, Some(environment))
    }

    pub fn list(
        &self,
        environment: &str,
        first: Option<usize>,
        offset: Option<usize>,
    ) -> Vec<Arc<ServiceBroker>> {
        let brokers = self
            .cache
            .state()
            .into_iter()
            .filter(|broker| broker.namespace().as_deref() == Some(environment))
            .collect();
        paginate(sorted(brokers), first, offset)
    }

    pub fn subscribe(&self, environment: &str) -> EventStream<ServiceBroker> {
        let environment = environment.to_owned();
        self.cache.subscribe(move |broker| {
            broker.metadata.namespace.as_deref() == Some(environment.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use catalog_gateway_crds::v1beta1::ServiceBrokerSpec;
    use catalog_gateway_k8s_utils::{cache, Event, IndexSet};
    use futures::StreamExt;
    use kube::runtime::watcher;

    use super::*;

    fn make_broker(name: &str, environment: &str) -> ServiceBroker {
        let mut broker = ServiceBroker::new(
            name,
            ServiceBrokerSpec {
                url: format!("https://{name}.example.com"),
                relist_behavior: None,
            },
        );
        broker.metadata.namespace = Some(environment.into());
        broker
    }

    async fn seeded_service(brokers: Vec<ServiceBroker>) -> BrokerService {
        let (cache, mut writer) = cache(IndexSet::new());
        for broker in brokers {
            writer.apply(watcher::Event::Apply(broker)).await;
        }
        BrokerService::new(cache)
    }

    #[tokio::test]
    async fn test_find_scopes_to_environment() {
        let service = seeded_service(vec![
            make_broker("broker-a", "prod"),
            make_broker("broker-a", "stage"),
        ])
        .await;

        assert!(service.find("broker-a", "prod").is_some());
        assert!(service.find("broker-a", "qa").is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let service = seeded_service(vec![
            make_broker("broker-c", "prod"),
            make_broker("broker-a", "prod"),
            make_broker("broker-b", "prod"),
            make_broker("broker-d", "stage"),
        ])
        .await;

        let names: Vec<String> = service
            .list("prod", Some(2), Some(1))
            .iter()
            .map(|broker| broker.name_any())
            .collect();
        assert_eq!(names, vec!["broker-b", "broker-c"]);

        assert!(service.list("prod", None, Some(5)).is_empty());
        assert_eq!(service.list("stage", None, None).len(), 1);
    }

    #[tokio::test]
    async fn test_subscribe_filters_by_environment() {
        let (cache, mut writer) = cache(IndexSet::new());
        let service = BrokerService::new(cache);
        let mut events = service.subscribe("prod");

        writer
            .apply(watcher::Event::Apply(make_broker("broker-a", "stage")))
            .await;
        writer
            .apply(watcher::Event::Apply(make_broker("broker-b", "prod")))
            .await;

        let event = events.next().await.unwrap();
        assert!(matches!(event, Event::Add(_)));
        assert_eq!(event.object().name_any(), "broker-b");
    }
}
