use std::sync::Arc;

use async_graphql::SimpleObject;
use catalog_gateway_crds::v1beta1 as crds;
use catalog_gateway_k8s_utils::Event;
use chrono::{DateTime, Utc};

use super::{creation_timestamp, SubscriptionEventType};

#[derive(SimpleObject, Clone, Debug, PartialEq)]
pub struct ServiceBroker {
    pub name: String,
    pub environment: String,
    pub url: String,
    pub creation_timestamp: Option<DateTime<Utc>>,
    pub status: ServiceBrokerStatus,
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Default)]
pub struct ServiceBrokerStatus {
    pub ready: bool,
    pub reason: Option<String>,
    pub message: Option<String>,
}

impl ServiceBroker {
    pub fn from_resource(broker: &crds::ServiceBroker) -> Option<Self> {
        let name = broker.metadata.name.clone()?;
        let status = broker
            .ready_condition()
            .map(|condition| ServiceBrokerStatus {
                ready: condition.is(crds::CONDITION_READY),
                reason: condition.reason.clone(),
                message: condition.message.clone(),
            })
            .unwrap_or_default();
        Some(Self {
            name,
            environment: broker.metadata.namespace.clone().unwrap_or_default(),
            url: broker.spec.url.clone(),
            creation_timestamp: creation_timestamp(&broker.metadata),
            status,
        })
    }

    pub fn from_resources(brokers: &[Arc<crds::ServiceBroker>]) -> Vec<Self> {
        brokers
            .iter()
            .filter_map(|broker| Self::from_resource(broker))
            .collect()
    }
}

#[derive(SimpleObject, Clone, Debug)]
pub struct ServiceBrokerEvent {
    #[graphql(name = "type")]
    pub event_type: SubscriptionEventType,
    pub service_broker: ServiceBroker,
}

impl ServiceBrokerEvent {
    pub fn from_event(event: &Event<crds::ServiceBroker>) -> Option<Self> {
        Some(Self {
            event_type: SubscriptionEventType::of(event),
            service_broker: ServiceBroker::from_resource(event.object())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use catalog_gateway_crds::v1beta1::{
        CatalogCondition, ServiceBrokerSpec, ServiceBrokerStatus as CrdStatus, CONDITION_READY,
        CONDITION_TRUE,
    };

    use super::*;

    fn make_broker(name: &str) -> crds::ServiceBroker {
        let mut broker = crds::ServiceBroker::new(
            name,
            ServiceBrokerSpec {
                url: "https://broker.example.com".into(),
                relist_behavior: None,
            },
        );
        broker.metadata.namespace = Some("prod".into());
        broker
    }

    #[test]
    fn test_from_resource_with_empty_status_is_zero_valued() {
        let converted = ServiceBroker::from_resource(&make_broker("broker-a")).unwrap();
        assert_eq!(converted.name, "broker-a");
        assert_eq!(converted.environment, "prod");
        assert_eq!(converted.status, ServiceBrokerStatus::default());
        assert!(converted.creation_timestamp.is_none());
    }

    #[test]
    fn test_from_resource_maps_ready_condition() {
        let mut broker = make_broker("broker-a");
        broker.status = Some(CrdStatus {
            conditions: vec![CatalogCondition {
                type_: CONDITION_READY.into(),
                status: CONDITION_TRUE.into(),
                reason: Some("FetchedCatalog".into()),
                message: Some("catalog fetched".into()),
            }],
        });

        let converted = ServiceBroker::from_resource(&broker).unwrap();
        assert!(converted.status.ready);
        assert_eq!(converted.status.reason.as_deref(), Some("FetchedCatalog"));
    }

    #[test]
    fn test_from_resources_skips_unnamed_objects() {
        let named = make_broker("broker-a");
        let mut unnamed = make_broker("broker-b");
        unnamed.metadata.name = None;

        let converted =
            ServiceBroker::from_resources(&[Arc::new(unnamed), Arc::new(named)]);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].name, "broker-a");
    }
}
