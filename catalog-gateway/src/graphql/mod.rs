pub mod error;
pub mod mutation;
pub mod query;
pub mod subscription;
pub mod types;

use std::sync::Arc;

use async_graphql::Schema;

use crate::catalog::Services;
use crate::metrics::Metrics;
use mutation::MutationRoot;
use query::QueryRoot;
use subscription::SubscriptionRoot;

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, SubscriptionRoot>;

/// Build the schema with the per-kind services and the metrics handle
/// injected as context data.
pub fn build_schema(services: Arc<Services>, metrics: Arc<Metrics>) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, SubscriptionRoot)
        .data(services)
        .data(metrics)
        .finish()
}

#[cfg(test)]
mod tests {
    use catalog_gateway_crds::v1beta1::{
        LocalObjectReference, ServiceBroker, ServiceBrokerSpec, ServiceClass, ServiceClassSpec,
        ServiceInstance, ServiceInstanceSpec, ServicePlan, ServicePlanSpec,
    };
    use futures::{FutureExt, StreamExt};
    use kube::runtime::watcher;

    use super::*;
    use crate::test_util::{caches, CacheWriters};

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

    fn make_class(name: &str, external_name: &str) -> ServiceClass {
        ServiceClass::new(
            name,
            ServiceClassSpec {
                external_name: external_name.into(),
                service_broker_name: "broker-a".into(),
                ..Default::default()
            },
        )
    }

    fn make_plan(name: &str, class_name: &str, external_name: &str) -> ServicePlan {
        ServicePlan::new(
            name,
            ServicePlanSpec {
                external_name: external_name.into(),
                service_class_ref: LocalObjectReference {
                    name: class_name.into(),
                },
                ..Default::default()
            },
        )
    }

    fn make_instance(name: &str, environment: &str, class_external_name: &str) -> ServiceInstance {
        let mut instance = ServiceInstance::new(
            name,
            ServiceInstanceSpec {
                service_class_external_name: class_external_name.into(),
                service_plan_external_name: "standard".into(),
                parameters: None,
            },
        );
        instance.metadata.namespace = Some(environment.into());
        instance
    }

    fn schema_with_writers() -> (CatalogSchema, CacheWriters) {
        let (caches, writers) = caches();
        let services = Arc::new(Services::new(crate::test_util::client(), caches));
        (
            build_schema(services, Arc::new(Metrics::default())),
            writers,
        )
    }

    #[tokio::test]
    async fn test_service_brokers_query_filters_and_paginates() {
        let (schema, mut writers) = schema_with_writers();
        for broker in [
            make_broker("broker-c", "prod"),
            make_broker("broker-a", "prod"),
            make_broker("broker-b", "prod"),
            make_broker("broker-d", "stage"),
        ] {
            writers.broker.apply(watcher::Event::Apply(broker)).await;
        }

        let response = schema
            .execute(r#"{ serviceBrokers(environment: "prod", first: 2, offset: 1) { name } }"#)
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        let names: Vec<&str> = data["serviceBrokers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|broker| broker["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["broker-b", "broker-c"]);
    }

    #[tokio::test]
    async fn test_service_class_nested_fields() {
        let (schema, mut writers) = schema_with_writers();
        writers
            .class
            .apply(watcher::Event::Apply(make_class("class-a", "redis")))
            .await;
        writers
            .plan
            .apply(watcher::Event::Apply(make_plan(
                "plan-a", "class-a", "standard",
            )))
            .await;
        writers
            .instance
            .apply(watcher::Event::Apply(make_instance("i-a", "prod", "redis")))
            .await;

        let response = schema
            .execute(
                r#"{ serviceClass(name: "class-a") {
                    externalName
                    activated
                    plans { externalName }
                    instances { name environment }
                } }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        let class = &data["serviceClass"];
        assert_eq!(class["externalName"], "redis");
        assert_eq!(class["activated"], true);
        assert_eq!(class["plans"][0]["externalName"], "standard");
        assert_eq!(class["instances"][0]["name"], "i-a");
    }

    #[tokio::test]
    async fn test_missing_class_resolves_to_null() {
        let (schema, _writers) = schema_with_writers();
        let response = schema
            .execute(r#"{ serviceClass(name: "nope") { name } }"#)
            .await;
        assert!(response.errors.is_empty());
        let data = response.data.into_json().unwrap();
        assert!(data["serviceClass"].is_null());
    }

    #[tokio::test]
    async fn test_delete_missing_instance_returns_not_found_code() {
        let (schema, _writers) = schema_with_writers();
        let response = schema
            .execute(r#"mutation { deleteServiceInstance(name: "i-a", environment: "prod") { name } }"#)
            .await;
        assert_eq!(response.errors.len(), 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["errors"][0]["extensions"]["code"], "NOT_FOUND");
        assert_eq!(
            json["errors"][0]["message"],
            "ServiceInstance \"i-a\" in environment \"prod\" not found"
        );
    }

    #[tokio::test]
    async fn test_service_instance_event_subscription() {
        let (schema, mut writers) = schema_with_writers();
        let mut stream = schema.execute_stream(
            r#"subscription {
                serviceInstanceEvent(environment: "prod") {
                    type
                    serviceInstance { name }
                }
            }"#,
        );
        // the first poll runs the resolver and registers the listener
        assert!(stream.next().now_or_never().is_none());

        writers
            .instance
            .apply(watcher::Event::Apply(make_instance(
                "i-a", "stage", "redis",
            )))
            .await;
        writers
            .instance
            .apply(watcher::Event::Apply(make_instance("i-b", "prod", "redis")))
            .await;

        // only the matching environment is delivered
        let response = stream.next().await.unwrap();
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = response.data.into_json().unwrap();
        assert_eq!(data["serviceInstanceEvent"]["type"], "ADD");
        assert_eq!(data["serviceInstanceEvent"]["serviceInstance"]["name"], "i-b");
    }
}
