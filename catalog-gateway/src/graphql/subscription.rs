use std::sync::Arc;

use async_graphql::{Context, Result, Subscription};
use futures::{future, Stream, StreamExt};

use super::types::{
    ServiceBindingEvent, ServiceBindingUsageEvent, ServiceBrokerEvent, ServiceInstanceEvent,
};
use crate::catalog::Services;
use crate::metrics::Metrics;

/// Each subscription registers a filtered listener on the resource's cache.
/// The listener lives as long as the returned stream: when the client
/// disconnects, async-graphql drops the stream and the listener unsubscribes.
pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    async fn service_broker_event(
        &self,
        ctx: &Context<'_>,
        environment: String,
    ) -> Result<impl Stream<Item = ServiceBrokerEvent>> {
        let services = ctx.data::<Arc<Services>>()?;
        let metrics = ctx.data::<Arc<Metrics>>()?.clone();
        Ok(services
            .broker
            .subscribe(&environment)
            .filter_map(move |event| {
                let converted = ServiceBrokerEvent::from_event(&event);
                if converted.is_some() {
                    metrics.graphql.count_subscription_event("serviceBroker");
                }
                future::ready(converted)
            }))
    }

    async fn service_instance_event(
        &self,
        ctx: &Context<'_>,
        environment: String,
    ) -> Result<impl Stream<Item = ServiceInstanceEvent>> {
        let services = ctx.data::<Arc<Services>>()?;
        let metrics = ctx.data::<Arc<Metrics>>()?.clone();
        Ok(services
            .instance
            .subscribe(&environment)
            .filter_map(move |event| {
                let converted = ServiceInstanceEvent::from_event(&event);
                if converted.is_some() {
                    metrics.graphql.count_subscription_event("serviceInstance");
                }
                future::ready(converted)
            }))
    }

    async fn service_binding_event(
        &self,
        ctx: &Context<'_>,
        environment: String,
    ) -> Result<impl Stream<Item = ServiceBindingEvent>> {
        let services = ctx.data::<Arc<Services>>()?;
        let metrics = ctx.data::<Arc<Metrics>>()?.clone();
        Ok(services
            .binding
            .subscribe(&environment)
            .filter_map(move |event| {
                let converted = ServiceBindingEvent::from_event(&event);
                if converted.is_some() {
                    metrics.graphql.count_subscription_event("serviceBinding");
                }
                future::ready(converted)
            }))
    }

    async fn service_binding_usage_event(
        &self,
        ctx: &Context<'_>,
        environment: String,
    ) -> Result<impl Stream<Item = ServiceBindingUsageEvent>> {
        let services = ctx.data::<Arc<Services>>()?;
        let metrics = ctx.data::<Arc<Metrics>>()?.clone();
        Ok(services
            .binding_usage
            .subscribe(&environment)
            .filter_map(move |event| {
                let converted = ServiceBindingUsageEvent::from_event(&event);
                if converted.is_some() {
                    metrics
                        .graphql
                        .count_subscription_event("serviceBindingUsage");
                }
                future::ready(converted)
            }))
    }
}
