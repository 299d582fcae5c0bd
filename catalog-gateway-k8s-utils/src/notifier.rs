use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

// Single-slot buffer per listener: a subscriber that stops consuming stalls
// delivery for its cache rather than accumulating unbounded events.
const EVENT_BUFFER: usize = 1;

/// A classified change to a cached object.
pub enum Event<K> {
    Add(Arc<K>),
    Update(Arc<K>),
    Delete(Arc<K>),
}

impl<K> Event<K> {
    pub fn object(&self) -> &Arc<K> {
        match self {
            Event::Add(obj) | Event::Update(obj) | Event::Delete(obj) => obj,
        }
    }
}

impl<K> Clone for Event<K> {
    fn clone(&self) -> Self {
        match self {
            Event::Add(obj) => Event::Add(obj.clone()),
            Event::Update(obj) => Event::Update(obj.clone()),
            Event::Delete(obj) => Event::Delete(obj.clone()),
        }
    }
}

impl<K> std::fmt::Debug for Event<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Add(_) => f.write_str("Add"),
            Event::Update(_) => f.write_str("Update"),
            Event::Delete(_) => f.write_str("Delete"),
        }
    }
}

type Filter<K> = Box<dyn Fn(&K) -> bool + Send + Sync>;

struct Listener<K> {
    id: u64,
    filter: Filter<K>,
    tx: mpsc::Sender<Event<K>>,
}

/// Fans events out to a dynamic set of filtered listeners.
pub struct Notifier<K> {
    inner: Arc<Inner<K>>,
}

struct Inner<K> {
    listeners: Mutex<Vec<Listener<K>>>,
    next_id: AtomicU64,
}

impl<K> Clone for Notifier<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K> Notifier<K> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a listener that receives every published event whose object
    /// matches `filter`. Dropping the returned stream unsubscribes it.
    pub fn subscribe(
        &self,
        filter: impl Fn(&K) -> bool + Send + Sync + 'static,
    ) -> EventStream<K> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().unwrap().push(Listener {
            id,
            filter: Box::new(filter),
            tx,
        });
        EventStream {
            rx,
            _guard: ListenerGuard {
                id,
                inner: self.inner.clone(),
            },
        }
    }

    /// Deliver an event to every matching listener, in subscription order.
    /// Waits for channel capacity, so a listener that is not being consumed
    /// blocks delivery to those after it.
    pub async fn publish(&self, event: &Event<K>) {
        let targets: Vec<(u64, mpsc::Sender<Event<K>>)> = self
            .inner
            .listeners
            .lock()
            .unwrap()
            .iter()
            .filter(|listener| (listener.filter)(event.object()))
            .map(|listener| (listener.id, listener.tx.clone()))
            .collect();

        let mut stale = Vec::new();
        for (id, tx) in targets {
            if tx.send(event.clone()).await.is_err() {
                stale.push(id);
            }
        }
        if !stale.is_empty() {
            self.inner
                .listeners
                .lock()
                .unwrap()
                .retain(|listener| !stale.contains(&listener.id));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().unwrap().len()
    }
}

impl<K> Default for Notifier<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of a subscription. Unsubscribes from the notifier on drop.
pub struct EventStream<K> {
    rx: mpsc::Receiver<Event<K>>,
    _guard: ListenerGuard<K>,
}

struct ListenerGuard<K> {
    id: u64,
    inner: Arc<Inner<K>>,
}

impl<K> Drop for ListenerGuard<K> {
    fn drop(&mut self) {
        if let Ok(mut listeners) = self.inner.listeners.lock() {
            listeners.retain(|listener| listener.id != self.id);
        }
    }
}

impl<K> Stream for EventStream<K> {
    type Item = Event<K>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;
    use k8s_openapi::api::core::v1::ConfigMap;
    use kube::api::ObjectMeta;

    use super::*;

    fn make_cm(name: &str, namespace: &str) -> Arc<ConfigMap> {
        Arc::new(ConfigMap {
            metadata: ObjectMeta {
                name: Some(name.into()),
                namespace: Some(namespace.into()),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_publish_delivers_to_matching_listeners_only() {
        let notifier = Notifier::new();
        let mut ns_a = notifier.subscribe(|cm: &ConfigMap| {
            cm.metadata.namespace.as_deref() == Some("ns-a")
        });
        let mut ns_b = notifier.subscribe(|cm: &ConfigMap| {
            cm.metadata.namespace.as_deref() == Some("ns-b")
        });

        notifier.publish(&Event::Add(make_cm("a", "ns-a"))).await;

        let event = ns_a.next().await.unwrap();
        assert!(matches!(event, Event::Add(_)));
        assert_eq!(event.object().metadata.name.as_deref(), Some("a"));

        // nothing was queued for the non-matching listener
        assert!(
            tokio::time::timeout(Duration::from_millis(50), ns_b.next())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let notifier = Notifier::new();
        let stream = notifier.subscribe(|_: &ConfigMap| true);
        assert_eq!(notifier.listener_count(), 1);
        drop(stream);
        assert_eq!(notifier.listener_count(), 0);

        // publishing to no listeners completes immediately
        notifier.publish(&Event::Delete(make_cm("a", "ns-a"))).await;
    }

    #[tokio::test]
    async fn test_slow_listener_blocks_delivery() {
        let notifier = Notifier::new();
        let mut stream = notifier.subscribe(|_: &ConfigMap| true);

        notifier.publish(&Event::Add(make_cm("a", "ns-a"))).await;

        // the single buffer slot is full, the next publish waits
        assert!(tokio::time::timeout(
            Duration::from_millis(50),
            notifier.publish(&Event::Update(make_cm("a", "ns-a"))),
        )
        .await
        .is_err());

        // consuming frees the slot
        assert!(matches!(stream.next().await.unwrap(), Event::Add(_)));
        notifier.publish(&Event::Update(make_cm("a", "ns-a"))).await;
        assert!(matches!(stream.next().await.unwrap(), Event::Update(_)));
    }
}
