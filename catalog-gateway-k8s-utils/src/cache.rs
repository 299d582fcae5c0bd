use std::fmt::Debug;
use std::hash::Hash;
use std::pin::pin;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use ahash::HashMap;
use futures::{Stream, StreamExt};
use k8s_openapi::serde::de::DeserializeOwned;
use kube::runtime::reflector::store::Writer;
use kube::runtime::reflector::{ObjectRef, Store};
use kube::runtime::{reflector, watcher, WatchStreamExt};
use kube::{Api, Resource};
use tokio_util::sync::CancellationToken;
use tracing::{error, trace};

use crate::index::IndexSet;
use crate::notifier::{Event, EventStream, Notifier};
use crate::{Error, Result};

/// Read side of a watch-backed cache: the reflector store, named secondary
/// indexes, and the notifier carrying classified change events.
pub struct ResourceCache<K>
where
    K: Resource + Send + Sync + Clone + Debug + DeserializeOwned + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync + 'static,
{
    store: Store<K>,
    indexes: Arc<RwLock<IndexSet<K>>>,
    notifier: Notifier<K>,
}

impl<K> Clone for ResourceCache<K>
where
    K: Resource + Send + Sync + Clone + Debug + DeserializeOwned + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            indexes: self.indexes.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

/// Create an unstarted cache together with the writer that feeds it.
/// [`ResourceCache::start`] wires the writer to a watcher stream; tests drive
/// the writer directly.
pub fn cache<K>(indexes: IndexSet<K>) -> (ResourceCache<K>, CacheWriter<K>)
where
    K: Resource + Send + Sync + Clone + Debug + DeserializeOwned + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync + 'static,
{
    let (store, writer) = reflector::store();
    let indexes = Arc::new(RwLock::new(indexes));
    let notifier = Notifier::new();
    let cache = ResourceCache {
        store: store.clone(),
        indexes: indexes.clone(),
        notifier: notifier.clone(),
    };
    let writer = CacheWriter {
        store,
        writer,
        indexes,
        notifier,
        init: None,
    };
    (cache, writer)
}

impl<K> ResourceCache<K>
where
    K: Resource + Send + Sync + Clone + Debug + DeserializeOwned + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync + 'static,
{
    /// Start a cache over `api`: spawns the watch task scoped to `cancel` and
    /// waits for the initial listing to land in the store. Reads before that
    /// listing would silently come up empty, so callers get the cache back
    /// only once it is ready.
    pub async fn start(
        api: Api<K>,
        indexes: IndexSet<K>,
        timeout: Option<Duration>,
        cancel: CancellationToken,
    ) -> Result<Self> {
        let (cache, cache_writer) = self::cache(indexes);

        let stream = watcher(api, watcher::Config::default()).default_backoff();
        tokio::spawn(run(stream, cache_writer, cancel));

        let wait = cache.store.wait_until_ready();
        if let Some(timeout) = timeout {
            tokio::time::timeout(timeout, wait)
                .await
                .map_err(|_| Error::StoreCreation("timed out waiting for store".into()))?
                .map_err(|e| Error::StoreCreation(e.to_string()))?;
        } else {
            wait.await
                .map_err(|e| Error::StoreCreation(e.to_string()))?;
        }
        Ok(cache)
    }

    pub fn get(&self, name: &str, namespace: Option<&str>) -> Option<Arc<K>> {
        let mut obj_ref = ObjectRef::new(name);
        if let Some(namespace) = namespace {
            obj_ref = obj_ref.within(namespace);
        }
        self.store.get(&obj_ref)
    }

    pub fn state(&self) -> Vec<Arc<K>> {
        self.store.state()
    }

    /// Objects currently carrying `key` in the named index.
    pub fn by_index(&self, index: &str, key: &str) -> Result<Vec<Arc<K>>> {
        let refs = self.indexes.read().unwrap().get(index, key)?;
        Ok(refs
            .into_iter()
            .filter_map(|obj_ref| self.store.get(&obj_ref))
            .collect())
    }

    /// Subscribe to classified change events for objects matching `filter`.
    pub fn subscribe(
        &self,
        filter: impl Fn(&K) -> bool + Send + Sync + 'static,
    ) -> EventStream<K> {
        self.notifier.subscribe(filter)
    }

    pub fn listener_count(&self) -> usize {
        self.notifier.listener_count()
    }
}

/// Applies raw watcher events to the store, classifies them against the state
/// they replace, keeps the indexes in step, and publishes the classification.
pub struct CacheWriter<K>
where
    K: Resource + Send + Sync + Clone + Debug + DeserializeOwned + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync + 'static,
{
    store: Store<K>,
    writer: Writer<K>,
    indexes: Arc<RwLock<IndexSet<K>>>,
    notifier: Notifier<K>,
    /// Objects seen since the last `Init`, pending reconciliation at `InitDone`.
    init: Option<Vec<K>>,
}

impl<K> CacheWriter<K>
where
    K: Resource + Send + Sync + Clone + Debug + DeserializeOwned + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync + 'static,
{
    pub async fn apply(&mut self, event: watcher::Event<K>) {
        match event {
            watcher::Event::Apply(obj) => {
                let previous = self.store.get(&ObjectRef::from_obj(&obj));
                {
                    let mut indexes = self.indexes.write().unwrap();
                    if let Some(previous) = previous.as_deref() {
                        indexes.remove(previous);
                    }
                    indexes.insert(&obj);
                }
                self.writer
                    .apply_watcher_event(&watcher::Event::Apply(obj.clone()));
                let obj = Arc::new(obj);
                let event = match previous {
                    Some(_) => Event::Update(obj),
                    None => Event::Add(obj),
                };
                self.notifier.publish(&event).await;
            }
            watcher::Event::Delete(obj) => {
                self.indexes.write().unwrap().remove(&obj);
                self.writer
                    .apply_watcher_event(&watcher::Event::Delete(obj.clone()));
                self.notifier.publish(&Event::Delete(Arc::new(obj))).await;
            }
            watcher::Event::Init => {
                self.init = Some(Vec::new());
                self.writer.apply_watcher_event(&watcher::Event::Init);
            }
            watcher::Event::InitApply(obj) => {
                if let Some(buffer) = self.init.as_mut() {
                    buffer.push(obj.clone());
                }
                self.writer
                    .apply_watcher_event(&watcher::Event::InitApply(obj));
            }
            watcher::Event::InitDone => {
                // snapshot what the re-list replaces before the store swaps
                let previous = self.store.state();
                self.writer.apply_watcher_event(&watcher::Event::InitDone);
                let listed = self.init.take().unwrap_or_default();
                self.indexes.write().unwrap().rebuild(listed.iter());

                let mut prior: HashMap<ObjectRef<K>, Arc<K>> = previous
                    .into_iter()
                    .map(|obj| (ObjectRef::from_obj(obj.as_ref()), obj))
                    .collect();
                let mut events = Vec::new();
                for obj in listed {
                    match prior.remove(&ObjectRef::from_obj(&obj)) {
                        None => events.push(Event::Add(Arc::new(obj))),
                        Some(prev) => {
                            // unchanged resourceVersions are not re-announced
                            if prev.meta().resource_version != obj.meta().resource_version {
                                events.push(Event::Update(Arc::new(obj)));
                            }
                        }
                    }
                }
                // anything that vanished while the watch was down
                events.extend(prior.into_values().map(Event::Delete));
                for event in events {
                    self.notifier.publish(&event).await;
                }
            }
        }
    }
}

async fn run<K, S>(stream: S, mut writer: CacheWriter<K>, cancel: CancellationToken)
where
    K: Resource + Send + Sync + Clone + Debug + DeserializeOwned + 'static,
    K::DynamicType: Default + Eq + Hash + Clone + Send + Sync + 'static,
    S: Stream<Item = watcher::Result<watcher::Event<K>>>,
{
    let mut stream = pin!(stream);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = stream.next() => match event {
                Some(Ok(event)) => {
                    trace!("received event: {:?}", event);
                    writer.apply(event).await;
                }
                Some(Err(e)) => {
                    error!(%e, "unexpected error with stream");
                }
                None => break,
            },
        }
    }
}
