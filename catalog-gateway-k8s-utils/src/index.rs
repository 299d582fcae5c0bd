use std::hash::Hash;

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use kube::runtime::reflector::ObjectRef;
use kube::Resource;

use crate::{Error, Result};

pub type IndexFn<K> = Box<dyn Fn(&K) -> Vec<String> + Send + Sync>;

/// Named secondary indexes over the objects held by a [`crate::ResourceCache`].
///
/// Each index maps the keys produced by its key function to the set of objects
/// currently carrying that key. Key functions may emit zero keys to leave an
/// object out of an index entirely.
pub struct IndexSet<K>
where
    K: Resource,
    K::DynamicType: Default + Eq + Hash + Clone,
{
    indexes: HashMap<String, Index<K>>,
}

struct Index<K>
where
    K: Resource,
    K::DynamicType: Default + Eq + Hash + Clone,
{
    keys: IndexFn<K>,
    entries: HashMap<String, HashSet<ObjectRef<K>>>,
}

impl<K> IndexSet<K>
where
    K: Resource,
    K::DynamicType: Default + Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            indexes: HashMap::new(),
        }
    }

    pub fn with(
        mut self,
        name: &str,
        keys: impl Fn(&K) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.indexes.insert(
            name.to_owned(),
            Index {
                keys: Box::new(keys),
                entries: HashMap::new(),
            },
        );
        self
    }

    pub fn insert(&mut self, obj: &K) {
        for index in self.indexes.values_mut() {
            for key in (index.keys)(obj) {
                index
                    .entries
                    .entry(key)
                    .or_insert_with(HashSet::new)
                    .insert(ObjectRef::from_obj(obj));
            }
        }
    }

    /// Remove an object's entries. Callers must pass the object as it was when
    /// inserted so stale keys are dropped.
    pub fn remove(&mut self, obj: &K) {
        let obj_ref = ObjectRef::from_obj(obj);
        for index in self.indexes.values_mut() {
            for key in (index.keys)(obj) {
                if let Some(entry) = index.entries.get_mut(&key) {
                    entry.remove(&obj_ref);
                    if entry.is_empty() {
                        index.entries.remove(&key);
                    }
                }
            }
        }
    }

    /// Drop all entries and re-index from a full listing.
    pub fn rebuild<'a>(&mut self, objs: impl IntoIterator<Item = &'a K>)
    where
        K: 'a,
    {
        for index in self.indexes.values_mut() {
            index.entries.clear();
        }
        for obj in objs {
            self.insert(obj);
        }
    }

    pub fn get(&self, index: &str, key: &str) -> Result<Vec<ObjectRef<K>>> {
        let index = self
            .indexes
            .get(index)
            .ok_or_else(|| Error::IndexNotFound { name: index.into() })?;
        Ok(index
            .entries
            .get(key)
            .map(|entry| entry.iter().cloned().collect())
            .unwrap_or_default())
    }
}

impl<K> Default for IndexSet<K>
where
    K: Resource,
    K::DynamicType: Default + Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
