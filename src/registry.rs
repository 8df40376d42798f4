use std::collections::HashMap;
use std::sync::Arc;

/// Name-keyed lookup table backing both the filter and the tag side of
/// an engine.
///
/// The table is a copy-on-write snapshot: engines seeded from the same
/// standard set share one immutable map until the first registration,
/// which clones the map privately. Mutation goes through `&mut self`,
/// so reads taken before a registration stay valid and a render that
/// re-enters lookup on the same thread never observes a half-applied
/// change.
pub struct Registry<T: ?Sized> {
    inner: Arc<HashMap<String, Arc<T>>>,
}

// Derives would demand T: Clone / T: Default, which trait objects
// cannot satisfy; the snapshot itself is always cloneable.
impl<T: ?Sized> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(HashMap::new()),
        }
    }
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap snapshot of a shared default set.
    pub fn seeded(defaults: &Arc<HashMap<String, Arc<T>>>) -> Self {
        Self {
            inner: Arc::clone(defaults),
        }
    }

    /// Inserts under `name`, replacing any previous entry. Names are
    /// case-sensitive; silent override is intentional so an embedder
    /// can swap out a standard entry.
    pub fn insert(&mut self, name: impl Into<String>, item: Arc<T>) {
        Arc::make_mut(&mut self.inner).insert(name.into(), item);
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<T>> {
        self.inner.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
}
