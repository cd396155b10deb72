//! Concurrency-safe ordered resource collection.

use std::collections::HashMap;
use std::sync::Arc;

use ad_core::config::StoreConfig;
use ad_core::{Collection, Error, ResourceName, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::page::{ListPage, PageRequest};

/// Entry owned by the store. Nothing in it is mutated after insertion.
struct StoredEntry<T, A> {
    name: String,
    create_time: DateTime<Utc>,
    seq: u64,
    resource: Arc<T>,
    attachment: A,
}

struct Inner<T, A> {
    entries: HashMap<String, StoredEntry<T, A>>,
    next_seq: u64,
}

/// In-memory store for one collection of resources.
///
/// `T` is the public resource returned by `get`/`list`. `A` is a private
/// attachment kept next to it (the original bytes of an image, `()` for
/// kinds that have none) and only handed out by [`get_with_attachment`].
///
/// Listing orders entries by creation time, newest first. Entries created
/// within the same clock tick are ordered by insertion, newest first.
///
/// [`get_with_attachment`]: ResourceStore::get_with_attachment
pub struct ResourceStore<T, A = ()> {
    collection: Collection,
    limits: StoreConfig,
    inner: RwLock<Inner<T, A>>,
}

impl<T, A> ResourceStore<T, A>
where
    T: Clone,
    A: Clone,
{
    /// Create an empty store for `collection` using the page limits in `config`.
    pub fn new(collection: Collection, config: &StoreConfig) -> Self {
        Self {
            collection,
            limits: config.limits(),
            inner: RwLock::new(Inner {
                entries: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// The collection this store serves.
    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Insert a new resource.
    ///
    /// A fresh name and creation timestamp are assigned and passed to `build`,
    /// which produces the resource to store. Returns the stored resource.
    pub fn insert_with<F>(&self, attachment: A, build: F) -> T
    where
        F: FnOnce(&ResourceName, DateTime<Utc>) -> T,
    {
        let mut inner = self.inner.write();

        let name = loop {
            let candidate = self.collection.generate_name();
            if !inner.entries.contains_key(candidate.id()) {
                break candidate;
            }
            tracing::warn!(name = %candidate, "Generated resource id collided; retrying");
        };

        let create_time = Utc::now();
        let resource = Arc::new(build(&name, create_time));
        let seq = inner.next_seq;
        inner.next_seq += 1;

        inner.entries.insert(
            name.id().to_string(),
            StoredEntry {
                name: name.to_string(),
                create_time,
                seq,
                resource: Arc::clone(&resource),
                attachment,
            },
        );
        drop(inner);

        tracing::debug!(name = %name, "Inserted resource");
        (*resource).clone()
    }

    /// Look up a resource by name.
    pub fn get(&self, name: &str) -> Result<T> {
        self.get_with_attachment(name).map(|(resource, _)| resource)
    }

    /// Look up a resource and its attachment by name.
    pub fn get_with_attachment(&self, name: &str) -> Result<(T, A)> {
        let parsed = ResourceName::parse(self.collection, name)?;
        let inner = self.inner.read();
        inner
            .entries
            .get(parsed.id())
            .map(|entry| ((*entry.resource).clone(), entry.attachment.clone()))
            .ok_or_else(|| Error::not_found(self.collection.entity(), name))
    }

    /// Remove a resource by name.
    pub fn delete(&self, name: &str) -> Result<()> {
        let parsed = ResourceName::parse(self.collection, name)?;
        let removed = self.inner.write().entries.remove(parsed.id());
        match removed {
            Some(_) => {
                tracing::debug!(name = %parsed, "Deleted resource");
                Ok(())
            }
            None => Err(Error::not_found(self.collection.entity(), name)),
        }
    }

    /// Return one page of resources, newest first.
    ///
    /// A page token that names no current entry (for example because it was
    /// deleted since the previous page) restarts the listing from the top.
    pub fn list(&self, request: &PageRequest) -> ListPage<T> {
        let page_size = request.normalized_size(&self.limits);

        let mut snapshot: Vec<(DateTime<Utc>, u64, String, Arc<T>)> = {
            let inner = self.inner.read();
            inner
                .entries
                .values()
                .map(|e| (e.create_time, e.seq, e.name.clone(), Arc::clone(&e.resource)))
                .collect()
        };

        snapshot.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        let start = match request.token() {
            None => 0,
            Some(token) => match snapshot.iter().position(|(_, _, name, _)| name == token) {
                Some(i) => i + 1,
                None => {
                    tracing::debug!(
                        collection = %self.collection,
                        token,
                        "Page token matches no entry; restarting from the beginning"
                    );
                    0
                }
            },
        };

        let end = start.saturating_add(page_size).min(snapshot.len());
        let next_page_token = if end < snapshot.len() {
            Some(snapshot[end - 1].2.clone())
        } else {
            None
        };

        let items: Vec<T> = snapshot[start..end]
            .iter()
            .map(|(_, _, _, resource)| (**resource).clone())
            .collect();

        tracing::debug!(
            collection = %self.collection,
            page_size,
            returned = items.len(),
            total = snapshot.len(),
            "Listed resources"
        );

        ListPage {
            items,
            next_page_token,
        }
    }

    /// Number of resources currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the store holds no resources.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> ResourceStore<T> {
    /// Insert a resource that carries no attachment.
    pub fn insert<F>(&self, build: F) -> T
    where
        F: FnOnce(&ResourceName, DateTime<Utc>) -> T,
    {
        self.insert_with((), build)
    }
}
