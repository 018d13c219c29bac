//! Identity cache keeping one proxy per `(kind, path)`.

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::ProxyKind;
use crate::api::session::Session;
use crate::core::access_point::AccessPoint;
use crate::core::device::Device;
use crate::core::manager::Manager;
use crate::core::proxy::Proxy;
use crate::core::wireless::Wireless;

/// Identity of a cached proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyKey {
    /// Kind the proxy was loaded as.
    pub kind: ProxyKind,
    /// Object path the proxy was loaded for.
    pub path: OwnedObjectPath,
}

impl ProxyKey {
    pub fn new(kind: ProxyKind, path: OwnedObjectPath) -> Self {
        Self { kind, path }
    }
}

/// A cached proxy of any kind.
#[derive(Debug, Clone)]
pub enum CachedProxy {
    Manager(Arc<Manager>),
    Device(Arc<Device>),
    Wireless(Arc<Wireless>),
    AccessPoint(Arc<AccessPoint>),
}

impl CachedProxy {
    /// The base proxy of the cached entity.
    pub fn proxy(&self) -> &Arc<Proxy> {
        match self {
            Self::Manager(m) => m.proxy(),
            Self::Device(d) => d.proxy(),
            Self::Wireless(w) => w.proxy(),
            Self::AccessPoint(ap) => ap.proxy(),
        }
    }
}

/// An entity type that can be loaded through a [`ProxyCache`].
#[async_trait]
pub trait Entity: Send + Sync + Sized + 'static {
    /// Kind half of this entity's cache identity.
    const KIND: ProxyKind;

    /// Builds a new instance for `path`.
    ///
    /// `interface` overrides the kind's default interface when given.
    async fn construct(
        session: &Session,
        path: OwnedObjectPath,
        interface: Option<&str>,
    ) -> Result<Self>;

    /// The base proxy of this entity.
    fn proxy(&self) -> &Arc<Proxy>;

    fn into_cached(this: Arc<Self>) -> CachedProxy;

    fn from_cached(entry: &CachedProxy) -> Option<Arc<Self>>;
}

/// Lookup table from [`ProxyKey`] to the single instance loaded for it.
///
/// Entries are never evicted; they live as long as the cache.
#[derive(Debug, Default)]
pub struct ProxyCache {
    entries: Mutex<HashMap<ProxyKey, CachedProxy>>,
}

impl ProxyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached instance of `T` at `path`, if loaded.
    pub fn get<T: Entity>(&self, path: &OwnedObjectPath) -> Option<Arc<T>> {
        let key = ProxyKey::new(T::KIND, path.clone());
        self.entries().get(&key).and_then(T::from_cached)
    }

    /// Inserts `value` unless an instance with the same identity is already
    /// cached, and returns whichever instance the cache holds afterwards.
    pub fn insert_or_existing<T: Entity>(&self, value: Arc<T>) -> Arc<T> {
        let key = value.proxy().key();
        match self.entries().entry(key) {
            MapEntry::Occupied(entry) => T::from_cached(entry.get()).unwrap_or(value),
            MapEntry::Vacant(entry) => {
                debug!("Caching {} at {}", T::KIND, entry.key().path.as_str());
                entry.insert(T::into_cached(Arc::clone(&value)));
                value
            }
        }
    }

    pub fn contains(&self, key: &ProxyKey) -> bool {
        self.entries().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<ProxyKey, CachedProxy>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Loads `T` at `path` through `session`'s cache.
///
/// On a miss the instance is constructed without holding the cache lock and
/// then inserted; if another task inserted the same identity meanwhile, that
/// instance wins and is returned.
pub(crate) async fn load<T: Entity>(
    session: &Session,
    path: OwnedObjectPath,
    interface: Option<&str>,
) -> Result<Arc<T>> {
    if let Some(existing) = session.cache().get::<T>(&path) {
        return Ok(existing);
    }

    debug!("Cache miss for {} at {}", T::KIND, path.as_str());
    let built = Arc::new(T::construct(session, path, interface).await?);
    Ok(session.cache().insert_or_existing(built))
}
