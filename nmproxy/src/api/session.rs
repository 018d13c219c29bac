use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::ProxyError;
use crate::core::cache::{self, Entity, ProxyCache};
use crate::core::manager::Manager;
use crate::dbus::{Bus, SystemBus};
use crate::types::constants::bus;

/// Root context owning the bus connection and the proxy cache.
///
/// Every proxy is loaded through a session, and a session hands out at most
/// one instance per `(kind, path)`. Independent sessions have independent
/// caches.
///
/// # Example
///
/// ```no_run
/// use nmproxy::Session;
///
/// # async fn example() -> nmproxy::Result<()> {
/// let session = Session::system().await?;
/// let manager = session.manager().await?;
///
/// for device in manager.devices(&session).await? {
///     println!("{device} ({})", device.device_type());
///     if let Some(wifi) = device.wifi() {
///         for ap in wifi.access_points(&session).await? {
///             println!("  {ap}");
///         }
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Thread Safety
///
/// `Session` is `Clone` and can be shared across async tasks. Clones share
/// the same bus and the same cache.
#[derive(Clone)]
pub struct Session {
    bus: Arc<dyn Bus>,
    cache: Arc<ProxyCache>,
}

impl Session {
    /// Creates a session connected to the system D-Bus.
    pub async fn system() -> Result<Self> {
        let bus = SystemBus::connect().await?;
        Ok(Self::with_bus(Arc::new(bus)))
    }

    /// Creates a session over any [`Bus`] implementation, with an empty cache.
    pub fn with_bus(bus: Arc<dyn Bus>) -> Self {
        Self {
            bus,
            cache: Arc::new(ProxyCache::new()),
        }
    }

    pub fn bus(&self) -> &Arc<dyn Bus> {
        &self.bus
    }

    pub fn cache(&self) -> &ProxyCache {
        &self.cache
    }

    /// Returns the manager singleton, loading it on first use.
    pub async fn manager(&self) -> Result<Arc<Manager>> {
        self.load(object_path(bus::ROOT_PATH)?).await
    }

    /// Returns the cached `T` at `path`, constructing it on first use.
    ///
    /// Construction errors are returned as-is and nothing is cached.
    pub async fn load<T: Entity>(&self, path: OwnedObjectPath) -> Result<Arc<T>> {
        cache::load(self, path, None).await
    }

    /// Like [`load`](Self::load), binding a newly constructed instance to
    /// `interface` instead of the kind's default.
    ///
    /// The identity is still `(kind, path)`: if an instance is already cached
    /// it is returned unchanged.
    pub async fn load_with_interface<T: Entity>(
        &self,
        path: OwnedObjectPath,
        interface: &str,
    ) -> Result<Arc<T>> {
        cache::load(self, path, Some(interface)).await
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

/// Parses `path` as a D-Bus object path.
pub fn object_path(path: &str) -> Result<OwnedObjectPath> {
    OwnedObjectPath::try_from(path).map_err(|_| ProxyError::InvalidPath(path.to_owned()))
}
