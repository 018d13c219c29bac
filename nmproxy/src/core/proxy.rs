//! Identity-cached proxy over one remote NetworkManager object.
//!
//! A [`Proxy`] owns the remote handle for one `(kind, path)` identity, reads
//! properties live on every call and relays `PropertyChanged` signals to the
//! listeners registered on it.

use futures::stream::StreamExt;
use log::{debug, info, warn};
use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use tokio::sync::Mutex as AsyncMutex;
use zvariant::{OwnedObjectPath, OwnedValue};

use crate::Result;
use crate::api::models::{ProxyError, ProxyKind};
use crate::core::cache::ProxyKey;
use crate::dbus::{Bus, PropertyChangeStream, RemoteObject};
use crate::types::constants::signal;

/// Callback invoked with `(proxy, property name, new value)` whenever the
/// remote object emits `PropertyChanged`.
pub type PropertyListener = Arc<dyn Fn(&Proxy, &str, &OwnedValue) + Send + Sync>;

/// Wraps a closure as a [`PropertyListener`].
pub fn listener<F>(f: F) -> PropertyListener
where
    F: Fn(&Proxy, &str, &OwnedValue) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Local handle for one remote object.
pub struct Proxy {
    kind: ProxyKind,
    path: OwnedObjectPath,
    bus: Arc<dyn Bus>,
    handle: RwLock<Arc<dyn RemoteObject>>,
    listeners: Mutex<Vec<PropertyListener>>,
    subscribing: AsyncMutex<()>,
    subscribed: AtomicBool,
}

impl Proxy {
    /// Resolves the remote handle for `path`.
    ///
    /// Binds to `interface` when given, otherwise to the kind's default
    /// interface. Resolution failures are returned unchanged.
    pub(crate) async fn construct(
        bus: Arc<dyn Bus>,
        kind: ProxyKind,
        path: OwnedObjectPath,
        interface: Option<&str>,
    ) -> Result<Self> {
        let interface = interface.unwrap_or(kind.interface());
        let handle = bus.resolve(&path, interface).await?;

        Ok(Self {
            kind,
            path,
            bus,
            handle: RwLock::new(handle),
            listeners: Mutex::new(Vec::new()),
            subscribing: AsyncMutex::new(()),
            subscribed: AtomicBool::new(false),
        })
    }

    /// The kind this proxy was loaded as.
    pub fn kind(&self) -> ProxyKind {
        self.kind
    }

    /// The object path this proxy was loaded for.
    pub fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    /// The cache identity of this proxy. Unaffected by [`reload`](Self::reload).
    pub fn key(&self) -> ProxyKey {
        ProxyKey::new(self.kind, self.path.clone())
    }

    /// Interface the current remote handle is bound to.
    pub fn interface(&self) -> String {
        self.handle().interface().to_owned()
    }

    /// The current remote handle.
    pub fn handle(&self) -> Arc<dyn RemoteObject> {
        self.handle
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reads a property by name.
    ///
    /// Issues `Properties.Get` with an empty interface argument, leaving the
    /// remote object to resolve which of its interfaces owns `name`. Nothing
    /// is cached; every call is a round trip.
    pub async fn property(&self, name: &str) -> Result<OwnedValue> {
        self.handle().get_property("", name).await
    }

    /// Reads a property by name, qualified with this proxy's own interface.
    pub async fn qualified_property(&self, name: &str) -> Result<OwnedValue> {
        let handle = self.handle();
        handle.get_property(handle.interface(), name).await
    }

    /// Reads a property and converts it to `T`.
    ///
    /// ```no_run
    /// use nmproxy::Session;
    ///
    /// # async fn example() -> nmproxy::Result<()> {
    /// let session = Session::system().await?;
    /// let manager = session.manager().await?;
    /// for device in manager.devices(&session).await? {
    ///     let raw: u32 = device.proxy().property_as("DeviceType").await?;
    ///     println!("{device}: {raw}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn property_as<T>(&self, name: &str) -> Result<T>
    where
        T: TryFrom<OwnedValue>,
        T::Error: Into<ProxyError>,
    {
        let value = self.property(name).await?;
        T::try_from(value).map_err(Into::into)
    }

    /// Calls a no-argument method returning object paths.
    pub(crate) async fn call_for_paths(&self, method: &str) -> Result<Vec<OwnedObjectPath>> {
        self.handle().call_for_paths(method).await
    }

    /// Registers a property-change listener.
    ///
    /// The first registration subscribes to `PropertyChanged` and starts a
    /// single dispatcher task; later registrations only append. The same
    /// listener may be registered more than once and is then invoked once
    /// per registration. Listeners run in registration order.
    ///
    /// Concurrent first registrations wait for a single subscription attempt.
    /// If it fails, the error is returned and the listener is not added.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn register_change_listener(
        self: &Arc<Self>,
        listener: PropertyListener,
    ) -> Result<()> {
        let _subscribing = self.subscribing.lock().await;
        if self.is_subscribed() {
            self.listeners().push(listener);
            return Ok(());
        }

        let changes = self.handle().subscribe(signal::PROPERTY_CHANGED).await?;
        debug!("{self} subscribed to {}", signal::PROPERTY_CHANGED);
        // The first listener must be in place before the dispatcher can run.
        self.listeners().push(listener);
        self.spawn_dispatcher(changes);
        self.subscribed.store(true, Ordering::Release);
        Ok(())
    }

    /// Removes the first registration of `listener`.
    ///
    /// Listeners are matched by pointer identity. Returns `false` if it was
    /// not registered. The signal subscription stays in place even when no
    /// listeners remain.
    pub fn unregister_change_listener(&self, listener: &PropertyListener) -> bool {
        let mut listeners = self.listeners();
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(idx) => {
                listeners.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Number of registered listeners, counting duplicates.
    pub fn listener_count(&self) -> usize {
        self.listeners().len()
    }

    /// Whether this proxy has subscribed to `PropertyChanged`.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }

    /// Re-resolves the remote handle from its recorded path and interface.
    ///
    /// Used to recover after NetworkManager restarts. The cache identity is
    /// unchanged. Nothing calls this automatically.
    pub async fn reload(&self) -> Result<()> {
        let (path, interface) = {
            let current = self.handle();
            (current.path().clone(), current.interface().to_owned())
        };

        let fresh = self.bus.resolve(&path, &interface).await?;
        *self.handle.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        debug!("{self} reloaded {interface} at {}", path.as_str());
        Ok(())
    }

    fn dispatch(&self, name: &str, value: &OwnedValue) {
        info!("{} property update of {name} with value {value:?}", self.kind);
        // Snapshot so listeners may (un)register without deadlocking.
        let listeners = self.listeners().clone();
        for listener in listeners {
            listener(self, name, value);
        }
    }

    fn spawn_dispatcher(self: &Arc<Self>, mut changes: PropertyChangeStream) {
        let this: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            while let Some((name, value)) = changes.next().await {
                let Some(proxy) = this.upgrade() else {
                    return;
                };
                proxy.dispatch(&name, &value);
            }
            if let Some(proxy) = this.upgrade() {
                warn!("{proxy} property change stream ended unexpectedly");
            }
        });
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<PropertyListener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind {
            return false;
        }
        let (a, b) = (self.handle(), other.handle());
        a.path() == b.path() && a.interface() == b.interface()
    }
}

impl Eq for Proxy {}

impl Display for Proxy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} object at {:p}>", self.kind, self)
    }
}

impl Debug for Proxy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} {self} object at {:p}>", self.kind, self)
    }
}
