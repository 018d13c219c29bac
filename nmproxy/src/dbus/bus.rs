//! Transport seam between proxies and the message bus.

use async_trait::async_trait;
use futures::stream::BoxStream;
use std::sync::Arc;
use zvariant::{OwnedObjectPath, OwnedValue};

use crate::Result;

/// Stream of `(property name, new value)` pairs delivered by a
/// `PropertyChanged` signal subscription.
pub type PropertyChangeStream = BoxStream<'static, (String, OwnedValue)>;

/// Resolves remote objects exposed by NetworkManager.
///
/// [`SystemBus`](crate::SystemBus) implements this over the D-Bus system bus.
/// Any other implementation can be handed to
/// [`Session::with_bus`](crate::Session::with_bus).
#[async_trait]
pub trait Bus: Send + Sync {
    /// Resolves a handle to the object at `path`, bound to `interface`.
    async fn resolve(
        &self,
        path: &OwnedObjectPath,
        interface: &str,
    ) -> Result<Arc<dyn RemoteObject>>;
}

/// A resolved handle to one remote object under one interface.
#[async_trait]
pub trait RemoteObject: Send + Sync {
    /// Object path this handle was resolved for.
    fn path(&self) -> &OwnedObjectPath;

    /// Interface this handle is bound to.
    fn interface(&self) -> &str;

    /// Reads a property through `org.freedesktop.DBus.Properties.Get`.
    ///
    /// `interface` is passed through as-is; an empty string leaves the
    /// lookup to the remote object.
    async fn get_property(&self, interface: &str, name: &str) -> Result<OwnedValue>;

    /// Calls a no-argument method returning a list of object paths.
    async fn call_for_paths(&self, method: &str) -> Result<Vec<OwnedObjectPath>>;

    /// Subscribes to a property-change signal on this object.
    async fn subscribe(&self, signal: &str) -> Result<PropertyChangeStream>;
}
