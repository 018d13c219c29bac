//! [`Bus`] implementation over the D-Bus system bus.

use async_trait::async_trait;
use futures::stream::StreamExt;
use log::{debug, warn};
use std::sync::Arc;
use zbus::{Connection, Proxy};
use zvariant::{OwnedObjectPath, OwnedValue};

use crate::Result;
use crate::dbus::bus::{Bus, PropertyChangeStream, RemoteObject};
use crate::types::constants::{bus, method};

/// Connection to NetworkManager on the system bus.
///
/// Cloning is cheap; clones share the same underlying D-Bus connection.
#[derive(Debug, Clone)]
pub struct SystemBus {
    conn: Connection,
}

impl SystemBus {
    /// Connects to the system D-Bus.
    pub async fn connect() -> Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl Bus for SystemBus {
    async fn resolve(
        &self,
        path: &OwnedObjectPath,
        interface: &str,
    ) -> Result<Arc<dyn RemoteObject>> {
        let proxy = Proxy::new(
            &self.conn,
            bus::SERVICE,
            path.clone(),
            interface.to_owned(),
        )
        .await?;
        debug!("Resolved {interface} at {}", path.as_str());

        Ok(Arc::new(BusObject {
            conn: self.conn.clone(),
            proxy,
            path: path.clone(),
            interface: interface.to_owned(),
        }))
    }
}

/// Remote object handle backed by a `zbus` proxy.
struct BusObject {
    conn: Connection,
    proxy: Proxy<'static>,
    path: OwnedObjectPath,
    interface: String,
}

#[async_trait]
impl RemoteObject for BusObject {
    fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    fn interface(&self) -> &str {
        &self.interface
    }

    async fn get_property(&self, interface: &str, name: &str) -> Result<OwnedValue> {
        // Goes through the connection directly: an empty interface is not a
        // valid `InterfaceName`, so the typed properties proxy cannot send it.
        let reply = self
            .conn
            .call_method(
                Some(bus::SERVICE),
                self.path.as_str(),
                Some(bus::PROPERTIES_INTERFACE),
                method::GET,
                &(interface, name),
            )
            .await?;
        let value: OwnedValue = reply.body().deserialize()?;
        Ok(value)
    }

    async fn call_for_paths(&self, method: &str) -> Result<Vec<OwnedObjectPath>> {
        let paths: Vec<OwnedObjectPath> = self.proxy.call(method, &()).await?;
        Ok(paths)
    }

    async fn subscribe(&self, signal: &str) -> Result<PropertyChangeStream> {
        let stream = self.proxy.receive_signal(signal.to_owned()).await?;
        let path = self.path.clone();

        let changes = stream.filter_map(move |msg| {
            let decoded = msg.body().deserialize::<(String, OwnedValue)>();
            let path = path.clone();
            async move {
                match decoded {
                    Ok(change) => Some(change),
                    Err(e) => {
                        warn!("Skipping undecodable signal from {}: {e}", path.as_str());
                        None
                    }
                }
            }
        });

        Ok(changes.boxed())
    }
}
