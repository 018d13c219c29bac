//! The NetworkManager root object.

use async_trait::async_trait;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::ProxyKind;
use crate::api::session::Session;
use crate::core::cache::{self, CachedProxy, Entity};
use crate::core::device::Device;
use crate::core::proxy::Proxy;
use crate::types::constants::method;

/// Proxy for `/org/freedesktop/NetworkManager`.
///
/// Obtain it through [`Session::manager`]; there is one per session.
#[derive(PartialEq, Eq)]
pub struct Manager {
    proxy: Arc<Proxy>,
}

impl Manager {
    /// The base proxy.
    pub fn proxy(&self) -> &Arc<Proxy> {
        &self.proxy
    }

    /// Lists the devices NetworkManager currently knows about.
    ///
    /// Calls `GetDevices` on every invocation. Each returned path is loaded
    /// through the session cache, so repeated calls hand back the same
    /// [`Device`] instances. Order is whatever NetworkManager returns.
    pub async fn devices(&self, session: &Session) -> Result<Vec<Arc<Device>>> {
        let paths = self.proxy.call_for_paths(method::GET_DEVICES).await?;

        let mut devices = Vec::with_capacity(paths.len());
        for path in paths {
            devices.push(cache::load::<Device>(session, path, None).await?);
        }
        Ok(devices)
    }
}

#[async_trait]
impl Entity for Manager {
    const KIND: ProxyKind = ProxyKind::Manager;

    async fn construct(
        session: &Session,
        path: OwnedObjectPath,
        interface: Option<&str>,
    ) -> Result<Self> {
        let proxy = Proxy::construct(session.bus().clone(), Self::KIND, path, interface).await?;
        Ok(Self {
            proxy: Arc::new(proxy),
        })
    }

    fn proxy(&self) -> &Arc<Proxy> {
        &self.proxy
    }

    fn into_cached(this: Arc<Self>) -> CachedProxy {
        CachedProxy::Manager(this)
    }

    fn from_cached(entry: &CachedProxy) -> Option<Arc<Self>> {
        match entry {
            CachedProxy::Manager(m) => Some(Arc::clone(m)),
            _ => None,
        }
    }
}

impl Display for Manager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&*self.proxy, f)
    }
}

impl Debug for Manager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.proxy, f)
    }
}
