//! Wireless facet of a Wi-Fi device.

use async_trait::async_trait;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::ProxyKind;
use crate::api::session::Session;
use crate::core::access_point::AccessPoint;
use crate::core::cache::{self, CachedProxy, Entity};
use crate::core::proxy::Proxy;
use crate::types::constants::method;

/// Proxy for `org.freedesktop.NetworkManager.Device.Wireless`.
///
/// Bound to the same object path as the [`Device`](crate::Device) it belongs to.
#[derive(PartialEq, Eq)]
pub struct Wireless {
    proxy: Arc<Proxy>,
}

impl Wireless {
    /// The base proxy.
    pub fn proxy(&self) -> &Arc<Proxy> {
        &self.proxy
    }

    /// Lists the access points this device currently sees.
    ///
    /// Calls `GetAccessPoints` on every invocation and loads each path
    /// through the session cache.
    pub async fn access_points(&self, session: &Session) -> Result<Vec<Arc<AccessPoint>>> {
        let paths = self.proxy.call_for_paths(method::GET_ACCESS_POINTS).await?;

        let mut access_points = Vec::with_capacity(paths.len());
        for path in paths {
            access_points.push(cache::load::<AccessPoint>(session, path, None).await?);
        }
        Ok(access_points)
    }
}

#[async_trait]
impl Entity for Wireless {
    const KIND: ProxyKind = ProxyKind::Wireless;

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
        CachedProxy::Wireless(this)
    }

    fn from_cached(entry: &CachedProxy) -> Option<Arc<Self>> {
        match entry {
            CachedProxy::Wireless(w) => Some(Arc::clone(w)),
            _ => None,
        }
    }
}

impl Display for Wireless {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&*self.proxy, f)
    }
}

impl Debug for Wireless {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.proxy, f)
    }
}
