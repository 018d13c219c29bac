//! Wi-Fi access point proxies.

use async_trait::async_trait;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::ProxyKind;
use crate::api::session::Session;
use crate::core::cache::{CachedProxy, Entity};
use crate::core::proxy::Proxy;

/// Proxy for `org.freedesktop.NetworkManager.AccessPoint`.
#[derive(PartialEq, Eq)]
pub struct AccessPoint {
    proxy: Arc<Proxy>,
}

impl AccessPoint {
    /// The base proxy.
    pub fn proxy(&self) -> &Arc<Proxy> {
        &self.proxy
    }
}

#[async_trait]
impl Entity for AccessPoint {
    const KIND: ProxyKind = ProxyKind::AccessPoint;

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
        CachedProxy::AccessPoint(this)
    }

    fn from_cached(entry: &CachedProxy) -> Option<Arc<Self>> {
        match entry {
            CachedProxy::AccessPoint(ap) => Some(Arc::clone(ap)),
            _ => None,
        }
    }
}

impl Display for AccessPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&*self.proxy, f)
    }
}

impl Debug for AccessPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.proxy, f)
    }
}
