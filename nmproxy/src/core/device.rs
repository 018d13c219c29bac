//! Network device proxies.

use async_trait::async_trait;
use log::debug;
use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{DeviceType, ProxyKind};
use crate::api::session::Session;
use crate::core::cache::{self, CachedProxy, Entity};
use crate::core::proxy::Proxy;
use crate::core::wireless::Wireless;
use crate::types::constants::property;

/// What a device can do beyond the base device interface.
///
/// Decided once, from the `DeviceType` read when the device is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCapability {
    /// Wi-Fi device with its wireless facet.
    Wireless(Arc<Wireless>),
    /// Any other device type.
    Plain,
}

/// Proxy for one network interface.
pub struct Device {
    proxy: Arc<Proxy>,
    device_type: DeviceType,
    capability: DeviceCapability,
}

impl Device {
    /// The base proxy.
    pub fn proxy(&self) -> &Arc<Proxy> {
        &self.proxy
    }

    /// Device type as read at construction.
    ///
    /// Not refreshed afterwards; read the `DeviceType` property through
    /// [`Proxy::property`] for the live value.
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    pub fn capability(&self) -> &DeviceCapability {
        &self.capability
    }

    /// The wireless facet, present iff the device was Wi-Fi at construction.
    pub fn wifi(&self) -> Option<&Arc<Wireless>> {
        match &self.capability {
            DeviceCapability::Wireless(w) => Some(w),
            DeviceCapability::Plain => None,
        }
    }

    pub fn is_wireless(&self) -> bool {
        self.wifi().is_some()
    }
}

#[async_trait]
impl Entity for Device {
    const KIND: ProxyKind = ProxyKind::Device;

    async fn construct(
        session: &Session,
        path: OwnedObjectPath,
        interface: Option<&str>,
    ) -> Result<Self> {
        let proxy =
            Proxy::construct(session.bus().clone(), Self::KIND, path.clone(), interface).await?;

        let raw_type: u32 = proxy.property_as(property::DEVICE_TYPE).await?;
        let device_type = DeviceType::from(raw_type);

        let capability = if device_type.is_wireless() {
            debug!("Attaching wireless facet to {}", path.as_str());
            DeviceCapability::Wireless(cache::load::<Wireless>(session, path, None).await?)
        } else {
            DeviceCapability::Plain
        };

        Ok(Self {
            proxy: Arc::new(proxy),
            device_type,
            capability,
        })
    }

    fn proxy(&self) -> &Arc<Proxy> {
        &self.proxy
    }

    fn into_cached(this: Arc<Self>) -> CachedProxy {
        CachedProxy::Device(this)
    }

    fn from_cached(entry: &CachedProxy) -> Option<Arc<Self>> {
        match entry {
            CachedProxy::Device(d) => Some(Arc::clone(d)),
            _ => None,
        }
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.proxy == other.proxy
    }
}

impl Eq for Device {}

impl Display for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&*self.proxy, f)
    }
}

impl Debug for Device {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&*self.proxy, f)
    }
}
