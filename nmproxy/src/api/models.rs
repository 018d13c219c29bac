use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::types::constants::{device_type, interface};

/// The kinds of NetworkManager objects this crate proxies.
///
/// Each kind maps statically to the D-Bus interface its proxies bind to by
/// default. Together with an object path, the kind forms the identity under
/// which a proxy is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    /// The `/org/freedesktop/NetworkManager` root object.
    Manager,
    /// A network interface.
    Device,
    /// The wireless facet of a Wi-Fi device.
    Wireless,
    /// A visible Wi-Fi access point.
    AccessPoint,
}

impl ProxyKind {
    /// Returns the D-Bus interface proxies of this kind bind to by default.
    pub fn interface(self) -> &'static str {
        match self {
            Self::Manager => interface::MANAGER,
            Self::Device => interface::DEVICE,
            Self::Wireless => interface::WIRELESS,
            Self::AccessPoint => interface::ACCESS_POINT,
        }
    }

    /// Returns the type name used when presenting a proxy of this kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Device => "Device",
            Self::Wireless => "Wireless",
            Self::AccessPoint => "AccessPoint",
        }
    }
}

impl Display for ProxyKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// NetworkManager device types.
///
/// Read once from a device's `DeviceType` property when its proxy is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    /// The device type is unknown.
    Unknown,
    /// Wired Ethernet device.
    Ethernet,
    /// Wi-Fi (802.11) wireless device.
    Wifi,
    /// GSM mobile broadband device.
    Gsm,
    /// CDMA mobile broadband device.
    Cdma,
    /// Unsupported device type with raw code.
    Other(u32),
}

impl DeviceType {
    /// Returns whether this device type carries a wireless facet.
    pub fn is_wireless(self) -> bool {
        matches!(self, Self::Wifi)
    }
}

impl From<u32> for DeviceType {
    fn from(value: u32) -> Self {
        match value {
            device_type::UNKNOWN => DeviceType::Unknown,
            device_type::ETHERNET => DeviceType::Ethernet,
            device_type::WIFI => DeviceType::Wifi,
            device_type::GSM => DeviceType::Gsm,
            device_type::CDMA => DeviceType::Cdma,
            v => DeviceType::Other(v),
        }
    }
}

impl Display for DeviceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceType::Unknown => write!(f, "Unknown"),
            DeviceType::Ethernet => write!(f, "Ethernet"),
            DeviceType::Wifi => write!(f, "Wi-Fi"),
            DeviceType::Gsm => write!(f, "GSM"),
            DeviceType::Cdma => write!(f, "CDMA"),
            DeviceType::Other(v) => write!(f, "Other({v})"),
        }
    }
}

/// Errors that can occur while resolving or talking to proxied objects.
///
/// Transport failures are carried unchanged in [`ProxyError::Dbus`]; nothing
/// in this crate retries or reinterprets them.
///
/// # Example
///
/// ```no_run
/// use nmproxy::{ProxyError, Session};
///
/// # async fn example() {
/// match Session::system().await {
///     Ok(session) => println!("connected: {session:?}"),
///     Err(ProxyError::Dbus(e)) => eprintln!("system bus unavailable: {e}"),
///     Err(e) => eprintln!("error: {e}"),
/// }
/// # }
/// ```
#[derive(Debug, Error)]
pub enum ProxyError {
    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A property value could not be converted to the requested type.
    #[error("unexpected property value: {0}")]
    Variant(#[from] zvariant::Error),

    /// A string was not a valid D-Bus object path.
    #[error("invalid object path: {0}")]
    InvalidPath(String),
}
