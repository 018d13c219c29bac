//! Constants for NetworkManager D-Bus names and values.
//!
//! These constants correspond to the well-known names, object paths and
//! numeric codes used by NetworkManager's D-Bus API.

/// Well-known bus names and fixed object paths.
pub mod bus {
    /// Service name NetworkManager owns on the system bus.
    pub const SERVICE: &str = "org.freedesktop.NetworkManager";
    /// Object path of the manager singleton.
    pub const ROOT_PATH: &str = "/org/freedesktop/NetworkManager";
    /// Standard properties interface used for generic property reads.
    pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";
}

/// Interface names for each proxied object kind.
pub mod interface {
    pub const MANAGER: &str = "org.freedesktop.NetworkManager";
    pub const DEVICE: &str = "org.freedesktop.NetworkManager.Device";
    pub const WIRELESS: &str = "org.freedesktop.NetworkManager.Device.Wireless";
    pub const ACCESS_POINT: &str = "org.freedesktop.NetworkManager.AccessPoint";
}

/// Remote method names.
pub mod method {
    pub const GET: &str = "Get";
    pub const GET_DEVICES: &str = "GetDevices";
    pub const GET_ACCESS_POINTS: &str = "GetAccessPoints";
}

/// Remote signal names.
pub mod signal {
    pub const PROPERTY_CHANGED: &str = "PropertyChanged";
}

/// Property names read by this crate.
pub mod property {
    pub const DEVICE_TYPE: &str = "DeviceType";
    pub const SSID: &str = "Ssid";
}

/// NetworkManager device type constants.
pub mod device_type {
    pub const UNKNOWN: u32 = 0;
    pub const ETHERNET: u32 = 1;
    pub const WIFI: u32 = 2;
    pub const GSM: u32 = 3;
    pub const CDMA: u32 = 4;
}
