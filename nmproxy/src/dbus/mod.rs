//! D-Bus transport for NetworkManager objects.
//!
//! [`Bus`] and [`RemoteObject`] are the only points where proxies touch the
//! message bus. [`SystemBus`] implements them with `zbus` against the system
//! bus; tests substitute an in-memory implementation.

mod bus;
mod system;

pub use bus::{Bus, PropertyChangeStream, RemoteObject};
pub use system::SystemBus;
