//! Identity-cached proxies for NetworkManager objects over D-Bus.
//!
//! This crate maps NetworkManager's D-Bus objects onto in-process handles:
//!
//! - [`Manager`]: the `/org/freedesktop/NetworkManager` singleton
//! - [`Device`]: one network interface, with a [`Wireless`] facet for Wi-Fi
//! - [`AccessPoint`]: an access point seen by a wireless device
//!
//! Every handle is loaded through a [`Session`], which keeps exactly one
//! instance per `(kind, object path)`. Property reads are live round trips
//! and nothing is cached except the handles themselves.
//!
//! # Example
//!
//! ```no_run
//! use nmproxy::Session;
//!
//! # async fn example() -> nmproxy::Result<()> {
//! let session = Session::system().await?;
//! let manager = session.manager().await?;
//!
//! for device in manager.devices(&session).await? {
//!     println!("{device}: {}", device.device_type());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Property Change Listeners
//!
//! Listeners registered on a [`Proxy`] receive every `PropertyChanged` signal
//! the remote object emits. The first registration subscribes to the signal
//! and spawns a dispatcher task on the current tokio runtime; later
//! registrations reuse it.
//!
//! ```no_run
//! use nmproxy::{Session, listener};
//!
//! # async fn example() -> nmproxy::Result<()> {
//! let session = Session::system().await?;
//! let manager = session.manager().await?;
//!
//! let on_change = listener(|proxy, name, value| {
//!     println!("{proxy}: {name} = {value:?}");
//! });
//! manager.proxy().register_change_listener(on_change).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ProxyError>`. D-Bus failures are passed
//! through unchanged in [`ProxyError::Dbus`]; nothing is retried.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade. Every dispatched
//! property change is logged at `info` level. To see log output, add a
//! logging implementation like `env_logger`.

// Internal implementation modules
mod core;

// Public API modules
pub mod api;
pub mod dbus;
pub mod types;
pub mod util;

// Re-exported public API
pub use api::models::{DeviceType, ProxyError, ProxyKind};
pub use api::session::{Session, object_path};
pub use crate::core::access_point::AccessPoint;
pub use crate::core::cache::{CachedProxy, Entity, ProxyCache, ProxyKey};
pub use crate::core::device::{Device, DeviceCapability};
pub use crate::core::manager::Manager;
pub use crate::core::proxy::{PropertyListener, Proxy, listener};
pub use crate::core::wireless::Wireless;
pub use dbus::{Bus, PropertyChangeStream, RemoteObject, SystemBus};

/// A specialized `Result` type for proxy operations.
pub type Result<T> = std::result::Result<T, ProxyError>;
