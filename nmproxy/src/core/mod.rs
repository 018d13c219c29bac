//! Proxy entities and the identity cache they are loaded through.

pub(crate) mod access_point;
pub(crate) mod cache;
pub(crate) mod device;
pub(crate) mod manager;
pub(crate) mod proxy;
pub(crate) mod wireless;
