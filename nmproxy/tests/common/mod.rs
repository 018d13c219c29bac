//! In-memory stand-in for NetworkManager on the system bus.
//!
//! Objects are keyed by path only, so every interface resolved at a path
//! shares the same properties, methods and signal subscribers.

#![allow(dead_code)]

use async_trait::async_trait;
use futures::channel::mpsc::{UnboundedSender, unbounded};
use futures::stream::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use nmproxy::{
    Bus, Entity, PropertyChangeStream, ProxyError, RemoteObject, Result, Session, object_path,
};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

pub const WIFI_DEVICE: &str = "/org/freedesktop/NetworkManager/Devices/1";
pub const ETH_DEVICE: &str = "/org/freedesktop/NetworkManager/Devices/2";
pub const AP_ONE: &str = "/org/freedesktop/NetworkManager/AccessPoint/10";
pub const AP_TWO: &str = "/org/freedesktop/NetworkManager/AccessPoint/11";

/// Property values the fake can hold.
#[derive(Debug, Clone)]
pub enum FakeValue {
    U32(u32),
    Str(String),
    Bytes(Vec<u8>),
}

impl FakeValue {
    fn to_owned_value(&self) -> Result<OwnedValue> {
        let value = match self {
            Self::U32(v) => Value::from(*v),
            Self::Str(s) => Value::from(s.clone()),
            Self::Bytes(b) => Value::from(b.clone()),
        };
        Ok(value.try_to_owned()?)
    }
}

#[derive(Default)]
struct RemoteState {
    properties: Mutex<HashMap<String, FakeValue>>,
    methods: Mutex<HashMap<String, Vec<OwnedObjectPath>>>,
    subscribers: Mutex<Vec<UnboundedSender<(String, OwnedValue)>>>,
    refuse_subscriptions: AtomicBool,
}

#[derive(Default)]
struct Counters {
    resolves: AtomicUsize,
    subscriptions: AtomicUsize,
    get_interfaces: Mutex<Vec<String>>,
}

/// Fake bus with counters for resolutions and subscriptions.
#[derive(Default)]
pub struct FakeBus {
    objects: Mutex<HashMap<String, Arc<RemoteState>>>,
    unreachable: Mutex<Vec<String>>,
    counters: Arc<Counters>,
}

impl FakeBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A bus exposing one Wi-Fi device with two access points and one
    /// Ethernet device.
    pub fn with_network() -> Arc<Self> {
        let bus = Self::new();
        bus.set_method(
            "/org/freedesktop/NetworkManager",
            "GetDevices",
            &[WIFI_DEVICE, ETH_DEVICE],
        );
        bus.set_property(WIFI_DEVICE, "DeviceType", FakeValue::U32(2));
        bus.set_property(WIFI_DEVICE, "Interface", FakeValue::Str("wlan0".into()));
        bus.set_method(WIFI_DEVICE, "GetAccessPoints", &[AP_ONE, AP_TWO]);
        bus.set_property(ETH_DEVICE, "DeviceType", FakeValue::U32(1));
        bus.set_property(ETH_DEVICE, "Interface", FakeValue::Str("eth0".into()));
        bus.set_property(AP_ONE, "Ssid", FakeValue::Bytes(b"HomeNet".to_vec()));
        bus.set_property(AP_ONE, "Strength", FakeValue::U32(70));
        bus.set_property(AP_TWO, "Ssid", FakeValue::Bytes(Vec::new()));
        bus
    }

    pub fn session(self: &Arc<Self>) -> Session {
        Session::with_bus(self.clone())
    }

    pub fn set_property(&self, path: &str, name: &str, value: FakeValue) {
        self.state(path)
            .properties
            .lock()
            .unwrap()
            .insert(name.to_owned(), value);
    }

    pub fn set_method(&self, path: &str, method: &str, paths: &[&str]) {
        let paths = paths
            .iter()
            .map(|p| OwnedObjectPath::try_from(*p).unwrap())
            .collect();
        self.state(path)
            .methods
            .lock()
            .unwrap()
            .insert(method.to_owned(), paths);
    }

    /// Emits `PropertyChanged` to every subscriber of the object at `path`.
    pub fn emit(&self, path: &str, name: &str, value: FakeValue) {
        let state = self.state(path);
        let subscribers = state.subscribers.lock().unwrap();
        for tx in subscribers.iter() {
            let value = value.to_owned_value().unwrap();
            tx.unbounded_send((name.to_owned(), value)).unwrap();
        }
    }

    /// Drops every property of the object at `path`, as if it had vanished.
    pub fn remove_object(&self, path: &str) {
        self.state(path).properties.lock().unwrap().clear();
    }

    /// Makes `PropertyChanged` subscriptions on `path` fail, or succeed again.
    pub fn refuse_subscriptions(&self, path: &str, refuse: bool) {
        self.state(path)
            .refuse_subscriptions
            .store(refuse, Ordering::SeqCst);
    }

    /// Simulates the remote object being recreated: handles resolved before
    /// this call keep seeing the old state.
    pub fn restart(&self, path: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_owned(), Arc::new(RemoteState::default()));
    }

    /// Makes resolution of `path` fail.
    pub fn make_unreachable(&self, path: &str) {
        self.unreachable.lock().unwrap().push(path.to_owned());
    }

    pub fn resolves(&self) -> usize {
        self.counters.resolves.load(Ordering::SeqCst)
    }

    pub fn subscriptions(&self) -> usize {
        self.counters.subscriptions.load(Ordering::SeqCst)
    }

    /// Interface arguments of every `Properties.Get` issued so far.
    pub fn get_interfaces(&self) -> Vec<String> {
        self.counters.get_interfaces.lock().unwrap().clone()
    }

    fn state(&self, path: &str) -> Arc<RemoteState> {
        self.objects
            .lock()
            .unwrap()
            .entry(path.to_owned())
            .or_default()
            .clone()
    }
}

#[async_trait]
impl Bus for FakeBus {
    async fn resolve(
        &self,
        path: &OwnedObjectPath,
        interface: &str,
    ) -> Result<Arc<dyn RemoteObject>> {
        if self
            .unreachable
            .lock()
            .unwrap()
            .iter()
            .any(|p| p == path.as_str())
        {
            return Err(ProxyError::Dbus(zbus::Error::Failure(format!(
                "no object at {}",
                path.as_str()
            ))));
        }

        self.counters.resolves.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(FakeObject {
            path: path.clone(),
            interface: interface.to_owned(),
            state: self.state(path.as_str()),
            counters: self.counters.clone(),
        }))
    }
}

struct FakeObject {
    path: OwnedObjectPath,
    interface: String,
    state: Arc<RemoteState>,
    counters: Arc<Counters>,
}

#[async_trait]
impl RemoteObject for FakeObject {
    fn path(&self) -> &OwnedObjectPath {
        &self.path
    }

    fn interface(&self) -> &str {
        &self.interface
    }

    async fn get_property(&self, interface: &str, name: &str) -> Result<OwnedValue> {
        self.counters
            .get_interfaces
            .lock()
            .unwrap()
            .push(interface.to_owned());
        let value = self.state.properties.lock().unwrap().get(name).cloned();
        match value {
            Some(v) => v.to_owned_value(),
            None => Err(ProxyError::Dbus(zbus::Error::Failure(format!(
                "no property {name}"
            )))),
        }
    }

    async fn call_for_paths(&self, method: &str) -> Result<Vec<OwnedObjectPath>> {
        let paths = self.state.methods.lock().unwrap().get(method).cloned();
        paths.ok_or_else(|| {
            ProxyError::Dbus(zbus::Error::Failure(format!("no method {method}")))
        })
    }

    async fn subscribe(&self, signal: &str) -> Result<PropertyChangeStream> {
        // Give concurrent callers a chance to interleave with this one.
        tokio::task::yield_now().await;
        if self.state.refuse_subscriptions.load(Ordering::SeqCst) {
            return Err(ProxyError::Dbus(zbus::Error::Failure(format!(
                "cannot subscribe to {signal} on {}",
                self.path.as_str()
            ))));
        }

        self.counters.subscriptions.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = unbounded();
        self.state.subscribers.lock().unwrap().push(tx);
        Ok(rx.boxed())
    }
}

/// Loads `T` at `path` through `session`, failing the test on error.
pub async fn load<T: Entity>(session: &Session, path: &str) -> Arc<T> {
    let path = object_path(path).unwrap();
    session.load::<T>(path).await.unwrap()
}

/// Waits for the next listener notification, failing the test after a second.
pub async fn next_event<T>(rx: &mut UnboundedReceiver<T>) -> T {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for listener")
        .expect("listener channel closed")
}

/// Asserts nothing more arrives within a short grace period.
pub async fn assert_quiet<T: std::fmt::Debug>(rx: &mut UnboundedReceiver<T>) {
    let grace = Duration::from_millis(50);
    let res = tokio::time::timeout(grace, rx.recv()).await;
    assert!(res.is_err(), "unexpected listener event: {res:?}");
}
