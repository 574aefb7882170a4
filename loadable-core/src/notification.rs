use std::{
    any::Any,
    cell::RefCell,
    collections::HashMap,
    fmt,
    marker::PhantomData,
    rc::{Rc, Weak},
};

use crate::{
    error::Error,
    user_info::{UserInfo, UserInfoMapper},
};

/// Name of a notification channel together with the payload type it carries.
pub struct Channel<T> {
    name: &'static str,
    payload: PhantomData<fn() -> T>,
}

impl<T> Channel<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            payload: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Channel<T> {}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Channel({})", self.name)
    }
}

/// A payload that travels over exactly one channel.
pub trait NotificationCenterSendable: UserInfoMapper + 'static {
    const CHANNEL: Channel<Self>;
}

/// Something that wants to hear about payloads of one type.
pub trait NotificationCenterObserver: 'static {
    type Payload: NotificationCenterSendable;

    fn retrieved(&mut self, payload: Self::Payload);
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObserverId(u64);

enum Delivery {
    Delivered,
    Busy,
    Gone,
}

type Deliver = Rc<dyn Fn(&UserInfo) -> Result<Delivery, Error>>;

struct Owner {
    address: usize,
    handle: Weak<dyn Any>,
}

impl Owner {
    fn is_alive(&self) -> bool {
        self.handle.strong_count() > 0
    }
}

struct Registration {
    id: ObserverId,
    owner: Option<Owner>,
    deliver: Deliver,
}

impl Registration {
    fn is_alive(&self) -> bool {
        self.owner.as_ref().map_or(true, Owner::is_alive)
    }
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    channels: HashMap<&'static str, Vec<Registration>>,
}

impl Registry {
    fn prune(&mut self, name: &str) {
        if let Some(registrations) = self.channels.get_mut(name) {
            let before = registrations.len();
            registrations.retain(Registration::is_alive);
            let pruned = before - registrations.len();
            if pruned > 0 {
                log::debug!("pruned {pruned} dropped observers from {name}");
            }
        }
    }
}

/// Explicit, single-threaded publish/subscribe hub.
///
/// Cloning yields another handle to the same registry. Observers registered
/// through [`NotificationCenter::register`] are held weakly and disappear from
/// the registry once the last strong reference to them is dropped.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    registry: Rc<RefCell<Registry>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `on_receive` with every payload posted on `channel` from now on.
    pub fn subscribe<T, F>(&self, channel: Channel<T>, on_receive: F) -> ObserverId
    where
        T: UserInfoMapper + 'static,
        F: Fn(T) + 'static,
    {
        let deliver = move |user_info: &UserInfo| -> Result<Delivery, Error> {
            on_receive(T::map_from(user_info)?);
            Ok(Delivery::Delivered)
        };
        self.insert(channel.name(), None, Rc::new(deliver))
    }

    /// Registers `observer` on the channel of its payload type.
    ///
    /// Panics if the same observer is already registered there.
    pub fn register<O>(&self, observer: &Rc<RefCell<O>>) -> ObserverId
    where
        O: NotificationCenterObserver,
    {
        let weak = Rc::downgrade(observer);
        let handle: Weak<dyn Any> = weak.clone();
        let owner = Owner {
            address: Rc::as_ptr(observer) as *const () as usize,
            handle,
        };
        let deliver = move |user_info: &UserInfo| -> Result<Delivery, Error> {
            let Some(observer) = weak.upgrade() else {
                return Ok(Delivery::Gone);
            };
            let payload = O::Payload::map_from(user_info)?;
            let Ok(mut observer) = observer.try_borrow_mut() else {
                return Ok(Delivery::Busy);
            };
            observer.retrieved(payload);
            Ok(Delivery::Delivered)
        };
        self.insert(O::Payload::CHANNEL.name(), Some(owner), Rc::new(deliver))
    }

    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut registry = self.registry.borrow_mut();
        for registrations in registry.channels.values_mut() {
            if let Some(index) = registrations.iter().position(|r| r.id == id) {
                registrations.remove(index);
                return true;
            }
        }
        false
    }

    pub fn observer_count(&self, name: &str) -> usize {
        self.registry
            .borrow()
            .channels
            .get(name)
            .map_or(0, |registrations| {
                registrations.iter().filter(|r| r.is_alive()).count()
            })
    }

    /// Broadcasts `payload` to every observer of its channel.
    ///
    /// Panics if an observer cannot decode the payload, sender and receivers
    /// of a typed channel always agree on its shape.
    pub fn post<T>(&self, payload: &T)
    where
        T: NotificationCenterSendable,
    {
        let name = T::CHANNEL.name();
        if let Err(err) = self.deliver(name, &payload.map()) {
            panic!("payload posted on {name} could not be decoded: {err}");
        }
    }

    /// Broadcasts an untyped payload.
    ///
    /// Observers that fail to decode it are skipped, the first decoding error
    /// is returned once every observer had its turn.
    pub fn post_user_info(&self, name: &str, user_info: UserInfo) -> Result<(), Error> {
        self.deliver(name, &user_info)
    }

    fn insert(&self, name: &'static str, owner: Option<Owner>, deliver: Deliver) -> ObserverId {
        let mut registry = self.registry.borrow_mut();
        registry.prune(name);

        if let Some(owner) = &owner {
            let registered_twice = registry.channels.get(name).map_or(false, |registrations| {
                registrations
                    .iter()
                    .filter_map(|r| r.owner.as_ref())
                    .any(|o| o.address == owner.address)
            });
            assert!(!registered_twice, "observer registered twice on {name}");
        }

        let id = ObserverId(registry.next_id);
        registry.next_id += 1;
        registry
            .channels
            .entry(name)
            .or_default()
            .push(Registration { id, owner, deliver });
        log::trace!("registered {id:?} on {name}");
        id
    }

    fn deliver(&self, name: &str, user_info: &UserInfo) -> Result<(), Error> {
        // Observers may post or register from their callbacks, so the registry
        // must not stay borrowed while delivering.
        let snapshot: Vec<(ObserverId, Deliver)> = self
            .registry
            .borrow()
            .channels
            .get(name)
            .map(|registrations| {
                registrations
                    .iter()
                    .map(|r| (r.id, r.deliver.clone()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let mut first_error = None;
        let mut found_dropped = false;
        for (id, deliver) in snapshot {
            match deliver(user_info) {
                Ok(Delivery::Delivered) => {}
                Ok(Delivery::Busy) => {
                    log::warn!("{id:?} is busy, skipping nested delivery on {name}");
                }
                Ok(Delivery::Gone) => {
                    found_dropped = true;
                }
                Err(err) => {
                    log::warn!("{id:?} failed to decode user info on {name}: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }
        if found_dropped {
            self.registry.borrow_mut().prune(name);
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::user_info::{UserInfoExt, Value};

    #[derive(Debug, PartialEq)]
    struct Ping {
        value: i64,
    }

    impl UserInfoMapper for Ping {
        fn map(&self) -> UserInfo {
            UserInfo::from([("value".to_string(), Value::Int(self.value))])
        }

        fn map_from(user_info: &UserInfo) -> Result<Self, Error> {
            Ok(Self {
                value: user_info.int("value")?,
            })
        }
    }

    impl NotificationCenterSendable for Ping {
        const CHANNEL: Channel<Self> = Channel::new("test.ping");
    }

    #[derive(Default)]
    struct Listener {
        seen: Vec<i64>,
        echo: Option<NotificationCenter>,
    }

    impl NotificationCenterObserver for Listener {
        type Payload = Ping;

        fn retrieved(&mut self, payload: Ping) {
            self.seen.push(payload.value);
            if let Some(center) = &self.echo {
                center.post(&Ping {
                    value: payload.value + 1,
                });
            }
        }
    }

    #[test]
    fn every_observer_receives_every_post() {
        let center = NotificationCenter::new();
        let first = Rc::new(RefCell::new(Listener::default()));
        let second = Rc::new(RefCell::new(Listener::default()));
        center.register(&first);
        center.register(&second);

        center.post(&Ping { value: 1 });
        center.post(&Ping { value: 2 });

        assert_eq!(first.borrow().seen, vec![1, 2]);
        assert_eq!(second.borrow().seen, vec![1, 2]);
    }

    #[test]
    fn subscribers_decode_into_their_type() {
        let center = NotificationCenter::new();
        let received = Rc::new(Cell::new(0));
        center.subscribe(Ping::CHANNEL, {
            let received = received.clone();
            move |ping: Ping| received.set(ping.value)
        });

        center.post(&Ping { value: 9 });

        assert_eq!(received.get(), 9);
    }

    #[test]
    fn other_channels_are_not_delivered() {
        let center = NotificationCenter::new();
        let listener = Rc::new(RefCell::new(Listener::default()));
        center.register(&listener);

        let result = center.post_user_info(
            "test.other",
            UserInfo::from([("value".to_string(), Value::Int(3))]),
        );

        assert!(result.is_ok());
        assert!(listener.borrow().seen.is_empty());
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn registering_twice_panics() {
        let center = NotificationCenter::new();
        let listener = Rc::new(RefCell::new(Listener::default()));
        center.register(&listener);
        center.register(&listener);
    }

    #[test]
    fn dropped_observers_are_pruned() {
        let center = NotificationCenter::new();
        let kept = Rc::new(RefCell::new(Listener::default()));
        let dropped = Rc::new(RefCell::new(Listener::default()));
        center.register(&kept);
        center.register(&dropped);
        assert_eq!(center.observer_count("test.ping"), 2);

        drop(dropped);
        assert_eq!(center.observer_count("test.ping"), 1);

        center.post(&Ping { value: 5 });
        assert_eq!(kept.borrow().seen, vec![5]);
        assert_eq!(center.observer_count("test.ping"), 1);
    }

    #[test]
    fn unregistered_observers_stop_receiving() {
        let center = NotificationCenter::new();
        let listener = Rc::new(RefCell::new(Listener::default()));
        let id = center.register(&listener);
        center.post(&Ping { value: 1 });

        assert!(center.unregister(id));
        assert!(!center.unregister(id));
        center.post(&Ping { value: 2 });

        assert_eq!(listener.borrow().seen, vec![1]);
    }

    #[test]
    fn malformed_user_info_is_an_error() {
        let center = NotificationCenter::new();
        let listener = Rc::new(RefCell::new(Listener::default()));
        center.register(&listener);

        let result = center.post_user_info(
            "test.ping",
            UserInfo::from([("value".to_string(), Value::Text("one".into()))]),
        );

        assert!(matches!(
            result,
            Err(Error::UnexpectedValue { key: "value", .. })
        ));
        assert!(listener.borrow().seen.is_empty());
    }

    #[test]
    fn self_posting_observer_is_not_reentered() {
        let center = NotificationCenter::new();
        let echo = Rc::new(RefCell::new(Listener {
            seen: Vec::new(),
            echo: Some(center.clone()),
        }));
        let plain = Rc::new(RefCell::new(Listener::default()));
        center.register(&echo);
        center.register(&plain);

        center.post(&Ping { value: 1 });

        assert_eq!(echo.borrow().seen, vec![1]);
        assert_eq!(plain.borrow().seen, vec![2, 1]);
    }
}
