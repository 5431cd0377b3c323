use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

/// Failure reported by a listener. The manager logs it and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("listener failed: {0}")]
pub struct ListenerError(pub String);

pub type ListenerResult = std::result::Result<(), ListenerError>;

/// Subscriber interface. Any `Fn(&str, &P) -> Result<(), ListenerError>`
/// closure is a listener too.
pub trait EventListener<P> {
    fn update(&self, event_type: &str, payload: &P) -> ListenerResult;
}

impl<P, F> EventListener<P> for F
where
    F: Fn(&str, &P) -> ListenerResult,
{
    fn update(&self, event_type: &str, payload: &P) -> ListenerResult {
        self(event_type, payload)
    }
}

pub type Listener<P> = Rc<dyn EventListener<P>>;

/// Publisher-side subscription bookkeeping for a fixed set of channels.
///
/// All methods take `&self` so a listener holding the manager may
/// (un)subscribe while an emit is in flight; the emit keeps dispatching to
/// the list it started with.
pub struct EventManager<P> {
    listeners: RefCell<HashMap<String, Vec<Listener<P>>>>,
}

impl<P> EventManager<P> {
    pub fn new<I, S>(operations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let listeners = operations
            .into_iter()
            .map(|operation| (operation.into(), Vec::new()))
            .collect();
        Self {
            listeners: RefCell::new(listeners),
        }
    }

    pub fn channels(&self) -> Vec<String> {
        let mut names: Vec<String> = self.listeners.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn subscriber_count(&self, event_type: &str) -> usize {
        self.listeners
            .borrow()
            .get(event_type)
            .map_or(0, |users| users.len())
    }

    /// Appends `listener` to the channel. Duplicates are allowed.
    pub fn subscribe(&self, event_type: &str, listener: Listener<P>) -> Result<()> {
        let mut listeners = self.listeners.borrow_mut();
        let users = listeners
            .get_mut(event_type)
            .ok_or_else(|| CatalogError::unknown_channel(event_type))?;
        users.push(listener);
        Ok(())
    }

    /// Removes the first registration of `listener`. Returns whether one was found.
    pub fn unsubscribe(&self, event_type: &str, listener: &Listener<P>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(users) = listeners.get_mut(event_type) else {
            debug!(event_type, "unsubscribe from unknown channel ignored");
            return false;
        };
        match users.iter().position(|user| Rc::ptr_eq(user, listener)) {
            Some(index) => {
                users.remove(index);
                true
            }
            None => {
                debug!(event_type, "unsubscribe of absent listener ignored");
                false
            }
        }
    }

    /// Delivers `payload` to every listener of `event_type` in subscription
    /// order. Returns how many listeners handled it without failing.
    pub fn notify(&self, event_type: &str, payload: &P) -> Result<usize> {
        let users: Vec<Listener<P>> = self
            .listeners
            .borrow()
            .get(event_type)
            .ok_or_else(|| CatalogError::unknown_channel(event_type))?
            .clone();

        let mut delivered = 0;
        for (position, listener) in users.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| listener.update(event_type, payload))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(err)) => warn!(event_type, position, %err, "listener returned an error"),
                Err(_) => warn!(event_type, position, "listener panicked"),
            }
        }
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Transcript;

    fn recorder(tag: &'static str, transcript: &Transcript) -> Listener<String> {
        let transcript = transcript.clone();
        Rc::new(move |event: &str, payload: &String| -> ListenerResult {
            transcript.record(format!("{tag}:{event}:{payload}"));
            Ok(())
        })
    }

    #[test]
    fn test_delivery_follows_subscription_order() {
        let transcript = Transcript::new();
        let bus = EventManager::new(["open", "save"]);
        bus.subscribe("save", recorder("h1", &transcript)).unwrap();
        bus.subscribe("save", recorder("h2", &transcript)).unwrap();

        assert_eq!(bus.notify("save", &"P".to_string()).unwrap(), 2);
        assert_eq!(transcript.take(), vec!["h1:save:P", "h2:save:P"]);

        assert_eq!(bus.notify("open", &"Q".to_string()).unwrap(), 0);
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_subscribe_unknown_channel_fails() {
        let bus: EventManager<String> = EventManager::new(["open"]);
        let err = bus
            .subscribe("close", recorder("h", &Transcript::new()))
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown event channel 'close'");
    }

    #[test]
    fn test_notify_unknown_channel_fails() {
        let bus: EventManager<String> = EventManager::new(["open"]);
        assert!(bus.notify("close", &String::new()).is_err());
    }

    #[test]
    fn test_unsubscribe_removes_first_occurrence() {
        let transcript = Transcript::new();
        let bus = EventManager::new(["save"]);
        let h1 = recorder("h1", &transcript);
        let h2 = recorder("h2", &transcript);
        bus.subscribe("save", h1.clone()).unwrap();
        bus.subscribe("save", h2.clone()).unwrap();
        bus.subscribe("save", h1.clone()).unwrap();

        assert!(bus.unsubscribe("save", &h1));
        bus.notify("save", &"x".to_string()).unwrap();
        assert_eq!(transcript.take(), vec!["h2:save:x", "h1:save:x"]);

        assert!(bus.unsubscribe("save", &h1));
        assert!(!bus.unsubscribe("save", &h1));
        assert!(!bus.unsubscribe("nope", &h2));
        assert_eq!(bus.subscriber_count("save"), 1);
    }

    #[test]
    fn test_failing_listeners_do_not_stop_dispatch() {
        let transcript = Transcript::new();
        let bus = EventManager::new(["save"]);
        let failing: Listener<String> =
            Rc::new(|_: &str, _: &String| -> ListenerResult { Err(ListenerError("disk full".to_string())) });
        let panicking: Listener<String> = Rc::new(|_: &str, _: &String| -> ListenerResult { panic!("boom") });
        bus.subscribe("save", failing).unwrap();
        bus.subscribe("save", panicking).unwrap();
        bus.subscribe("save", recorder("ok", &transcript)).unwrap();

        assert_eq!(bus.notify("save", &"f".to_string()).unwrap(), 1);
        assert_eq!(transcript.lines(), vec!["ok:save:f"]);
    }

    #[test]
    fn test_subscribing_during_emit_uses_snapshot() {
        let transcript = Transcript::new();
        let bus = Rc::new(EventManager::new(["save"]));
        let late = recorder("late", &transcript);

        let bus_handle = Rc::downgrade(&bus);
        let late_handle = late.clone();
        let joiner: Listener<String> = Rc::new(move |_: &str, _: &String| -> ListenerResult {
            if let Some(bus) = bus_handle.upgrade() {
                bus.subscribe("save", late_handle.clone())
                    .map_err(|err| ListenerError(err.to_string()))?;
            }
            Ok(())
        });
        bus.subscribe("save", joiner).unwrap();

        bus.notify("save", &"first".to_string()).unwrap();
        assert!(transcript.is_empty());
        assert_eq!(bus.subscriber_count("save"), 2);

        bus.notify("save", &"second".to_string()).unwrap();
        assert_eq!(transcript.lines(), vec!["late:save:second"]);
    }

    #[test]
    fn test_channels_are_fixed() {
        let bus: EventManager<()> = EventManager::new(vec!["save".to_string(), "open".to_string()]);
        assert_eq!(bus.channels(), vec!["open", "save"]);
    }
}
