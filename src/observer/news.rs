use std::cell::RefCell;
use std::rc::Rc;

use super::manager::{EventListener, EventManager, Listener, ListenerResult};
use crate::error::Result;

const NEWS: &str = "news";

/// Single-topic observable: every news update is pushed to all channels.
pub struct NewsAgency {
    news: Option<String>,
    events: EventManager<String>,
}

impl NewsAgency {
    pub fn new() -> Self {
        Self {
            news: None,
            events: EventManager::new([NEWS]),
        }
    }

    pub fn add_observer(&self, channel: Listener<String>) -> Result<()> {
        self.events.subscribe(NEWS, channel)
    }

    pub fn remove_observer(&self, channel: &Listener<String>) -> bool {
        self.events.unsubscribe(NEWS, channel)
    }

    pub fn observer_count(&self) -> usize {
        self.events.subscriber_count(NEWS)
    }

    pub fn news(&self) -> Option<&str> {
        self.news.as_deref()
    }

    pub fn set_news(&mut self, news: impl Into<String>) -> Result<usize> {
        let news = news.into();
        let delivered = self.events.notify(NEWS, &news)?;
        self.news = Some(news);
        Ok(delivered)
    }
}

impl Default for NewsAgency {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer that keeps the most recent headline it was sent.
#[derive(Debug, Default)]
pub struct NewsChannel {
    news: RefCell<Option<String>>,
}

impl NewsChannel {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn news(&self) -> Option<String> {
        self.news.borrow().clone()
    }
}

impl EventListener<String> for NewsChannel {
    fn update(&self, _event_type: &str, news: &String) -> ListenerResult {
        *self.news.borrow_mut() = Some(news.clone());
        Ok(())
    }
}
