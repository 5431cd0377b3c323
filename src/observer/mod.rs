//! Observer pattern: a channel-keyed event manager, a document editor that
//! publishes through it, and a single-topic news agency.

pub mod editor;
pub mod manager;
pub mod news;

pub use editor::{DocumentEditor, EmailAlertListener, FileRef, LogOpenListener};
pub use manager::{EventListener, EventManager, Listener, ListenerError, ListenerResult};
pub use news::{NewsAgency, NewsChannel};
