//! Command pattern: undoable edit actions against a text host, plus a
//! single-slot remote control driving a light.

pub mod actions;
pub mod history;
pub mod host;
pub mod remote;

pub use actions::{Command, CopyCommand, CutCommand, PasteCommand};
pub use history::{ActionLog, CommandHistory, EditAction};
pub use host::{SharedHost, TextBuffer, TextHost};
pub use remote::{Light, LightToggleCommand, RemoteControl};
