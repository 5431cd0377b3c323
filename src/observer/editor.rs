use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::manager::{EventListener, EventManager, Listener, ListenerResult};
use crate::error::{CatalogError, Result};
use crate::transcript::Transcript;

/// Payload for document events: the file an operation touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    path: PathBuf,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, like `File::getName`.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Concrete publisher: business logic that announces opens and saves.
pub struct DocumentEditor {
    pub events: EventManager<FileRef>,
    file: Option<FileRef>,
}

impl DocumentEditor {
    pub fn new() -> Self {
        Self::with_channels(["open", "save"])
    }

    pub fn with_channels<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            events: EventManager::new(channels),
            file: None,
        }
    }

    pub fn subscribe(&self, event_type: &str, listener: Listener<FileRef>) -> Result<()> {
        self.events.subscribe(event_type, listener)
    }

    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<usize> {
        let file = FileRef::new(path);
        let delivered = self.events.notify("open", &file)?;
        self.file = Some(file);
        Ok(delivered)
    }

    pub fn save_file(&self) -> Result<usize> {
        let file = self.file.as_ref().ok_or(CatalogError::NoOpenFile)?;
        self.events.notify("save", file)
    }
}

impl Default for DocumentEditor {
    fn default() -> Self {
        Self::new()
    }
}

pub struct EmailAlertListener {
    email: String,
    transcript: Transcript,
}

impl EmailAlertListener {
    pub fn new(email: impl Into<String>, transcript: Transcript) -> Rc<Self> {
        Rc::new(Self {
            email: email.into(),
            transcript,
        })
    }
}

impl EventListener<FileRef> for EmailAlertListener {
    fn update(&self, event_type: &str, file: &FileRef) -> ListenerResult {
        self.transcript.record(format!(
            "Email to {}: Someone has performed {} operation with the following file: {}",
            self.email,
            event_type,
            file.name()
        ));
        Ok(())
    }
}

pub struct LogOpenListener {
    log: PathBuf,
    transcript: Transcript,
}

impl LogOpenListener {
    pub fn new(log: impl Into<PathBuf>, transcript: Transcript) -> Rc<Self> {
        Rc::new(Self {
            log: log.into(),
            transcript,
        })
    }
}

impl EventListener<FileRef> for LogOpenListener {
    fn update(&self, event_type: &str, file: &FileRef) -> ListenerResult {
        self.transcript.record(format!(
            "Save to log {}: Someone has performed {} operation with the following file: {}",
            self.log.display(),
            event_type,
            file.name()
        ));
        Ok(())
    }
}
