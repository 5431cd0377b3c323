use tracing::debug;

use super::host::SharedHost;

/// An executable, reversible action.
///
/// `execute` returns `true` only when it changed the receiver; the log keeps
/// such commands around so they can be undone later.
pub trait Command {
    fn name(&self) -> &'static str;
    fn execute(&mut self) -> bool;
    fn undo(&mut self);
}

/// Binding to the host plus the text captured right before a mutation.
struct Snapshot {
    host: SharedHost,
    backup: Option<String>,
}

impl Snapshot {
    fn new(host: SharedHost) -> Self {
        Self { host, backup: None }
    }

    fn save(&mut self) {
        self.backup = Some(self.host.borrow().text().to_string());
    }

    /// Puts the saved text back. Selection and caret are not restored.
    fn restore(&mut self, name: &str) {
        match self.backup.take() {
            Some(text) => self.host.borrow_mut().set_text(text),
            None => debug!(command = name, "nothing to undo: command never mutated"),
        }
    }
}

pub struct CopyCommand {
    snapshot: Snapshot,
}

impl CopyCommand {
    pub fn new(host: SharedHost) -> Self {
        Self {
            snapshot: Snapshot::new(host),
        }
    }
}

impl Command for CopyCommand {
    fn name(&self) -> &'static str {
        "copy"
    }

    fn execute(&mut self) -> bool {
        let mut host = self.snapshot.host.borrow_mut();
        let selected = host.selected_text();
        host.set_clipboard(Some(selected));
        false
    }

    fn undo(&mut self) {
        self.snapshot.restore(self.name());
    }
}

pub struct CutCommand {
    snapshot: Snapshot,
}

impl CutCommand {
    pub fn new(host: SharedHost) -> Self {
        Self {
            snapshot: Snapshot::new(host),
        }
    }
}

impl Command for CutCommand {
    fn name(&self) -> &'static str {
        "cut"
    }

    fn execute(&mut self) -> bool {
        let (start, end) = self.snapshot.host.borrow().selection_range();
        if start == end {
            debug!("cut refused: empty selection");
            return false;
        }

        self.snapshot.save();
        let mut host = self.snapshot.host.borrow_mut();
        let selected = host.selected_text();
        let remaining: String = host
            .text()
            .chars()
            .enumerate()
            .filter(|(i, _)| *i < start || *i >= end)
            .map(|(_, c)| c)
            .collect();
        host.set_clipboard(Some(selected));
        host.set_text(remaining);
        host.set_caret(start);
        true
    }

    fn undo(&mut self) {
        self.snapshot.restore(self.name());
    }
}

pub struct PasteCommand {
    snapshot: Snapshot,
}

impl PasteCommand {
    pub fn new(host: SharedHost) -> Self {
        Self {
            snapshot: Snapshot::new(host),
        }
    }
}

impl Command for PasteCommand {
    fn name(&self) -> &'static str {
        "paste"
    }

    /// Inserts at the caret without replacing any selection.
    fn execute(&mut self) -> bool {
        let clipboard = match self.snapshot.host.borrow().clipboard() {
            Some(contents) if !contents.is_empty() => contents.to_string(),
            _ => {
                debug!("paste refused: clipboard is empty");
                return false;
            }
        };

        self.snapshot.save();
        let mut host = self.snapshot.host.borrow_mut();
        let caret = host.caret_index();
        host.insert_at(caret, &clipboard);
        true
    }

    fn undo(&mut self) {
        self.snapshot.restore(self.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::host::TextBuffer;

    fn host_with_selection(text: &str, start: usize, end: usize) -> SharedHost {
        let host = TextBuffer::new(text).shared();
        host.borrow_mut().select(start, end);
        host
    }

    #[test]
    fn test_copy_never_mutates() {
        let host = host_with_selection("hello world", 0, 5);
        let mut copy = CopyCommand::new(host.clone());

        assert!(!copy.execute());
        assert_eq!(host.borrow().clipboard(), Some("hello"));
        assert_eq!(host.borrow().text(), "hello world");
    }

    #[test]
    fn test_cut_removes_selection() {
        let host = host_with_selection("hello world", 0, 5);
        let mut cut = CutCommand::new(host.clone());

        assert!(cut.execute());
        assert_eq!(host.borrow().text(), " world");
        assert_eq!(host.borrow().clipboard(), Some("hello"));
        assert_eq!(host.borrow().caret_index(), 0);
    }

    #[test]
    fn test_cut_with_empty_selection_refuses() {
        let host = host_with_selection("hello", 2, 2);
        let mut cut = CutCommand::new(host.clone());

        assert!(!cut.execute());
        assert_eq!(host.borrow().text(), "hello");
        assert_eq!(host.borrow().clipboard(), None);
    }

    #[test]
    fn test_cut_undo_restores_text() {
        let host = host_with_selection("hello world", 5, 11);
        let mut cut = CutCommand::new(host.clone());

        cut.execute();
        assert_eq!(host.borrow().text(), "hello");
        cut.undo();
        assert_eq!(host.borrow().text(), "hello world");
    }

    #[test]
    fn test_paste_inserts_at_caret() {
        let host = TextBuffer::new("world").shared();
        host.borrow_mut().set_clipboard(Some("hello ".to_string()));
        host.borrow_mut().set_caret(0);

        let mut paste = PasteCommand::new(host.clone());
        assert!(paste.execute());
        assert_eq!(host.borrow().text(), "hello world");

        paste.undo();
        assert_eq!(host.borrow().text(), "world");
    }

    #[test]
    fn test_paste_does_not_replace_selection() {
        let host = host_with_selection("abcdef", 1, 3);
        host.borrow_mut().set_clipboard(Some("XY".to_string()));

        let mut paste = PasteCommand::new(host.clone());
        assert!(paste.execute());
        // caret stays at the end; the selection is left in the text
        assert_eq!(host.borrow().text(), "abcdefXY");
    }

    #[test]
    fn test_paste_with_empty_clipboard_refuses() {
        let host = TextBuffer::new("text").shared();
        let mut paste = PasteCommand::new(host.clone());
        assert!(!paste.execute());

        host.borrow_mut().set_clipboard(Some(String::new()));
        assert!(!paste.execute());
        assert_eq!(host.borrow().text(), "text");
    }

    #[test]
    fn test_undo_without_execute_is_noop() {
        let host = TextBuffer::new("text").shared();
        let mut paste = PasteCommand::new(host.clone());
        paste.undo();
        assert_eq!(host.borrow().text(), "text");
    }
}
