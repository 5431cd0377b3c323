use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::actions::{Command, CopyCommand, CutCommand, PasteCommand};
use super::host::SharedHost;
use crate::error::CatalogError;

/// Stack of commands that actually mutated the host, most recent last.
#[derive(Default)]
pub struct CommandHistory {
    history: Vec<Box<dyn Command>>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Box<dyn Command>) {
        self.history.push(command);
    }

    pub fn pop(&mut self) -> Option<Box<dyn Command>> {
        self.history.pop()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// User intents a driver can trigger against the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Copy,
    Cut,
    Paste,
    Undo,
}

impl EditAction {
    pub const NAMES: &'static [&'static str] = &["copy", "cut", "paste", "undo"];
}

impl FromStr for EditAction {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "copy" => Ok(EditAction::Copy),
            "cut" => Ok(EditAction::Cut),
            "paste" => Ok(EditAction::Paste),
            "undo" => Ok(EditAction::Undo),
            _ => Err(CatalogError::unknown_variant("edit action", s, Self::NAMES)),
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditAction::Copy => "copy",
            EditAction::Cut => "cut",
            EditAction::Paste => "paste",
            EditAction::Undo => "undo",
        };
        f.write_str(name)
    }
}

/// Invoker: runs commands against one host and records the ones that mutated.
pub struct ActionLog {
    host: SharedHost,
    history: CommandHistory,
}

impl ActionLog {
    pub fn new(host: SharedHost) -> Self {
        Self {
            host,
            history: CommandHistory::new(),
        }
    }

    pub fn host(&self) -> SharedHost {
        self.host.clone()
    }

    pub fn text(&self) -> String {
        self.host.borrow().text().to_string()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Executes `command`; keeps it only if it reported a mutation.
    pub fn run(&mut self, mut command: Box<dyn Command>) -> bool {
        let mutated = command.execute();
        if mutated {
            self.history.push(command);
        } else {
            debug!(command = command.name(), "no mutation, not recorded");
        }
        mutated
    }

    /// Reverts the most recent mutation. Returns `false` on an empty history.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(mut command) => {
                command.undo();
                true
            }
            None => {
                debug!("undo refused: history is empty");
                false
            }
        }
    }

    /// Builds the command for `action` bound to this log's host and runs it.
    pub fn perform(&mut self, action: EditAction) -> bool {
        let host = self.host.clone();
        match action {
            EditAction::Copy => self.run(Box::new(CopyCommand::new(host))),
            EditAction::Cut => self.run(Box::new(CutCommand::new(host))),
            EditAction::Paste => self.run(Box::new(PasteCommand::new(host))),
            EditAction::Undo => self.undo(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::host::{TextBuffer, TextHost};
    use proptest::prelude::*;

    fn log_for(text: &str, start: usize, end: usize) -> ActionLog {
        let host = TextBuffer::new(text).shared();
        host.borrow_mut().select(start, end);
        ActionLog::new(host)
    }

    #[test]
    fn test_copy_cut_paste_undo_walkthrough() {
        let mut log = log_for("hello world", 0, 5);

        assert!(!log.perform(EditAction::Copy));
        assert_eq!(log.host().borrow().clipboard(), Some("hello"));
        assert_eq!(log.history_len(), 0);

        assert!(log.perform(EditAction::Cut));
        assert_eq!(log.text(), " world");
        assert_eq!(log.history_len(), 1);

        assert!(log.perform(EditAction::Paste));
        assert_eq!(log.text(), "hello world");
        assert_eq!(log.history_len(), 2);

        assert!(log.perform(EditAction::Undo));
        assert_eq!(log.text(), " world");
        assert_eq!(log.history_len(), 1);

        assert!(log.perform(EditAction::Undo));
        assert_eq!(log.text(), "hello world");
        assert_eq!(log.history_len(), 0);
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut log = log_for("abc", 0, 0);
        assert!(!log.undo());
        assert_eq!(log.text(), "abc");
    }

    #[test]
    fn test_refused_commands_are_not_recorded() {
        let mut log = log_for("abc", 1, 1);
        assert!(!log.perform(EditAction::Cut));
        assert!(!log.perform(EditAction::Paste));
        assert_eq!(log.history_len(), 0);
    }

    #[test]
    fn test_edit_action_parsing() {
        assert_eq!("Paste".parse::<EditAction>().unwrap(), EditAction::Paste);
        let err = "redo".parse::<EditAction>().unwrap_err();
        assert!(err.to_string().contains("'redo'"));
    }

    #[test]
    fn test_history_stack_order() {
        let mut history = CommandHistory::new();
        let host = TextBuffer::new("x").shared();
        history.push(Box::new(CopyCommand::new(host.clone())));
        history.push(Box::new(CutCommand::new(host)));

        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().map(|c| c.name()), Some("cut"));
        assert_eq!(history.pop().map(|c| c.name()), Some("copy"));
        assert!(history.is_empty());
    }

    prop_compose! {
        fn text_and_selection()(text in "[a-z ]{0,24}")(
            start in 0..=text.len(),
            len in 0..=text.len(),
            text in Just(text),
        ) -> (String, usize, usize) {
            let end = (start + len).min(text.len());
            (text, start, end)
        }
    }

    proptest! {
        #[test]
        fn test_single_command_undo_is_inverse(
            (text, start, end) in text_and_selection(),
            action in prop_oneof![Just(EditAction::Cut), Just(EditAction::Paste)],
            clip in "[a-z]{0,5}",
        ) {
            let mut log = log_for(&text, start, end);
            log.host().borrow_mut().set_clipboard(Some(clip));

            let before = log.text();
            let recorded = log.history_len();
            if log.perform(action) {
                prop_assert_eq!(log.history_len(), recorded + 1);
                log.undo();
            } else {
                prop_assert_eq!(log.history_len(), recorded);
            }
            prop_assert_eq!(log.text(), before);
        }

        #[test]
        fn test_undos_walk_back_the_stack(
            (text, start, end) in text_and_selection(),
            actions in prop::collection::vec(
                prop_oneof![Just(EditAction::Copy), Just(EditAction::Cut), Just(EditAction::Paste)],
                0..8,
            ),
            undos in 0usize..8,
        ) {
            let mut log = log_for(&text, start, end);
            let mut before_each = Vec::new();
            for action in actions {
                let before = log.text();
                if log.perform(action) {
                    before_each.push(before);
                }
                // reselect so later cuts have something to work on
                let len = log.host().borrow().char_len();
                log.host().borrow_mut().select(0, len / 2);
            }

            let k = before_each.len();
            let j = undos.min(k);
            for _ in 0..j {
                log.undo();
            }
            if j > 0 {
                prop_assert_eq!(&log.text(), &before_each[k - j]);
            }
            prop_assert_eq!(log.history_len(), k - j);
        }
    }
}
