use std::cell::RefCell;
use std::rc::Rc;

/// The editing surface commands act on.
///
/// All positions are character indices, never byte offsets. After every
/// mutation an implementation must keep `0 <= start <= end <= len` for the
/// selection and `0 <= caret <= len` for the caret.
pub trait TextHost {
    fn text(&self) -> &str;
    fn selection_range(&self) -> (usize, usize);
    fn caret_index(&self) -> usize;
    fn clipboard(&self) -> Option<&str>;

    fn set_text(&mut self, text: String);
    fn set_clipboard(&mut self, contents: Option<String>);
    fn insert_at(&mut self, index: usize, contents: &str);
    fn set_caret(&mut self, index: usize);
    fn select(&mut self, start: usize, end: usize);

    fn selected_text(&self) -> String {
        let (start, end) = self.selection_range();
        self.text().chars().skip(start).take(end - start).collect()
    }

    fn char_len(&self) -> usize {
        self.text().chars().count()
    }
}

/// Host handle shared between the action log and every command it runs.
pub type SharedHost = Rc<RefCell<dyn TextHost>>;

/// In-memory text host standing in for a GUI text area.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuffer {
    text: String,
    selection: (usize, usize),
    caret: usize,
    clipboard: Option<String>,
}

impl TextBuffer {
    /// Creates a buffer with the caret at the end and nothing selected.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            selection: (len, len),
            caret: len,
            clipboard: None,
        }
    }

    pub fn shared(self) -> SharedHost {
        Rc::new(RefCell::new(self))
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }

    fn clamp_positions(&mut self) {
        let len = self.char_len();
        let (start, end) = self.selection;
        self.selection = (start.min(len), end.min(len));
        self.caret = self.caret.min(len);
    }
}

impl TextHost for TextBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection_range(&self) -> (usize, usize) {
        self.selection
    }

    fn caret_index(&self) -> usize {
        self.caret
    }

    fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        self.clamp_positions();
    }

    fn set_clipboard(&mut self, contents: Option<String>) {
        self.clipboard = contents;
    }

    fn insert_at(&mut self, index: usize, contents: &str) {
        let index = index.min(self.char_len());
        let offset = self.byte_offset(index);
        self.text.insert_str(offset, contents);
        self.set_caret(index + contents.chars().count());
    }

    fn set_caret(&mut self, index: usize) {
        let index = index.min(self.char_len());
        self.caret = index;
        self.selection = (index, index);
    }

    /// Selects `[start, end)`, clamped to the text. Reversed bounds are swapped.
    fn select(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.selection = (start.min(len), end.min(len));
    }
}
