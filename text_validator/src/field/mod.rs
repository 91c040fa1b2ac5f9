use crate::{TextChange, TextWatcher};
use getset::Getters;
use std::borrow::Cow;

/// The capabilities a validator needs from a text field widget.
///
/// The field is owned by the host. Validators only borrow it, either for a
/// single call or for the lifetime of a [`BoundValidator`](crate::BoundValidator).
pub trait TextField {
    /// The full current content of the field.
    fn text(&self) -> Cow<'_, str>;

    /// Shows `error` next to the field, or removes the displayed error when
    /// `None` is given.
    fn set_error(&mut self, error: Option<&str>);
}

/// A headless text field holding its content and displayed error in memory.
///
/// Edits made through [`splice`](MemoryField::splice) notify the given
/// watchers the same way a widget toolkit would.
#[derive(Clone, Debug, Default, PartialEq, Eq, Getters)]
pub struct MemoryField {
    #[getset(get = "pub")]
    content: String,
    error: Option<String>,
}

impl MemoryField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            error: None,
        }
    }

    /// The error currently displayed on the field, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces `removed` chars at char position `start` with `inserted`.
    ///
    /// Positions past the end are clamped. Watchers see
    /// `before_text_changed` with the old content, then `on_text_changed`
    /// and `after_text_changed` with the new one.
    pub fn splice(
        &mut self,
        start: usize,
        removed: usize,
        inserted: &str,
        watchers: &[&dyn TextWatcher<Self>],
    ) {
        let len = self.content.chars().count();
        let start = start.min(len);
        let removed = removed.min(len - start);
        let inserted_len = inserted.chars().count();

        let old_text = self.content.clone();
        let change = TextChange {
            text: &old_text,
            start,
            removed,
            inserted: inserted_len,
        };
        for watcher in watchers {
            watcher.before_text_changed(self, &change);
        }

        let begin = byte_offset(&self.content, start);
        let end = byte_offset(&self.content, start + removed);
        self.content.replace_range(begin..end, inserted);
        tracing::trace!(
            start,
            removed,
            inserted = inserted_len,
            "field content edited"
        );

        let new_text = self.content.clone();
        let change = TextChange {
            text: &new_text,
            ..change
        };
        for watcher in watchers {
            watcher.on_text_changed(self, &change);
        }
        for watcher in watchers {
            watcher.after_text_changed(self);
        }
    }

    /// Replaces the whole content, notifying watchers as one edit.
    pub fn set_text(&mut self, text: &str, watchers: &[&dyn TextWatcher<Self>]) {
        let len = self.content.chars().count();
        self.splice(0, len, text, watchers);
    }
}

impl TextField for MemoryField {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.content)
    }

    fn set_error(&mut self, error: Option<&str>) {
        self.error = error.map(str::to_string);
    }
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}
