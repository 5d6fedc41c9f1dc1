use crossterm::event::KeyEvent;
use pnotes_core::text_input::{InputOutcome, TextInput};

use crate::model::{parse_tags, Draft};

pub const TITLE_MAX: usize = 120;
pub const FOLDER_MAX: usize = 60;
pub const TAGS_MAX: usize = 80;

/// A field of the edit form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Content,
    Folder,
    Tags,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Content,
        FormField::Folder,
        FormField::Tags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Content => "Content",
            FormField::Folder => "Folder",
            FormField::Tags => "Tags (comma-separated)",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Title => "Note title",
            FormField::Content => "Write your note here...",
            FormField::Folder => "Personal, Work, Ideas, etc.",
            FormField::Tags => "tag1, tag2, tag3",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text buffers behind the edit pane. The form keeps the raw tags text so a
/// trailing comma can be typed; the draft gets the parsed list on every change.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub focus: FormField,
    title: TextInput,
    content: TextInput,
    folder: TextInput,
    tags: TextInput,
}

impl EditForm {
    /// Build the form from a draft. Focus starts on the title.
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            focus: FormField::Title,
            title: TextInput::with_value(draft.title.as_str()).max_chars(TITLE_MAX),
            content: TextInput::with_value(draft.content.as_str()).multiline(),
            folder: TextInput::with_value(draft.folder.as_str()).max_chars(FOLDER_MAX),
            tags: TextInput::with_value(draft.tags.join(", ")).max_chars(TAGS_MAX),
        }
    }

    pub fn input(&self, field: FormField) -> &TextInput {
        match field {
            FormField::Title => &self.title,
            FormField::Content => &self.content,
            FormField::Folder => &self.folder,
            FormField::Tags => &self.tags,
        }
    }

    fn input_mut(&mut self, field: FormField) -> &mut TextInput {
        match field {
            FormField::Title => &mut self.title,
            FormField::Content => &mut self.content,
            FormField::Folder => &mut self.folder,
            FormField::Tags => &mut self.tags,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Route an editing key to the focused field.
    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        let field = self.focus;
        self.input_mut(field).handle_key(key)
    }

    /// Insert pasted text into the focused field.
    pub fn paste(&mut self, text: &str) -> bool {
        let field = self.focus;
        self.input_mut(field).insert_str(text)
    }

    /// Copy the buffers into the draft, parsing the tags field.
    pub fn apply_to(&self, draft: &mut Draft) {
        draft.title = self.title.value().to_string();
        draft.content = self.content.value().to_string();
        draft.folder = self.folder.value().to_string();
        draft.tags = parse_tags(self.tags.value());
    }
}
