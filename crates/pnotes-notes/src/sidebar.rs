use crate::notebook::{Notebook, SidebarView};
use crate::views::ALL_NOTES;

/// One line of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEntry {
    /// A folder filter. `count` is `None` for the "All Notes" sentinel.
    Folder {
        name: String,
        count: Option<usize>,
        active: bool,
    },
    Tag(String),
}

/// Build the lines for the notebook's current sidebar view.
pub fn entries(notebook: &Notebook) -> Vec<SidebarEntry> {
    match notebook.sidebar_view() {
        SidebarView::Folders => notebook
            .folders()
            .into_iter()
            .map(|name| {
                let count = (name != ALL_NOTES).then(|| notebook.folder_count(&name));
                let active = name == notebook.active_folder();
                SidebarEntry::Folder {
                    name,
                    count,
                    active,
                }
            })
            .collect(),
        SidebarView::Tags => notebook.tags().into_iter().map(SidebarEntry::Tag).collect(),
    }
}

/// Cursor over the sidebar lines. The lines themselves are derived from the
/// notebook on every use, so only the position is stored.
#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    pub cursor: usize,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_down(&mut self, n: usize, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + n).min(len - 1);
        }
    }

    pub fn move_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
    }

    pub fn goto_top(&mut self) {
        self.cursor = 0;
    }

    pub fn goto_bottom(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    /// Keep the cursor inside a list of `len` lines.
    pub fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    /// Apply the entry under the cursor: a folder becomes the folder filter,
    /// a tag becomes the search text.
    pub fn activate(&self, notebook: &mut Notebook) {
        match entries(notebook).into_iter().nth(self.cursor) {
            Some(SidebarEntry::Folder { name, .. }) => notebook.set_active_folder(name),
            Some(SidebarEntry::Tag(tag)) => notebook.start_tag_filter(&tag),
            None => {}
        }
    }

    /// Point the cursor at the active folder (after switching to folders).
    pub fn sync_to_active(&mut self, notebook: &Notebook) {
        self.cursor = entries(notebook)
            .iter()
            .position(|e| matches!(e, SidebarEntry::Folder { active: true, .. }))
            .unwrap_or(0);
    }
}
