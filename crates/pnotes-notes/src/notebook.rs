use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::model::{Draft, NewNote, Note, NoteId, NoteStore, SaveError};
use crate::views::{self, ALL_NOTES};

/// Which list the sidebar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarView {
    #[default]
    Folders,
    Tags,
}

impl SidebarView {
    pub fn toggled(self) -> Self {
        match self {
            SidebarView::Folders => SidebarView::Tags,
            SidebarView::Tags => SidebarView::Folders,
        }
    }
}

/// The application state behind the notes tool: the store, the filters,
/// the selection and the draft. Every user action lands here as one
/// synchronous method call; views are recomputed on demand.
///
/// The selection is either empty or names a note in the store, and a draft
/// exists exactly while edit mode is on.
#[derive(Debug, Clone)]
pub struct Notebook {
    store: NoteStore,
    selected: Option<NoteId>,
    active_folder: String,
    search: String,
    sidebar_view: SidebarView,
    draft: Option<Draft>,
    default_folder: String,
}

impl Notebook {
    pub fn new(default_folder: impl Into<String>) -> Self {
        Self {
            store: NoteStore::new(),
            selected: None,
            active_folder: ALL_NOTES.to_string(),
            search: String::new(),
            sidebar_view: SidebarView::default(),
            draft: None,
            default_folder: default_folder.into(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    pub fn selected(&self) -> Option<NoteId> {
        self.selected
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.store.get(id))
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn active_folder(&self) -> &str {
        &self.active_folder
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sidebar_view(&self) -> SidebarView {
        self.sidebar_view
    }

    // ── Derived views ────────────────────────────────────────────────

    pub fn visible_notes(&self) -> Vec<&Note> {
        views::visible_notes(self.store.notes(), &self.active_folder, &self.search)
    }

    pub fn visible_ids(&self) -> Vec<NoteId> {
        self.visible_notes().iter().map(|n| n.id).collect()
    }

    pub fn folders(&self) -> Vec<String> {
        views::folder_set(self.store.notes())
    }

    pub fn tags(&self) -> Vec<String> {
        views::tag_set(self.store.notes())
    }

    pub fn folder_count(&self, folder: &str) -> usize {
        views::folder_count(self.store.notes(), folder)
    }

    // ── Store operations ─────────────────────────────────────────────

    /// Insert a fully populated note without touching selection or drafts.
    pub fn insert(&mut self, note: NewNote, now: DateTime<Utc>) -> NoteId {
        self.store.append(note, now)
    }

    /// Create an empty note, select it and open it for editing.
    pub fn create(&mut self, now: DateTime<Utc>) -> NoteId {
        let id = self.store.create(&self.default_folder, now);
        self.selected = Some(id);
        self.draft = self.store.get(id).map(Draft::from);
        info!(note_id = %id, folder = %self.default_folder, "Created note");
        id
    }

    /// Select a note (or clear the selection). Discards any draft.
    pub fn select(&mut self, id: Option<NoteId>) {
        let id = id.filter(|id| self.store.contains(*id));
        if id != self.selected || self.draft.is_some() {
            debug!(note_id = ?id, "Selected note");
        }
        self.selected = id;
        self.draft = None;
    }

    /// Copy the selected note into a draft. Returns false with no selection.
    pub fn edit(&mut self) -> bool {
        match self.selected_note() {
            Some(note) => {
                self.draft = Some(Draft::from(note));
                true
            }
            None => false,
        }
    }

    /// Mutate the draft. No-op outside edit mode.
    pub fn update_draft(&mut self, f: impl FnOnce(&mut Draft)) {
        if let Some(draft) = self.draft.as_mut() {
            f(draft);
        }
    }

    /// Throw the draft away. The store is left as is, including a note
    /// that was created empty and never saved.
    pub fn cancel(&mut self) {
        if let Some(draft) = self.draft.take() {
            debug!(note_id = %draft.id, "Discarded draft");
        }
    }

    /// Write the draft back to the store and leave edit mode.
    /// On error nothing changes and edit mode stays on.
    pub fn save(&mut self, now: DateTime<Utc>) -> Result<NoteId, SaveError> {
        let draft = self.draft.as_ref().ok_or(SaveError::NotEditing)?;
        if let Err(err) = self.store.update(draft, now) {
            warn!(note_id = %draft.id, error = %err, "Save rejected");
            return Err(err);
        }
        let id = draft.id;
        self.draft = None;
        info!(note_id = %id, "Saved note");
        Ok(id)
    }

    /// Remove a note. If it was selected, the first note still visible takes
    /// over the selection, else the first note left in the store, else none.
    /// Edit mode ends either way.
    pub fn delete(&mut self, id: NoteId) {
        self.draft = None;
        if self.store.remove(id).is_none() {
            return;
        }
        info!(note_id = %id, remaining = self.store.len(), "Deleted note");

        if self.selected == Some(id) {
            self.selected = self
                .visible_ids()
                .first()
                .copied()
                .or_else(|| self.store.notes().first().map(|n| n.id));
        }
    }

    // ── Filters ──────────────────────────────────────────────────────

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        debug!(search = %self.search, "Search changed");
    }

    pub fn set_active_folder(&mut self, folder: impl Into<String>) {
        self.active_folder = folder.into();
        debug!(folder = %self.active_folder, "Folder filter changed");
    }

    /// Filter by a tag from the sidebar: the tag becomes the search text and
    /// the folder filter is reset.
    pub fn start_tag_filter(&mut self, tag: &str) {
        self.search = tag.to_string();
        self.active_folder = ALL_NOTES.to_string();
        debug!(tag, "Tag filter applied");
    }

    pub fn toggle_sidebar_view(&mut self) {
        self.sidebar_view = self.sidebar_view.toggled();
    }
}
