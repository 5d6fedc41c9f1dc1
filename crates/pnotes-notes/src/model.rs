use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

// ── Ids ──────────────────────────────────────────────────────────────

/// Note identifier: creation time in epoch milliseconds, made strictly
/// increasing by the store so two notes never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Data models ──────────────────────────────────────────────────────

/// A single note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub folder: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Detached working copy of a note's editable fields.
/// Changes here never reach the store until [`NoteStore::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub folder: String,
}

impl From<&Note> for Draft {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
            folder: note.folder.clone(),
        }
    }
}

/// Fields for inserting a fully populated note (demo seed).
#[derive(Debug, Clone, Default)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub folder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Note title is required.")]
    EmptyTitle,
    #[error("No note is being edited.")]
    NotEditing,
    #[error("Note {0} no longer exists.")]
    NoteNotFound(NoteId),
}

/// Parse the comma-separated tags field: trimmed, empties dropped, order kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim tags and drop blank ones.
fn clean_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

// ── Store ────────────────────────────────────────────────────────────

/// The ordered, in-memory collection of notes. Newest creations first.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    last_id: i64,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.get(id).is_some()
    }

    /// Allocate a time-based id, bumped past the last one if the clock
    /// hasn't moved (or went backwards).
    fn next_id(&mut self, now: DateTime<Utc>) -> NoteId {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        NoteId(id)
    }

    /// Prepend an empty note in `folder`. Returns its id.
    pub fn create(&mut self, folder: &str, now: DateTime<Utc>) -> NoteId {
        let id = self.next_id(now);
        self.notes.insert(
            0,
            Note {
                id,
                title: String::new(),
                content: String::new(),
                tags: Vec::new(),
                folder: folder.to_string(),
                created: now,
                updated: now,
            },
        );
        id
    }

    /// Append a populated note. Returns its id.
    pub fn append(&mut self, new: NewNote, now: DateTime<Utc>) -> NoteId {
        let id = self.next_id(now);
        self.notes.push(Note {
            id,
            title: new.title,
            content: new.content,
            tags: clean_tags(&new.tags),
            folder: new.folder,
            created: now,
            updated: now,
        });
        id
    }

    /// Overwrite the matching note's editable fields with the draft's and
    /// bump `updated`. A blank title is rejected and nothing changes.
    pub fn update(&mut self, draft: &Draft, now: DateTime<Utc>) -> Result<(), SaveError> {
        if draft.title.trim().is_empty() {
            return Err(SaveError::EmptyTitle);
        }
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == draft.id)
            .ok_or(SaveError::NoteNotFound(draft.id))?;

        note.title = draft.title.clone();
        note.content = draft.content.clone();
        note.tags = clean_tags(&draft.tags);
        note.folder = draft.folder.clone();
        note.updated = now;
        Ok(())
    }

    /// Remove a note. Returns it if it existed.
    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let pos = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(pos))
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("a, ,b ,"), vec!["a", "b"]);
        assert_eq!(parse_tags("  rust ,  notes"), vec!["rust", "notes"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
        // Duplicates are kept; the derived tag set de-duplicates
        assert_eq!(parse_tags("x,x"), vec!["x", "x"]);
    }

    #[test]
    fn test_create_prepends_empty_note() {
        let mut store = NoteStore::new();
        let first = store.create("Personal", at(1_000));
        let second = store.create("Work", at(2_000));

        assert_eq!(store.len(), 2);
        assert_eq!(store.notes()[0].id, second);
        assert_eq!(store.notes()[1].id, first);

        let note = store.get(second).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert_eq!(note.folder, "Work");
        assert_eq!(note.created, note.updated);
    }

    #[test]
    fn test_ids_unique_when_clock_stalls() {
        let mut store = NoteStore::new();
        let mut ids = HashSet::new();
        for _ in 0..50 {
            assert!(ids.insert(store.create("Personal", at(5_000))));
        }
        // Clock going backwards still yields fresh ids
        assert!(ids.insert(store.create("Personal", at(10))));
        assert_eq!(ids.len(), 51);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = NoteStore::new();
        let a = store.create("Personal", at(7_000));
        store.remove(a).unwrap();
        let b = store.create("Personal", at(7_000));
        assert_ne!(a, b);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let mut store = NoteStore::new();
        let id = store.create("Personal", at(1_000));
        let before = store.notes().to_vec();

        let mut draft = Draft::from(store.get(id).unwrap());
        draft.title = "   ".to_string();
        draft.content = "changed".to_string();

        assert_eq!(store.update(&draft, at(2_000)), Err(SaveError::EmptyTitle));
        assert_eq!(store.notes(), before.as_slice());
    }

    #[test]
    fn test_update_touches_only_target() {
        let mut store = NoteStore::new();
        let a = store.create("Personal", at(1_000));
        let b = store.create("Personal", at(1_500));
        let untouched = store.get(a).unwrap().clone();

        let mut draft = Draft::from(store.get(b).unwrap());
        draft.title = "Groceries".to_string();
        draft.content = "milk".to_string();
        draft.tags = vec!["home".to_string(), " ".to_string()];
        draft.folder = "Errands".to_string();
        store.update(&draft, at(3_000)).unwrap();

        let note = store.get(b).unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk");
        assert_eq!(note.tags, vec!["home"]);
        assert_eq!(note.folder, "Errands");
        assert_eq!(note.updated, at(3_000));
        assert_eq!(note.created, at(1_500));
        assert_eq!(store.get(a).unwrap(), &untouched);
    }

    #[test]
    fn test_update_missing_note() {
        let mut store = NoteStore::new();
        let id = store.create("Personal", at(1_000));
        let mut draft = Draft::from(store.get(id).unwrap());
        draft.title = "Gone".to_string();
        store.remove(id);
        assert_eq!(store.update(&draft, at(2_000)), Err(SaveError::NoteNotFound(id)));
    }

    #[test]
    fn test_append_keeps_order() {
        let mut store = NoteStore::new();
        let a = store.append(
            NewNote {
                title: "A".into(),
                folder: "Work".into(),
                tags: vec!["x".into(), "".into()],
                ..Default::default()
            },
            at(1_000),
        );
        let b = store.append(
            NewNote {
                title: "B".into(),
                ..Default::default()
            },
            at(1_000),
        );
        assert_eq!(store.notes()[0].id, a);
        assert_eq!(store.notes()[1].id, b);
        assert_eq!(store.get(a).unwrap().tags, vec!["x"]);
    }

    #[test]
    fn test_remove() {
        let mut store = NoteStore::new();
        let id = store.create("Personal", at(1_000));
        assert!(store.remove(NoteId(42)).is_none());
        assert_eq!(store.remove(id).map(|n| n.id), Some(id));
        assert!(store.is_empty());
    }
}
