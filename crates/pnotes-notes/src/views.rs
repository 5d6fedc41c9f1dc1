//! Pure views derived from the note store and the current filter state.

use crate::model::Note;

/// Folder filter value meaning "no folder restriction".
pub const ALL_NOTES: &str = "All Notes";

/// `ALL_NOTES` followed by each distinct non-empty folder, first-seen order.
pub fn folder_set(notes: &[Note]) -> Vec<String> {
    let mut folders = vec![ALL_NOTES.to_string()];
    for note in notes {
        if !note.folder.is_empty() && !folders[1..].contains(&note.folder) {
            folders.push(note.folder.clone());
        }
    }
    folders
}

/// Distinct non-blank tags across all notes, first-seen order.
pub fn tag_set(notes: &[Note]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in notes.iter().flat_map(|n| n.tags.iter()) {
        if !tag.trim().is_empty() && !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Number of notes filed under `folder`.
pub fn folder_count(notes: &[Note], folder: &str) -> usize {
    notes.iter().filter(|n| n.folder == folder).count()
}

/// Whether a note passes the folder and search filters.
pub fn matches(note: &Note, active_folder: &str, search: &str) -> bool {
    if active_folder != ALL_NOTES && note.folder != active_folder {
        return false;
    }
    if search.is_empty() {
        return true;
    }
    let s = search.to_lowercase();
    note.title.to_lowercase().contains(&s)
        || note.content.to_lowercase().contains(&s)
        || note.tags.iter().any(|t| t.to_lowercase().contains(&s))
}

/// Notes passing both filters, most recently updated first.
/// The sort is stable, so equal timestamps keep store order.
pub fn visible_notes<'a>(notes: &'a [Note], active_folder: &str, search: &str) -> Vec<&'a Note> {
    let mut visible: Vec<&Note> = notes
        .iter()
        .filter(|n| matches(n, active_folder, search))
        .collect();
    visible.sort_by(|a, b| b.updated.cmp(&a.updated));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewNote, NoteStore};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn note(store: &mut NoteStore, title: &str, folder: &str, tags: &[&str], ms: i64) {
        store.append(
            NewNote {
                title: title.to_string(),
                content: format!("{title} body"),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                folder: folder.to_string(),
            },
            at(ms),
        );
    }

    #[test]
    fn test_folder_set_starts_with_sentinel() {
        let mut store = NoteStore::new();
        note(&mut store, "a", "Work", &[], 1);
        note(&mut store, "b", "", &[], 2);
        note(&mut store, "c", "Personal", &[], 3);
        note(&mut store, "d", "Work", &[], 4);

        assert_eq!(folder_set(store.notes()), vec![ALL_NOTES, "Work", "Personal"]);
        assert_eq!(folder_set(&[]), vec![ALL_NOTES]);
    }

    #[test]
    fn test_tag_set_dedups() {
        let mut store = NoteStore::new();
        note(&mut store, "a", "Work", &["x", "y"], 1);
        note(&mut store, "b", "Work", &["y", "z", "x"], 2);
        assert_eq!(tag_set(store.notes()), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_folder_count() {
        let mut store = NoteStore::new();
        note(&mut store, "a", "Work", &[], 1);
        note(&mut store, "b", "Work", &[], 2);
        note(&mut store, "c", "Home", &[], 3);
        assert_eq!(folder_count(store.notes(), "Work"), 2);
        assert_eq!(folder_count(store.notes(), "Nope"), 0);
    }

    #[test]
    fn test_search_by_tag_scenario() {
        let mut store = NoteStore::new();
        note(&mut store, "A", "Work", &["x"], 1);

        let hits = visible_notes(store.notes(), ALL_NOTES, "x");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "A");
        assert!(visible_notes(store.notes(), ALL_NOTES, "y").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let mut store = NoteStore::new();
        note(&mut store, "Meeting", "Work", &[], 1);
        note(&mut store, "Other", "Work", &["Rust"], 2);
        note(&mut store, "Third", "Work", &[], 3);

        assert_eq!(visible_notes(store.notes(), ALL_NOTES, "meet").len(), 1);
        assert_eq!(visible_notes(store.notes(), ALL_NOTES, "RUST").len(), 1);
        // Content: "Third body"
        assert_eq!(visible_notes(store.notes(), ALL_NOTES, "IRD BO").len(), 1);
    }

    #[test]
    fn test_folder_and_search_combine() {
        let mut store = NoteStore::new();
        note(&mut store, "plan", "Work", &[], 1);
        note(&mut store, "plan", "Home", &[], 2);
        note(&mut store, "other", "Work", &[], 3);

        let visible = visible_notes(store.notes(), "Work", "plan");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].folder, "Work");
        assert_eq!(visible_notes(store.notes(), "Work", "").len(), 2);
    }

    #[test]
    fn test_sorted_by_updated_desc_and_stable() {
        let mut store = NoteStore::new();
        note(&mut store, "old", "Work", &[], 1_000);
        note(&mut store, "new", "Work", &[], 3_000);
        note(&mut store, "tie-a", "Work", &[], 2_000);
        note(&mut store, "tie-b", "Work", &[], 2_000);

        let titles: Vec<&str> = visible_notes(store.notes(), ALL_NOTES, "")
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["new", "tie-a", "tie-b", "old"]);
    }
}
