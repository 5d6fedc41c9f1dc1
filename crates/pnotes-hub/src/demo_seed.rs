use chrono::{DateTime, Utc};
use pnotes_notes::model::NewNote;
use pnotes_notes::notebook::Notebook;

/// Populate an empty notebook with the starter notes. A notebook that
/// already holds notes is left alone.
pub fn seed_demo_notes(notebook: &mut Notebook, now: DateTime<Utc>) {
    if !notebook.notes().is_empty() {
        return;
    }

    notebook.insert(
        NewNote {
            title: "Welcome to Notes!".into(),
            content: "Start jotting your thoughts or ideas.".into(),
            tags: vec!["General".into()],
            folder: "Personal".into(),
        },
        now,
    );
    notebook.insert(
        NewNote {
            title: "Work Ideas".into(),
            content: "Project brainstorm and to-dos go here.".into(),
            tags: vec!["Work".into()],
            folder: "Work".into(),
        },
        now,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    #[test]
    fn test_seed_inserts_two_notes() {
        let mut nb = Notebook::new("Personal");
        seed_demo_notes(&mut nb, now());

        let titles: Vec<&str> = nb.notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Welcome to Notes!", "Work Ideas"]);
        assert_eq!(nb.folders(), vec!["All Notes", "Personal", "Work"]);
        assert_eq!(nb.tags(), vec!["General", "Work"]);
        assert_ne!(nb.notes()[0].id, nb.notes()[1].id);
    }

    #[test]
    fn test_seed_skips_non_empty_notebook() {
        let mut nb = Notebook::new("Personal");
        nb.create(now());
        seed_demo_notes(&mut nb, now());
        assert_eq!(nb.notes().len(), 1);
    }

    #[test]
    fn test_equal_timestamps_keep_seed_order() {
        let mut nb = Notebook::new("Personal");
        seed_demo_notes(&mut nb, now());
        let visible: Vec<&str> = nb.visible_notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(visible, vec!["Welcome to Notes!", "Work Ideas"]);
    }
}
