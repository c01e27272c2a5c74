//! Journal entries are kept newest first. Every insert and edit re-sorts the whole
//! collection with a stable sort, so entries sharing a timestamp keep the order in
//! which they were added.

use crate::commands::{AppData, Change, CmdMessage, CmdResult};
use crate::model::JournalEntry;
use uuid::Uuid;

/// Stable sort by date, newest first.
pub fn sort_newest_first(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Inserts `entry` in date order. An id that is already taken is a no-op.
pub fn add(data: &mut AppData, entry: JournalEntry) -> CmdResult {
    if data.journal.iter().any(|e| e.id == entry.id) {
        return CmdResult::default().with_message(CmdMessage::info(format!(
            "A journal entry with id {} already exists",
            entry.id
        )));
    }
    let message = format!(
        "Logged {} for {}",
        entry.activity_type.label().to_lowercase(),
        entry.plant_name
    );
    data.journal.push(entry.clone());
    sort_newest_first(&mut data.journal);
    CmdResult::default()
        .with_change(Change::Journal)
        .with_message(CmdMessage::success(message))
        .with_affected_entry(entry)
}

/// Replaces the entry with the same id. Unknown ids are a no-op.
pub fn update(data: &mut AppData, entry: JournalEntry) -> CmdResult {
    let Some(slot) = data.journal.iter_mut().find(|e| e.id == entry.id) else {
        return CmdResult::not_found("journal entry", entry.id);
    };
    *slot = entry.clone();
    sort_newest_first(&mut data.journal);
    CmdResult::default()
        .with_change(Change::Journal)
        .with_message(CmdMessage::success("Journal entry updated"))
        .with_affected_entry(entry)
}

pub fn delete(data: &mut AppData, id: &Uuid) -> CmdResult {
    match data.journal.iter().position(|e| &e.id == id) {
        Some(index) => delete_at(data, index),
        None => CmdResult::not_found("journal entry", id),
    }
}

/// Removes the entry at `index` (newest first, zero based).
pub fn delete_at(data: &mut AppData, index: usize) -> CmdResult {
    if index >= data.journal.len() {
        return CmdResult::default().with_message(CmdMessage::info(format!(
            "No journal entry at position {}",
            index + 1
        )));
    }
    let removed = data.journal.remove(index);
    CmdResult::default()
        .with_change(Change::Journal)
        .with_message(CmdMessage::success(format!(
            "Deleted {} entry for {}",
            removed.activity_type.label().to_lowercase(),
            removed.plant_name
        )))
        .with_affected_entry(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CareActivity;
    use chrono::{Duration, TimeZone, Utc};

    fn at(day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, 8, 0, 0).unwrap()
    }

    fn entry(day: u32, plant: &str) -> JournalEntry {
        JournalEntry::new(CareActivity::Watering, plant).with_date(at(day))
    }

    #[test]
    fn add_keeps_newest_first() {
        let mut data = AppData::default();
        add(&mut data, entry(3, "a"));
        add(&mut data, entry(10, "b"));
        add(&mut data, entry(1, "c"));
        let names: Vec<_> = data.journal.iter().map(|e| e.plant_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut data = AppData::default();
        add(&mut data, entry(5, "first"));
        add(&mut data, entry(5, "second"));
        add(&mut data, entry(5, "third"));
        let names: Vec<_> = data.journal.iter().map(|e| e.plant_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn add_refuses_a_taken_id() {
        let mut data = AppData::default();
        add(&mut data, entry(3, "a"));
        let mut twin = entry(9, "twin");
        twin.id = data.journal[0].id;

        assert!(!add(&mut data, twin).is_changed());
        assert_eq!(data.journal.len(), 1);
        assert_eq!(data.journal[0].plant_name, "a");
    }

    #[test]
    fn update_resorts_when_date_moves() {
        let mut data = AppData::default();
        add(&mut data, entry(3, "a"));
        add(&mut data, entry(4, "b"));
        let mut moved = data.journal[1].clone();
        moved.date = at(4) + Duration::hours(1);

        assert!(update(&mut data, moved).is_changed());
        assert_eq!(data.journal[0].plant_name, "a");
    }

    #[test]
    fn update_unknown_is_noop() {
        let mut data = AppData::default();
        add(&mut data, entry(3, "a"));
        assert!(!update(&mut data, entry(4, "ghost")).is_changed());
        assert_eq!(data.journal.len(), 1);
    }

    #[test]
    fn delete_by_id_and_position() {
        let mut data = AppData::default();
        add(&mut data, entry(1, "a"));
        add(&mut data, entry(2, "b"));
        add(&mut data, entry(3, "c"));

        let b = data.journal[1].id;
        assert!(delete(&mut data, &b).is_changed());
        assert!(!delete(&mut data, &b).is_changed());

        assert!(delete_at(&mut data, 0).is_changed());
        assert_eq!(data.journal.len(), 1);
        assert_eq!(data.journal[0].plant_name, "a");
        assert!(!delete_at(&mut data, 1).is_changed());
    }
}
