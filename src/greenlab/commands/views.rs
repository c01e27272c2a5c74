//! Derived, read-only views. Computed on demand from the current state, never cached.

use crate::catalog;
use crate::commands::AppData;
use crate::model::{CareActivity, JournalEntry, Plant, Project, ProjectStatus};
use chrono::NaiveDate;

/// Projects that are planning or in progress, in collection order.
pub fn active_projects(data: &AppData) -> Vec<&Project> {
    data.projects.iter().filter(|p| p.is_active()).collect()
}

/// Up to `limit` projects, most recently created first.
pub fn recent_projects(data: &AppData, limit: usize) -> Vec<&Project> {
    let mut projects: Vec<&Project> = data.projects.iter().collect();
    projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    projects.truncate(limit);
    projects
}

pub fn projects_by_status(data: &AppData, status: ProjectStatus) -> Vec<&Project> {
    data.projects.iter().filter(|p| p.status == status).collect()
}

/// Every entry, newest first. Entries sharing a timestamp keep collection order.
pub fn sorted_journal_entries(data: &AppData) -> Vec<&JournalEntry> {
    let mut entries: Vec<&JournalEntry> = data.journal.iter().collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

pub fn journal_entries_for_activity(data: &AppData, activity: CareActivity) -> Vec<&JournalEntry> {
    sorted_journal_entries(data)
        .into_iter()
        .filter(|e| e.activity_type == activity)
        .collect()
}

/// Entries whose project name matches `name`, ignoring case and surrounding space.
pub fn journal_entries_for_project<'a>(data: &'a AppData, name: &str) -> Vec<&'a JournalEntry> {
    let wanted = name.trim().to_lowercase();
    sorted_journal_entries(data)
        .into_iter()
        .filter(|e| {
            e.project_name
                .as_deref()
                .is_some_and(|p| p.trim().to_lowercase() == wanted)
        })
        .collect()
}

/// Entries grouped by calendar day (UTC). Days newest first, entries newest first.
pub fn journal_by_day(data: &AppData) -> Vec<(NaiveDate, Vec<&JournalEntry>)> {
    let mut days: Vec<(NaiveDate, Vec<&JournalEntry>)> = Vec::new();
    for entry in sorted_journal_entries(data) {
        let day = entry.date.date_naive();
        match days.last_mut() {
            Some((current, entries)) if *current == day => entries.push(entry),
            _ => days.push((day, vec![entry])),
        }
    }
    days
}

/// Catalog plants that are favorites, in catalog order.
pub fn favorite_plants(data: &AppData) -> Vec<&'static Plant> {
    catalog::all()
        .iter()
        .filter(|p| data.favorites.contains(&p.id))
        .collect()
}
