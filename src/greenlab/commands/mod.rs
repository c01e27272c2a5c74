//! # Command Layer
//!
//! Pure business logic over the in-memory collections held in [`AppData`].
//! Commands never touch storage: they mutate, and report what they changed through
//! [`CmdResult::changes`] so the facade knows which records to persist and which
//! subscribers to notify.

use crate::model::{JournalEntry, Project};
use crate::store::StoreKey;
use std::collections::BTreeSet;
use uuid::Uuid;

pub mod favorites;
pub mod journal;
pub mod projects;
pub mod views;

/// The mutable, user-owned state. Exactly one copy exists, owned by the facade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppData {
    pub projects: Vec<Project>,
    /// Kept sorted by date, newest first.
    pub journal: Vec<JournalEntry>,
    pub favorites: BTreeSet<Uuid>,
}

/// Which collection a command touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Projects,
    Journal,
    Favorites,
}

impl Change {
    pub fn key(&self) -> StoreKey {
        match self {
            Change::Projects => StoreKey::Projects,
            Change::Journal => StoreKey::JournalEntries,
            Change::Favorites => StoreKey::Favorites,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Records as they stand after the command (or as removed, for deletes).
    pub affected_projects: Vec<Project>,
    pub affected_entries: Vec<JournalEntry>,
    pub changes: Vec<Change>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_change(mut self, change: Change) -> Self {
        if !self.changes.contains(&change) {
            self.changes.push(change);
        }
        self
    }

    pub fn with_affected_project(mut self, project: Project) -> Self {
        self.affected_projects.push(project);
        self
    }

    pub fn with_affected_entry(mut self, entry: JournalEntry) -> Self {
        self.affected_entries.push(entry);
        self
    }

    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }

    /// A no-op result for a lookup that found nothing.
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        Self::default().with_message(CmdMessage::info(format!("No {} with id {}", what, id)))
    }
}
