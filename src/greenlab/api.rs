//! # API Facade
//!
//! [`GreenlabApi`] is the single owner of user state and the only path to storage.
//! Every UI talks to it; nothing else mutates projects, journal entries or favorites.
//!
//! ## Mutation Flow
//!
//! Each mutating method runs, synchronously and in order:
//!
//! 1. the command in `commands/*.rs`, which mutates [`AppData`] in memory,
//! 2. a whole-collection write of each touched record through [`BlobStore`],
//! 3. a notification to every subscriber for each touched record.
//!
//! Nothing here returns an error to the caller. A reference that does not resolve is
//! a no-op with an info message. A failed write is logged at the store boundary and
//! surfaces as a warning message; the in-memory state stays authoritative until the
//! next successful save.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `GreenlabApi<FsBackend>`
//! - Testing: `GreenlabApi<MemBackend>`

use crate::catalog::{self, PlantFilter};
use crate::commands::{favorites, journal, projects, views, AppData};
use crate::config::GreenlabConfig;
use crate::model::{CareActivity, JournalEntry, Plant, Project, ProjectStatus};
use crate::store::{BlobStore, StorageBackend, StoreKey};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing::{debug, info};
use uuid::Uuid;

pub use crate::commands::{Change, CmdMessage, CmdResult, MessageLevel};

/// Source of "now" for timestamps the facade stamps itself.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Change)>;

pub struct GreenlabApi<B: StorageBackend> {
    store: BlobStore<B>,
    data: AppData,
    config: GreenlabConfig,
    clock: Box<dyn Clock>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<B: StorageBackend> GreenlabApi<B> {
    /// Builds the facade and loads all persisted records. Missing or unreadable
    /// records start empty.
    pub fn new(backend: B, config: GreenlabConfig) -> Self {
        let store = BlobStore::new(backend);

        let projects: Vec<Project> = store.load(StoreKey::Projects).unwrap_or_default();
        let mut journal: Vec<JournalEntry> =
            store.load(StoreKey::JournalEntries).unwrap_or_default();
        journal::sort_newest_first(&mut journal);
        let favorites: Vec<Uuid> = store.load(StoreKey::Favorites).unwrap_or_default();

        info!(
            projects = projects.len(),
            journal_entries = journal.len(),
            favorites = favorites.len(),
            "loaded greenlab data"
        );

        Self {
            store,
            data: AppData {
                projects,
                journal,
                favorites: favorites.into_iter().collect(),
            },
            config,
            clock: Box::new(SystemClock),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &GreenlabConfig {
        &self.config
    }

    pub fn store(&self) -> &BlobStore<B> {
        &self.store
    }

    // --- Subscriptions ---

    /// Registers `listener` to be called after every change to a collection.
    pub fn subscribe(&mut self, listener: impl FnMut(&Change) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn persist(&self, change: Change) -> bool {
        match change {
            Change::Projects => self.store.save(change.key(), &self.data.projects),
            Change::Journal => self.store.save(change.key(), &self.data.journal),
            Change::Favorites => {
                let ids: Vec<&Uuid> = self.data.favorites.iter().collect();
                self.store.save(change.key(), &ids)
            }
        }
    }

    /// Persists and announces whatever `result` changed.
    fn commit(&mut self, mut result: CmdResult) -> CmdResult {
        for change in result.changes.clone() {
            if !self.persist(change) {
                result.add_message(CmdMessage::warning(format!(
                    "Could not save {}; changes are kept for this session",
                    change.key()
                )));
            }
            debug!(?change, listeners = self.listeners.len(), "notifying");
            for (_, listener) in self.listeners.iter_mut() {
                listener(&change);
            }
        }
        result
    }

    // --- Projects ---

    pub fn projects(&self) -> &[Project] {
        &self.data.projects
    }

    pub fn project(&self, id: &Uuid) -> Option<&Project> {
        self.data.projects.iter().find(|p| &p.id == id)
    }

    /// A blank project stamped with the facade's clock.
    pub fn new_project(&self, name: impl Into<String>) -> Project {
        Project::new_at(name, self.clock.now())
    }

    pub fn add_project(&mut self, project: Project) -> CmdResult {
        let result = projects::add(&mut self.data, project);
        self.commit(result)
    }

    pub fn update_project(&mut self, project: Project) -> CmdResult {
        let result = projects::update(&mut self.data, project);
        self.commit(result)
    }

    pub fn delete_project(&mut self, id: &Uuid) -> CmdResult {
        let result = projects::delete(&mut self.data, id);
        self.commit(result)
    }

    /// Deletes by position in [`Self::projects`] (zero based).
    pub fn delete_project_at(&mut self, index: usize) -> CmdResult {
        let result = projects::delete_at(&mut self.data, index);
        self.commit(result)
    }

    pub fn add_plant_to_project(
        &mut self,
        project_id: &Uuid,
        plant_id: &Uuid,
        quantity: u32,
    ) -> CmdResult {
        let Some(plant) = catalog::by_id(plant_id) else {
            return CmdResult::not_found("plant", plant_id);
        };
        let max = self.config.max_quantity;
        let result = projects::add_plant(&mut self.data, project_id, plant, quantity, max);
        self.commit(result)
    }

    pub fn remove_plant_from_project(&mut self, project_id: &Uuid, line_id: &Uuid) -> CmdResult {
        let result = projects::remove_plant(&mut self.data, project_id, line_id);
        self.commit(result)
    }

    pub fn set_plant_quantity(
        &mut self,
        project_id: &Uuid,
        plant_id: &Uuid,
        quantity: u32,
    ) -> CmdResult {
        let max = self.config.max_quantity;
        let result = projects::set_quantity(&mut self.data, project_id, plant_id, quantity, max);
        self.commit(result)
    }

    pub fn set_plant_planted(
        &mut self,
        project_id: &Uuid,
        plant_id: &Uuid,
        planted: bool,
    ) -> CmdResult {
        let now = self.clock.now();
        let result = projects::set_planted(&mut self.data, project_id, plant_id, planted, now);
        self.commit(result)
    }

    pub fn set_project_status(&mut self, project_id: &Uuid, status: ProjectStatus) -> CmdResult {
        let result = projects::set_status(&mut self.data, project_id, status);
        self.commit(result)
    }

    pub fn active_projects(&self) -> Vec<&Project> {
        views::active_projects(&self.data)
    }

    pub fn recent_projects(&self) -> Vec<&Project> {
        views::recent_projects(&self.data, self.config.recent_projects_limit)
    }

    pub fn projects_by_status(&self, status: ProjectStatus) -> Vec<&Project> {
        views::projects_by_status(&self.data, status)
    }

    // --- Journal ---

    /// Entries in stored order, which is newest first.
    pub fn journal_entries(&self) -> &[JournalEntry] {
        &self.data.journal
    }

    pub fn journal_entry(&self, id: &Uuid) -> Option<&JournalEntry> {
        self.data.journal.iter().find(|e| &e.id == id)
    }

    /// An entry dated by the facade's clock.
    pub fn new_journal_entry(
        &self,
        activity_type: CareActivity,
        plant_name: impl Into<String>,
    ) -> JournalEntry {
        JournalEntry::new_at(activity_type, plant_name, self.clock.now())
    }

    pub fn add_journal_entry(&mut self, entry: JournalEntry) -> CmdResult {
        let result = journal::add(&mut self.data, entry);
        self.commit(result)
    }

    pub fn update_journal_entry(&mut self, entry: JournalEntry) -> CmdResult {
        let result = journal::update(&mut self.data, entry);
        self.commit(result)
    }

    pub fn delete_journal_entry(&mut self, id: &Uuid) -> CmdResult {
        let result = journal::delete(&mut self.data, id);
        self.commit(result)
    }

    /// Deletes by position in [`Self::journal_entries`] (zero based).
    pub fn delete_journal_entry_at(&mut self, index: usize) -> CmdResult {
        let result = journal::delete_at(&mut self.data, index);
        self.commit(result)
    }

    pub fn sorted_journal_entries(&self) -> Vec<&JournalEntry> {
        views::sorted_journal_entries(&self.data)
    }

    pub fn journal_entries_for_activity(&self, activity: CareActivity) -> Vec<&JournalEntry> {
        views::journal_entries_for_activity(&self.data, activity)
    }

    pub fn journal_entries_for_project(&self, name: &str) -> Vec<&JournalEntry> {
        views::journal_entries_for_project(&self.data, name)
    }

    pub fn journal_by_day(&self) -> Vec<(NaiveDate, Vec<&JournalEntry>)> {
        views::journal_by_day(&self.data)
    }

    // --- Favorites & Catalog ---

    pub fn toggle_favorite(&mut self, plant_id: Uuid) -> CmdResult {
        let result = favorites::toggle(&mut self.data, plant_id);
        self.commit(result)
    }

    pub fn is_favorite(&self, plant_id: &Uuid) -> bool {
        favorites::is_favorite(&self.data, plant_id)
    }

    pub fn favorite_ids(&self) -> &BTreeSet<Uuid> {
        &self.data.favorites
    }

    pub fn favorite_plants(&self) -> Vec<&'static Plant> {
        views::favorite_plants(&self.data)
    }

    pub fn plants(&self) -> &'static [Plant] {
        catalog::all()
    }

    pub fn plant(&self, id: &Uuid) -> Option<&'static Plant> {
        catalog::by_id(id)
    }

    pub fn catalog_plant_by_name(&self, name: &str) -> Option<&'static Plant> {
        catalog::by_name(name)
    }

    pub fn search_catalog(&self, filter: &PlantFilter) -> Vec<&'static Plant> {
        catalog::search(filter)
    }

    // --- Maintenance ---

    /// Drops every record, in memory and in storage.
    pub fn reset(&mut self) -> CmdResult {
        self.data = AppData::default();
        let mut result = CmdResult::default();
        for key in StoreKey::ALL {
            if let Err(e) = self.store.clear(key) {
                result.add_message(CmdMessage::warning(format!("Could not clear {}: {}", key, e)));
            }
        }
        for change in [Change::Projects, Change::Journal, Change::Favorites] {
            for (_, listener) in self.listeners.iter_mut() {
                listener(&change);
            }
        }
        result.with_message(CmdMessage::success("All projects, journal entries and favorites removed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectPlant;
    use crate::store::mem_backend::MemBackend;
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn api() -> GreenlabApi<MemBackend> {
        GreenlabApi::new(MemBackend::new(), GreenlabConfig::default())
    }

    fn reopen(api: GreenlabApi<MemBackend>) -> GreenlabApi<MemBackend> {
        let GreenlabApi { store, config, .. } = api;
        let backend = MemBackend::new();
        for key in StoreKey::ALL {
            if let Some(blob) = store.backend().blob(key) {
                backend.inject_blob(key, &blob);
            }
        }
        GreenlabApi::new(backend, config)
    }

    #[test]
    fn starts_empty_without_data() {
        let api = api();
        assert!(api.projects().is_empty());
        assert!(api.journal_entries().is_empty());
        assert!(api.favorite_ids().is_empty());
        assert!(!api.plants().is_empty());
    }

    #[test]
    fn corrupt_records_start_empty() {
        let backend = MemBackend::new();
        backend.inject_blob(StoreKey::Projects, "[{\"id\": 12}]");
        backend.inject_blob(StoreKey::JournalEntries, "garbage");
        backend.inject_blob(StoreKey::Favorites, "{}");
        let api = GreenlabApi::new(backend, GreenlabConfig::default());
        assert!(api.projects().is_empty());
        assert!(api.journal_entries().is_empty());
        assert!(api.favorite_ids().is_empty());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let mut api = api();
        let project = Project::new("Main Street").with_area(250.0);
        let id = project.id;
        api.add_project(project);
        let oak = &catalog::all()[0];
        api.add_plant_to_project(&id, &oak.id, 12);
        api.add_journal_entry(JournalEntry::new(CareActivity::Planting, "London Plane"));
        api.toggle_favorite(oak.id);

        let reopened = reopen(api);
        assert_eq!(reopened.projects().len(), 1);
        assert_eq!(reopened.projects()[0].plants[0].quantity, 12);
        assert_eq!(reopened.journal_entries().len(), 1);
        assert!(reopened.is_favorite(&oak.id));
    }

    #[test]
    fn unusable_areas_survive_reopen() {
        let mut api = api();
        api.add_project(Project::new("Plaza").with_area(120.0));
        for area in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -5.0, 1e300] {
            let result = api.add_project(Project::new(format!("Edge {}", area)).with_area(area));
            assert!(result.is_changed());
        }

        let reopened = reopen(api);
        let areas: Vec<f64> = reopened.projects().iter().map(|p| p.area).collect();
        assert_eq!(areas, vec![120.0, 0.0, 0.0, 0.0, 0.0, 1e300]);
    }

    #[test]
    fn taken_ids_are_not_added_twice() {
        let mut api = api();
        let project = Project::new("Once");
        assert!(api.add_project(project.clone()).is_changed());
        assert!(!api.add_project(project).is_changed());

        let entry = JournalEntry::new(CareActivity::Watering, "Oak");
        api.add_journal_entry(entry.clone());
        api.add_journal_entry(entry);

        let reopened = reopen(api);
        assert_eq!(reopened.projects().len(), 1);
        assert_eq!(reopened.journal_entries().len(), 1);
    }

    #[test]
    fn crud_identity() {
        let mut api = api();
        let project = Project::new("Plaza");
        let id = project.id;
        api.add_project(project.clone());
        assert_eq!(api.project(&id), Some(&project));

        api.delete_project(&id);
        assert_eq!(api.project(&id), None);

        let entry = JournalEntry::new(CareActivity::Inspection, "Hawthorn");
        let entry_id = entry.id;
        api.add_journal_entry(entry.clone());
        assert_eq!(api.journal_entry(&entry_id), Some(&entry));
        api.delete_journal_entry(&entry_id);
        assert_eq!(api.journal_entry(&entry_id), None);
    }

    #[test]
    fn failed_write_keeps_memory_and_warns() {
        let mut api = api();
        api.store().backend().set_simulate_write_error(true);
        let result = api.add_project(Project::new("Offline"));
        assert_eq!(api.projects().len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
    }

    #[test]
    fn missing_references_do_not_persist() {
        let mut api = api();
        let result = api.update_project(Project::new("Ghost"));
        assert!(!result.is_changed());
        assert!(api.store().backend().blob(StoreKey::Projects).is_none());

        let result = api.add_plant_to_project(&Uuid::new_v4(), &Uuid::new_v4(), 1);
        assert!(!result.is_changed());
    }

    #[test]
    fn planted_date_uses_clock() {
        let when = Utc.with_ymd_and_hms(2024, 4, 20, 10, 0, 0).unwrap();
        let mut api = api().with_clock(FixedClock(when));
        let project = Project::new("Rooftop");
        let id = project.id;
        api.add_project(project);
        let sedum = catalog::by_name("Stonecrop").unwrap();
        api.add_plant_to_project(&id, &sedum.id, 30);
        api.set_plant_planted(&id, &sedum.id, true);

        let line = api.project(&id).unwrap().line_for(&sedum.id).unwrap();
        assert!(line.is_planted);
        assert_eq!(line.planted_date, Some(when));
    }

    #[test]
    fn quantity_cap_follows_config() {
        let config = GreenlabConfig {
            max_quantity: 10,
            ..Default::default()
        };
        let mut api = GreenlabApi::new(MemBackend::new(), config);
        let project = Project::new("Small");
        let id = project.id;
        api.add_project(project);
        let plant = &catalog::all()[4];
        api.add_plant_to_project(&id, &plant.id, 25);
        assert_eq!(api.project(&id).unwrap().plants[0].quantity, 10);
        api.set_plant_quantity(&id, &plant.id, 50);
        assert_eq!(api.project(&id).unwrap().plants[0].quantity, 10);
    }

    #[test]
    fn update_project_merges_duplicates() {
        let mut api = api();
        let project = Project::new("Dupes");
        let id = project.id;
        api.add_project(project);

        let mut edited = api.project(&id).unwrap().clone();
        let plant = &catalog::all()[0];
        edited.plants.push(ProjectPlant::new(plant, 2));
        edited.plants.push(ProjectPlant::new(plant, 5));
        api.update_project(edited);

        let stored = api.project(&id).unwrap();
        assert_eq!(stored.plants.len(), 1);
        assert_eq!(stored.plants[0].quantity, 7);
    }

    #[test]
    fn journal_loaded_out_of_order_is_sorted() {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
        let entries = vec![
            JournalEntry::new(CareActivity::Watering, "old").with_date(base),
            JournalEntry::new(CareActivity::Watering, "new").with_date(base + Duration::days(3)),
        ];
        let backend = MemBackend::new();
        backend.inject_blob(
            StoreKey::JournalEntries,
            &serde_json::to_string(&entries).unwrap(),
        );
        let api = GreenlabApi::new(backend, GreenlabConfig::default());
        assert_eq!(api.journal_entries()[0].plant_name, "new");
    }

    #[test]
    fn subscribers_hear_each_change() {
        let mut api = api();
        let seen: Rc<RefCell<Vec<Change>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let id = api.subscribe(move |change: &Change| sink.borrow_mut().push(*change));

        api.add_project(Project::new("A"));
        api.toggle_favorite(catalog::all()[0].id);
        api.add_journal_entry(JournalEntry::new(CareActivity::Pruning, "Privet"));
        api.update_project(Project::new("Ghost"));

        assert_eq!(
            *seen.borrow(),
            vec![Change::Projects, Change::Favorites, Change::Journal]
        );

        assert!(api.unsubscribe(id));
        assert!(!api.unsubscribe(id));
        api.add_project(Project::new("B"));
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn favorites_toggle_pairs_and_persist() {
        let mut api = api();
        let id = catalog::all()[2].id;
        api.toggle_favorite(id);
        assert!(api.is_favorite(&id));
        assert_eq!(api.favorite_plants().len(), 1);
        api.toggle_favorite(id);
        assert!(!api.is_favorite(&id));
        let stored = api.store().backend().blob(StoreKey::Favorites).unwrap();
        let ids: Vec<Uuid> = serde_json::from_str(&stored).unwrap();
        assert!(ids.is_empty());
    }

    #[test]
    fn recent_projects_follow_config_limit() {
        let mut api = api();
        for i in 0..7 {
            let mut p = Project::new(format!("p{}", i));
            p.created_at = Utc.with_ymd_and_hms(2024, 1, 1 + i, 0, 0, 0).unwrap();
            api.add_project(p);
        }
        let recent = api.recent_projects();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].name, "p6");
    }

    #[test]
    fn new_records_use_clock() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let mut api = api().with_clock(FixedClock(start));
        let early = api.new_project("Early");
        let entry = api.new_journal_entry(CareActivity::Mulching, "Beds");
        assert_eq!(early.created_at, start);
        assert_eq!(entry.date, start);
        api.add_project(early);
        api.add_journal_entry(entry);

        let later = start + Duration::days(2);
        api = api.with_clock(FixedClock(later));
        let late = api.new_project("Late");
        api.add_project(late);
        let watering = api.new_journal_entry(CareActivity::Watering, "Beds");
        api.add_journal_entry(watering);

        let recent: Vec<&str> = api.recent_projects().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(recent, vec!["Late", "Early"]);
        assert_eq!(api.journal_entries()[0].date, later);
        assert_eq!(api.journal_entries()[1].date, start);
    }

    #[test]
    fn reset_clears_everything() {
        let mut api = api();
        api.add_project(Project::new("A"));
        api.toggle_favorite(catalog::all()[0].id);
        api.reset();
        assert!(api.projects().is_empty());
        assert!(api.favorite_ids().is_empty());
        assert!(api.store().backend().blob(StoreKey::Projects).is_none());
    }
}
