use greenlab::model::{CareActivity, JournalEntry, Project};
use greenlab::store::fs_backend::FsBackend;
use greenlab::store::{BlobStore, StorageBackend, StoreKey};
use std::fs;
use tempfile::TempDir;
use uuid::Uuid;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("data"));
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_blob_io() {
    let (_dir, backend) = setup();

    // Nothing written yet, and the directory does not exist
    assert_eq!(backend.read_blob(StoreKey::Projects).unwrap(), None);
    assert!(!backend.root().exists());

    backend.write_blob(StoreKey::Projects, "[]").unwrap();
    assert_eq!(
        backend.read_blob(StoreKey::Projects).unwrap(),
        Some("[]".to_string())
    );

    backend.remove_blob(StoreKey::Projects).unwrap();
    assert_eq!(backend.read_blob(StoreKey::Projects).unwrap(), None);

    // Removing twice is fine
    backend.remove_blob(StoreKey::Projects).unwrap();
}

#[test]
fn test_fs_backend_file_names_and_no_tmp_leftovers() {
    let (_dir, backend) = setup();
    for key in StoreKey::ALL {
        backend.write_blob(key, "[]").unwrap();
    }

    let mut names: Vec<String> = fs::read_dir(backend.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "favoritePlantIds.json",
            "savedJournalEntries.json",
            "savedProjects.json"
        ]
    );
}

#[test]
fn test_fs_backend_overwrite_replaces_whole_blob() {
    let (_dir, backend) = setup();
    backend
        .write_blob(StoreKey::Favorites, "[\"a long value that will be replaced\"]")
        .unwrap();
    backend.write_blob(StoreKey::Favorites, "[]").unwrap();
    let on_disk = fs::read_to_string(backend.blob_path(StoreKey::Favorites)).unwrap();
    assert_eq!(on_disk, "[]");
}

#[test]
fn test_blob_store_on_disk_round_trip() {
    let (_dir, backend) = setup();
    let store = BlobStore::new(backend);

    let projects = vec![Project::new("Canal Path").with_area(1200.0)];
    let entries = vec![JournalEntry::new(CareActivity::PestControl, "Red Maple")];
    let favorites = vec![Uuid::new_v4()];

    assert!(store.save(StoreKey::Projects, &projects));
    assert!(store.save(StoreKey::JournalEntries, &entries));
    assert!(store.save(StoreKey::Favorites, &favorites));

    assert_eq!(store.load::<Vec<Project>>(StoreKey::Projects), Some(projects));
    assert_eq!(
        store.load::<Vec<JournalEntry>>(StoreKey::JournalEntries),
        Some(entries)
    );
    assert_eq!(store.load::<Vec<Uuid>>(StoreKey::Favorites), Some(favorites));
}

#[test]
fn test_blob_store_wire_format() {
    let (_dir, backend) = setup();
    let store = BlobStore::new(backend);
    let mut project = Project::new("Wire");
    project.status = greenlab::model::ProjectStatus::InProgress;
    store.try_save(StoreKey::Projects, &vec![project]).unwrap();

    let raw = fs::read_to_string(store.backend().blob_path(StoreKey::Projects)).unwrap();
    assert!(raw.contains("\"projectDescription\""));
    assert!(raw.contains("\"createdDate\""));
    assert!(raw.contains("\"locationType\""));
    assert!(raw.contains("\"In Progress\""));
}

#[test]
fn test_blob_store_corrupt_file_loads_as_absent() {
    let (_dir, backend) = setup();
    backend.write_blob(StoreKey::JournalEntries, "{{{").unwrap();
    let store = BlobStore::new(backend);
    assert!(store
        .try_load::<Vec<JournalEntry>>(StoreKey::JournalEntries)
        .is_err());
    assert_eq!(store.load::<Vec<JournalEntry>>(StoreKey::JournalEntries), None);
}
