#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn greenlab_cmd(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("greenlab"));
    cmd.env("GREENLAB_DATA", data.path().as_os_str())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_catalog_search_and_plant_detail() {
    let data = TempDir::new().unwrap();

    greenlab_cmd(&data)
        .args(["catalog", "--category", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ginkgo"))
        .stdout(predicate::str::contains("Lavender").not());

    greenlab_cmd(&data)
        .args(["plant", "ginkgo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ginkgo biloba"));

    greenlab_cmd(&data)
        .args(["plant", "no such plant"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_project_workflow() {
    let data = TempDir::new().unwrap();

    greenlab_cmd(&data)
        .args([
            "project", "new", "  Harbor Walk  ", "--location", "plaza", "--area", "600",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project created: Harbor Walk"))
        .stdout(predicate::str::contains("Listed as project 1"));

    greenlab_cmd(&data)
        .args(["project", "add-plant", "1", "Lavender", "-q", "40"])
        .assert()
        .success();

    // Adding the same plant again merges into one line
    greenlab_cmd(&data)
        .args(["project", "add-plant", "1", "Lavender", "-q", "10"])
        .assert()
        .success();

    greenlab_cmd(&data)
        .args(["project", "planted", "1", "Lavender"])
        .assert()
        .success();

    greenlab_cmd(&data)
        .args(["project", "status", "1", "in-progress"])
        .assert()
        .success();

    greenlab_cmd(&data)
        .args(["project", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Harbor Walk"))
        .stdout(predicate::str::contains("In Progress"))
        .stdout(predicate::str::contains("1 species, 50 units, 50 planted"));

    greenlab_cmd(&data)
        .args(["project", "list", "--status", "completed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));

    let saved = fs::read_to_string(data.path().join("savedProjects.json")).unwrap();
    assert!(saved.contains("\"In Progress\""));

    greenlab_cmd(&data)
        .args(["project", "rm", "1"])
        .assert()
        .success();

    greenlab_cmd(&data)
        .args(["project", "show", "1"])
        .assert()
        .failure();
}

#[test]
fn test_empty_project_name_is_rejected() {
    let data = TempDir::new().unwrap();
    greenlab_cmd(&data)
        .args(["project", "new", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
    assert!(!data.path().join("savedProjects.json").exists());
}

#[test]
fn test_journal_workflow() {
    let data = TempDir::new().unwrap();

    greenlab_cmd(&data)
        .args(["journal", "add", "watering", "Ginkgo", "--date", "2024-06-01"])
        .assert()
        .success();
    greenlab_cmd(&data)
        .args([
            "journal", "add", "pest control", "Red Maple", "--project", "Park Row", "--date",
            "2024-06-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Listed as entry 1"));

    // Older than both, so it lands last
    greenlab_cmd(&data)
        .args(["journal", "add", "mulching", "Beds", "--date", "2024-05-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Listed as entry 3"));

    // Newest first
    greenlab_cmd(&data)
        .args(["journal", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pest Control"))
        .stdout(predicate::str::contains("Park Row"));

    greenlab_cmd(&data)
        .args(["journal", "list", "--activity", "watering"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ginkgo"))
        .stdout(predicate::str::contains("Red Maple").not());

    greenlab_cmd(&data)
        .args(["journal", "list", "--by-day"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-06-03"))
        .stdout(predicate::str::contains("2024-06-01"));

    greenlab_cmd(&data)
        .args(["journal", "edit", "2", "--notes", "deep soak"])
        .assert()
        .success();
    greenlab_cmd(&data)
        .args(["journal", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deep soak"));

    // Moving the date re-sorts the entry to the top
    greenlab_cmd(&data)
        .args(["journal", "edit", "3", "--date", "2024-07-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Listed as entry 1"));

    greenlab_cmd(&data)
        .args(["journal", "add", "other", "Ginkgo"])
        .assert()
        .failure();
}

#[test]
fn test_favorites_toggle() {
    let data = TempDir::new().unwrap();

    greenlab_cmd(&data)
        .args(["fav", "Switchgrass"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Switchgrass to favorites"));
    greenlab_cmd(&data)
        .args(["favs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Panicum virgatum"));
    greenlab_cmd(&data)
        .args(["fav", "Switchgrass"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Switchgrass"));
    greenlab_cmd(&data)
        .args(["favs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No favorites yet"));
}

#[test]
fn test_calculators() {
    let data = TempDir::new().unwrap();

    greenlab_cmd(&data)
        .args(["calc", "spacing", "10", "10", "1.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("64 plants"));
    greenlab_cmd(&data)
        .args(["calc", "trees", "500", "8", "--both-sides"])
        .assert()
        .success()
        .stdout(predicate::str::contains("126 trees"));
    greenlab_cmd(&data)
        .args(["calc", "coverage", "1000", "350"])
        .assert()
        .success()
        .stdout(predicate::str::contains("35.0%"))
        .stdout(predicate::str::contains("Good coverage"));
    greenlab_cmd(&data)
        .args(["calc", "mulch", "100", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7.00"));
    greenlab_cmd(&data)
        .args(["calc", "spacing", "10", "10", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spacing must be greater than zero"));
}

#[test]
fn test_config_and_reset() {
    let data = TempDir::new().unwrap();

    greenlab_cmd(&data)
        .args(["config", "max-quantity", "20"])
        .assert()
        .success();
    greenlab_cmd(&data)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max-quantity = 20"))
        .stdout(predicate::str::contains("recent-limit = 5"));

    greenlab_cmd(&data)
        .args(["project", "new", "Capped"])
        .assert()
        .success();
    greenlab_cmd(&data)
        .args(["project", "add-plant", "1", "Privet", "-q", "50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quantity capped at 20"));

    greenlab_cmd(&data).args(["reset"]).assert().failure();
    greenlab_cmd(&data)
        .args(["reset", "--yes"])
        .assert()
        .success();
    assert!(!data.path().join("savedProjects.json").exists());
}
