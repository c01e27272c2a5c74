use super::print::{
    print_days, print_entries, print_entry, print_messages, print_plant, print_plants,
    print_project, print_projects,
};
use crate::args::{CalcCommand, EntryFields, JournalCommand, ProjectCommand};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use colored::Colorize;
use greenlab::api::GreenlabApi;
use greenlab::calc;
use greenlab::catalog::PlantFilter;
use greenlab::config::GreenlabConfig;
use greenlab::error::{GreenlabError, Result};
use greenlab::model::{CareActivity, JournalEntry, Plant, Project};
use greenlab::store::fs_backend::FsBackend;
use std::path::PathBuf;
use uuid::Uuid;

pub struct AppContext {
    pub api: GreenlabApi<FsBackend>,
    pub data_dir: PathBuf,
}

// --- Argument helpers ---

fn required_name(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GreenlabError::Api(format!("{} cannot be empty", what)));
    }
    Ok(trimmed.to_string())
}

fn parse_target(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| GreenlabError::Api(format!("Invalid date (expected YYYY-MM-DD): {}", value)))
}

/// Accepts RFC 3339 or a bare `YYYY-MM-DD`, which means midnight UTC.
fn parse_when(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    Ok(parse_target(value)?.and_time(NaiveTime::MIN).and_utc())
}

/// Finds a catalog plant by id, exact name, or a search term matching exactly one plant.
fn resolve_plant(api: &GreenlabApi<FsBackend>, query: &str) -> Result<&'static Plant> {
    if let Ok(id) = Uuid::parse_str(query.trim()) {
        return api
            .plant(&id)
            .ok_or_else(|| GreenlabError::NotFound(format!("plant {}", id)));
    }
    if let Some(plant) = api.catalog_plant_by_name(query) {
        return Ok(plant);
    }

    let filter = PlantFilter {
        text: Some(query.to_string()),
        ..Default::default()
    };
    match api.search_catalog(&filter).as_slice() {
        [] => Err(GreenlabError::NotFound(format!("plant \"{}\"", query))),
        [plant] => Ok(*plant),
        many => {
            let names: Vec<&str> = many.iter().map(|p| p.name.as_str()).collect();
            Err(GreenlabError::Api(format!(
                "\"{}\" matches several plants: {}",
                query,
                names.join(", ")
            )))
        }
    }
}

/// The project shown as number `index` by `project list`.
fn project_at(api: &GreenlabApi<FsBackend>, index: usize) -> Result<&Project> {
    index
        .checked_sub(1)
        .and_then(|i| api.projects().get(i))
        .ok_or_else(|| GreenlabError::NotFound(format!("project {}", index)))
}

/// The entry shown as number `index` by `journal list`.
fn entry_at(api: &GreenlabApi<FsBackend>, index: usize) -> Result<&JournalEntry> {
    index
        .checked_sub(1)
        .and_then(|i| api.journal_entries().get(i))
        .ok_or_else(|| GreenlabError::NotFound(format!("journal entry {}", index)))
}

/// List numbers follow stored order, so filtered views keep the numbers `show` accepts.
fn numbered_projects<'a>(
    api: &'a GreenlabApi<FsBackend>,
    projects: Vec<&'a Project>,
) -> Vec<(usize, &'a Project)> {
    projects
        .into_iter()
        .filter_map(|p| {
            api.projects()
                .iter()
                .position(|q| q.id == p.id)
                .map(|i| (i + 1, p))
        })
        .collect()
}

fn numbered_entries<'a>(
    api: &'a GreenlabApi<FsBackend>,
    entries: Vec<&'a JournalEntry>,
) -> Vec<(usize, &'a JournalEntry)> {
    entries
        .into_iter()
        .filter_map(|e| {
            api.journal_entries()
                .iter()
                .position(|f| f.id == e.id)
                .map(|i| (i + 1, e))
        })
        .collect()
}

// --- Catalog & favorites ---

pub fn handle_catalog(
    ctx: &AppContext,
    search: Option<String>,
    category: Option<String>,
    care: Option<String>,
    sun: Option<String>,
) -> Result<()> {
    let filter = PlantFilter {
        category: category.as_deref().map(str::parse).transpose()?,
        care_level: care.as_deref().map(str::parse).transpose()?,
        sun_requirement: sun.as_deref().map(str::parse).transpose()?,
        text: search,
    };
    let plants = ctx.api.search_catalog(&filter);
    print_plants(&plants, ctx.api.favorite_ids());
    Ok(())
}

pub fn handle_plant(ctx: &AppContext, query: &str) -> Result<()> {
    let plant = resolve_plant(&ctx.api, query)?;
    print_plant(plant, ctx.api.is_favorite(&plant.id));
    Ok(())
}

pub fn handle_fav(ctx: &mut AppContext, query: &str) -> Result<()> {
    let plant = resolve_plant(&ctx.api, query)?;
    let result = ctx.api.toggle_favorite(plant.id);
    print_messages(&result.messages);
    Ok(())
}

pub fn handle_favs(ctx: &AppContext) -> Result<()> {
    let plants = ctx.api.favorite_plants();
    if plants.is_empty() {
        println!("No favorites yet. Add one with `greenlab fav <plant>`.");
        return Ok(());
    }
    print_plants(&plants, ctx.api.favorite_ids());
    Ok(())
}

// --- Projects ---

pub fn handle_project(ctx: &mut AppContext, command: ProjectCommand) -> Result<()> {
    match command {
        ProjectCommand::New {
            name,
            description,
            location,
            area,
            target,
            notes,
        } => {
            let mut project = ctx.api.new_project(required_name(&name, "Project name")?);
            if let Some(description) = description {
                project = project.with_description(description.trim());
            }
            if let Some(location) = location {
                project = project.with_location(location.parse()?);
            }
            if let Some(area) = area {
                if !area.is_finite() || area < 0.0 {
                    return Err(GreenlabError::Api(format!("Invalid area: {}", area)));
                }
                project = project.with_area(area);
            }
            if let Some(target) = target {
                project = project.with_target(parse_target(&target)?);
            }
            if let Some(notes) = notes {
                project = project.with_notes(notes);
            }
            let result = ctx.api.add_project(project);
            print_messages(&result.messages);
            for project in &result.affected_projects {
                if let Some(at) = ctx.api.projects().iter().position(|p| p.id == project.id) {
                    println!("{}", format!("Listed as project {}", at + 1).dimmed());
                }
            }
        }
        ProjectCommand::List {
            active,
            recent,
            status,
        } => {
            let projects = if active {
                ctx.api.active_projects()
            } else if recent {
                ctx.api.recent_projects()
            } else if let Some(status) = status {
                ctx.api.projects_by_status(status.parse()?)
            } else {
                ctx.api.projects().iter().collect()
            };
            print_projects(&numbered_projects(&ctx.api, projects));
        }
        ProjectCommand::Show { index } => {
            let project = project_at(&ctx.api, index)?;
            print_project(index, project);
        }
        ProjectCommand::AddPlant {
            index,
            plant,
            quantity,
        } => {
            let project_id = project_at(&ctx.api, index)?.id;
            let plant = resolve_plant(&ctx.api, &plant)?;
            let result = ctx.api.add_plant_to_project(&project_id, &plant.id, quantity);
            print_messages(&result.messages);
        }
        ProjectCommand::Qty {
            index,
            plant,
            quantity,
        } => {
            let project_id = project_at(&ctx.api, index)?.id;
            let plant = resolve_plant(&ctx.api, &plant)?;
            let result = ctx.api.set_plant_quantity(&project_id, &plant.id, quantity);
            print_messages(&result.messages);
        }
        ProjectCommand::Planted { index, plant, undo } => {
            let project_id = project_at(&ctx.api, index)?.id;
            let plant = resolve_plant(&ctx.api, &plant)?;
            let result = ctx.api.set_plant_planted(&project_id, &plant.id, !undo);
            print_messages(&result.messages);
        }
        ProjectCommand::Status { index, status } => {
            let project_id = project_at(&ctx.api, index)?.id;
            let result = ctx.api.set_project_status(&project_id, status.parse()?);
            print_messages(&result.messages);
        }
        ProjectCommand::Rm { index } => {
            project_at(&ctx.api, index)?;
            let result = ctx.api.delete_project_at(index - 1);
            print_messages(&result.messages);
        }
    }
    Ok(())
}

// --- Journal ---

fn apply_fields(mut entry: JournalEntry, fields: EntryFields) -> Result<JournalEntry> {
    if let Some(project) = fields.project {
        let project = project.trim();
        entry.project_name = (!project.is_empty()).then(|| project.to_string());
    }
    if let Some(notes) = fields.notes {
        entry.notes = notes;
    }
    if let Some(location) = fields.location {
        entry.location = location.trim().to_string();
    }
    if let Some(date) = fields.date {
        entry.date = parse_when(&date)?;
    }
    Ok(entry)
}

/// Entries move when their date changes, so report where they now sit.
fn print_entry_positions(api: &GreenlabApi<FsBackend>, entries: &[JournalEntry]) {
    for entry in entries {
        if let Some(at) = api.journal_entries().iter().position(|e| e.id == entry.id) {
            println!("{}", format!("Listed as entry {}", at + 1).dimmed());
        }
    }
}

pub fn handle_journal(ctx: &mut AppContext, command: JournalCommand) -> Result<()> {
    match command {
        JournalCommand::Add {
            activity,
            plant,
            fields,
        } => {
            let entry = ctx
                .api
                .new_journal_entry(activity.parse()?, required_name(&plant, "Plant name")?);
            let entry = apply_fields(entry, fields)?;
            let result = ctx.api.add_journal_entry(entry);
            print_messages(&result.messages);
            print_entry_positions(&ctx.api, &result.affected_entries);
        }
        JournalCommand::List {
            activity,
            project,
            by_day,
        } => {
            if by_day {
                print_days(&ctx.api.journal_by_day());
                return Ok(());
            }
            let activity: Option<CareActivity> = activity.as_deref().map(str::parse).transpose()?;
            let entries = match (activity, project.as_deref()) {
                (Some(activity), None) => ctx.api.journal_entries_for_activity(activity),
                (None, Some(project)) => ctx.api.journal_entries_for_project(project),
                (Some(activity), Some(project)) => ctx
                    .api
                    .journal_entries_for_project(project)
                    .into_iter()
                    .filter(|e| e.activity_type == activity)
                    .collect(),
                (None, None) => ctx.api.sorted_journal_entries(),
            };
            print_entries(&numbered_entries(&ctx.api, entries));
        }
        JournalCommand::Show { index } => {
            let entry = entry_at(&ctx.api, index)?;
            print_entry(index, entry);
        }
        JournalCommand::Edit {
            index,
            activity,
            plant,
            fields,
        } => {
            let mut entry = entry_at(&ctx.api, index)?.clone();
            if let Some(activity) = activity {
                entry.activity_type = activity.parse()?;
            }
            if let Some(plant) = plant {
                entry.plant_name = required_name(&plant, "Plant name")?;
            }
            let entry = apply_fields(entry, fields)?;
            let result = ctx.api.update_journal_entry(entry);
            print_messages(&result.messages);
            print_entry_positions(&ctx.api, &result.affected_entries);
        }
        JournalCommand::Rm { index } => {
            entry_at(&ctx.api, index)?;
            let result = ctx.api.delete_journal_entry_at(index - 1);
            print_messages(&result.messages);
        }
    }
    Ok(())
}

// --- Calculators ---

pub fn handle_calc(command: CalcCommand) -> Result<()> {
    match command {
        CalcCommand::Spacing {
            length,
            width,
            spacing,
        } => {
            let est = calc::plant_spacing(length, width, spacing)?;
            println!(
                "{} plants ({} per row × {} rows) for {:.1} m²",
                est.total.to_string().bold(),
                est.plants_per_row,
                est.rows,
                est.area
            );
        }
        CalcCommand::Water {
            plants,
            litres,
            per_week,
        } => {
            let est = calc::watering(plants, litres, per_week)?;
            println!("Daily:   {:>10.1} L", est.daily);
            println!("Weekly:  {:>10.1} L", est.weekly);
            println!("Monthly: {:>10.1} L", est.monthly);
        }
        CalcCommand::Mulch { area, depth } => {
            let volume = calc::mulch_volume(area, depth)?;
            println!("{} m³ of mulch", format!("{:.2}", volume).bold());
        }
        CalcCommand::Trees {
            length,
            spacing,
            both_sides,
        } => {
            let est = calc::tree_count(length, spacing, both_sides)?;
            if both_sides {
                println!(
                    "{} trees ({} per side)",
                    est.total.to_string().bold(),
                    est.per_side
                );
            } else {
                println!("{} trees", est.total.to_string().bold());
            }
        }
        CalcCommand::Coverage { total, green } => {
            let est = calc::green_coverage(total, green)?;
            let label = match est.tier {
                calc::CoverageTier::Good => est.tier.label().green(),
                calc::CoverageTier::Moderate => est.tier.label().yellow(),
                calc::CoverageTier::Low => est.tier.label().red(),
            };
            println!("{:.1}% green: {}", est.percentage, label);
        }
        CalcCommand::Area { plants, per_plant } => {
            let area = calc::area_coverage(plants, per_plant)?;
            println!("{} m² covered", format!("{:.1}", area).bold());
        }
    }
    Ok(())
}

// --- Config & maintenance ---

pub fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let current = ctx.api.config();
    match (key, value) {
        (None, _) => {
            for key in GreenlabConfig::KEYS {
                if let Some(value) = current.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
        (Some(key), None) => {
            let value = current
                .get(&key)
                .ok_or_else(|| GreenlabError::Api(format!("Unknown config key: {}", key)))?;
            println!("{} = {}", key, value);
        }
        (Some(key), Some(value)) => {
            let mut config = current.clone();
            config.set(&key, &value)?;
            config.save(&ctx.data_dir)?;
            println!("{}", format!("{} set to {}", key, value.trim()).green());
        }
    }
    Ok(())
}

pub fn handle_reset(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        return Err(GreenlabError::Api(
            "This deletes every project, journal entry and favorite. Re-run with --yes".into(),
        ));
    }
    let result = ctx.api.reset();
    print_messages(&result.messages);
    Ok(())
}

/// What bare `greenlab` prints: a summary plus the active projects.
pub fn handle_overview(ctx: &AppContext) -> Result<()> {
    let api = &ctx.api;
    println!(
        "{} projects, {} journal entries, {} favorites",
        api.projects().len(),
        api.journal_entries().len(),
        api.favorite_ids().len()
    );
    let active = api.active_projects();
    if !active.is_empty() {
        println!();
        println!("{}", "Active projects".bold());
        print_projects(&numbered_projects(api, active));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn names_are_trimmed_and_required() {
        assert_eq!(required_name("  Main St ", "Name").unwrap(), "Main St");
        assert!(required_name("   ", "Name").is_err());
    }

    #[test]
    fn dates_accept_day_or_timestamp() {
        assert_eq!(
            parse_when("2024-05-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_when("2024-05-01T09:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap()
        );
        assert!(parse_when("May first").is_err());
    }

    #[test]
    fn clearing_project_on_entry() {
        let entry = JournalEntry::new(CareActivity::Watering, "Ginkgo")
            .with_project("Roof");
        let fields = EntryFields {
            project: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(apply_fields(entry, fields).unwrap().project_name, None);
    }
}
