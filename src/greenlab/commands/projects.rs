use crate::commands::{AppData, Change, CmdMessage, CmdResult};
use crate::model::{Plant, Project, ProjectStatus};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A usable area is finite and non-negative. Anything else is stored as 0, since
/// JSON has no encoding for NaN or infinity.
fn normalize_area(project: &mut Project) -> Option<CmdMessage> {
    if project.area.is_finite() && project.area >= 0.0 {
        return None;
    }
    let rejected = project.area;
    project.area = 0.0;
    Some(CmdMessage::warning(format!(
        "Ignored invalid area {} for {}",
        rejected, project.name
    )))
}

/// Appends `project`. An id that is already taken is a no-op.
pub fn add(data: &mut AppData, mut project: Project) -> CmdResult {
    if data.projects.iter().any(|p| p.id == project.id) {
        return CmdResult::default().with_message(CmdMessage::info(format!(
            "A project with id {} already exists",
            project.id
        )));
    }
    let folded = project.merge_duplicate_plants();
    let mut result = CmdResult::default().with_change(Change::Projects);
    if let Some(warning) = normalize_area(&mut project) {
        result.add_message(warning);
    }
    if folded > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Merged {} duplicate plant line(s) in {}",
            folded, project.name
        )));
    }
    result.add_message(CmdMessage::success(format!("Project created: {}", project.name)));
    data.projects.push(project.clone());
    result.with_affected_project(project)
}

/// Replaces the project with the same id. Unknown ids are a no-op.
pub fn update(data: &mut AppData, mut project: Project) -> CmdResult {
    let Some(slot) = data.projects.iter_mut().find(|p| p.id == project.id) else {
        return CmdResult::not_found("project", project.id);
    };
    project.merge_duplicate_plants();
    let mut result = CmdResult::default().with_change(Change::Projects);
    if let Some(warning) = normalize_area(&mut project) {
        result.add_message(warning);
    }
    *slot = project.clone();
    result
        .with_message(CmdMessage::success(format!("Project updated: {}", project.name)))
        .with_affected_project(project)
}

pub fn delete(data: &mut AppData, id: &Uuid) -> CmdResult {
    match data.projects.iter().position(|p| &p.id == id) {
        Some(index) => delete_at(data, index),
        None => CmdResult::not_found("project", id),
    }
}

/// Removes the project at `index` (list order, zero based).
pub fn delete_at(data: &mut AppData, index: usize) -> CmdResult {
    if index >= data.projects.len() {
        return CmdResult::default().with_message(CmdMessage::info(format!(
            "No project at position {}",
            index + 1
        )));
    }
    let removed = data.projects.remove(index);
    CmdResult::default()
        .with_change(Change::Projects)
        .with_message(CmdMessage::success(format!("Project deleted: {}", removed.name)))
        .with_affected_project(removed)
}

/// Runs `f` against the project with `id`. `f` reports either a success message
/// (the project changed) or an info message (nothing to do).
fn edit<F>(data: &mut AppData, id: &Uuid, f: F) -> CmdResult
where
    F: FnOnce(&mut Project) -> Result<Vec<CmdMessage>, CmdMessage>,
{
    let Some(project) = data.projects.iter_mut().find(|p| &p.id == id) else {
        return CmdResult::not_found("project", id);
    };
    match f(&mut *project) {
        Ok(messages) => {
            let mut result = CmdResult::default()
                .with_change(Change::Projects)
                .with_affected_project(project.clone());
            result.messages = messages;
            result
        }
        Err(message) => CmdResult::default().with_message(message),
    }
}

/// Adds `quantity` of `plant`, merging into an existing line and capping the
/// line at `max_quantity`.
pub fn add_plant(
    data: &mut AppData,
    project_id: &Uuid,
    plant: &Plant,
    quantity: u32,
    max_quantity: u32,
) -> CmdResult {
    edit(data, project_id, |project| {
        if quantity == 0 {
            return Err(CmdMessage::info("Quantity must be at least 1"));
        }
        let merged = project.add_plant(plant, quantity);
        let project_name = project.name.clone();
        let mut messages = Vec::new();
        if let Some(line) = project.line_for_mut(&plant.id) {
            if line.quantity > max_quantity {
                line.quantity = max_quantity;
                messages.push(CmdMessage::warning(format!(
                    "Quantity capped at {}",
                    max_quantity
                )));
            }
            let verb = if merged { "Updated" } else { "Added" };
            messages.push(CmdMessage::success(format!(
                "{} {} × {} in {}",
                verb, line.quantity, plant.name, project_name
            )));
        }
        Ok(messages)
    })
}

pub fn remove_plant(data: &mut AppData, project_id: &Uuid, line_id: &Uuid) -> CmdResult {
    edit(data, project_id, |project| match project.remove_line(line_id) {
        Some(line) => Ok(vec![CmdMessage::success(format!(
            "Removed {} from {}",
            line.plant_name, project.name
        ))]),
        None => Err(CmdMessage::info(format!("No plant line with id {}", line_id))),
    })
}

/// Sets the quantity of a listed plant. Zero removes the line.
pub fn set_quantity(
    data: &mut AppData,
    project_id: &Uuid,
    plant_id: &Uuid,
    quantity: u32,
    max_quantity: u32,
) -> CmdResult {
    edit(data, project_id, |project| {
        let capped = quantity.min(max_quantity);
        if !project.set_quantity(plant_id, capped) {
            return Err(CmdMessage::info("That plant is not part of the project"));
        }
        let mut messages = Vec::new();
        if capped != quantity {
            messages.push(CmdMessage::warning(format!(
                "Quantity capped at {}",
                max_quantity
            )));
        }
        messages.push(if capped == 0 {
            CmdMessage::success(format!("Removed plant from {}", project.name))
        } else {
            CmdMessage::success(format!("Quantity set to {}", capped))
        });
        Ok(messages)
    })
}

pub fn set_planted(
    data: &mut AppData,
    project_id: &Uuid,
    plant_id: &Uuid,
    planted: bool,
    at: DateTime<Utc>,
) -> CmdResult {
    edit(data, project_id, |project| {
        if !project.set_planted(plant_id, planted, at) {
            return Err(CmdMessage::info("That plant is not part of the project"));
        }
        let state = if planted { "planted" } else { "not planted" };
        Ok(vec![CmdMessage::success(format!("Marked as {}", state))])
    })
}

pub fn set_status(data: &mut AppData, project_id: &Uuid, status: ProjectStatus) -> CmdResult {
    edit(data, project_id, |project| {
        project.status = status;
        Ok(vec![CmdMessage::success(format!(
            "{} is now {}",
            project.name, status
        ))])
    })
}
