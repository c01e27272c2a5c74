use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use greenlab::api::{CmdMessage, MessageLevel};
use greenlab::model::{JournalEntry, Plant, Project};
use std::collections::BTreeSet;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use uuid::Uuid;

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const FAVORITE_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_plants(plants: &[&Plant], favorites: &BTreeSet<Uuid>) {
    if plants.is_empty() {
        println!("No plants found.");
        return;
    }

    for plant in plants {
        let marker = if favorites.contains(&plant.id) {
            format!("{} ", FAVORITE_MARKER)
        } else {
            "  ".to_string()
        };
        let left = format!("{}{} {} ", marker, plant.icon, plant.name);
        let right = plant.category.label();

        let available = LINE_WIDTH.saturating_sub(left.width() + right.width() + 1);
        let scientific = truncate_to_width(&plant.scientific_name, available);
        let padding = available.saturating_sub(scientific.width());

        println!(
            "{}{}{} {}",
            left.bold(),
            scientific.italic().dimmed(),
            " ".repeat(padding),
            right.cyan()
        );
    }
}

pub(super) fn print_plant(plant: &Plant, favorite: bool) {
    let star = if favorite {
        format!(" {}", FAVORITE_MARKER.yellow())
    } else {
        String::new()
    };
    println!("{} {}{}", plant.icon, plant.name.bold(), star);
    println!("{}", plant.scientific_name.italic().dimmed());
    println!("--------------------------------");
    println!("{}", plant.description);
    println!();
    println!("Category:    {}", plant.category);
    println!("Care level:  {}", plant.care_level);
    println!("Water:       {}", plant.water_needs);
    println!("Sun:         {}", plant.sun_requirement);
    println!("Max height:  {}", plant.max_height);
    println!("Growth rate: {}", plant.growth_rate);
    println!("Benefits:    {}", join_labels(&plant.urban_benefits));
    println!("Best for:    {}", join_labels(&plant.best_locations));
    println!("Plant in:    {}", join_labels(&plant.planting_seasons));
    println!("{}", format!("id {}", plant.id).dimmed());
}

fn join_labels<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints projects with their list number (1 based).
pub(super) fn print_projects(rows: &[(usize, &Project)]) {
    if rows.is_empty() {
        println!("No projects found.");
        return;
    }

    for (index, project) in rows {
        let idx_str = format!("{:>3}. ", index);
        let status = format!(" {} {}", project.status.icon(), project.status);
        let progress = format!(" {:>3.0}%", project.progress() * 100.0);
        let time_ago = format_time_ago(project.created_at);

        let fixed = idx_str.width() + status.width() + progress.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&project.name, available);
        let padding = available.saturating_sub(name.width());

        let status_colored = if project.is_active() {
            status.normal()
        } else {
            status.dimmed()
        };

        println!(
            "{}{}{}{}{}{}",
            idx_str.yellow(),
            name,
            " ".repeat(padding),
            status_colored,
            progress.green(),
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_project(index: usize, project: &Project) {
    println!("{} {}", format!("{}.", index).yellow(), project.name.bold());
    println!("--------------------------------");
    if !project.description.is_empty() {
        println!("{}", project.description);
        println!();
    }
    println!("Status:   {} {}", project.status.icon(), project.status);
    println!("Location: {}", project.location_type);
    if project.area > 0.0 {
        println!("Area:     {:.1} m²", project.area);
    }
    if let Some(target) = project.target_completion_date {
        println!("Target:   {}", target.format("%Y-%m-%d"));
    }
    println!(
        "Created:  {} ({})",
        project.created_at.format("%Y-%m-%d"),
        format_time_ago(project.created_at).trim()
    );
    println!(
        "Plants:   {} species, {} units, {} planted ({:.0}%)",
        project.species_count(),
        project.total_units(),
        project.planted_units(),
        project.progress() * 100.0
    );

    if !project.plants.is_empty() {
        println!();
        for line in &project.plants {
            let check = if line.is_planted {
                "✔".green()
            } else {
                "·".dimmed()
            };
            let planted_on = line
                .planted_date
                .map(|d| format!("  planted {}", d.format("%Y-%m-%d")))
                .unwrap_or_default();
            println!(
                "  {} {:>4} × {}{}",
                check,
                line.quantity,
                line.plant_name,
                planted_on.dimmed()
            );
        }
    }

    if !project.notes.is_empty() {
        println!();
        println!("{}", project.notes);
    }
}

fn entry_subject(entry: &JournalEntry) -> String {
    match &entry.project_name {
        Some(project) => format!("{} ({})", entry.plant_name, project),
        None => entry.plant_name.clone(),
    }
}

/// Prints journal entries with their list number (1 based).
pub(super) fn print_entries(rows: &[(usize, &JournalEntry)]) {
    if rows.is_empty() {
        println!("No journal entries found.");
        return;
    }

    for (index, entry) in rows {
        let idx_str = format!("{:>3}. ", index);
        let activity = format!("{} {:<20}", entry.activity_type.icon(), entry.activity_type);
        let time_ago = format_time_ago(entry.date);

        let fixed = idx_str.width() + activity.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let subject = truncate_to_width(&entry_subject(entry), available);
        let padding = available.saturating_sub(subject.width());

        println!(
            "{}{}{}{}{}",
            idx_str.yellow(),
            activity.cyan(),
            subject,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_days(days: &[(NaiveDate, Vec<&JournalEntry>)]) {
    if days.is_empty() {
        println!("No journal entries found.");
        return;
    }

    for (i, (day, entries)) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", day.format("%A, %Y-%m-%d").to_string().bold());
        for entry in entries {
            println!(
                "  {} {} {}  {}",
                entry.date.format("%H:%M").to_string().dimmed(),
                entry.activity_type.icon(),
                entry.activity_type,
                entry_subject(entry)
            );
        }
    }
}

pub(super) fn print_entry(index: usize, entry: &JournalEntry) {
    println!(
        "{} {} {}",
        format!("{}.", index).yellow(),
        entry.activity_type.icon(),
        entry.activity_type.to_string().bold()
    );
    println!("--------------------------------");
    println!("Plant:    {}", entry.plant_name);
    if let Some(project) = &entry.project_name {
        println!("Project:  {}", project);
    }
    if !entry.location.is_empty() {
        println!("Location: {}", entry.location);
    }
    println!(
        "Date:     {} ({})",
        entry.date.format("%Y-%m-%d %H:%M"),
        format_time_ago(entry.date).trim()
    );
    if !entry.notes.is_empty() {
        println!();
        println!("{}", entry.notes);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    // Future dates (a journal entry logged ahead) read as "now"
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("Ginkgo", 10), "Ginkgo");
    }

    #[test]
    fn truncate_marks_cut_text() {
        let cut = truncate_to_width("Little-leaf Linden", 8);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 8);
    }

    #[test]
    fn truncate_counts_wide_chars() {
        let cut = truncate_to_width("🌳🌳🌳🌳🌳", 5);
        assert!(cut.width() <= 5);
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let s = format_time_ago(Utc::now());
        assert_eq!(s.width(), TIME_WIDTH);
    }
}
