//! # Domain Model
//!
//! Core data types for greenlab: the reference [`Plant`] record, user-owned
//! [`Project`]s with their [`ProjectPlant`] line items, and dated [`JournalEntry`]
//! records.
//!
//! ## Wire Format
//!
//! Everything user-owned is persisted as JSON. Field names are camelCase and
//! enumerated values are stored as their human labels (`"In Progress"`,
//! `"Pest Control"`), so the blobs stay readable and stable when variants are
//! reordered in code.
//!
//! ## One Line Per Plant
//!
//! A project lists each catalog plant at most once. [`Project::add_plant`] merges
//! into an existing line instead of appending a second one, and
//! [`Project::merge_duplicate_plants`] collapses lines that arrived some other way
//! (hand-built values, older blobs).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::GreenlabError;

/// Lowercase alphanumerics only, so "In Progress", "in-progress" and
/// "inprogress" all name the same variant.
fn slug(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($what:literal) {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = GreenlabError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let wanted = slug(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| slug(v.label()) == wanted)
                    .ok_or_else(|| GreenlabError::Api(format!("Unknown {}: {}", $what, s)))
            }
        }
    };
}

labeled_enum! {
    PlantCategory ("category") {
        Tree => "Tree",
        Shrub => "Shrub",
        Grass => "Grass",
        Flower => "Flower",
        Vine => "Vine",
        GroundCover => "Ground Cover",
    }
}

labeled_enum! {
    CareLevel ("care level") {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

labeled_enum! {
    WaterNeeds ("water needs") {
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
        VeryHigh => "Very High",
    }
}

labeled_enum! {
    SunRequirement ("sun requirement") {
        FullSun => "Full Sun",
        PartialShade => "Partial Shade",
        FullShade => "Full Shade",
        Adaptable => "Adaptable",
    }
}

labeled_enum! {
    GrowthRate ("growth rate") {
        Slow => "Slow",
        Moderate => "Moderate",
        Fast => "Fast",
    }
}

labeled_enum! {
    UrbanBenefit ("urban benefit") {
        AirPurification => "Air Purification",
        NoiseReduction => "Noise Reduction",
        ShadeCooling => "Shade & Cooling",
        WildlifeHabitat => "Wildlife Habitat",
        Aesthetics => "Aesthetics",
        ErosionControl => "Erosion Control",
        StormwaterManagement => "Stormwater Management",
    }
}

labeled_enum! {
    UrbanLocation ("location") {
        Streetside => "Streetside",
        Park => "Park",
        Plaza => "Plaza",
        Rooftop => "Rooftop",
        VerticalGarden => "Vertical Garden",
        BikePath => "Bike Path",
        Highway => "Highway Buffer",
        Residential => "Residential Area",
    }
}

labeled_enum! {
    Season ("season") {
        Spring => "Spring",
        Summer => "Summer",
        Autumn => "Autumn",
        Winter => "Winter",
    }
}

labeled_enum! {
    ProjectStatus ("project status") {
        Planning => "Planning",
        InProgress => "In Progress",
        Completed => "Completed",
        OnHold => "On Hold",
    }
}

labeled_enum! {
    CareActivity ("activity") {
        Watering => "Watering",
        Pruning => "Pruning",
        Fertilizing => "Fertilizing",
        PestControl => "Pest Control",
        Planting => "Planting",
        Transplanting => "Transplanting",
        Mulching => "Mulching",
        Inspection => "Inspection",
        SoilTesting => "Soil Testing",
        GeneralMaintenance => "General Maintenance",
    }
}

impl Default for UrbanLocation {
    fn default() -> Self {
        Self::Park
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Planning
    }
}

impl ProjectStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "📋",
            ProjectStatus::InProgress => "🔧",
            ProjectStatus::Completed => "✅",
            ProjectStatus::OnHold => "⏸️",
        }
    }

    /// Planning and in-progress projects still need attention.
    pub fn is_active(&self) -> bool {
        matches!(self, ProjectStatus::Planning | ProjectStatus::InProgress)
    }
}

impl CareActivity {
    pub fn icon(&self) -> &'static str {
        match self {
            CareActivity::Watering => "💧",
            CareActivity::Pruning => "✂️",
            CareActivity::Fertilizing => "🧪",
            CareActivity::PestControl => "🐛",
            CareActivity::Planting => "🌱",
            CareActivity::Transplanting => "🔄",
            CareActivity::Mulching => "🍂",
            CareActivity::Inspection => "🔍",
            CareActivity::SoilTesting => "🧫",
            CareActivity::GeneralMaintenance => "🛠️",
        }
    }
}

/// A reference plant from the catalog. Never mutated after the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: Uuid,
    pub name: String,
    pub scientific_name: String,
    pub category: PlantCategory,
    pub description: String,
    pub care_level: CareLevel,
    pub water_needs: WaterNeeds,
    pub sun_requirement: SunRequirement,
    /// Free text with units, e.g. "15-25 m".
    pub max_height: String,
    pub growth_rate: GrowthRate,
    pub urban_benefits: Vec<UrbanBenefit>,
    pub best_locations: Vec<UrbanLocation>,
    pub planting_seasons: Vec<Season>,
    pub icon: String,
}

/// One plant selection within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlant {
    pub id: Uuid,
    pub plant_id: Uuid,
    // Copied from the catalog so the line still reads well if the plant disappears
    #[serde(default)]
    pub plant_name: String,
    pub quantity: u32,
    pub is_planted: bool,
    pub planted_date: Option<DateTime<Utc>>,
}

impl ProjectPlant {
    pub fn new(plant: &Plant, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            plant_id: plant.id,
            plant_name: plant.name.clone(),
            quantity,
            is_planted: false,
            planted_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "projectDescription", default)]
    pub description: String,
    #[serde(default)]
    pub location_type: UrbanLocation,
    /// Square meters; zero when unknown.
    #[serde(default, deserialize_with = "area_or_zero")]
    pub area: f64,
    #[serde(default)]
    pub plants: Vec<ProjectPlant>,
    #[serde(rename = "createdDate")]
    pub created_at: DateTime<Utc>,
    pub target_completion_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub notes: String,
}

/// Older files may hold `null` here, which is how a NaN area serializes.
fn area_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self::new_at(name, Utc::now())
    }

    /// A project created at `created_at`, for callers that own a clock.
    pub fn new_at(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            location_type: UrbanLocation::default(),
            area: 0.0,
            plants: Vec::new(),
            created_at,
            target_completion_date: None,
            status: ProjectStatus::Planning,
            notes: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: UrbanLocation) -> Self {
        self.location_type = location;
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    pub fn with_target(mut self, target: NaiveDate) -> Self {
        self.target_completion_date = Some(target);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn line_for(&self, plant_id: &Uuid) -> Option<&ProjectPlant> {
        self.plants.iter().find(|line| &line.plant_id == plant_id)
    }

    pub fn line_for_mut(&mut self, plant_id: &Uuid) -> Option<&mut ProjectPlant> {
        self.plants.iter_mut().find(|line| &line.plant_id == plant_id)
    }

    /// Adds `quantity` of `plant`. Returns true when an existing line absorbed it.
    pub fn add_plant(&mut self, plant: &Plant, quantity: u32) -> bool {
        if let Some(line) = self.line_for_mut(&plant.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return true;
        }
        self.plants.push(ProjectPlant::new(plant, quantity));
        false
    }

    pub fn remove_line(&mut self, line_id: &Uuid) -> Option<ProjectPlant> {
        let pos = self.plants.iter().position(|line| &line.id == line_id)?;
        Some(self.plants.remove(pos))
    }

    /// Sets the quantity for a listed plant. Zero removes the line.
    pub fn set_quantity(&mut self, plant_id: &Uuid, quantity: u32) -> bool {
        if quantity == 0 {
            let before = self.plants.len();
            self.plants.retain(|line| &line.plant_id != plant_id);
            return self.plants.len() != before;
        }
        match self.line_for_mut(plant_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Marks a listed plant as planted (stamping `at`) or not planted.
    /// The stamp is only taken on the not-planted to planted transition.
    pub fn set_planted(&mut self, plant_id: &Uuid, planted: bool, at: DateTime<Utc>) -> bool {
        let Some(line) = self.line_for_mut(plant_id) else {
            return false;
        };
        if planted && !line.is_planted {
            line.planted_date = Some(at);
        } else if !planted {
            line.planted_date = None;
        }
        line.is_planted = planted;
        true
    }

    /// Collapses lines sharing a plant id into the first one, summing quantities.
    /// Returns how many lines were folded away.
    pub fn merge_duplicate_plants(&mut self) -> usize {
        let mut merged: Vec<ProjectPlant> = Vec::with_capacity(self.plants.len());
        let mut folded = 0;
        for line in self.plants.drain(..) {
            match merged.iter_mut().find(|m| m.plant_id == line.plant_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                    folded += 1;
                }
                None => merged.push(line),
            }
        }
        self.plants = merged;
        folded
    }

    pub fn species_count(&self) -> usize {
        self.plants.len()
    }

    pub fn total_units(&self) -> u64 {
        self.plants.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn planted_units(&self) -> u64 {
        self.plants
            .iter()
            .filter(|line| line.is_planted)
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Fraction of units planted, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let total = self.total_units();
        if total == 0 {
            return 0.0;
        }
        self.planted_units() as f64 / total as f64
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub activity_type: CareActivity,
    /// Free text; does not have to name a catalog plant.
    pub plant_name: String,
    /// Links to a project by name, not by id.
    pub project_name: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub location: String,
}

impl JournalEntry {
    pub fn new(activity_type: CareActivity, plant_name: impl Into<String>) -> Self {
        Self::new_at(activity_type, plant_name, Utc::now())
    }

    pub fn new_at(
        activity_type: CareActivity,
        plant_name: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            activity_type,
            plant_name: plant_name.into(),
            project_name: None,
            notes: String::new(),
            location: String::new(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_project(mut self, project_name: impl Into<String>) -> Self {
        self.project_name = Some(project_name.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}
