use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "greenlab", version = VERSION)]
#[command(about = "Plant catalog, project planner and care journal for urban greening", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding projects, journal and favorites
    #[arg(long, global = true, env = "GREENLAB_DATA")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the plant catalog
    Catalog {
        /// Text to find in common or scientific names
        #[arg(short, long)]
        search: Option<String>,

        /// Tree, Shrub, Grass, Perennial, Succulent, Flower, Vine, Ground Cover
        #[arg(short, long)]
        category: Option<String>,

        /// Low, Medium, High
        #[arg(long)]
        care: Option<String>,

        /// Full Sun, Partial Shade, Full Shade, Adaptable
        #[arg(long)]
        sun: Option<String>,
    },

    /// Show everything about one plant
    Plant {
        /// Plant name or id
        plant: String,
    },

    /// Add a plant to favorites, or remove it if already there
    Fav {
        /// Plant name or id
        plant: String,
    },

    /// List favorite plants
    Favs,

    /// Manage planting projects
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Keep the care journal
    #[command(subcommand)]
    Journal(JournalCommand),

    /// Planning calculators
    #[command(subcommand)]
    Calc(CalcCommand),

    /// Get or set configuration
    Config {
        /// Configuration key (recent-limit, max-quantity)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Delete all projects, journal entries and favorites
    Reset {
        /// Required, to avoid accidents
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project
    #[command(alias = "n")]
    New {
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Streetside, Park, Plaza, Rooftop, Vertical Garden, Bike Path, Highway Buffer, Residential Area
        #[arg(short, long)]
        location: Option<String>,

        /// Area in square meters
        #[arg(short, long)]
        area: Option<f64>,

        /// Target completion date (YYYY-MM-DD)
        #[arg(short, long)]
        target: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// List projects
    #[command(alias = "ls")]
    List {
        /// Only planning and in-progress projects
        #[arg(long, conflicts_with_all = ["recent", "status"])]
        active: bool,

        /// Only the most recently created projects
        #[arg(long, conflicts_with = "status")]
        recent: bool,

        /// Only projects with this status
        #[arg(long)]
        status: Option<String>,
    },

    /// Show a project and its plants
    #[command(alias = "v")]
    Show {
        /// Project number, as shown by `project list`
        index: usize,
    },

    /// Add plants to a project
    AddPlant {
        index: usize,

        /// Plant name or id
        plant: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },

    /// Set how many of a plant a project needs (0 removes it)
    Qty {
        index: usize,
        plant: String,
        quantity: u32,
    },

    /// Mark a plant as planted
    Planted {
        index: usize,
        plant: String,

        /// Mark as not planted instead
        #[arg(long)]
        undo: bool,
    },

    /// Change a project's status
    Status {
        index: usize,

        /// Planning, In Progress, Completed, On Hold
        status: String,
    },

    /// Delete a project
    #[command(alias = "del")]
    Rm { index: usize },
}

/// Fields shared by `journal add` and `journal edit`.
#[derive(Args, Debug, Default)]
pub struct EntryFields {
    /// Project name this care belongs to
    #[arg(short, long)]
    pub project: Option<String>,

    #[arg(short, long)]
    pub notes: Option<String>,

    #[arg(short, long)]
    pub location: Option<String>,

    /// When the care happened (YYYY-MM-DD or RFC 3339); defaults to now
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    /// Record a care activity
    #[command(alias = "n")]
    Add {
        /// Watering, Pruning, Fertilizing, Pest Control, Planting, Transplanting,
        /// Mulching, Inspection, Soil Testing, General Maintenance
        activity: String,

        /// Plant (or bed) the care was for
        plant: String,

        #[command(flatten)]
        fields: EntryFields,
    },

    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        activity: Option<String>,

        #[arg(short, long)]
        project: Option<String>,

        /// Group entries by day
        #[arg(long, conflicts_with_all = ["activity", "project"])]
        by_day: bool,
    },

    /// Show one entry
    #[command(alias = "v")]
    Show { index: usize },

    /// Change an entry
    #[command(alias = "e")]
    Edit {
        index: usize,

        #[arg(short, long)]
        activity: Option<String>,

        #[arg(long)]
        plant: Option<String>,

        #[command(flatten)]
        fields: EntryFields,
    },

    /// Delete an entry
    #[command(alias = "del")]
    Rm { index: usize },
}

#[derive(Subcommand, Debug)]
pub enum CalcCommand {
    /// Plants needed for a bed on a square grid
    Spacing {
        /// Bed length (m)
        length: f64,
        /// Bed width (m)
        width: f64,
        /// Distance between plants (m)
        spacing: f64,
    },

    /// Water needed per day, week and month
    Water {
        plants: f64,
        /// Litres per plant per watering
        litres: f64,
        /// Waterings per week
        per_week: f64,
    },

    /// Mulch volume for an area
    Mulch {
        /// Area (m²)
        area: f64,
        /// Depth (cm)
        depth: f64,
    },

    /// Street trees along a length
    Trees {
        /// Street length (m)
        length: f64,
        /// Distance between trees (m)
        spacing: f64,
        /// Plant both sides of the street
        #[arg(long)]
        both_sides: bool,
    },

    /// Share of an area that is green
    Coverage {
        /// Total area (m²)
        total: f64,
        /// Green area (m²)
        green: f64,
    },

    /// Area covered by a number of plants
    Area {
        plants: f64,
        /// Coverage per plant (m²)
        per_plant: f64,
    },
}
