//! # Plant Catalog
//!
//! The built-in, read-only list of reference plants. It is compiled into the
//! binary and materialized once, on first access.
//!
//! Plant ids are UUIDv5 values derived from the scientific name, so they are the
//! same on every launch. Favorites and project lines persist plant ids, and they
//! would dangle if ids were minted randomly at startup.

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::model::{
    CareLevel, GrowthRate, Plant, PlantCategory, Season, SunRequirement, UrbanBenefit,
    UrbanLocation, WaterNeeds,
};

use CareLevel as Care;
use PlantCategory as Cat;
use Season::*;
use SunRequirement as Sun;
use UrbanBenefit::*;
use UrbanLocation::*;

const CATALOG_NAMESPACE: Uuid = Uuid::from_u128(0x6b1f_2c3e_8d4a_4f5b_9e0c_7a2d_1b3c_4e5f);

struct Seed {
    name: &'static str,
    scientific_name: &'static str,
    category: PlantCategory,
    description: &'static str,
    care_level: CareLevel,
    water_needs: WaterNeeds,
    sun_requirement: SunRequirement,
    max_height: &'static str,
    growth_rate: GrowthRate,
    urban_benefits: &'static [UrbanBenefit],
    best_locations: &'static [UrbanLocation],
    planting_seasons: &'static [Season],
    icon: &'static str,
}

impl From<&Seed> for Plant {
    fn from(seed: &Seed) -> Self {
        Plant {
            id: plant_id(seed.scientific_name),
            name: seed.name.to_string(),
            scientific_name: seed.scientific_name.to_string(),
            category: seed.category,
            description: seed.description.to_string(),
            care_level: seed.care_level,
            water_needs: seed.water_needs,
            sun_requirement: seed.sun_requirement,
            max_height: seed.max_height.to_string(),
            growth_rate: seed.growth_rate,
            urban_benefits: seed.urban_benefits.to_vec(),
            best_locations: seed.best_locations.to_vec(),
            planting_seasons: seed.planting_seasons.to_vec(),
            icon: seed.icon.to_string(),
        }
    }
}

/// The stable id for a catalog plant with the given scientific name.
pub fn plant_id(scientific_name: &str) -> Uuid {
    Uuid::new_v5(&CATALOG_NAMESPACE, scientific_name.as_bytes())
}

const SEEDS: &[Seed] = &[
    Seed {
        name: "London Plane",
        scientific_name: "Platanus × acerifolia",
        category: Cat::Tree,
        description: "A classic street tree that tolerates pollution, compacted soil and heavy pruning. Its peeling bark sheds grime.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Moderate,
        sun_requirement: Sun::FullSun,
        max_height: "20-30 m",
        growth_rate: GrowthRate::Fast,
        urban_benefits: &[AirPurification, ShadeCooling, NoiseReduction],
        best_locations: &[Streetside, Park, Highway],
        planting_seasons: &[Autumn, Winter],
        icon: "🌳",
    },
    Seed {
        name: "Ginkgo",
        scientific_name: "Ginkgo biloba",
        category: Cat::Tree,
        description: "Ancient, pest-free and extremely tolerant of urban stress. Plant male cultivars to avoid messy fruit.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Low,
        sun_requirement: Sun::FullSun,
        max_height: "15-25 m",
        growth_rate: GrowthRate::Slow,
        urban_benefits: &[AirPurification, Aesthetics, ShadeCooling],
        best_locations: &[Streetside, Plaza, Park],
        planting_seasons: &[Spring, Autumn],
        icon: "🍂",
    },
    Seed {
        name: "Little-leaf Linden",
        scientific_name: "Tilia cordata",
        category: Cat::Tree,
        description: "Dense canopy with fragrant early-summer flowers that feed pollinators. Handles pruning into formal shapes.",
        care_level: Care::Medium,
        water_needs: WaterNeeds::Moderate,
        sun_requirement: Sun::PartialShade,
        max_height: "15-20 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[ShadeCooling, WildlifeHabitat, Aesthetics],
        best_locations: &[Streetside, Park, Residential],
        planting_seasons: &[Autumn, Spring],
        icon: "🌳",
    },
    Seed {
        name: "Honey Locust",
        scientific_name: "Gleditsia triacanthos var. inermis",
        category: Cat::Tree,
        description: "Fine, airy foliage casts dappled shade that lets lawns grow beneath. Salt and drought tolerant.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Low,
        sun_requirement: Sun::FullSun,
        max_height: "12-20 m",
        growth_rate: GrowthRate::Fast,
        urban_benefits: &[ShadeCooling, AirPurification],
        best_locations: &[Plaza, Streetside, Highway],
        planting_seasons: &[Spring, Autumn],
        icon: "🌲",
    },
    Seed {
        name: "Red Maple",
        scientific_name: "Acer rubrum",
        category: Cat::Tree,
        description: "Brilliant autumn colour and good tolerance of wet soils. Prefers slightly acidic ground.",
        care_level: Care::Medium,
        water_needs: WaterNeeds::High,
        sun_requirement: Sun::Adaptable,
        max_height: "12-18 m",
        growth_rate: GrowthRate::Fast,
        urban_benefits: &[Aesthetics, ShadeCooling, StormwaterManagement],
        best_locations: &[Park, Residential],
        planting_seasons: &[Autumn, Spring],
        icon: "🍁",
    },
    Seed {
        name: "Common Hawthorn",
        scientific_name: "Crataegus monogyna",
        category: Cat::Shrub,
        description: "Thorny, tough and covered in white blossom in spring. Berries sustain birds through winter.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Low,
        sun_requirement: Sun::Adaptable,
        max_height: "5-8 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[WildlifeHabitat, NoiseReduction, Aesthetics],
        best_locations: &[Highway, Park, BikePath],
        planting_seasons: &[Autumn, Winter],
        icon: "🌿",
    },
    Seed {
        name: "Privet",
        scientific_name: "Ligustrum ovalifolium",
        category: Cat::Shrub,
        description: "Semi-evergreen hedge that traps dust and dampens traffic noise. Takes clipping well.",
        care_level: Care::Medium,
        water_needs: WaterNeeds::Moderate,
        sun_requirement: Sun::Adaptable,
        max_height: "3-4 m",
        growth_rate: GrowthRate::Fast,
        urban_benefits: &[NoiseReduction, AirPurification],
        best_locations: &[Streetside, Residential, Highway],
        planting_seasons: &[Autumn, Spring],
        icon: "🌿",
    },
    Seed {
        name: "Lavender",
        scientific_name: "Lavandula angustifolia",
        category: Cat::Shrub,
        description: "Aromatic, drought-proof and loved by bees. Thrives in hot, poor, well-drained spots such as rooftops.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Low,
        sun_requirement: Sun::FullSun,
        max_height: "0.5-1 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[WildlifeHabitat, Aesthetics],
        best_locations: &[Rooftop, Plaza, Residential],
        planting_seasons: &[Spring],
        icon: "💜",
    },
    Seed {
        name: "Feather Reed Grass",
        scientific_name: "Calamagrostis × acutiflora",
        category: Cat::Grass,
        description: "Upright ornamental grass that stays tidy all year and handles both wet and dry spells.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Moderate,
        sun_requirement: Sun::FullSun,
        max_height: "1.5-1.8 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[StormwaterManagement, Aesthetics, ErosionControl],
        best_locations: &[Plaza, BikePath, Rooftop],
        planting_seasons: &[Spring, Autumn],
        icon: "🌾",
    },
    Seed {
        name: "Switchgrass",
        scientific_name: "Panicum virgatum",
        category: Cat::Grass,
        description: "Deep-rooted prairie grass used in bioswales and rain gardens to slow and filter runoff.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Low,
        sun_requirement: Sun::FullSun,
        max_height: "1-2 m",
        growth_rate: GrowthRate::Fast,
        urban_benefits: &[StormwaterManagement, ErosionControl, WildlifeHabitat],
        best_locations: &[Highway, BikePath, Park],
        planting_seasons: &[Spring, Summer],
        icon: "🌾",
    },
    Seed {
        name: "Purple Coneflower",
        scientific_name: "Echinacea purpurea",
        category: Cat::Flower,
        description: "Long-blooming perennial that feeds pollinators in summer and birds with its seed heads in winter.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Low,
        sun_requirement: Sun::FullSun,
        max_height: "0.6-1.2 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[WildlifeHabitat, Aesthetics],
        best_locations: &[Park, Rooftop, Residential],
        planting_seasons: &[Spring, Autumn],
        icon: "🌸",
    },
    Seed {
        name: "Black-eyed Susan",
        scientific_name: "Rudbeckia hirta",
        category: Cat::Flower,
        description: "Cheerful, heat tolerant and quick to establish in verges and median strips.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Moderate,
        sun_requirement: Sun::FullSun,
        max_height: "0.3-0.9 m",
        growth_rate: GrowthRate::Fast,
        urban_benefits: &[Aesthetics, WildlifeHabitat],
        best_locations: &[Streetside, BikePath, Park],
        planting_seasons: &[Spring],
        icon: "🌼",
    },
    Seed {
        name: "Boston Ivy",
        scientific_name: "Parthenocissus tricuspidata",
        category: Cat::Vine,
        description: "Self-clinging climber that cools facades in summer and turns crimson in autumn.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Moderate,
        sun_requirement: Sun::Adaptable,
        max_height: "15-20 m",
        growth_rate: GrowthRate::Fast,
        urban_benefits: &[ShadeCooling, AirPurification, Aesthetics],
        best_locations: &[VerticalGarden, Residential],
        planting_seasons: &[Spring, Autumn],
        icon: "🍃",
    },
    Seed {
        name: "Star Jasmine",
        scientific_name: "Trachelospermum jasminoides",
        category: Cat::Vine,
        description: "Evergreen twining vine with scented white flowers for trellises and green walls.",
        care_level: Care::Medium,
        water_needs: WaterNeeds::Moderate,
        sun_requirement: Sun::PartialShade,
        max_height: "6-9 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[Aesthetics, AirPurification],
        best_locations: &[VerticalGarden, Plaza],
        planting_seasons: &[Spring],
        icon: "🌺",
    },
    Seed {
        name: "Stonecrop",
        scientific_name: "Sedum album",
        category: Cat::GroundCover,
        description: "Succulent mat for extensive green roofs. Stores water in its leaves and survives thin substrate.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Low,
        sun_requirement: Sun::FullSun,
        max_height: "0.1 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[StormwaterManagement, ShadeCooling],
        best_locations: &[Rooftop],
        planting_seasons: &[Spring, Summer],
        icon: "🪴",
    },
    Seed {
        name: "Creeping Thyme",
        scientific_name: "Thymus serpyllum",
        category: Cat::GroundCover,
        description: "Low, walkable carpet for gaps between pavers. Flowers attract bees.",
        care_level: Care::Low,
        water_needs: WaterNeeds::Low,
        sun_requirement: Sun::FullSun,
        max_height: "0.05-0.1 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[ErosionControl, WildlifeHabitat],
        best_locations: &[Plaza, Residential, Rooftop],
        planting_seasons: &[Spring],
        icon: "🌱",
    },
    Seed {
        name: "Hart's-tongue Fern",
        scientific_name: "Asplenium scolopendrium",
        category: Cat::GroundCover,
        description: "Glossy evergreen fern for the deep shade of courtyards and north-facing walls.",
        care_level: Care::Medium,
        water_needs: WaterNeeds::High,
        sun_requirement: Sun::FullShade,
        max_height: "0.3-0.6 m",
        growth_rate: GrowthRate::Slow,
        urban_benefits: &[Aesthetics, ErosionControl],
        best_locations: &[VerticalGarden, Residential],
        planting_seasons: &[Spring, Autumn],
        icon: "🌿",
    },
    Seed {
        name: "Soft Rush",
        scientific_name: "Juncus effusus",
        category: Cat::Grass,
        description: "Wetland plant for rain gardens and retention basins that tolerates standing water.",
        care_level: Care::Low,
        water_needs: WaterNeeds::VeryHigh,
        sun_requirement: Sun::Adaptable,
        max_height: "0.6-1.2 m",
        growth_rate: GrowthRate::Moderate,
        urban_benefits: &[StormwaterManagement, WildlifeHabitat],
        best_locations: &[Park, Highway],
        planting_seasons: &[Spring, Summer],
        icon: "🌾",
    },
];

static CATALOG: Lazy<Vec<Plant>> = Lazy::new(|| SEEDS.iter().map(Plant::from).collect());

/// Every catalog plant, in catalog order.
pub fn all() -> &'static [Plant] {
    &CATALOG
}

pub fn by_id(id: &Uuid) -> Option<&'static Plant> {
    all().iter().find(|plant| &plant.id == id)
}

/// Case-insensitive exact match on the common name.
pub fn by_name(name: &str) -> Option<&'static Plant> {
    let wanted = name.trim().to_lowercase();
    all().iter().find(|plant| plant.name.to_lowercase() == wanted)
}

/// Filters applied by [`search`]. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantFilter {
    pub category: Option<PlantCategory>,
    pub care_level: Option<CareLevel>,
    pub sun_requirement: Option<SunRequirement>,
    /// Case-insensitive substring of the common or scientific name.
    pub text: Option<String>,
}

impl PlantFilter {
    pub fn matches(&self, plant: &Plant) -> bool {
        if self.category.is_some_and(|c| c != plant.category) {
            return false;
        }
        if self.care_level.is_some_and(|c| c != plant.care_level) {
            return false;
        }
        if self.sun_requirement.is_some_and(|s| s != plant.sun_requirement) {
            return false;
        }
        match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => {
                let needle = text.to_lowercase();
                plant.name.to_lowercase().contains(&needle)
                    || plant.scientific_name.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }
}

/// Catalog plants matching `filter`, in catalog order.
pub fn search(filter: &PlantFilter) -> Vec<&'static Plant> {
    all().iter().filter(|plant| filter.matches(plant)).collect()
}
