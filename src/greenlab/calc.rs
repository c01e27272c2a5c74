//! # Planning Calculators
//!
//! Stateless arithmetic for planning a planting. Every calculator validates its
//! inputs and returns a [`CalcError`] instead of a number when it cannot produce a
//! meaningful one, so NaN and infinity never reach the caller.
//!
//! Rounding policies:
//! - spacing counts round up (`ceil`) before adding the edge plant,
//! - street tree counts round down (`floor`), since a partial gap cannot hold a tree,
//! - a month of watering is 4.33 weeks.

use crate::error::CalcError;
use serde::Serialize;

pub type CalcResult<T> = std::result::Result<T, CalcError>;

pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const DAYS_PER_WEEK: f64 = 7.0;

pub const GOOD_COVERAGE_PERCENT: f64 = 30.0;
pub const MODERATE_COVERAGE_PERCENT: f64 = 15.0;

fn finite(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::Negative { field });
    }
    Ok(value)
}

fn positive(field: &'static str, value: f64) -> CalcResult<f64> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::NotPositive { field });
    }
    Ok(value)
}

fn in_range(value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::OutOfRange)
    }
}

/// Converts a non-negative whole-valued float to a count.
fn count(value: f64) -> CalcResult<u64> {
    if !value.is_finite() || value < 0.0 || value >= u64::MAX as f64 {
        return Err(CalcError::OutOfRange);
    }
    Ok(value as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpacingEstimate {
    pub plants_per_row: u64,
    pub rows: u64,
    pub total: u64,
    /// Square meters.
    pub area: f64,
}

/// Plants needed for a `length` × `width` bed on a square grid of `spacing`.
pub fn plant_spacing(length: f64, width: f64, spacing: f64) -> CalcResult<SpacingEstimate> {
    let length = non_negative("length", length)?;
    let width = non_negative("width", width)?;
    let spacing = positive("spacing", spacing)?;

    let plants_per_row = count((length / spacing).ceil())?
        .checked_add(1)
        .ok_or(CalcError::OutOfRange)?;
    let rows = count((width / spacing).ceil())?
        .checked_add(1)
        .ok_or(CalcError::OutOfRange)?;
    let total = plants_per_row
        .checked_mul(rows)
        .ok_or(CalcError::OutOfRange)?;

    Ok(SpacingEstimate {
        plants_per_row,
        rows,
        total,
        area: in_range(length * width)?,
    })
}

/// Litres of water.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaterEstimate {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
}

pub fn watering(
    plant_count: f64,
    litres_per_plant: f64,
    waterings_per_week: f64,
) -> CalcResult<WaterEstimate> {
    let plant_count = non_negative("plant count", plant_count)?;
    let litres_per_plant = non_negative("litres per plant", litres_per_plant)?;
    let per_week = positive("waterings per week", waterings_per_week)?;

    let weekly = in_range(plant_count * litres_per_plant * per_week)?;
    Ok(WaterEstimate {
        daily: weekly / DAYS_PER_WEEK,
        weekly,
        monthly: in_range(weekly * WEEKS_PER_MONTH)?,
    })
}

/// Cubic meters of mulch for `area` m² at `depth_cm`.
pub fn mulch_volume(area: f64, depth_cm: f64) -> CalcResult<f64> {
    let area = non_negative("area", area)?;
    let depth_cm = non_negative("depth", depth_cm)?;
    in_range(area * (depth_cm / 100.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeEstimate {
    pub per_side: u64,
    pub total: u64,
}

/// Street trees along `length` at `spacing`, one row or one row per side.
pub fn tree_count(length: f64, spacing: f64, both_sides: bool) -> CalcResult<TreeEstimate> {
    let length = non_negative("street length", length)?;
    let spacing = positive("spacing", spacing)?;

    let per_side = count((length / spacing).floor())?
        .checked_add(1)
        .ok_or(CalcError::OutOfRange)?;
    let total = if both_sides {
        per_side.checked_mul(2).ok_or(CalcError::OutOfRange)?
    } else {
        per_side
    };
    Ok(TreeEstimate { per_side, total })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoverageTier {
    Low,
    Moderate,
    Good,
}

impl CoverageTier {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= GOOD_COVERAGE_PERCENT {
            CoverageTier::Good
        } else if percentage >= MODERATE_COVERAGE_PERCENT {
            CoverageTier::Moderate
        } else {
            CoverageTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoverageTier::Low => "Low coverage",
            CoverageTier::Moderate => "Moderate coverage",
            CoverageTier::Good => "Good coverage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageEstimate {
    pub percentage: f64,
    pub tier: CoverageTier,
}

/// Share of `total_area` that is green.
pub fn green_coverage(total_area: f64, green_area: f64) -> CalcResult<CoverageEstimate> {
    let total_area = positive("total area", total_area)?;
    let green_area = non_negative("green area", green_area)?;
    if green_area > total_area {
        return Err(CalcError::ExceedsTotal);
    }
    let percentage = (green_area / total_area) * 100.0;
    Ok(CoverageEstimate {
        percentage,
        tier: CoverageTier::for_percentage(percentage),
    })
}

/// Square meters covered by `plant_count` plants of `coverage_per_plant` m² each.
pub fn area_coverage(plant_count: f64, coverage_per_plant: f64) -> CalcResult<f64> {
    let plant_count = non_negative("plant count", plant_count)?;
    let coverage_per_plant = non_negative("coverage per plant", coverage_per_plant)?;
    in_range(plant_count * coverage_per_plant)
}
