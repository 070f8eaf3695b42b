use tracing::info;

use crate::crop::CropProfile;
use crate::daily_inputs::{MonthlySeries, Season, interpolate};
use crate::error::ScheduleError;
use crate::soil::SoilProfile;
use crate::water_balance::{DeficitConvention, WaterBalance};

// Round to two decimals for display, as the schedule reports depths
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// One simulated day of the irrigation schedule
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub day: usize,                // 1-based day of the season
    pub growth_stage: String,      // Stage the day belongs to
    pub crop_type: String,         // Crop identifier
    pub kc: f64,                   // Crop coefficient of the stage [-]
    pub eto: f64,                  // Reference evapotranspiration [mm/day]
    pub etc: f64,                  // Crop evapotranspiration [mm/day]
    pub rainfall: f64,             // Rainfall [mm/day]
    pub net_irrigation: f64,       // Applied depth, rounded to 0.01 [mm]
    pub cumulative_deficit: f64,   // Deficit after the day, rounded to 0.01 [mm]
    pub irrigation_required: bool, // Whether irrigation fired on this day
}

/// The season's daily records in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    season: String,
    records: Vec<DailyRecord>,
}

impl Schedule {
    pub fn new(season: impl Into<String>, records: Vec<DailyRecord>) -> Self {
        Schedule {
            season: season.into(),
            records,
        }
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyRecord> {
        self.records.iter()
    }

    // Number of days on which irrigation fired
    pub fn irrigation_events(&self) -> usize {
        self.records.iter().filter(|r| r.irrigation_required).count()
    }

    // Total applied depth over the season [mm]
    pub fn total_net_irrigation(&self) -> f64 {
        self.records.iter().map(|r| r.net_irrigation).sum()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a DailyRecord;
    type IntoIter = std::slice::Iter<'a, DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Everything one scheduling run needs, validated and read-only.
#[derive(Debug, Clone)]
pub struct SeasonInputs {
    pub season: Season,
    pub soil: SoilProfile,
    pub crop: CropProfile,
    pub monthly_etr: MonthlySeries,
    pub monthly_rainfall: MonthlySeries,
    pub convention: DeficitConvention,
}

/// Interpolate both monthly series and run the water balance once.
///
/// # Errors
/// Propagates [`ScheduleError::InvalidSeries`] from interpolation and
/// [`ScheduleError::ScheduleLengthMismatch`] from the water balance.
pub fn assemble(inputs: &SeasonInputs) -> Result<Schedule, ScheduleError> {
    let daily_etr = interpolate(&inputs.monthly_etr, &inputs.season)?;
    let daily_rainfall = interpolate(&inputs.monthly_rainfall, &inputs.season)?;

    let balance = WaterBalance::new(&inputs.soil, &inputs.crop, inputs.convention);
    let records = balance.run(&inputs.crop, &daily_etr, &daily_rainfall)?;
    let schedule = Schedule::new(inputs.season.name.clone(), records);

    info!(
        season = %schedule.season(),
        crop = %inputs.crop.crop_type,
        days = schedule.len(),
        threshold_mm = balance.max_allowable_depletion(),
        events = schedule.irrigation_events(),
        total_mm = schedule.total_net_irrigation(),
        "assembled irrigation schedule"
    );
    Ok(schedule)
}
