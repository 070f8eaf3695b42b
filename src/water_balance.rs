use serde::Deserialize;
use tracing::{debug, trace};

use crate::crop::CropProfile;
use crate::daily_inputs::DailySeries;
use crate::error::ScheduleError;
use crate::schedule::{DailyRecord, round2};
use crate::soil::SoilProfile;

/// Sign of the daily soil water change fed into the cumulative deficit.
///
/// `SurplusPositive` keeps the historical arithmetic `rainfall - ETc`, under
/// which a dry spell drives the running total negative and irrigation fires
/// only once rainfall has outpaced demand by more than the allowable
/// depletion. `DepletionPositive` uses `ETc - rainfall`, so irrigation fires
/// when demand outpaces rainfall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeficitConvention {
    #[default]
    SurplusPositive,
    DepletionPositive,
}

impl DeficitConvention {
    // Contribution of one day to the cumulative deficit [mm]
    pub fn daily_change(self, effective_rainfall: f64, etc: f64) -> f64 {
        match self {
            DeficitConvention::SurplusPositive => effective_rainfall - etc,
            DeficitConvention::DepletionPositive => etc - effective_rainfall,
        }
    }
}

// Unrounded outcome of one simulated day
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DayBalance {
    pub(crate) etc: f64,                // Crop evapotranspiration [mm/day]
    pub(crate) change: f64,             // Contribution to the deficit [mm]
    pub(crate) cumulative_deficit: f64, // Running deficit after any reset [mm]
    pub(crate) net_irrigation: f64,     // Applied depth [mm]
    pub(crate) irrigation_required: bool,
}

/// Daily soil water balance for one crop on one soil.
///
/// The allowable depletion threshold is fixed for the whole season. The
/// cumulative deficit lives only for the duration of [`WaterBalance::run`].
#[derive(Debug, Clone, Copy)]
pub struct WaterBalance {
    max_allowable_depletion: f64, // Irrigation threshold and applied depth [mm]
    convention: DeficitConvention,
}

impl WaterBalance {
    pub fn new(soil: &SoilProfile, crop: &CropProfile, convention: DeficitConvention) -> Self {
        WaterBalance {
            max_allowable_depletion: soil.max_allowable_depletion(crop.root_depth),
            convention,
        }
    }

    pub fn max_allowable_depletion(&self) -> f64 {
        self.max_allowable_depletion
    }

    pub fn convention(&self) -> DeficitConvention {
        self.convention
    }

    // Advance the balance by one day starting from `cumulative_deficit`
    pub(crate) fn step(&self, cumulative_deficit: f64, kc: f64, eto: f64, rainfall: f64) -> DayBalance {
        let etc = kc * eto;
        let effective_rainfall = rainfall.max(0.0); // No interception or runoff losses
        let change = self.convention.daily_change(effective_rainfall, etc);
        let cumulative = cumulative_deficit + change;

        if cumulative > self.max_allowable_depletion {
            DayBalance {
                etc,
                change,
                cumulative_deficit: 0.0,
                net_irrigation: self.max_allowable_depletion,
                irrigation_required: true,
            }
        } else {
            DayBalance {
                etc,
                change,
                cumulative_deficit: cumulative,
                net_irrigation: 0.0,
                irrigation_required: false,
            }
        }
    }

    /// Simulate every stage day in order and emit one record per day.
    ///
    /// # Errors
    /// [`ScheduleError::ScheduleLengthMismatch`] if either daily series is
    /// shorter than the crop's total stage days. The check runs before the
    /// first day so no partial schedule is produced.
    pub fn run(
        &self,
        crop: &CropProfile,
        daily_etr: &DailySeries,
        daily_rainfall: &DailySeries,
    ) -> Result<Vec<DailyRecord>, ScheduleError> {
        let required = crop.total_days();
        for (series, data) in [("ETr", daily_etr), ("rainfall", daily_rainfall)] {
            if data.len() < required {
                return Err(ScheduleError::ScheduleLengthMismatch {
                    series,
                    available: data.len(),
                    required,
                });
            }
        }

        let mut records = Vec::with_capacity(required);
        let mut cumulative_deficit = 0.0;
        let mut day_index = 0;

        for stage in &crop.stages {
            for _ in 0..stage.days {
                let eto = daily_etr.values()[day_index];
                let rainfall = daily_rainfall.values()[day_index];
                let balance = self.step(cumulative_deficit, stage.kc, eto, rainfall);
                cumulative_deficit = balance.cumulative_deficit;

                if balance.irrigation_required {
                    debug!(
                        day = day_index + 1,
                        stage = %stage.name,
                        depth_mm = balance.net_irrigation,
                        "irrigation triggered"
                    );
                }
                trace!(
                    day = day_index + 1,
                    etc = balance.etc,
                    change = balance.change,
                    cumulative = balance.cumulative_deficit,
                    "water balance step"
                );

                records.push(DailyRecord {
                    day: day_index + 1,
                    growth_stage: stage.name.clone(),
                    crop_type: crop.crop_type.clone(),
                    kc: stage.kc,
                    eto,
                    etc: balance.etc,
                    rainfall,
                    net_irrigation: round2(balance.net_irrigation),
                    cumulative_deficit: round2(balance.cumulative_deficit),
                    irrigation_required: balance.irrigation_required,
                });
                day_index += 1;
            }
        }
        Ok(records)
    }
}

/// Run the water balance for `crop` on `soil` over the given daily series.
pub fn simulate(
    soil: &SoilProfile,
    crop: &CropProfile,
    daily_etr: &DailySeries,
    daily_rainfall: &DailySeries,
    convention: DeficitConvention,
) -> Result<Vec<DailyRecord>, ScheduleError> {
    WaterBalance::new(soil, crop, convention).run(crop, daily_etr, daily_rainfall)
}
