use serde::Deserialize;

use crate::error::ScheduleError;

// One growth stage: crop coefficient held constant for a number of days
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrowthStage {
    pub name: String, // Stage label, e.g. "initial" or "mid-season"
    pub kc: f64,      // Crop coefficient [-]
    pub days: usize,  // Stage duration [day]
}

impl GrowthStage {
    pub fn new(name: impl Into<String>, kc: f64, days: usize) -> Self {
        GrowthStage {
            name: name.into(),
            kc,
            days,
        }
    }
}

/// A crop with its root depth and growth stages in the order they occur.
///
/// Stages are simulated in declared order; the sum of stage days is the
/// number of days the water balance consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct CropProfile {
    pub crop_type: String,
    pub root_depth: f64, // Effective root depth [m]
    pub stages: Vec<GrowthStage>,
}

impl CropProfile {
    pub fn new(
        crop_type: impl Into<String>,
        root_depth: f64,
        stages: Vec<GrowthStage>,
    ) -> Result<Self, ScheduleError> {
        let crop = CropProfile {
            crop_type: crop_type.into(),
            root_depth,
            stages,
        };
        crop.validate()?;
        Ok(crop)
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        if !(self.root_depth.is_finite() && self.root_depth > 0.0) {
            return Err(ScheduleError::invalid_profile(format!(
                "root depth of {} must be positive, got {}",
                self.crop_type, self.root_depth
            )));
        }
        if self.stages.is_empty() {
            return Err(ScheduleError::invalid_profile(format!(
                "{} has no growth stages",
                self.crop_type
            )));
        }
        for stage in &self.stages {
            if !(stage.kc.is_finite() && stage.kc >= 0.0) {
                return Err(ScheduleError::invalid_profile(format!(
                    "kc of {} stage '{}' must be non-negative, got {}",
                    self.crop_type, stage.name, stage.kc
                )));
            }
            if stage.days == 0 {
                return Err(ScheduleError::invalid_profile(format!(
                    "{} stage '{}' must last at least one day",
                    self.crop_type, stage.name
                )));
            }
        }
        Ok(())
    }

    // Season length in days as declared by the stages
    pub fn total_days(&self) -> usize {
        self.stages.iter().map(|s| s.days).sum()
    }
}
