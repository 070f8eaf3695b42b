//! TOML run configuration: season, climate, and the soil and crop tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::crop::{CropProfile, GrowthStage};
use crate::daily_inputs::{DEFAULT_REFERENCE_YEAR, MonthlySeries, Season};
use crate::error::ScheduleError;
use crate::penman::{PenmanObservation, monthly_etr};
use crate::schedule::SeasonInputs;
use crate::soil::SoilProfile;
use crate::water_balance::DeficitConvention;

/// Top-level run configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Soil identifier looked up in `soils`.
    #[serde(default)]
    pub soil_type: Option<String>,

    /// Crop identifier looked up in `crops`.
    #[serde(default)]
    pub crop_type: Option<String>,

    /// CSV report path; stdout when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Sign of the daily deficit change.
    #[serde(default)]
    pub deficit_convention: DeficitConvention,

    #[serde(default)]
    pub season: SeasonToml,

    pub climate: ClimateToml,

    #[serde(default)]
    pub soils: BTreeMap<String, SoilProfile>,

    #[serde(default)]
    pub crops: BTreeMap<String, CropToml>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonToml {
    #[serde(default = "default_season_name")]
    pub name: String,
    #[serde(default = "default_months")]
    pub months: Vec<u32>,
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,
}

impl Default for SeasonToml {
    fn default() -> Self {
        Self {
            name: default_season_name(),
            months: default_months(),
            reference_year: default_reference_year(),
        }
    }
}

fn default_season_name() -> String {
    "Kharif".to_string()
}
fn default_months() -> Vec<u32> {
    vec![4, 5, 6, 7, 8, 9]
}
fn default_reference_year() -> i32 {
    DEFAULT_REFERENCE_YEAR
}

/// Monthly climate for the season. ETr comes either as explicit values or
/// as per-month Penman observations, never both.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateToml {
    #[serde(default)]
    pub etr: Option<Vec<f64>>,
    #[serde(default)]
    pub penman: Vec<PenmanObservation>,
    pub rainfall: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CropToml {
    pub root_depth: f64,
    pub stages: Vec<GrowthStage>,
}

// Identifiers match case-insensitively, ignoring surrounding whitespace
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl RunConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ScheduleError> {
        toml::from_str(text).map_err(|e| ScheduleError::config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        let text = fs::read_to_string(path).map_err(|e| {
            ScheduleError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(
            path = %path.display(),
            soils = config.soils.len(),
            crops = config.crops.len(),
            "loaded run configuration"
        );
        Ok(config)
    }

    pub fn season(&self) -> Season {
        Season::new(
            self.season.name.clone(),
            self.season.months.clone(),
            self.season.reference_year,
        )
    }

    /// Validated soil profile for an identifier.
    pub fn soil(&self, name: &str) -> Result<SoilProfile, ScheduleError> {
        let wanted = normalize(name);
        let soil = self
            .soils
            .iter()
            .find(|(key, _)| normalize(key) == wanted)
            .map(|(_, soil)| *soil)
            .ok_or(ScheduleError::UnknownSoil { name: wanted })?;
        soil.validate()?;
        Ok(soil)
    }

    /// Validated crop profile for an identifier, stages in declared order.
    pub fn crop(&self, name: &str) -> Result<CropProfile, ScheduleError> {
        let wanted = normalize(name);
        let (_, crop) = self
            .crops
            .iter()
            .find(|(key, _)| normalize(key) == wanted)
            .ok_or_else(|| ScheduleError::UnknownCrop {
                name: wanted.clone(),
            })?;
        CropProfile::new(wanted, crop.root_depth, crop.stages.clone())
    }

    pub fn soil_names(&self) -> impl Iterator<Item = &str> {
        self.soils.keys().map(String::as_str)
    }

    pub fn crop_names(&self) -> impl Iterator<Item = &str> {
        self.crops.keys().map(String::as_str)
    }

    /// Monthly ETr, computed from Penman observations when no explicit
    /// values are given.
    pub fn monthly_etr(&self) -> Result<MonthlySeries, ScheduleError> {
        match (&self.climate.etr, self.climate.penman.is_empty()) {
            (Some(_), false) => Err(ScheduleError::config(
                "give either [climate] etr or [[climate.penman]] observations, not both",
            )),
            (Some(etr), true) => Ok(MonthlySeries::new(etr.clone())),
            (None, false) => Ok(MonthlySeries::new(monthly_etr(&self.climate.penman)?)),
            (None, true) => Err(ScheduleError::config(
                "[climate] needs etr values or [[climate.penman]] observations",
            )),
        }
    }

    pub fn monthly_rainfall(&self) -> MonthlySeries {
        MonthlySeries::new(self.climate.rainfall.clone())
    }

    /// Resolve everything a scheduling run needs. Explicit identifiers take
    /// precedence over `soil_type` and `crop_type`.
    pub fn season_inputs(
        &self,
        soil_type: Option<&str>,
        crop_type: Option<&str>,
    ) -> Result<SeasonInputs, ScheduleError> {
        let soil_name = soil_type
            .or(self.soil_type.as_deref())
            .ok_or_else(|| ScheduleError::config("no soil type selected"))?;
        let crop_name = crop_type
            .or(self.crop_type.as_deref())
            .ok_or_else(|| ScheduleError::config("no crop type selected"))?;

        Ok(SeasonInputs {
            season: self.season(),
            soil: self.soil(soil_name)?,
            crop: self.crop(crop_name)?,
            monthly_etr: self.monthly_etr()?,
            monthly_rainfall: self.monthly_rainfall(),
            convention: self.deficit_convention,
        })
    }
}
