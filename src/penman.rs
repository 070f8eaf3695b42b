/*!
Reference evapotranspiration by the Modified Penman method.

A fixed empirical regression on monthly mean meteorological observations.
The result feeds the monthly ETr series that the scheduler interpolates.

Inputs use the units of the regression: temperature in °C, relative
humidity in %, elevation and anemometer height in m, wind run in km/day,
solar radiation in cal/cm²/day and net radiation in mm/day of equivalent
evaporation. The result is ETr in mm/day.
*/
use serde::Deserialize;

use crate::error::ScheduleError;
use crate::schedule::round2;

// Seconds of daytime (0700-1900) used to turn daytime wind run into m/s
const DAYTIME_SECONDS: f64 = 43_200.0;

// Meteorological observations for one month
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PenmanObservation {
    pub t_max: f64,                // Maximum temperature [°C]
    pub t_min: f64,                // Minimum temperature [°C]
    pub rh_mean: f64,              // Mean relative humidity [%]
    pub elevation: f64,            // Site elevation [m]
    pub anemometer_height: f64,    // Height of wind measurement [m]
    pub day_night_wind_ratio: f64, // Daytime to night-time wind ratio [-]
    pub wind_speed: f64,           // Wind run at anemometer height [km/day]
    pub solar_radiation: f64,      // Incoming solar radiation [cal/cm²/day]
    pub net_radiation: f64,        // Net radiation [mm/day]
}

impl PenmanObservation {
    fn validate(&self) -> Result<(), ScheduleError> {
        if !(self.anemometer_height > 0.0) {
            return Err(ScheduleError::invalid_profile(format!(
                "anemometer height must be positive, got {}",
                self.anemometer_height
            )));
        }
        if self.day_night_wind_ratio < 0.0 {
            return Err(ScheduleError::invalid_profile(format!(
                "day/night wind ratio must be non-negative, got {}",
                self.day_night_wind_ratio
            )));
        }
        Ok(())
    }
}

// Saturation vapour pressure [mbar] at mean temperature t [°C]
fn saturation_vapour_pressure(t: f64) -> f64 {
    33.8639 * ((0.00738 * t + 0.8072).powi(8) - 0.000019 * (1.8 * t + 48.0) + 0.001316)
}

/// ETr [mm/day] for one set of observations.
pub fn modified_penman(obs: &PenmanObservation) -> f64 {
    let t_mean = (obs.t_max + obs.t_min) / 2.0;

    // Wind at 2 m, then the daytime component in m/s
    let u2 = obs.wind_speed * (2.0 / obs.anemometer_height).powf(0.2);
    let ratio = obs.day_night_wind_ratio;
    let u2_day = ratio / (ratio + 1.0) * u2 * (1000.0 / DAYTIME_SECONDS);

    let delta = 2.00 * (0.00738 * t_mean + 0.8072).powi(7) - 0.00116;
    let pressure = 1013.0 - 0.1055 * obs.elevation;
    let latent_heat = 2500.78 - 2.3601 * t_mean;
    let gamma = 1.6134 * (pressure / latent_heat);

    let c1 = delta / (delta + gamma);
    let c2 = 1.0 - c1;

    // cal/cm²/day to mm/day
    let rs = obs.solar_radiation * 41_868.0 / (latent_heat * 1000.0);

    let es = saturation_vapour_pressure(t_mean);
    let ea = es * (obs.rh_mean / 100.0);

    let c = 0.68 + 0.0028 * obs.rh_mean + 0.018 * rs - 0.068 * u2_day
        + 0.013 * ratio
        + 0.0097 * u2_day * ratio
        + 0.43e-4 * obs.rh_mean * rs * u2_day;

    c * (c1 * obs.net_radiation + c2 * 0.27 * (1.0 + 0.01 * u2) * (es - ea))
}

/// Monthly ETr series, each value rounded to two decimals.
///
/// # Errors
/// [`ScheduleError::InvalidProfile`] for an observation with a non-positive
/// anemometer height or a negative wind ratio.
pub fn monthly_etr(observations: &[PenmanObservation]) -> Result<Vec<f64>, ScheduleError> {
    observations
        .iter()
        .map(|obs| {
            obs.validate()?;
            Ok(round2(modified_penman(obs)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn observation() -> PenmanObservation {
        PenmanObservation {
            t_max: 30.0,
            t_min: 20.0,
            rh_mean: 50.0,
            elevation: 100.0,
            anemometer_height: 2.0,
            day_night_wind_ratio: 2.0,
            wind_speed: 200.0,
            solar_radiation: 500.0,
            net_radiation: 6.0,
        }
    }

    #[test]
    fn reference_value() {
        assert_relative_eq!(
            modified_penman(&observation()),
            7.052686478770462,
            max_relative = 1e-10
        );
    }

    #[test]
    fn saturated_air_without_net_radiation_gives_zero() {
        let obs = PenmanObservation {
            rh_mean: 100.0,
            net_radiation: 0.0,
            ..observation()
        };
        assert_relative_eq!(modified_penman(&obs), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn drier_air_raises_etr() {
        let humid = modified_penman(&PenmanObservation {
            rh_mean: 80.0,
            ..observation()
        });
        let dry = modified_penman(&PenmanObservation {
            rh_mean: 30.0,
            ..observation()
        });
        assert!(dry > humid);
    }

    #[test]
    fn monthly_values_are_rounded() {
        let kharif_april = PenmanObservation {
            t_max: 38.0,
            t_min: 22.0,
            rh_mean: 35.0,
            elevation: 184.0,
            anemometer_height: 2.0,
            day_night_wind_ratio: 2.0,
            wind_speed: 150.0,
            solar_radiation: 580.0,
            net_radiation: 7.0,
        };
        let etr = monthly_etr(&[observation(), kharif_april]).unwrap();
        assert_eq!(etr, vec![7.05, 8.59]);
    }

    #[test]
    fn zero_anemometer_height_is_rejected() {
        let obs = PenmanObservation {
            anemometer_height: 0.0,
            ..observation()
        };
        assert!(matches!(
            monthly_etr(&[obs]),
            Err(ScheduleError::InvalidProfile { .. })
        ));
    }
}
