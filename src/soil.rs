use serde::Deserialize;

use crate::error::ScheduleError;

/// Fraction of plant-available water that may be depleted before irrigating.
pub const DEPLETION_FRACTION: f64 = 0.7;

/// Converts root depth [m] times a volumetric fraction into depletion [mm].
pub const DEPTH_TO_MM: f64 = 10.0;

// Soil water retention bounds (volumetric water content, dimensionless)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoilProfile {
    pub field_capacity: f64, // Upper bound of plant-available water [-]
    pub wilting_point: f64,  // Lower bound of plant-available water [-]
}

impl SoilProfile {
    pub fn new(field_capacity: f64, wilting_point: f64) -> Result<Self, ScheduleError> {
        let soil = SoilProfile {
            field_capacity,
            wilting_point,
        };
        soil.validate()?;
        Ok(soil)
    }

    pub(crate) fn validate(&self) -> Result<(), ScheduleError> {
        if !self.field_capacity.is_finite() || !self.wilting_point.is_finite() {
            return Err(ScheduleError::invalid_profile(
                "soil water contents must be finite",
            ));
        }
        if self.field_capacity <= self.wilting_point {
            return Err(ScheduleError::invalid_profile(format!(
                "field capacity {} must exceed wilting point {}",
                self.field_capacity, self.wilting_point
            )));
        }
        Ok(())
    }

    // Plant-available water per unit depth [-]
    pub fn available_water(&self) -> f64 {
        self.field_capacity - self.wilting_point
    }

    // Deficit threshold [mm] that triggers irrigation for a given root depth [m]
    pub fn max_allowable_depletion(&self, root_depth: f64) -> f64 {
        DEPLETION_FRACTION * self.available_water() * root_depth * DEPTH_TO_MM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn max_allowable_depletion_for_one_metre_roots() {
        let soil = SoilProfile::new(0.30, 0.15).unwrap();
        assert_abs_diff_eq!(soil.max_allowable_depletion(1.0), 1.05, epsilon = 1e-12);
    }

    #[test]
    fn max_allowable_depletion_scales_with_root_depth() {
        let soil = SoilProfile::new(0.27, 0.12).unwrap();
        let shallow = soil.max_allowable_depletion(0.5);
        let deep = soil.max_allowable_depletion(1.5);
        assert_abs_diff_eq!(deep, 3.0 * shallow, epsilon = 1e-12);
    }

    #[test]
    fn field_capacity_must_exceed_wilting_point() {
        assert!(matches!(
            SoilProfile::new(0.15, 0.15),
            Err(ScheduleError::InvalidProfile { .. })
        ));
        assert!(matches!(
            SoilProfile::new(0.10, 0.20),
            Err(ScheduleError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn non_finite_contents_are_rejected() {
        assert!(SoilProfile::new(f64::NAN, 0.1).is_err());
    }

    #[test]
    fn deserializes_from_toml_table() {
        let soil: SoilProfile = toml::from_str("field_capacity = 0.32\nwilting_point = 0.17").unwrap();
        assert_eq!(soil, SoilProfile::new(0.32, 0.17).unwrap());
    }
}
