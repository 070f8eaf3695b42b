//! Error types for irrigation scheduling.

/// Error type for all fallible operations in the crate.
///
/// Every variant is fatal to the run that raised it; no partial schedule is
/// ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    /// A monthly series or its season months are malformed.
    #[error("invalid monthly series: {reason}")]
    InvalidSeries {
        /// What is wrong with the series.
        reason: String,
    },

    /// A daily series is shorter than the sum of all growth-stage days.
    #[error("daily {series} series has {available} days but the crop stages need {required}")]
    ScheduleLengthMismatch {
        /// Which daily series is short ("ETr" or "rainfall").
        series: &'static str,
        /// Number of daily values available.
        available: usize,
        /// Total number of stage days.
        required: usize,
    },

    /// The soil identifier is not in the soil table.
    #[error("unknown soil type '{name}'")]
    UnknownSoil {
        /// The normalised identifier that was looked up.
        name: String,
    },

    /// The crop identifier is not in the crop table.
    #[error("unknown crop type '{name}'")]
    UnknownCrop {
        /// The normalised identifier that was looked up.
        name: String,
    },

    /// A soil, crop or observation record violates its invariants.
    #[error("invalid profile: {reason}")]
    InvalidProfile {
        /// What is wrong with the record.
        reason: String,
    },

    /// The run configuration could not be parsed or is contradictory.
    #[error("configuration error: {reason}")]
    Config {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl ScheduleError {
    pub(crate) fn invalid_series(reason: impl Into<String>) -> Self {
        Self::InvalidSeries {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_profile(reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_series() {
        let e = ScheduleError::invalid_series("need at least 2 months, got 1");
        assert_eq!(
            e.to_string(),
            "invalid monthly series: need at least 2 months, got 1"
        );
    }

    #[test]
    fn error_schedule_length_mismatch() {
        let e = ScheduleError::ScheduleLengthMismatch {
            series: "ETr",
            available: 30,
            required: 45,
        };
        assert_eq!(
            e.to_string(),
            "daily ETr series has 30 days but the crop stages need 45"
        );
    }

    #[test]
    fn error_unknown_soil() {
        let e = ScheduleError::UnknownSoil {
            name: "peat".to_string(),
        };
        assert_eq!(e.to_string(), "unknown soil type 'peat'");
    }

    #[test]
    fn error_unknown_crop() {
        let e = ScheduleError::UnknownCrop {
            name: "barley".to_string(),
        };
        assert_eq!(e.to_string(), "unknown crop type 'barley'");
    }

    #[test]
    fn error_invalid_profile() {
        let e = ScheduleError::invalid_profile("root depth must be positive");
        assert_eq!(e.to_string(), "invalid profile: root depth must be positive");
    }

    #[test]
    fn error_config() {
        let e = ScheduleError::config("missing [climate] rainfall");
        assert_eq!(
            e.to_string(),
            "configuration error: missing [climate] rainfall"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ScheduleError>();
    }
}
