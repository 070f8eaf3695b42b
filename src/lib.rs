//! Daily irrigation scheduling for one crop over one growing season.
//!
//! Monthly ETr and rainfall are interpolated to daily values, then a soil
//! water balance decides day by day whether to irrigate.

pub mod config;
pub mod crop;
pub mod daily_inputs;
pub mod error;
pub mod penman;
pub mod report;
pub mod schedule;
pub mod soil;
pub mod water_balance;

pub use config::RunConfig;
pub use crop::{CropProfile, GrowthStage};
pub use daily_inputs::{DailySeries, MonthlySeries, Season, interpolate};
pub use error::ScheduleError;
pub use penman::{PenmanObservation, modified_penman, monthly_etr};
pub use report::write_csv;
pub use schedule::{DailyRecord, Schedule, SeasonInputs, assemble};
pub use soil::SoilProfile;
pub use water_balance::{DeficitConvention, WaterBalance, simulate};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let inputs = SeasonInputs {
            season: Season::kharif(),
            soil: SoilProfile::new(0.30, 0.15).unwrap(),
            crop: CropProfile::new("rice", 0.5, vec![GrowthStage::new("initial", 1.05, 30)]).unwrap(),
            monthly_etr: MonthlySeries::new(vec![6.0; 6]),
            monthly_rainfall: MonthlySeries::new(vec![8.0; 6]),
            convention: DeficitConvention::default(),
        };
        let schedule = assemble(&inputs).unwrap();
        assert_eq!(schedule.len(), 30);
        // 8.0 - 6.3 = 1.7 mm surplus a day exceeds the 0.525 mm threshold every day
        assert_eq!(schedule.irrigation_events(), 30);
    }
}
