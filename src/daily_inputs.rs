use chrono::NaiveDate;
use tracing::debug;

use crate::error::ScheduleError;

/// Calendar year the source data used for its day counts.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2024;

// Growing season: a contiguous run of calendar months within one year
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    pub name: String,        // Season label carried on every report row, e.g. "Kharif"
    pub months: Vec<u32>,    // Calendar months 1-12, strictly increasing
    pub reference_year: i32, // Year used to count days per month
}

impl Season {
    pub fn new(name: impl Into<String>, months: Vec<u32>, reference_year: i32) -> Self {
        Season {
            name: name.into(),
            months,
            reference_year,
        }
    }

    // Kharif season, April to September
    pub fn kharif() -> Self {
        Season::new("Kharif", vec![4, 5, 6, 7, 8, 9], DEFAULT_REFERENCE_YEAR)
    }

    fn first_of_month(&self, month: u32) -> Result<NaiveDate, ScheduleError> {
        NaiveDate::from_ymd_opt(self.reference_year, month, 1).ok_or_else(|| {
            ScheduleError::invalid_series(format!(
                "month {} of year {} is not a calendar date",
                month, self.reference_year
            ))
        })
    }

    fn validate(&self) -> Result<(), ScheduleError> {
        if self.months.len() < 2 {
            return Err(ScheduleError::invalid_series(format!(
                "need at least 2 season months, got {}",
                self.months.len()
            )));
        }
        if let Some(&bad) = self.months.iter().find(|&&m| !(1..=12).contains(&m)) {
            return Err(ScheduleError::invalid_series(format!(
                "month {} is outside 1..=12",
                bad
            )));
        }
        if let Some(pair) = self.months.windows(2).find(|w| w[1] <= w[0]) {
            return Err(ScheduleError::invalid_series(format!(
                "season months must be strictly increasing, got {} then {}",
                pair[0], pair[1]
            )));
        }
        Ok(())
    }

    // Day count of every interpolation segment, wraparound segment last.
    // Each explicit segment runs from the 1st of month i to the 1st of month i + 1;
    // the wraparound runs from the 1st of the last month through December 31.
    pub fn segment_days(&self) -> Result<Vec<usize>, ScheduleError> {
        self.validate()?;
        let mut days = Vec::with_capacity(self.months.len());
        for pair in self.months.windows(2) {
            let start = self.first_of_month(pair[0])?;
            let end = self.first_of_month(pair[1])?;
            days.push(end.signed_duration_since(start).num_days() as usize);
        }
        let last = self.first_of_month(self.months[self.months.len() - 1])?;
        let dec_31 = NaiveDate::from_ymd_opt(self.reference_year, 12, 31).ok_or_else(|| {
            ScheduleError::invalid_series(format!("year {} has no December 31", self.reference_year))
        })?;
        days.push(dec_31.signed_duration_since(last).num_days() as usize + 1);
        Ok(days)
    }

    // Total length of any daily series interpolated over this season
    pub fn total_days(&self) -> Result<usize, ScheduleError> {
        Ok(self.segment_days()?.iter().sum())
    }
}

impl Default for Season {
    fn default() -> Self {
        Season::kharif()
    }
}

/// One value per season month, aligned with [`Season::months`].
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    values: Vec<f64>,
}

impl MonthlySeries {
    pub fn new(values: Vec<f64>) -> Self {
        MonthlySeries { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for MonthlySeries {
    fn from(values: Vec<f64>) -> Self {
        MonthlySeries::new(values)
    }
}

/// One value per calendar day of the season, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    values: Vec<f64>,
}

impl DailySeries {
    pub fn new(values: Vec<f64>) -> Self {
        DailySeries { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // Value for a 0-based day index, None past the end of the series
    pub fn get(&self, day: usize) -> Option<f64> {
        self.values.get(day).copied()
    }
}

impl From<Vec<f64>> for DailySeries {
    fn from(values: Vec<f64>) -> Self {
        DailySeries::new(values)
    }
}

// `n` evenly spaced values from `start` toward `end`, never reaching `end`
fn open_segment(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let step = if n == 0 { 0.0 } else { (end - start) / n as f64 };
    (0..n).map(move |i| start + i as f64 * step)
}

/// Expand a monthly series into daily values by piecewise-linear interpolation.
///
/// Consecutive months are joined by a left-closed, right-open segment whose
/// length is the number of days between the first of each month. A final
/// segment runs from the last month back toward the first month's value and
/// covers the remaining days of the reference year.
///
/// # Errors
/// [`ScheduleError::InvalidSeries`] when the season has fewer than two months,
/// months are not strictly increasing within 1..=12, the series length differs
/// from the month count, or a value is not finite.
pub fn interpolate(series: &MonthlySeries, season: &Season) -> Result<DailySeries, ScheduleError> {
    let segment_days = season.segment_days()?;
    let values = series.values();
    if values.len() != season.months.len() {
        return Err(ScheduleError::invalid_series(format!(
            "{} monthly values for {} season months",
            values.len(),
            season.months.len()
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ScheduleError::invalid_series("monthly values must be finite"));
    }

    let n = values.len();
    let mut daily = Vec::with_capacity(segment_days.iter().sum());
    for (i, &days) in segment_days.iter().enumerate() {
        // The last segment wraps back to the first month
        let end = values[(i + 1) % n];
        daily.extend(open_segment(values[i], end, days));
    }

    debug!(
        months = n,
        days = daily.len(),
        "interpolated monthly series to daily values"
    );
    Ok(DailySeries::new(daily))
}
