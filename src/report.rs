use std::io::{self, Write};

use crate::schedule::{Schedule, round2};

pub const HEADERS: [&str; 11] = [
    "Day",
    "Growing Season",
    "Growth Stage",
    "Crop Type",
    "Kc",
    "ETo (mm/day)",
    "Crop water use (Etc) (mm/day)",
    "Rainfall (mm)",
    "Net Irrigation application (mm)",
    "Cumulative soil water deficit (mm)",
    "Irrigation Required",
];

// Quote a text field if it would break the CSV row
fn field(text: &str) -> String {
    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Write the schedule as CSV: one header row, then one row per day.
pub fn write_csv<W: Write>(schedule: &Schedule, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", HEADERS.join(","))?;
    let season = field(schedule.season());
    for r in schedule {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            r.day,
            season,
            field(&r.growth_stage),
            field(&r.crop_type),
            r.kc,
            round2(r.eto),
            round2(r.etc),
            round2(r.rainfall),
            r.net_irrigation,
            r.cumulative_deficit,
            if r.irrigation_required { "Yes" } else { "No" }
        )?;
    }
    out.flush()
}
