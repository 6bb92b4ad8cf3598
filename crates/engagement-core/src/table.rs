//! Engagement table: 7 days × 24 hours of non-negative scores.
//!
//! Rows run Monday through Sunday, columns run hour 0 through 23. The shape
//! is fixed by the type, so there is no way to build a ragged table.

use chrono::Weekday;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ValidationError;

/// Number of day rows.
pub const DAY_COUNT: usize = 7;
/// Number of hour columns.
pub const HOUR_COUNT: usize = 24;

/// Row order of the table.
pub const DAYS: [Weekday; DAY_COUNT] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Row label for a day, e.g. `"Mon"`.
pub fn day_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Column label for an hour, e.g. `"07:00"`.
pub fn hour_label(hour: u8) -> String {
    format!("{:02}:00", hour)
}

/// One cell in long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub day: Weekday,
    pub hour: u8,
    pub score: u32,
}

/// Immutable day × hour score table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngagementTable {
    cells: [[u32; HOUR_COUNT]; DAY_COUNT],
}

impl EngagementTable {
    /// Build a table from a filled grid, rows in Monday-first order.
    pub fn from_grid(cells: [[u32; HOUR_COUNT]; DAY_COUNT]) -> Self {
        Self { cells }
    }

    /// Pivot long-form records into a table.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if an hour is outside 0-23, a cell
    /// appears twice, or any cell has no record.
    pub fn from_records<I>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = ScoreRecord>,
    {
        let mut grid = [[None::<u32>; HOUR_COUNT]; DAY_COUNT];

        for record in records {
            let hour = record.hour as usize;
            if hour >= HOUR_COUNT {
                return Err(ValidationError::OutOfBounds {
                    collection: "hours".to_string(),
                    index: hour,
                    len: HOUR_COUNT,
                });
            }
            let slot = &mut grid[record.day.num_days_from_monday() as usize][hour];
            if slot.is_some() {
                return Err(ValidationError::DuplicateCell {
                    day: record.day,
                    hour: record.hour,
                });
            }
            *slot = Some(record.score);
        }

        let mut cells = [[0u32; HOUR_COUNT]; DAY_COUNT];
        for (d, day) in DAYS.iter().enumerate() {
            for h in 0..HOUR_COUNT {
                cells[d][h] = grid[d][h].ok_or(ValidationError::MissingCell {
                    day: *day,
                    hour: h as u8,
                })?;
            }
        }

        Ok(Self { cells })
    }

    /// Score at a specific day/hour.
    pub fn get(&self, day: Weekday, hour: u8) -> Option<u32> {
        self.row(day).get(hour as usize).copied()
    }

    /// All 24 scores for a day.
    pub fn row(&self, day: Weekday) -> &[u32; HOUR_COUNT] {
        &self.cells[day.num_days_from_monday() as usize]
    }

    /// Rows in Monday-first order.
    pub fn rows(&self) -> impl Iterator<Item = (Weekday, &[u32; HOUR_COUNT])> + '_ {
        DAYS.iter().copied().zip(self.cells.iter())
    }

    /// Raw grid, rows in Monday-first order.
    pub fn as_grid(&self) -> &[[u32; HOUR_COUNT]; DAY_COUNT] {
        &self.cells
    }

    pub fn day_labels(&self) -> [&'static str; DAY_COUNT] {
        DAYS.map(day_label)
    }

    pub fn hour_labels(&self) -> Vec<String> {
        (0..HOUR_COUNT as u8).map(hour_label).collect()
    }

    /// Get total score for a specific day.
    pub fn day_total(&self, day: Weekday) -> u64 {
        self.row(day).iter().map(|&s| s as u64).sum()
    }

    /// Get total score for a specific hour across all days.
    pub fn hour_total(&self, hour: u8) -> u64 {
        self.cells
            .iter()
            .filter_map(|row| row.get(hour as usize))
            .map(|&s| s as u64)
            .sum()
    }

    pub fn min_score(&self) -> u32 {
        self.cells.iter().flatten().copied().min().unwrap_or(0)
    }

    pub fn max_score(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Highest-scoring cells, descending. Ties keep row-major order.
    pub fn peak_cells(&self, limit: usize) -> Vec<ScoreRecord> {
        let mut records = self.to_records();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(limit);
        records
    }

    /// Long-form records in row-major order.
    pub fn to_records(&self) -> Vec<ScoreRecord> {
        self.rows()
            .flat_map(|(day, row)| {
                row.iter().enumerate().map(move |(hour, &score)| ScoreRecord {
                    day,
                    hour: hour as u8,
                    score,
                })
            })
            .collect()
    }

    /// Render the table as a text heatmap.
    pub fn render_ascii(&self) -> String {
        let mut output = String::new();
        let max = self.max_score();

        output.push_str("\nEngagement Heatmap\n");
        output.push_str(&"=".repeat(76));
        output.push('\n');

        // Header row with hours
        output.push_str("    ");
        for hour in 0..HOUR_COUNT {
            output.push_str(&format!("{:>2} ", hour));
        }
        output.push('\n');

        for (day, row) in self.rows() {
            output.push_str(&format!("{:<4}", day_label(day)));
            for &score in row {
                output.push(' ');
                output.push(shade_char(score, max));
                output.push(' ');
            }
            output.push('\n');
        }

        output.push_str(&"=".repeat(76));
        output.push('\n');
        output.push_str(&format!(
            "Legend (max {max}): ' ' 0  ░ <=25%  ▒ <=50%  ▓ <=75%  █ >75%\n"
        ));

        let peaks = self.peak_cells(5);
        if !peaks.is_empty() {
            output.push_str("\nPeak hours:\n");
            for peak in peaks {
                output.push_str(&format!(
                    "  {} {} - score {}\n",
                    day_label(peak.day),
                    hour_label(peak.hour),
                    peak.score
                ));
            }
        }

        output
    }
}

fn shade_char(score: u32, max: u32) -> char {
    if score == 0 || max == 0 {
        return ' ';
    }
    let ratio = score as f64 / max as f64;
    if ratio <= 0.25 {
        '░'
    } else if ratio <= 0.5 {
        '▒'
    } else if ratio <= 0.75 {
        '▓'
    } else {
        '█'
    }
}

impl Serialize for EngagementTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EngagementTable", 3)?;
        state.serialize_field("days", &self.day_labels())?;
        state.serialize_field("hours", &self.hour_labels())?;
        state.serialize_field("scores", &self.cells)?;
        state.end()
    }
}
