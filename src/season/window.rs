use crate::ID;
use chrono::Datelike;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// Aggregation periods a group can run standings over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

/// A computed season date range with its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub name: String,
}

impl SeasonWindow {
    /// Computes the window for a period anchored at a reference date.
    ///
    /// `Custom` yields the reference month's range under the fixed name
    /// "Custom Season"; it is a placeholder default and callers running a
    /// true custom season supply their own dates and name instead.
    pub fn compute(period: Period, reference: NaiveDate) -> Self {
        let year = reference.year();
        match period {
            Period::Monthly => Self {
                start: month_start(year, reference.month()),
                end: month_end(year, reference.month()),
                name: reference.format("%B %Y").to_string(),
            },
            Period::Quarterly => {
                let quarter = reference.month0() / 3;
                Self {
                    start: month_start(year, quarter * 3 + 1),
                    end: month_end(year, quarter * 3 + 3),
                    name: format!("Q{} {}", quarter + 1, year),
                }
            }
            Period::Yearly => Self {
                start: month_start(year, 1),
                end: month_end(year, 12),
                name: format!("{}", year),
            },
            Period::Custom => Self {
                name: "Custom Season".to_string(),
                ..Self::compute(Period::Monthly, reference)
            },
        }
    }
}

fn month_start(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("valid month")
}

/// Last calendar day of a month, leap Februaries included.
fn month_end(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    month_start(next_year, next_month)
        .pred_opt()
        .expect("month has a predecessor")
}

/// Lifecycle of a season. Standings only accumulate while `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonStatus {
    Active,
    Completed,
}

/// A date-bounded standings window for one group.
///
/// Seasons are descriptive: the standings derived over them are recomputed
/// on demand and never independently authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: ID<Season>,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: SeasonStatus,
}

impl From<SeasonWindow> for Season {
    fn from(window: SeasonWindow) -> Self {
        Self {
            id: ID::default(),
            name: window.name,
            start: window.start,
            end: window.end,
            status: SeasonStatus::Active,
        }
    }
}

impl Season {
    /// Inclusive on both bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Active means the status says so AND today falls inside the window.
    pub fn is_active(&self, now: NaiveDate) -> bool {
        self.status == SeasonStatus::Active && self.contains(now)
    }

    /// Elapsed share of the season in percent, clamped to 0..=100.
    pub fn progress(&self, now: NaiveDate) -> f64 {
        if now < self.start {
            return 0.0;
        }
        if now >= self.end {
            return 100.0;
        }
        let total = (self.end - self.start).num_days() as f64;
        let elapsed = (now - self.start).num_days() as f64;
        (elapsed / total * 100.0).clamp(0.0, 100.0)
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} to {})", self.name, self.start, self.end)
    }
}
