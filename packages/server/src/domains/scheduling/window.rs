use chrono::{DateTime, Utc};
use thiserror::Error;

const MS_PER_HOUR: i64 = 3_600_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("window end must be after its start")]
    Empty,

    #[error("invalid instant: {0}")]
    Parse(String),
}

/// A half-open interval `[start, end)` on the UTC timeline.
///
/// Half-open means a booking ending at 12:00 and one starting at 12:00 on the
/// same resource do not collide. Construction rejects empty and negative
/// windows, so every `TimeWindow` in the system has positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if end <= start {
            return Err(WindowError::Empty);
        }
        Ok(Self { start, end })
    }

    /// Parse a pair of RFC 3339 instants. Offsets are honored and then
    /// normalized to UTC, so "12:00+02:00" equals "10:00Z".
    pub fn from_iso(start: &str, end: &str) -> Result<Self, WindowError> {
        let start = DateTime::parse_from_rfc3339(start)
            .map_err(|e| WindowError::Parse(format!("{start}: {e}")))?
            .with_timezone(&Utc);
        let end = DateTime::parse_from_rfc3339(end)
            .map_err(|e| WindowError::Parse(format!("{end}: {e}")))?
            .with_timezone(&Utc);
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether two windows share any instant. Symmetric; touching endpoints
    /// do not count as overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Hours to bill for this window: partial hours round up, and every
    /// window bills at least one hour.
    pub fn billed_hours(&self) -> i64 {
        let ms = (self.end - self.start).num_milliseconds();
        let hours = (ms + MS_PER_HOUR - 1) / MS_PER_HOUR;
        hours.max(1)
    }

    /// Whether start and end fall on the same calendar day in UTC
    pub fn same_day_utc(&self) -> bool {
        self.start.date_naive() == self.end.date_naive()
    }
}
