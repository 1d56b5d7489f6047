use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Half-open time-of-day range `[start, end)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, at: NaiveTime) -> bool {
        self.start <= at && at < self.end
    }

    /// True when `other` lies entirely inside this range.
    pub fn covers(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Touching ranges do not overlap: `[9,10)` and `[10,11)` are disjoint.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The part of this range inside `bounds`, or `None` if nothing is left.
    pub fn clip(&self, bounds: &TimeRange) -> Option<TimeRange> {
        let clipped = TimeRange::new(self.start.max(bounds.start), self.end.min(bounds.end));
        (!clipped.is_empty()).then_some(clipped)
    }
}

/// Merge overlapping or adjacent ranges into a sorted, disjoint list.
/// Empty ranges are dropped.
pub fn merge_ranges(mut ranges: Vec<TimeRange>) -> Vec<TimeRange> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort_by_key(|r| r.start);

    let mut merged: Vec<TimeRange> = Vec::new();
    for range in ranges {
        if let Some(last) = merged.last_mut() {
            if range.start <= last.end {
                last.end = last.end.max(range.end);
                continue;
            }
        }
        merged.push(range);
    }
    merged
}

/// Remove every part of `to_remove` from `base`. Both inputs must be
/// sorted and disjoint; the result stays sorted and disjoint.
pub fn subtract_ranges(base: &[TimeRange], to_remove: &[TimeRange]) -> Vec<TimeRange> {
    let mut result = Vec::new();

    for &b in base {
        let mut cursor = b.start;
        for r in to_remove {
            if r.end <= cursor || r.start >= b.end {
                continue;
            }
            if r.start > cursor {
                result.push(TimeRange::new(cursor, r.start));
            }
            cursor = cursor.max(r.end);
            if cursor >= b.end {
                break;
            }
        }
        if cursor < b.end {
            result.push(TimeRange::new(cursor, b.end));
        }
    }

    result
}
