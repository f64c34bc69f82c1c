use crate::error::{BandroomError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MINUTE_MS: i64 = 60_000;

// ---------------------------------------------------------------------------
// TimeInterval
// ---------------------------------------------------------------------------

/// A half-open time range `[start, end)` in epoch milliseconds.
///
/// Half-open semantics mean two back-to-back bookings that share an endpoint
/// never count as overlapping. Zero-length and inverted ranges are rejected
/// at construction, so every `TimeInterval` in the system satisfies
/// `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalDoc", into = "IntervalDoc")]
pub struct TimeInterval {
    start_ms: i64,
    end_ms: i64,
}

/// Wire/document form: ISO-8601 timestamps at the boundary, epoch millis inside.
#[derive(Serialize, Deserialize)]
struct IntervalDoc {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<IntervalDoc> for TimeInterval {
    type Error = BandroomError;

    fn try_from(doc: IntervalDoc) -> Result<Self> {
        TimeInterval::new(doc.start.timestamp_millis(), doc.end.timestamp_millis())
    }
}

impl From<TimeInterval> for IntervalDoc {
    fn from(iv: TimeInterval) -> Self {
        IntervalDoc {
            start: iv.start(),
            end: iv.end(),
        }
    }
}

impl TimeInterval {
    pub fn new(start_ms: i64, end_ms: i64) -> Result<Self> {
        if start_ms >= end_ms {
            return Err(BandroomError::InvalidInterval(format!(
                "start {start_ms} must precede end {end_ms}"
            )));
        }
        if DateTime::from_timestamp_millis(start_ms).is_none()
            || DateTime::from_timestamp_millis(end_ms).is_none()
        {
            return Err(BandroomError::InvalidInterval(
                "timestamp out of representable range".to_string(),
            ));
        }
        Ok(Self { start_ms, end_ms })
    }

    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        Self::new(start.timestamp_millis(), end.timestamp_millis())
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    pub fn start(&self) -> DateTime<Utc> {
        // bounds-checked in new()
        DateTime::from_timestamp_millis(self.start_ms).unwrap_or_default()
    }

    pub fn end(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.end_ms).unwrap_or_default()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_ms - self.start_ms) / MINUTE_MS
    }

    /// True iff the two ranges share at least one instant.
    /// Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start_ms < other.end_ms && other.start_ms < self.end_ms
    }

    /// True iff `inner` lies entirely within `self`.
    pub fn contains(&self, inner: &TimeInterval) -> bool {
        self.start_ms <= inner.start_ms && inner.end_ms <= self.end_ms
    }

    pub fn contains_instant(&self, instant_ms: i64) -> bool {
        self.start_ms <= instant_ms && instant_ms < self.end_ms
    }

    /// True iff the ranges share an endpoint without overlapping.
    pub fn is_adjacent(&self, other: &TimeInterval) -> bool {
        self.end_ms == other.start_ms || other.end_ms == self.start_ms
    }

    /// Coalesce two ranges into one covering both.
    ///
    /// Only overlapping or adjacent ranges merge; anything else would
    /// silently swallow the gap between them, so it fails instead.
    pub fn merge(&self, other: &TimeInterval) -> Result<TimeInterval> {
        if !self.overlaps(other) && !self.is_adjacent(other) {
            return Err(BandroomError::NotMergeable);
        }
        TimeInterval::new(
            self.start_ms.min(other.start_ms),
            self.end_ms.max(other.end_ms),
        )
    }

    /// Remove `other` from `self`, yielding 0, 1, or 2 fragments.
    pub fn subtract(&self, other: &TimeInterval) -> Vec<TimeInterval> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        let mut out = Vec::with_capacity(2);
        if self.start_ms < other.start_ms {
            // new() cannot fail: start < other.start <= end was just checked
            out.push(TimeInterval {
                start_ms: self.start_ms,
                end_ms: other.start_ms,
            });
        }
        if other.end_ms < self.end_ms {
            out.push(TimeInterval {
                start_ms: other.end_ms,
                end_ms: self.end_ms,
            });
        }
        out
    }

    /// Clamp `self` to `bounds`, or `None` if they do not overlap.
    pub fn clamp_to(&self, bounds: &TimeInterval) -> Option<TimeInterval> {
        if !self.overlaps(bounds) {
            return None;
        }
        Some(TimeInterval {
            start_ms: self.start_ms.max(bounds.start_ms),
            end_ms: self.end_ms.min(bounds.end_ms),
        })
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}",
            self.start().to_rfc3339(),
            self.end().to_rfc3339()
        )
    }
}

// ---------------------------------------------------------------------------
// Interval-set helpers
// ---------------------------------------------------------------------------

/// Sort and merge a set of ranges into chronological, non-overlapping form.
pub fn coalesce(mut intervals: Vec<TimeInterval>) -> Vec<TimeInterval> {
    intervals.sort();
    let mut out: Vec<TimeInterval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        match out.last_mut() {
            Some(last) if last.overlaps(&iv) || last.is_adjacent(&iv) => {
                // merge cannot fail here, the guard just checked
                *last = last.merge(&iv).unwrap_or(*last);
            }
            _ => out.push(iv),
        }
    }
    out
}

/// Intersection of two coalesced, chronologically ordered sets.
pub fn intersect_sets(a: &[TimeInterval], b: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].clamp_to(&b[j]) {
            out.push(overlap);
        }
        // advance the set whose range ends first
        if a[i].end_ms() <= b[j].end_ms() {
            i += 1;
        } else {
            j += 1;
        }
    }
    out
}

/// Remove every range in `cuts` from every range in `base`.
pub fn subtract_set(base: &[TimeInterval], cuts: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut remaining: Vec<TimeInterval> = base.to_vec();
    for cut in cuts {
        remaining = remaining
            .iter()
            .flat_map(|iv| iv.subtract(cut))
            .collect();
    }
    remaining
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i64, end: i64) -> TimeInterval {
        TimeInterval::new(start, end).unwrap()
    }

    #[test]
    fn rejects_zero_length() {
        assert!(matches!(
            TimeInterval::new(100, 100),
            Err(BandroomError::InvalidInterval(_))
        ));
    }

    #[test]
    fn rejects_inverted() {
        assert!(TimeInterval::new(200, 100).is_err());
    }

    #[test]
    fn overlaps_is_symmetric() {
        let cases = [
            (iv(0, 10), iv(5, 15)),
            (iv(0, 10), iv(10, 20)),
            (iv(0, 100), iv(20, 30)),
            (iv(0, 10), iv(50, 60)),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "a={a} b={b}");
        }
    }

    #[test]
    fn interval_overlaps_itself() {
        let a = iv(5, 42);
        assert!(a.overlaps(&a));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        let a = iv(0, 10);
        let b = iv(10, 20);
        assert!(!a.overlaps(&b));
        assert!(a.is_adjacent(&b));
    }

    #[test]
    fn contains_includes_boundaries() {
        let outer = iv(0, 100);
        assert!(outer.contains(&iv(0, 100)));
        assert!(outer.contains(&iv(10, 90)));
        assert!(!outer.contains(&iv(10, 101)));
    }

    #[test]
    fn merge_overlapping() {
        let merged = iv(0, 10).merge(&iv(5, 20)).unwrap();
        assert_eq!(merged, iv(0, 20));
    }

    #[test]
    fn merge_adjacent() {
        let merged = iv(0, 10).merge(&iv(10, 20)).unwrap();
        assert_eq!(merged, iv(0, 20));
    }

    #[test]
    fn merge_disjoint_fails() {
        assert!(matches!(
            iv(0, 10).merge(&iv(20, 30)),
            Err(BandroomError::NotMergeable)
        ));
    }

    #[test]
    fn subtract_middle_splits_in_two() {
        let frags = iv(0, 100).subtract(&iv(40, 60));
        assert_eq!(frags, vec![iv(0, 40), iv(60, 100)]);
    }

    #[test]
    fn subtract_leading_edge() {
        let frags = iv(0, 100).subtract(&iv(0, 30));
        assert_eq!(frags, vec![iv(30, 100)]);
    }

    #[test]
    fn subtract_covering_leaves_nothing() {
        assert!(iv(10, 20).subtract(&iv(0, 100)).is_empty());
    }

    #[test]
    fn subtract_disjoint_is_identity() {
        assert_eq!(iv(0, 10).subtract(&iv(50, 60)), vec![iv(0, 10)]);
    }

    #[test]
    fn coalesce_merges_and_sorts() {
        let out = coalesce(vec![iv(50, 60), iv(0, 10), iv(8, 20), iv(20, 30)]);
        assert_eq!(out, vec![iv(0, 30), iv(50, 60)]);
    }

    #[test]
    fn intersect_sets_pairwise() {
        let a = vec![iv(0, 10), iv(20, 40)];
        let b = vec![iv(5, 25), iv(30, 50)];
        assert_eq!(
            intersect_sets(&a, &b),
            vec![iv(5, 10), iv(20, 25), iv(30, 40)]
        );
    }

    #[test]
    fn subtract_set_multiple_cuts() {
        let base = vec![iv(0, 100)];
        let cuts = vec![iv(10, 20), iv(50, 60)];
        assert_eq!(
            subtract_set(&base, &cuts),
            vec![iv(0, 10), iv(20, 50), iv(60, 100)]
        );
    }

    #[test]
    fn serde_uses_iso_timestamps() {
        let a = iv(0, 3_600_000);
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("1970-01-01T00:00:00Z"), "json: {json}");
        let back: TimeInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn serde_rejects_inverted_range() {
        let json = r#"{"start":"2026-01-02T00:00:00Z","end":"2026-01-01T00:00:00Z"}"#;
        assert!(serde_json::from_str::<TimeInterval>(json).is_err());
    }

    #[test]
    fn duration_minutes_rounds_down() {
        assert_eq!(iv(0, 90 * MINUTE_MS).duration_minutes(), 90);
    }
}
