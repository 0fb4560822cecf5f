//! Numeric intervals and the event model fed into the layout engine.
//!
//! Every interval is expressed in a single caller-chosen unit: seconds since
//! the start of a day for day/week views, whole-day offsets for month grids.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// A half-open `[start, end)` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    /// Create a new interval
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidInterval`] if `start > end`.
    pub fn new(start: i64, end: i64) -> Result<Self, LayoutError> {
        if start > end {
            return Err(LayoutError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Zero-length interval (`start == end`)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Plain open-range overlap test.
    pub fn overlaps_range(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Overlap test for closed `[start, end]` ranges.
    pub fn overlaps_closed(&self, other: &Interval) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Overlap test used for clustering.
    ///
    /// Touching intervals do not overlap, but two intervals sharing a start or
    /// an end always do, whatever their lengths. Zero-length intervals only
    /// ever match through the shared start/end clauses.
    pub fn overlaps_for_cluster(&self, other: &Interval) -> bool {
        let ranges_cross = !self.is_empty() && !other.is_empty() && self.overlaps_range(other);
        ranges_cross || self.start == other.start || self.end == other.end
    }
}

/// An event to lay out: its span plus an opaque handle back to the caller's
/// own event object.
///
/// The layout engine never looks inside `reference`; it only clones it, hashes
/// it and compares it for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalModel<T> {
    pub start: i64,
    pub end: i64,
    #[serde(rename = "id")]
    pub reference: T,
}

impl<T> IntervalModel<T> {
    pub fn new(start: i64, end: i64, reference: T) -> Self {
        Self {
            start,
            end,
            reference,
        }
    }

    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    /// # Errors
    /// Returns [`LayoutError::InvalidInterval`] if the event ends before it starts.
    pub fn validate(&self) -> Result<(), LayoutError> {
        Interval::new(self.start, self.end).map(|_| ())
    }
}

/// Check every event, then stable-sort by start.
///
/// Events with equal starts keep their input order, so repeated calls over
/// the same input always produce the same sequence.
pub(crate) fn validated_sorted<T: Clone>(
    events: &[IntervalModel<T>],
) -> Result<Vec<IntervalModel<T>>, LayoutError> {
    for event in events {
        event.validate()?;
    }
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.start);
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn rejects_reversed_interval() {
        assert_eq!(
            Interval::new(10, 5),
            Err(LayoutError::InvalidInterval { start: 10, end: 5 })
        );
        assert!(Interval::new(5, 5).is_ok());
    }

    #[test]
    fn touching_is_not_overlapping() {
        assert!(!iv(0, 10).overlaps_range(&iv(10, 20)));
        assert!(!iv(0, 10).overlaps_for_cluster(&iv(10, 20)));
    }

    #[test]
    fn closed_ranges_sharing_one_point_overlap() {
        assert!(iv(10, 17).overlaps_closed(&iv(17, 18)));
        assert!(!iv(10, 17).overlaps_range(&iv(17, 18)));
        assert!(!iv(10, 16).overlaps_closed(&iv(17, 18)));
    }

    #[test]
    fn shared_start_or_end_always_clusters() {
        assert!(iv(0, 20).overlaps_for_cluster(&iv(0, 10)));
        assert!(iv(0, 20).overlaps_for_cluster(&iv(15, 20)));
        // Same start, one side empty: still grouped.
        assert!(iv(5, 5).overlaps_for_cluster(&iv(5, 30)));
    }

    #[test]
    fn zero_length_inside_another_does_not_cluster() {
        // The raw range test would match; the clustering test must not.
        assert!(iv(5, 5).overlaps_range(&iv(0, 10)));
        assert!(!iv(5, 5).overlaps_for_cluster(&iv(0, 10)));
        assert!(!iv(0, 10).overlaps_for_cluster(&iv(5, 5)));
    }

    #[test]
    fn sort_is_stable_on_equal_starts() {
        let events = vec![
            IntervalModel::new(5, 9, "late"),
            IntervalModel::new(0, 20, "a"),
            IntervalModel::new(0, 10, "b"),
        ];
        let sorted = validated_sorted(&events).unwrap();
        let refs: Vec<_> = sorted.iter().map(|e| e.reference).collect();
        assert_eq!(refs, vec!["a", "b", "late"]);
    }

    #[test]
    fn sort_rejects_invalid_event() {
        let events = vec![IntervalModel::new(0, 10, 1), IntervalModel::new(7, 3, 2)];
        assert_eq!(
            validated_sorted(&events),
            Err(LayoutError::InvalidInterval { start: 7, end: 3 })
        );
    }
}
