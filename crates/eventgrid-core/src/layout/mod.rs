//! Overlap clustering and column layout for one day (or one month-grid row).
//!
//! This module provides:
//! - Cluster detection over transitively-overlapping events
//! - Greedy first-fit column assignment inside each cluster
//! - Expansion of events into free columns to their right
//!
//! Everything here is a pure function of its input: trees are built per call
//! and dropped before returning.

mod cluster;
mod columns;
mod fit_tree;
mod overlap_tree;

pub use cluster::{detect_clusters, Cluster, OverlapClusterDetector};
pub use columns::{
    layout_cluster, ClusterLayout, ColumnAssigner, ColumnAssignment, ColumnExpander, Placement,
};

use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::interval::IntervalModel;
use crate::overflow::OverflowPolicy;

/// Layout of every cluster in a day, in cluster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLayout<T> {
    pub clusters: Vec<ClusterLayout<T>>,
}

impl<T> DayLayout<T> {
    pub fn clusters(&self) -> &[ClusterLayout<T>] {
        &self.clusters
    }

    /// All visible placements, cluster by cluster.
    pub fn placements(&self) -> impl Iterator<Item = &Placement<T>> {
        self.clusters.iter().flat_map(|c| c.placements.iter())
    }

    /// Widest cluster in the day
    pub fn max_divisor(&self) -> usize {
        self.clusters.iter().map(|c| c.divisor).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

impl<T: PartialEq> DayLayout<T> {
    pub fn placement_of(&self, reference: &T) -> Option<&Placement<T>> {
        self.clusters.iter().find_map(|c| c.placement_of(reference))
    }
}

/// Runs detection, assignment and expansion for a whole day.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutEngine {
    overflow: Option<OverflowPolicy>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap every cluster with `policy`
    pub fn with_overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = Some(policy);
        self
    }

    /// Lay out one day's events.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidInterval`] if any event has `start > end`.
    pub fn layout_day<T>(&self, events: &[IntervalModel<T>]) -> Result<DayLayout<T>, LayoutError>
    where
        T: Clone + Eq + Hash,
    {
        let clusters = OverlapClusterDetector::new().detect(events)?;
        let assigner = ColumnAssigner::new();
        let expander = ColumnExpander::new();

        let mut layouts = Vec::with_capacity(clusters.len());
        for cluster in clusters {
            let assignment = assigner.assign(cluster.members())?;
            let layout = expander.expand(assignment);
            layouts.push(match &self.overflow {
                Some(policy) => policy.apply(layout),
                None => layout,
            });
        }

        let day = DayLayout { clusters: layouts };
        tracing::debug!(
            events = events.len(),
            clusters = day.clusters.len(),
            max_divisor = day.max_divisor(),
            "laid out day"
        );
        Ok(day)
    }
}

/// Convenience function to lay out a day with no overflow cap
///
/// # Errors
/// Returns [`LayoutError::InvalidInterval`] if any event has `start > end`.
pub fn layout_day<T>(events: &[IntervalModel<T>]) -> Result<DayLayout<T>, LayoutError>
where
    T: Clone + Eq + Hash,
{
    LayoutEngine::new().layout_day(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(start: i64, end: i64, id: &'static str) -> IntervalModel<&'static str> {
        IntervalModel::new(start, end, id)
    }

    #[test]
    fn separate_clusters_get_separate_divisors() {
        let events = [ev(0, 10, "A"), ev(5, 15, "B"), ev(20, 30, "C")];
        let day = layout_day(&events).unwrap();
        assert_eq!(day.clusters().len(), 2);
        assert_eq!(day.clusters()[0].divisor, 2);
        assert_eq!(day.clusters()[1].divisor, 1);
        assert_eq!(day.max_divisor(), 2);

        let c = day.placement_of(&"C").unwrap();
        assert_eq!((c.start_column, c.end_column, c.divisor), (0, 0, 1));
    }

    #[test]
    fn empty_day() {
        let day = layout_day::<u8>(&[]).unwrap();
        assert!(day.is_empty());
        assert_eq!(day.max_divisor(), 0);
        assert_eq!(day.placements().count(), 0);
    }

    #[test]
    fn overflow_policy_is_applied_per_cluster() {
        let events = [
            ev(0, 60, "A"),
            ev(0, 50, "B"),
            ev(0, 40, "C"),
            ev(100, 120, "D"),
        ];
        let engine = LayoutEngine::new().with_overflow(OverflowPolicy::new(2).unwrap());
        let day = engine.layout_day(&events).unwrap();
        assert_eq!(day.clusters()[0].divisor, 2);
        assert_eq!(day.clusters()[0].hidden, vec!["C"]);
        assert_eq!(day.clusters()[1].divisor, 1);
        assert!(day.placement_of(&"C").is_none());
    }

    #[test]
    fn day_layout_reads_back_without_hidden_field() {
        let json = r#"{"clusters":[{"divisor":1,"placements":[
            {"id":"standup","start_column":0,"end_column":0,"divisor":1}]}]}"#;
        let day: DayLayout<String> = serde_json::from_str(json).unwrap();
        assert!(day.clusters()[0].hidden.is_empty());
        assert!(day.placement_of(&"standup".to_string()).is_some());

        let written = serde_json::to_string(&day).unwrap();
        let again: DayLayout<String> = serde_json::from_str(&written).unwrap();
        assert_eq!(day, again);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let events = [
            ev(30, 90, "A"),
            ev(0, 45, "B"),
            ev(0, 30, "C"),
            ev(60, 75, "D"),
            ev(45, 120, "E"),
        ];
        let first = layout_day(&events).unwrap();
        let second = layout_day(&events).unwrap();
        assert_eq!(first, second);
    }
}
