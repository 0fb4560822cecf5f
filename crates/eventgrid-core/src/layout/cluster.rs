//! Overlap cluster detection.
//!
//! Splits a day's events into groups of transitively-overlapping events.
//! Events in different clusters can be laid out independently of each other.

use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

use super::overlap_tree::OverlapTree;
use crate::error::LayoutError;
use crate::interval::{validated_sorted, IntervalModel};

/// Events connected by a chain of overlaps, in start order, one entry per
/// distinct reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster<T> {
    members: Vec<IntervalModel<T>>,
}

impl<T> Cluster<T> {
    pub fn members(&self) -> &[IntervalModel<T>] {
        &self.members
    }

    pub fn refs(&self) -> impl Iterator<Item = &T> {
        self.members.iter().map(|m| &m.reference)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn into_members(self) -> Vec<IntervalModel<T>> {
        self.members
    }
}

/// Detector for overlap clusters in a single day or bucket
#[derive(Debug, Default, Clone, Copy)]
pub struct OverlapClusterDetector;

impl OverlapClusterDetector {
    pub fn new() -> Self {
        Self
    }

    /// Partition `events` into clusters.
    ///
    /// Input is validated and stable-sorted by start before the sweep, so
    /// callers passing unsorted events still get a deterministic partition.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidInterval`] if any event has `start > end`.
    pub fn detect<T>(&self, events: &[IntervalModel<T>]) -> Result<Vec<Cluster<T>>, LayoutError>
    where
        T: Clone + Eq + Hash,
    {
        let sorted = validated_sorted(events)?;
        let mut clusters = Vec::new();
        let mut tree = OverlapTree::new();
        // reference -> index into `sorted` of its first occurrence
        let mut current: IndexMap<&T, usize> = IndexMap::new();

        for (idx, event) in sorted.iter().enumerate() {
            let interval = event.interval();
            let hit = if tree.is_empty() {
                None
            } else {
                tree.search(&interval).map(|node| node.item)
            };

            match hit {
                Some(other) => {
                    current.entry(&event.reference).or_insert(idx);
                    current.entry(&sorted[other].reference).or_insert(other);
                }
                None if !current.is_empty() => {
                    clusters.push(flush(&sorted, &mut current));
                    tree.clear();
                }
                None => {}
            }

            current.entry(&event.reference).or_insert(idx);
            tree.insert(interval, idx);
        }

        if !current.is_empty() {
            clusters.push(flush(&sorted, &mut current));
        }

        tracing::debug!(
            events = events.len(),
            clusters = clusters.len(),
            "detected overlap clusters"
        );
        Ok(clusters)
    }
}

fn flush<T: Clone>(sorted: &[IntervalModel<T>], current: &mut IndexMap<&T, usize>) -> Cluster<T> {
    let members = current.values().map(|&idx| sorted[idx].clone()).collect();
    current.clear();
    Cluster { members }
}

/// Convenience function to detect clusters with the default detector
///
/// # Errors
/// Returns [`LayoutError::InvalidInterval`] if any event has `start > end`.
pub fn detect_clusters<T>(events: &[IntervalModel<T>]) -> Result<Vec<Cluster<T>>, LayoutError>
where
    T: Clone + Eq + Hash,
{
    OverlapClusterDetector::new().detect(events)
}
