//! Column assignment and expansion within one cluster.

use serde::{Deserialize, Serialize};

use super::fit_tree::FitTree;
use crate::error::LayoutError;
use crate::interval::{validated_sorted, IntervalModel};

/// Where one event sits inside its cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement<T> {
    #[serde(rename = "id")]
    pub reference: T,
    pub start_column: usize,
    pub end_column: usize,
    /// Column count of the whole cluster
    pub divisor: usize,
}

impl<T> Placement<T> {
    /// Number of columns covered
    pub fn span(&self) -> usize {
        self.end_column - self.start_column + 1
    }
}

/// Final layout of one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ClusterLayout<T> {
    pub divisor: usize,
    pub placements: Vec<Placement<T>>,
    /// Events dropped by an overflow policy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden: Vec<T>,
}

impl<T: PartialEq> ClusterLayout<T> {
    pub fn placement_of(&self, reference: &T) -> Option<&Placement<T>> {
        self.placements.iter().find(|p| &p.reference == reference)
    }
}

/// Columns picked greedily for a cluster, before expansion.
#[derive(Debug, Clone)]
pub struct ColumnAssignment<T> {
    members: Vec<IntervalModel<T>>,
    tree: FitTree,
}

impl<T: Clone> ColumnAssignment<T> {
    pub fn divisor(&self) -> usize {
        self.tree.divisor()
    }

    /// Single-column placements, one per event in start order.
    pub fn placements(&self) -> Vec<Placement<T>> {
        to_placements(&self.members, &self.tree)
    }
}

/// Greedy first-fit column assigner
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnAssigner;

impl ColumnAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Give every event of `cluster` a column: reuse a column whose committed
    /// events all end before this one starts, otherwise open the next column.
    ///
    /// The result is an upper bound on the columns needed, not an optimal
    /// colouring.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidInterval`] if any event has `start > end`.
    pub fn assign<T: Clone>(
        &self,
        cluster: &[IntervalModel<T>],
    ) -> Result<ColumnAssignment<T>, LayoutError> {
        let members = validated_sorted(cluster)?;
        let mut tree = FitTree::with_capacity(members.len());
        for member in &members {
            tree.insert(member.start, member.end);
        }
        tracing::debug!(
            events = members.len(),
            divisor = tree.divisor(),
            "assigned columns"
        );
        Ok(ColumnAssignment { members, tree })
    }
}

/// Widens assigned events into free columns to their right
#[derive(Debug, Default, Clone, Copy)]
pub struct ColumnExpander;

impl ColumnExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand<T: Clone>(&self, assignment: ColumnAssignment<T>) -> ClusterLayout<T> {
        let ColumnAssignment { members, mut tree } = assignment;
        tree.expand();
        ClusterLayout {
            divisor: tree.divisor(),
            placements: to_placements(&members, &tree),
            hidden: Vec::new(),
        }
    }
}

fn to_placements<T: Clone>(members: &[IntervalModel<T>], tree: &FitTree) -> Vec<Placement<T>> {
    let divisor = tree.divisor();
    members
        .iter()
        .zip(&tree.nodes)
        .map(|(member, node)| Placement {
            reference: member.reference.clone(),
            start_column: node.start_column,
            end_column: node.end_column,
            divisor,
        })
        .collect()
}

/// Assign and expand in one go.
///
/// # Errors
/// Returns [`LayoutError::InvalidInterval`] if any event has `start > end`.
pub fn layout_cluster<T: Clone>(
    cluster: &[IntervalModel<T>],
) -> Result<ClusterLayout<T>, LayoutError> {
    let assignment = ColumnAssigner::new().assign(cluster)?;
    Ok(ColumnExpander::new().expand(assignment))
}
